use crate::config::{LoggingConfig, Section};
use std::{
    collections::HashMap,
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    filter::{FilterFn, Targets},
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    Layer, Registry,
};

use file_rotate::{
    compression::Compression,
    suffix::{AppendCount, FileLimit},
    ContentLimit, FileRotate,
};

const DEFAULT_SECTION: &str = "default";

fn parse_level(s: &str) -> LevelFilter {
    match s.trim().to_ascii_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" | "" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        "off" | "none" => LevelFilter::OFF,
        _ => LevelFilter::INFO,
    }
}

/// Returns true if target == prefix or target starts with "prefix::"
fn matches_prefix(target: &str, prefix: &str) -> bool {
    target == prefix
        || (target.starts_with(prefix) && target[prefix.len()..].starts_with("::"))
}

// -------- rotating file writer --------

type SharedRotate = Arc<Mutex<FileRotate<AppendCount>>>;

#[derive(Clone)]
struct FileSink(SharedRotate);

impl Write for FileSink {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        match self.0.lock() {
            Ok(mut f) => f.write(buf),
            Err(_) => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        match self.0.lock() {
            Ok(mut f) => f.flush(),
            Err(_) => Ok(()),
        }
    }
}

/// Writer that drops everything; used for records without a destination file.
struct Discard;

impl Write for Discard {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Routes each record to the file of the most specific matching subsystem,
/// falling back to the default file.
#[derive(Clone, Default)]
struct FileRouter {
    default: Option<SharedRotate>,
    by_prefix: Vec<(String, SharedRotate)>,
}

impl FileRouter {
    fn resolve(&self, target: &str) -> Option<SharedRotate> {
        self.by_prefix
            .iter()
            .filter(|(prefix, _)| matches_prefix(target, prefix))
            .max_by_key(|(prefix, _)| prefix.len())
            .map(|(_, w)| w.clone())
            .or_else(|| self.default.clone())
    }

    fn is_empty(&self) -> bool {
        self.default.is_none() && self.by_prefix.is_empty()
    }
}

impl<'a> fmt::MakeWriter<'a> for FileRouter {
    type Writer = Box<dyn Write + 'a>;

    fn make_writer(&'a self) -> Self::Writer {
        match &self.default {
            Some(w) => Box::new(FileSink(w.clone())),
            None => Box::new(Discard),
        }
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        match self.resolve(meta.target()) {
            Some(w) => Box::new(FileSink(w)),
            None => Box::new(Discard),
        }
    }
}

/// Resolve a log file path against `base_dir`.
/// Absolute paths are kept as-is; relative paths are joined with `base_dir`.
fn resolve_log_path(file: &str, base_dir: &Path) -> PathBuf {
    let p = Path::new(file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

fn open_rotating(section: &Section, base_dir: &Path) -> std::io::Result<Option<SharedRotate>> {
    if section.file.trim().is_empty() {
        return Ok(None);
    }
    let path = resolve_log_path(&section.file, base_dir);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let max_bytes = section.max_size_mb.unwrap_or(100) * 1024 * 1024;
    let rot = FileRotate::new(
        &path,
        AppendCount::new(section.max_backups.unwrap_or(3)),
        ContentLimit::BytesSurpassed(max_bytes as usize),
        Compression::None,
        #[cfg(unix)]
        None,
    );
    Ok(Some(Arc::new(Mutex::new(rot))))
}

// -------- filters --------

/// Per-subsystem levels plus a catch-all for everything else.
struct LevelPlan {
    default: LevelFilter,
    subsystems: Vec<(String, LevelFilter)>,
}

impl LevelPlan {
    fn console(cfg: &LoggingConfig) -> Self {
        Self::build(cfg, |s| parse_level(&s.console_level))
    }

    fn file(cfg: &LoggingConfig) -> Self {
        Self::build(cfg, |s| {
            if s.file.trim().is_empty() {
                LevelFilter::OFF
            } else {
                parse_level(&s.file_level)
            }
        })
    }

    fn build(cfg: &LoggingConfig, level_of: impl Fn(&Section) -> LevelFilter) -> Self {
        let default = cfg
            .get(DEFAULT_SECTION)
            .map(&level_of)
            .unwrap_or(LevelFilter::INFO);
        let subsystems = cfg
            .iter()
            .filter(|(k, _)| k.as_str() != DEFAULT_SECTION)
            .map(|(k, s)| (k.clone(), level_of(s)))
            .collect();
        Self {
            default,
            subsystems,
        }
    }

    fn into_targets(self) -> Targets {
        self.subsystems
            .into_iter()
            .fold(Targets::new().with_default(self.default), |t, (name, lvl)| {
                t.with_target(name, lvl)
            })
    }
}

// -------- public init --------

/// Initialize logging from a configuration.
/// - `cfg`: LoggingConfig containing the logging sections
/// - `base_dir`: base directory used to resolve relative log file paths
pub fn init_logging_from_config(cfg: &LoggingConfig, base_dir: &Path) {
    // Bridge `log` → `tracing` *before* installing the subscriber
    let _ = tracing_log::LogTracer::init();

    if cfg.is_empty() {
        init_default_logging();
        return;
    }

    let router = build_file_router(cfg, base_dir);
    let ansi = atty::is(atty::Stream::Stdout);

    let console_layer = fmt::layer()
        .with_ansi(ansi)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_filter(LevelPlan::console(cfg).into_targets());

    if router.is_empty() {
        let _ = Registry::default().with(console_layer).try_init();
        return;
    }

    let file_layer = fmt::layer()
        .json()
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_writer(router.clone())
        .with_filter(LevelPlan::file(cfg).into_targets())
        // subsystems without their own file only reach the default file
        .with_filter(FilterFn::new(move |meta: &tracing::Metadata<'_>| {
            router.resolve(meta.target()).is_some()
        }));

    let _ = Registry::default()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

fn init_default_logging() {
    let _ = fmt()
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .try_init();
}

fn build_file_router(cfg: &LoggingConfig, base_dir: &Path) -> FileRouter {
    let mut router = FileRouter::default();
    let mut seen: HashMap<PathBuf, SharedRotate> = HashMap::new();

    for (name, section) in cfg {
        let path = resolve_log_path(&section.file, base_dir);
        // Sections sharing one file share one writer
        let writer = match seen.get(&path) {
            Some(w) if !section.file.trim().is_empty() => Some(w.clone()),
            _ => match open_rotating(section, base_dir) {
                Ok(w) => w,
                Err(e) => {
                    eprintln!(
                        "Failed to init log file for '{}': {} ({})",
                        name,
                        path.to_string_lossy(),
                        e
                    );
                    None
                }
            },
        };
        let Some(writer) = writer else { continue };
        seen.insert(path, writer.clone());

        if name == DEFAULT_SECTION {
            router.default = Some(writer);
        } else {
            router.by_prefix.push((name.clone(), writer));
        }
    }

    router
}
