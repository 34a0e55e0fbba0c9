#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use session_bootstrap::contract::model::{AuthToken, DirectoryEntry, Role, UserFilter};
use session_bootstrap::domain::error::DomainError;
use session_bootstrap::domain::ports::DirectoryBackend;

pub fn entry(id: &str, online: bool, role: &str) -> DirectoryEntry {
    DirectoryEntry {
        id: id.to_string(),
        online,
        role: Role::from(role),
    }
}

pub fn offline_user(id: &str) -> DirectoryEntry {
    entry(id, false, "user")
}

/// In-memory directory with scriptable failures and latency.
#[derive(Default)]
pub struct FakeBackend {
    entries: Mutex<Vec<DirectoryEntry>>,
    failing_deletes: HashSet<String>,
    slow_deletes: HashSet<String>,
    query_error: Option<DomainError>,
    token_error: Option<DomainError>,
    latency: Duration,

    pub token_calls: AtomicUsize,
    pub query_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    deleted: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(mut self, entries: Vec<DirectoryEntry>) -> Self {
        self.entries = Mutex::new(entries);
        self
    }

    pub fn failing_delete(mut self, id: &str) -> Self {
        self.failing_deletes.insert(id.to_string());
        self
    }

    /// Deletes of `id` hang for an hour.
    pub fn hanging_delete(mut self, id: &str) -> Self {
        self.slow_deletes.insert(id.to_string());
        self
    }

    pub fn failing_query(mut self, error: DomainError) -> Self {
        self.query_error = Some(error);
        self
    }

    pub fn failing_token(mut self, error: DomainError) -> Self {
        self.token_error = Some(error);
        self
    }

    /// Latency applied to every call.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn deleted(&self) -> Vec<String> {
        let mut ids = self.deleted.lock().unwrap().clone();
        ids.sort();
        ids
    }

    pub fn remaining(&self) -> Vec<DirectoryEntry> {
        self.entries.lock().unwrap().clone()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    async fn pause(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl DirectoryBackend for FakeBackend {
    async fn create_token(&self, user_id: &str) -> Result<AuthToken, DomainError> {
        self.token_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        if let Some(e) = &self.token_error {
            return Err(e.clone());
        }
        Ok(AuthToken::new(format!("token-for-{user_id}")))
    }

    async fn query_users(&self, _filter: &UserFilter) -> Result<Vec<DirectoryEntry>, DomainError> {
        self.query_calls.fetch_add(1, Ordering::SeqCst);
        self.pause().await;
        if let Some(e) = &self.query_error {
            return Err(e.clone());
        }
        Ok(self.entries.lock().unwrap().clone())
    }

    async fn delete_user(&self, user_id: &str) -> Result<(), DomainError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        self.pause().await;
        if self.slow_deletes.contains(user_id) {
            tokio::time::sleep(Duration::from_secs(3600)).await;
        }

        let result = if self.failing_deletes.contains(user_id) {
            Err(DomainError::backend("delete_user", "HTTP 500: boom"))
        } else {
            self.entries.lock().unwrap().retain(|e| e.id != user_id);
            self.deleted.lock().unwrap().push(user_id.to_string());
            Ok(())
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}
