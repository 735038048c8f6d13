//! Test doubles for the cache and store ports.

use crate::cache::CachePort;
use async_trait::async_trait;
use mockall::mock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use traffic_cop_core::{StoreRow, TrafficCopError, TrafficCopResult, UserId};
use traffic_cop_repository::StorePort;

mock! {
    pub Store {}

    #[async_trait]
    impl StorePort for Store {
        async fn query_by_user_id(&self, user_id: &UserId) -> TrafficCopResult<Vec<StoreRow>>;
        async fn ping(&self) -> TrafficCopResult<()>;
    }
}

/// In-memory cache that records every write.
pub struct RecordingCache {
    entries: Mutex<HashMap<String, String>>,
    writes: Mutex<Vec<(String, String)>>,
    get_calls: AtomicUsize,
    set_attempts: AtomicUsize,
    fail_gets: bool,
    fail_sets: bool,
    connected: AtomicBool,
}

impl RecordingCache {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            writes: Mutex::new(Vec::new()),
            get_calls: AtomicUsize::new(0),
            set_attempts: AtomicUsize::new(0),
            fail_gets: false,
            fail_sets: false,
            connected: AtomicBool::new(true),
        }
    }

    pub fn with_entry(self, key: &str, value: &str) -> Self {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Every `get` fails as if the connection was refused.
    pub fn refusing(mut self) -> Self {
        self.fail_gets = true;
        self.connected.store(false, Ordering::Relaxed);
        self
    }

    pub fn failing_sets(mut self) -> Self {
        self.fail_sets = true;
        self
    }

    pub fn disconnected(self) -> Self {
        self.connected.store(false, Ordering::Relaxed);
        self
    }

    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn set_attempts(&self) -> usize {
        self.set_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CachePort for RecordingCache {
    async fn get(&self, key: &str) -> TrafficCopResult<Option<String>> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_gets {
            return Err(TrafficCopError::cache("Connection refused"));
        }
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> TrafficCopResult<()> {
        self.set_attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_sets {
            return Err(TrafficCopError::cache("Write rejected"));
        }
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        self.writes
            .lock()
            .unwrap()
            .push((key.to_string(), value.to_string()));
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Relaxed)
    }
}
