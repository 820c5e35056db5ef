// In memory implementation of the JobStore port.
//
// Purpose
// - Support engine tests and local development without a real backend.
//
// Responsibilities
// - Store job documents in memory, keyed by id.
// - Push a fresh snapshot (newest creation first) to subscribers after every
//   committed mutation, like the real store's real-time fan-out.
//
// Test hooks
// - `toggle_offline` makes every call fail with a backend error.
// - `fail_next_update` fails exactly one update, for exercising the gap
//   between the two writes of a multi-step operation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::{RwLock, watch};

use crate::core::job::Job;
use crate::core::ports::{JobStore, StoreError};

pub struct InMemoryJobStore {
    inner: RwLock<HashMap<String, Job>>,
    tx: watch::Sender<Vec<Job>>,
    offline: AtomicBool,
    fail_next_update: AtomicBool,
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Vec::new());
        Self {
            inner: RwLock::new(HashMap::new()),
            tx,
            offline: AtomicBool::new(false),
            fail_next_update: AtomicBool::new(false),
        }
    }

    pub fn toggle_offline(&self) {
        self.offline.fetch_xor(true, Ordering::SeqCst);
    }

    pub fn fail_next_update(&self) {
        self.fail_next_update.store(true, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("job store offline".into()));
        }
        Ok(())
    }

    fn snapshot(guard: &HashMap<String, Job>) -> Vec<Job> {
        let mut jobs: Vec<Job> = guard.values().cloned().collect();
        jobs.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| b.id.cmp(&a.id)));
        jobs
    }
}

impl Default for InMemoryJobStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn insert(&self, job: Job) -> Result<(), StoreError> {
        self.check_online()?;
        let mut guard = self.inner.write().await;
        guard.insert(job.id.clone(), job);
        let _ = self.tx.send(Self::snapshot(&guard));
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Job, StoreError> {
        self.check_online()?;
        let guard = self.inner.read().await;
        guard
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
    }

    async fn update(&self, job: Job) -> Result<(), StoreError> {
        self.check_online()?;
        if self.fail_next_update.swap(false, Ordering::SeqCst) {
            return Err(StoreError::Backend("job store update failed".into()));
        }
        let mut guard = self.inner.write().await;
        if !guard.contains_key(&job.id) {
            return Err(StoreError::NotFound { id: job.id });
        }
        guard.insert(job.id.clone(), job);
        let _ = self.tx.send(Self::snapshot(&guard));
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.check_online()?;
        let mut guard = self.inner.write().await;
        if guard.remove(id).is_none() {
            return Err(StoreError::NotFound { id: id.to_string() });
        }
        let _ = self.tx.send(Self::snapshot(&guard));
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Job>, StoreError> {
        self.check_online()?;
        let guard = self.inner.read().await;
        Ok(Self::snapshot(&guard))
    }

    fn subscribe(&self) -> watch::Receiver<Vec<Job>> {
        self.tx.subscribe()
    }
}
