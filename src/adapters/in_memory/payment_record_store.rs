// In memory implementation of the PaymentRecordStore port.
//
// Same shape as the job store adapter: RwLock-backed map, snapshot fan-out on
// commit, offline toggle for failure-path tests. Records are append-mostly,
// so there is no update path.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::{RwLock, watch};

use crate::core::payment_record::PaymentRecord;
use crate::core::ports::{PaymentRecordStore, StoreError};

pub struct InMemoryPaymentRecordStore {
    inner: RwLock<HashMap<String, PaymentRecord>>,
    tx: watch::Sender<Vec<PaymentRecord>>,
    offline: AtomicBool,
}

impl InMemoryPaymentRecordStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Vec::new());
        Self {
            inner: RwLock::new(HashMap::new()),
            tx,
            offline: AtomicBool::new(false),
        }
    }

    pub fn toggle_offline(&self) {
        self.offline.fetch_xor(true, Ordering::SeqCst);
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("payment record store offline".into()));
        }
        Ok(())
    }

    fn snapshot(guard: &HashMap<String, PaymentRecord>) -> Vec<PaymentRecord> {
        let mut records: Vec<PaymentRecord> = guard.values().cloned().collect();
        records.sort_by(|a, b| b.paid_at.cmp(&a.paid_at).then_with(|| b.id.cmp(&a.id)));
        records
    }
}

impl Default for InMemoryPaymentRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PaymentRecordStore for InMemoryPaymentRecordStore {
    async fn insert(&self, record: PaymentRecord) -> Result<(), StoreError> {
        self.check_online()?;
        let mut guard = self.inner.write().await;
        guard.insert(record.id.clone(), record);
        let _ = self.tx.send(Self::snapshot(&guard));
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<PaymentRecord, StoreError> {
        self.check_online()?;
        let guard = self.inner.read().await;
        guard
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })
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

    async fn list(&self) -> Result<Vec<PaymentRecord>, StoreError> {
        self.check_online()?;
        let guard = self.inner.read().await;
        Ok(Self::snapshot(&guard))
    }

    async fn list_for_job(&self, job_id: &str) -> Result<Vec<PaymentRecord>, StoreError> {
        self.check_online()?;
        let guard = self.inner.read().await;
        let mut records: Vec<PaymentRecord> = guard
            .values()
            .filter(|r| r.job_id == job_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.paid_at.cmp(&a.paid_at).then_with(|| b.id.cmp(&a.id)));
        Ok(records)
    }

    fn subscribe(&self) -> watch::Receiver<Vec<PaymentRecord>> {
        self.tx.subscribe()
    }
}
