use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use talent_ai::workflows::screening::{
    ApplicationId, ApplicationRecord, ApplicationRepository, AuditEntry, AuditError, AuditLog,
    RepositoryError,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationRepository {
    records: Arc<Mutex<HashMap<ApplicationId, ApplicationRecord>>>,
}

impl ApplicationRepository for InMemoryApplicationRepository {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ApplicationRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn find_pending(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.awaits_screening())
            .cloned()
            .collect())
    }

    fn list(&self) -> Result<Vec<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryAuditLog {
    entries: Arc<Mutex<Vec<AuditEntry>>>,
}

impl AuditLog for InMemoryAuditLog {
    fn append(&self, entry: AuditEntry) -> Result<(), AuditError> {
        let mut guard = self.entries.lock().expect("audit mutex poisoned");
        guard.push(entry);
        Ok(())
    }

    fn timeline(&self, id: &ApplicationId) -> Result<Vec<AuditEntry>, AuditError> {
        let guard = self.entries.lock().expect("audit mutex poisoned");
        Ok(guard
            .iter()
            .filter(|entry| &entry.application_id == id)
            .cloned()
            .collect())
    }
}
