use metrics_exporter_prometheus::PrometheusHandle;
use receipt_points::receipts::{Points, PointsRepository, ReceiptId, RepositoryError};
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-lifetime points store. Nothing survives a restart.
#[derive(Default, Clone)]
pub(crate) struct InMemoryPointsRepository {
    points: Arc<Mutex<PointsTable>>,
}

type PointsTable = HashMap<ReceiptId, Points>;

impl InMemoryPointsRepository {
    fn guard(&self) -> Result<MutexGuard<'_, PointsTable>, RepositoryError> {
        self.points
            .lock()
            .map_err(|_| RepositoryError::Unavailable("points store mutex poisoned".to_string()))
    }

    pub(crate) fn len(&self) -> Result<usize, RepositoryError> {
        Ok(self.guard()?.len())
    }
}

impl PointsRepository for InMemoryPointsRepository {
    fn insert(&self, id: ReceiptId, points: Points) -> Result<(), RepositoryError> {
        let mut guard = self.guard()?;
        if guard.contains_key(&id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(id, points);
        Ok(())
    }

    fn fetch(&self, id: &ReceiptId) -> Result<Option<Points>, RepositoryError> {
        Ok(self.guard()?.get(id).copied())
    }
}
