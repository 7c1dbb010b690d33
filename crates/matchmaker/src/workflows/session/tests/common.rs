use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use axum::response::Response;
use serde_json::Value;

use crate::workflows::evaluation::{EvaluationConfig, Gender, RequirementMode};
use crate::workflows::library::{CaseDocument, TraitLibrary};
use crate::workflows::session::domain::{CaseId, CaseStatus};
use crate::workflows::session::repository::{CaseRecord, CaseRepository, RepositoryError};
use crate::workflows::session::{session_router, ReviewSession};

pub(super) fn library() -> Arc<TraitLibrary> {
    Arc::new(TraitLibrary::demo().expect("demo library parses"))
}

pub(super) fn matching_case() -> CaseDocument {
    CaseDocument::demo().expect("demo case parses")
}

pub(super) fn mismatched_case() -> CaseDocument {
    let mut case = matching_case();
    case.candidate.gender = Gender::Female;
    case
}

pub(super) fn unknown_trait_case() -> CaseDocument {
    let mut case = matching_case();
    case.candidate
        .traits
        .personality
        .push("Telepathic".to_string());
    case
}

pub(super) fn inverted_age_case() -> CaseDocument {
    let mut case = matching_case();
    case.criteria.min_age = 40;
    case.criteria.max_age = 30;
    case
}

pub(super) fn session_with<R>(repository: Arc<R>) -> ReviewSession<R>
where
    R: CaseRepository + 'static,
{
    ReviewSession::new(
        library(),
        repository,
        EvaluationConfig::new(RequirementMode::ExplicitThreshold),
    )
}

pub(super) fn build_session() -> (ReviewSession<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let session = session_with(repository.clone());
    (session, repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) records: Arc<Mutex<HashMap<CaseId, CaseRecord>>>,
}

impl CaseRepository for MemoryRepository {
    fn insert(&self, record: CaseRecord) -> Result<CaseRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.case_id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.case_id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: CaseRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.case_id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &CaseId) -> Result<Option<CaseRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn pending(&self, limit: usize) -> Result<Vec<CaseRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        let mut pending: Vec<CaseRecord> = guard
            .values()
            .filter(|record| record.status != CaseStatus::Decided)
            .cloned()
            .collect();
        pending.sort_by(|a, b| a.case_id.cmp(&b.case_id));
        pending.truncate(limit);
        Ok(pending)
    }
}

/// Memory repository whose reads linger, tracking how many overlap.
#[derive(Default, Clone)]
pub(super) struct SlowReadRepository {
    pub(super) inner: MemoryRepository,
    in_flight: Arc<AtomicUsize>,
    pub(super) max_in_flight: Arc<AtomicUsize>,
}

impl CaseRepository for SlowReadRepository {
    fn insert(&self, record: CaseRecord) -> Result<CaseRecord, RepositoryError> {
        self.inner.insert(record)
    }

    fn update(&self, record: CaseRecord) -> Result<(), RepositoryError> {
        self.inner.update(record)
    }

    fn fetch(&self, id: &CaseId) -> Result<Option<CaseRecord>, RepositoryError> {
        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);
        let record = self.inner.fetch(id);
        thread::sleep(Duration::from_millis(30));
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        record
    }

    fn pending(&self, limit: usize) -> Result<Vec<CaseRecord>, RepositoryError> {
        self.inner.pending(limit)
    }
}

pub(super) struct ConflictRepository;

impl CaseRepository for ConflictRepository {
    fn insert(&self, _record: CaseRecord) -> Result<CaseRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: CaseRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &CaseId) -> Result<Option<CaseRecord>, RepositoryError> {
        Ok(None)
    }

    fn pending(&self, _limit: usize) -> Result<Vec<CaseRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl CaseRepository for UnavailableRepository {
    fn insert(&self, _record: CaseRecord) -> Result<CaseRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: CaseRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &CaseId) -> Result<Option<CaseRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn pending(&self, _limit: usize) -> Result<Vec<CaseRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 16 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn session_router_with(session: ReviewSession<MemoryRepository>) -> axum::Router {
    session_router(Arc::new(session))
}
