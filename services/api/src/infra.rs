use matchmaker::config::EvaluationSettings;
use matchmaker::workflows::evaluation::{EvaluationConfig, MatchEvaluator, RequirementMode};
use matchmaker::workflows::library::{LibraryError, TraitLibrary};
use matchmaker::workflows::session::{
    CaseId, CaseRecord, CaseRepository, CaseStatus, RepositoryError,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Catalog and default evaluator shared by the stateless evaluation endpoint.
#[derive(Clone)]
pub(crate) struct EvaluationState {
    pub(crate) library: Arc<TraitLibrary>,
    pub(crate) evaluator: MatchEvaluator,
}

impl EvaluationState {
    pub(crate) fn new(library: Arc<TraitLibrary>, config: EvaluationConfig) -> Self {
        Self {
            library,
            evaluator: MatchEvaluator::new(config),
        }
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryCaseRepository {
    records: Arc<Mutex<BTreeMap<CaseId, CaseRecord>>>,
}

impl CaseRepository for InMemoryCaseRepository {
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
        if guard.contains_key(&record.case_id) {
            guard.insert(record.case_id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &CaseId) -> Result<Option<CaseRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn pending(&self, limit: usize) -> Result<Vec<CaseRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| record.status != CaseStatus::Decided)
            .take(limit)
            .cloned()
            .collect())
    }
}

/// Loads the catalog from `path`, or the bundled demo catalog when no path is given.
pub(crate) fn load_library(path: Option<&Path>) -> Result<TraitLibrary, LibraryError> {
    let library = match path {
        Some(path) => TraitLibrary::from_path(path)?,
        None => TraitLibrary::demo()?,
    };
    let source = path
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "demo".to_string());
    info!(%source, traits = library.len(), "trait library loaded");
    Ok(library)
}

pub(crate) fn load_configured_library(
    settings: &EvaluationSettings,
) -> Result<TraitLibrary, LibraryError> {
    load_library(settings.library_path.as_deref())
}

pub(crate) fn parse_mode(raw: &str) -> Result<RequirementMode, String> {
    raw.parse::<RequirementMode>()
        .map_err(|err| err.to_string())
}
