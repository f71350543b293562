use std::sync::Arc;

use crate::config::Config;
use crate::retry::RetryPolicy;
use crate::session::IdentityProvider;
use crate::storage::ObjectStore;
use crate::store::{JobStore, ResumeStore, UserStore};

/// Shared application state injected into all route handlers via Axum extractors.
/// Every external service sits behind a trait object so handlers can run
/// against in-memory doubles.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub resumes: Arc<dyn ResumeStore>,
    pub jobs: Arc<dyn JobStore>,
    pub objects: Arc<dyn ObjectStore>,
    pub identity: Arc<dyn IdentityProvider>,
    /// Governs the storage step of the resume upload sequence.
    pub upload_retry: RetryPolicy,
    pub config: Config,
}
