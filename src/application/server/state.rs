use crate::models::common::StatusPolicy;
use crate::services::lookup::LookupService;

/// Read-only state shared by every request handler.
#[derive(Debug, Clone)]
pub struct AppState {
    pub lookup: LookupService,
    pub status_policy: StatusPolicy,
}
