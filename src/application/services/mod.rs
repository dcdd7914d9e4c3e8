mod orchestrator;
mod retry_policy;
mod review_adapter;
mod upload_service;

pub use orchestrator::{Orchestrator, OrchestratorError, RequestPhase};
pub use retry_policy::RetryPolicy;
pub use review_adapter::{ReviewAdapter, ReviewAdapterError};
pub use upload_service::{UploadError, UploadService};
