pub mod document_session;
pub mod session_ctx;

pub use document_session::{DocumentSession, StagePhase};
pub use session_ctx::SessionCtx;
