//! Data Client Error Hierarchy
//!
//! The façade adds no error kinds of its own: every variant below is raised by
//! a stub, a callable, or settings loading, and travels to the caller as-is.

use config::ConfigError;
use tokio::task::JoinError;
use tonic::Code;
use tonic::Status;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// RPC failure reported by the stub (gRPC status taxonomy)
    #[error(transparent)]
    Status(#[from] Status),

    /// Stream or future cancelled by the caller
    #[error("Call cancelled by caller")]
    Cancelled,

    /// Callable invoked after its stub was closed
    #[error("Stub is closed")]
    StubClosed,

    /// Spawned call panicked before producing a result
    #[error("Background call failed: {0}")]
    Join(#[from] JoinError),

    /// Settings could not be loaded or failed validation
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// Status code equivalent of this error.
    pub fn code(&self) -> Code {
        match self {
            Error::Status(status) => status.code(),
            Error::Cancelled => Code::Cancelled,
            Error::StubClosed => Code::Unavailable,
            Error::Join(_) => Code::Internal,
            Error::Config(_) => Code::InvalidArgument,
        }
    }
}
