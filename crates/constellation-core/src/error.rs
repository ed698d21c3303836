//! The canonical error taxonomy (spec §4.7).
//!
//! `CoreError` variants are sentinels: handlers wrap them with context
//! strings but never synthesize a bare `Internal` for a recognized kind.
//! The mapping onto RPC status codes lives in the NBI crate, which is the
//! only layer that knows about a transport.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("platform already exists: {0}")]
    PlatformExists(String),
    #[error("platform not found: {0}")]
    PlatformNotFound(String),
    #[error("platform in use: {0}")]
    PlatformInUse(String),
    #[error("invalid platform: {0}")]
    InvalidPlatform(String),

    #[error("node already exists: {0}")]
    NodeExists(String),
    #[error("node not found: {0}")]
    NodeNotFound(String),
    #[error("node in use: {0}")]
    NodeInUse(String),
    #[error("invalid node: {0}")]
    InvalidNode(String),

    #[error("interface already exists: {0}")]
    InterfaceExists(String),
    #[error("interface not found: {0}")]
    InterfaceNotFound(String),
    #[error("interface in use: {0}")]
    InterfaceInUse(String),
    #[error("invalid interface: {0}")]
    InvalidInterface(String),
    #[error("interface reference could not be resolved: {0}")]
    InterfaceMiss(String),

    #[error("transceiver not found: {0}")]
    TransceiverNotFound(String),

    #[error("link already exists: {0}")]
    LinkExists(String),
    #[error("link not found: {0}")]
    LinkNotFound(String),
    #[error("invalid link: {0}")]
    InvalidLink(String),

    #[error("service request already exists: {0}")]
    ServiceRequestExists(String),
    #[error("service request not found: {0}")]
    ServiceRequestNotFound(String),
    #[error("invalid service request: {0}")]
    InvalidServiceRequest(String),
    #[error("invalid scheduling domain: {0}")]
    DomainInvalid(String),

    #[error("invalid entity: {0}")]
    InvalidEntity(String),

    #[error("scenario state not configured")]
    ScenarioNotConfigured,

    #[error("internal error: {0}")]
    Internal(String),
}

/// The RPC status class each [`CoreError`] maps onto (spec §4.7), expressed
/// independent of any specific transport's status code enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    NotFound,
    InvalidArgument,
    FailedPrecondition,
    AlreadyExists,
    Internal,
}

impl CoreError {
    pub fn status_class(&self) -> StatusClass {
        use CoreError::*;
        match self {
            PlatformNotFound(_) | NodeNotFound(_) | InterfaceNotFound(_) | LinkNotFound(_)
            | ServiceRequestNotFound(_) => StatusClass::NotFound,

            InvalidEntity(_)
            | InvalidPlatform(_)
            | InvalidNode(_)
            | InvalidInterface(_)
            | InvalidLink(_)
            | InvalidServiceRequest(_)
            | TransceiverNotFound(_)
            | InterfaceMiss(_)
            | DomainInvalid(_) => StatusClass::InvalidArgument,

            PlatformInUse(_) | NodeInUse(_) | InterfaceInUse(_) => StatusClass::FailedPrecondition,

            PlatformExists(_) | NodeExists(_) | InterfaceExists(_) | ServiceRequestExists(_)
            | LinkExists(_) => StatusClass::AlreadyExists,

            ScenarioNotConfigured => StatusClass::FailedPrecondition,

            Internal(_) => StatusClass::Internal,
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_variants_map_correctly() {
        assert_eq!(
            CoreError::NodeNotFound("n1".into()).status_class(),
            StatusClass::NotFound
        );
    }

    #[test]
    fn exists_variants_map_correctly() {
        assert_eq!(
            CoreError::LinkExists("l1".into()).status_class(),
            StatusClass::AlreadyExists
        );
    }

    #[test]
    fn in_use_variants_map_to_failed_precondition() {
        assert_eq!(
            CoreError::PlatformInUse("p1".into()).status_class(),
            StatusClass::FailedPrecondition
        );
    }
}
