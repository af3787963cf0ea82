//! Catalog availability errors.

use crate::error::{CoreError, ErrorSeverity};

/// A required catalog was not injected.
///
/// The engine is entitled to assume catalogs are present and well-formed;
/// hitting one of these at runtime is a wiring bug, not a player error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CatalogError {
    #[error("base catalog not available")]
    BasesNotAvailable,

    #[error("module catalog not available")]
    ModulesNotAvailable,

    #[error("passive catalog not available")]
    PassivesNotAvailable,
}

impl CoreError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::BasesNotAvailable => "CATALOG_BASES_NOT_AVAILABLE",
            Self::ModulesNotAvailable => "CATALOG_MODULES_NOT_AVAILABLE",
            Self::PassivesNotAvailable => "CATALOG_PASSIVES_NOT_AVAILABLE",
        }
    }
}
