//! The build-and-validate engine.
//!
//! # Module Structure
//!
//! - `draft`: the working draft and applied-module records
//! - `error`: build errors (severity-classified)
//! - `session`: the state machine and its commands
//! - `validate`: read-only checks run before any mutation

mod draft;
mod error;
mod session;
mod validate;

#[cfg(test)]
mod tests;

pub use draft::{
    AbilityKind, AppliedEffect, AppliedModule, BuildDraft, ModuleTarget, WorkingDie,
};
pub use error::BuildError;
pub use session::{AddModuleOutcome, BuildPhase, BuildSession, FinalizedAbility};
