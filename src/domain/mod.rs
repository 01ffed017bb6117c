//! Domain logic - pure qualifier rules independent of git and the filesystem

pub mod qualifier;
pub mod source_state;

pub use qualifier::{compute_qualifier, QualifierTemplate, PLACEHOLDER};
pub use source_state::SourceState;
