//! The graph resolution engine.
//!
//! Feature values are not stored on elements; they are reachable only by
//! walking chains of ownership and relationship edges. The functions here
//! perform those walks deterministically and degrade every internal failure
//! to `None` with a diagnostic; a single unresolvable feature must never
//! abort a batch.

pub mod expr;
pub mod features;
pub mod metadata;
pub mod value;
pub mod walker;

pub use features::{FeatureRow, collect_feature_rows};
pub use value::{ResolvedValue, describe_feature_value, resolve_feature_value};
