//! HTTP plumbing against a SysMLv2-compatible model server.
//!
//! All remote reads and the single write path live here. The resolution
//! engine in [`crate::resolve`] only ever talks to the store through
//! [`Session`].

mod elements;
mod projects;
mod query;
mod scope;
mod session;

pub use projects::{CommitRecord, Project};
pub use query::QueryInput;
pub use scope::ModelScope;
pub use session::Session;
