mod commits;
mod common;
mod elements;
mod features;
mod init;
mod projects;
mod set_value;
mod validate;
mod value;

pub use commits::{CommitsArgs, list_commits};
pub use elements::{ElementsArgs, list_elements};
pub use features::{FeaturesArgs, export_features};
pub use init::{InitArgs, init_config};
pub use projects::{ProjectsArgs, list_projects};
pub use set_value::{SetValueArgs, set_feature_value};
pub use validate::{ValidateArgs, validate_config};
pub use value::{ValueArgs, query_feature_value};
