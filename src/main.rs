//! A tool to query and resolve feature values from SysMLv2 model repositories.
//!
//! # Overview
//!
//! `sysml-probe` talks to a SysMLv2-compatible model server over REST. Models
//! are stored as graphs of elements connected by typed relationships, and
//! scalar feature values are not stored on the elements themselves; they are
//! only reachable by walking chains of ownership and relationship edges.
//! This tool performs those walks for you and projects the results into flat,
//! usable output, tolerating the shape inconsistencies and partial graph
//! corruption real stores exhibit.
//!
//! # Quick Start
//!
//! List the projects on a server:
//!
//! ```bash
//! sysml-probe projects --server http://localhost:9000
//! ```
//!
//! List a project's commits:
//!
//! ```bash
//! sysml-probe commits --server http://localhost:9000 --project <PROJECT-ID>
//! ```
//!
//! Resolve every attribute tagged with a domain and export the values as CSV:
//!
//! ```bash
//! sysml-probe features --server http://localhost:9000 \
//!   --project <PROJECT-ID> --commit <COMMIT-ID> \
//!   --domain Mechanics --csv mechanics.csv
//! ```
//!
//! Resolve a single feature value:
//!
//! ```bash
//! sysml-probe value <ELEMENT-ID> --server http://localhost:9000 \
//!   --project <PROJECT-ID> --commit <COMMIT-ID>
//! # prints: mass=42
//! ```
//!
//! Write a new value for a feature (creates a new commit layered on the old
//! one and prints the new commit id):
//!
//! ```bash
//! sysml-probe set-value <ELEMENT-ID> 117 --server http://localhost:9000 \
//!   --project <PROJECT-ID> --commit <COMMIT-ID>
//! ```
//!
//! Explore elements directly:
//!
//! ```bash
//! sysml-probe elements --kind AttributeUsage ...
//! sysml-probe elements --name mass ...
//! sysml-probe elements --owner <ELEMENT-ID> --kind MetadataUsage ...
//! ```
//!
//! # Configuration
//!
//! Defaults such as the server URL can be kept in a configuration file
//! (`probe.toml`, `probe.yml`, `probe.yaml`, or `probe.json` in the working
//! directory, or an explicit `--config` path):
//!
//! ```yaml
//! server_url: "http://localhost:9000"
//! http_timeout: 30
//! page_size: 1024
//! ```
//!
//! Generate a commented default file with `sysml-probe init`, and check one
//! with `sysml-probe validate`. The server URL can also come from the
//! `SYSML_SERVER` environment variable.
//!
//! # Failure behavior
//!
//! Resolution is deliberately forgiving: a dangling reference, an element
//! the server refuses to serve, or an expression shape the resolver does not
//! understand never aborts a batch; the affected row simply has blank value
//! fields, and `--log-level debug` shows exactly what was skipped and why.
//! Missing required identifiers, by contrast, fail immediately before any
//! network traffic.

use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};
use sysml_probe::Result;

mod commands;

use crate::commands::{
    CommitsArgs, ElementsArgs, FeaturesArgs, InitArgs, ProjectsArgs, SetValueArgs, ValidateArgs, ValueArgs, export_features,
    init_config, list_commits, list_elements, list_projects, query_feature_value, set_feature_value, validate_config,
};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "sysml-probe", version, about)]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: ProbeSubcommand,
}

#[derive(Subcommand, Debug)]
enum ProbeSubcommand {
    /// List the projects available on a model server
    Projects(ProjectsArgs),
    /// List the commits of a project
    Commits(CommitsArgs),
    /// Resolve all feature values under a domain tag and export them
    Features(Box<FeaturesArgs>),
    /// Resolve a single feature value as name=value
    Value(ValueArgs),
    /// Write a new value for a feature, creating a new commit
    SetValue(SetValueArgs),
    /// List elements by kind or declared name
    Elements(Box<ElementsArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    match &Cli::parse().command {
        ProbeSubcommand::Projects(args) => list_projects(args).await,
        ProbeSubcommand::Commits(args) => list_commits(args).await,
        ProbeSubcommand::Features(args) => export_features(args).await,
        ProbeSubcommand::Value(args) => query_feature_value(args).await,
        ProbeSubcommand::SetValue(args) => set_feature_value(args).await,
        ProbeSubcommand::Elements(args) => list_elements(args).await,
        ProbeSubcommand::Init(args) => init_config(args),
        ProbeSubcommand::Validate(args) => validate_config(args),
    }
}
