//! Common wiring shared by all subcommands.

use camino::Utf8PathBuf;
use clap::{Args, ValueEnum};
use ohno::{IntoAppError, bail};
use sysml_probe::Result;
use sysml_probe::client::{ModelScope, Session};
use sysml_probe::config::Config;
use sysml_probe::misc::ColorMode;
use url::Url;

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,
    /// Only error messages
    Error,
    /// Warning and error messages
    Warn,
    /// Info, warning, and error messages
    Info,
    /// Debug and above messages
    Debug,
    /// All messages including trace
    Trace,
}

/// Common arguments shared between subcommands
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Base URL of the SysMLv2 model server
    #[arg(long, value_name = "URL", env = "SYSML_SERVER")]
    pub server: Option<String>,

    /// Path to configuration file [default: one of probe.[toml|yml|yaml|json] ]
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,
}

/// Identifies the project and commit a subcommand operates on
#[derive(Args, Debug)]
pub struct ScopeArgs {
    /// Project id on the model server
    #[arg(long, short = 'p', value_name = "ID")]
    pub project: String,

    /// Commit id within the project
    #[arg(long, value_name = "ID")]
    pub commit: String,
}

pub struct Common {
    pub session: Session,
    color: ColorMode,
    log_level: LogLevel,
}

impl Common {
    /// Create a new Common processor with logger, config, and session
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be loaded or no server URL is
    /// available.
    pub fn new(args: &CommonArgs) -> Result<Self> {
        Self::init_logging(args.log_level);

        let base_path = Utf8PathBuf::from(".");
        let (config, warnings) = Config::load(&base_path, args.config.as_ref())?;

        // Print warnings if any
        if !warnings.is_empty() {
            eprintln!("\n⚠️  Configuration validation warnings:");
            for warning in &warnings {
                eprintln!("   {warning}");
            }
            eprintln!();
        }

        let Some(server) = args.server.as_deref().or(config.server_url.as_deref()) else {
            bail!("a server URL is required; pass --server or set server_url in the configuration file");
        };

        let server = Url::parse(server).into_app_err_with(|| format!("invalid server URL '{server}'"))?;
        let session = Session::new(server, &config)?;

        Ok(Self {
            session,
            color: args.color,
            log_level: args.log_level,
        })
    }

    pub fn scope(&self, args: &ScopeArgs) -> Result<ModelScope> {
        self.session.scope(&args.project, &args.commit)
    }

    #[must_use]
    pub const fn use_colors(&self, stream_is_terminal: bool) -> bool {
        self.color.enabled(stream_is_terminal)
    }

    /// A progress bar would interleave with diagnostic output, so it is only
    /// shown when logging is off.
    #[must_use]
    pub const fn progress_enabled(&self) -> bool {
        matches!(self.log_level, LogLevel::None)
    }

    /// Initialize logger based on log level
    fn init_logging(log_level: LogLevel) {
        if log_level == LogLevel::None {
            return;
        }

        let level = match log_level {
            LogLevel::None => return, // Already checked above, but being explicit
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        };

        let env = env_logger::Env::default().filter_or("RUST_LOG", level);

        env_logger::Builder::from_env(env)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(matches!(log_level, LogLevel::Debug) || matches!(log_level, LogLevel::Trace))
            .init();
    }
}
