use super::common::{Common, CommonArgs, ScopeArgs};
use camino::Utf8PathBuf;
use clap::Parser;
use std::fs;
use std::io::{IsTerminal, stderr, stdout};
use sysml_probe::resolve::{self, metadata};
use sysml_probe::{Result, misc, reports};

#[derive(Parser, Debug)]
pub struct FeaturesArgs {
    /// Short name of the domain metadata tag to filter on
    #[arg(long, value_name = "NAME")]
    pub domain: String,

    /// Write the record set as CSV to this file instead of the terminal ('-' for stdout)
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub csv: Option<Utf8PathBuf>,

    #[command(flatten)]
    pub scope: ScopeArgs,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Resolve every attribute usage reachable under a domain tag and project
/// the results as a flat record set.
pub async fn export_features(args: &FeaturesArgs) -> Result<()> {
    let common = Common::new(&args.common)?;
    let scope = common.scope(&args.scope)?;
    let session = &common.session;

    // Narrow the candidate set: domain tag -> metadata definition -> annotated elements.
    let definitions = metadata::metadata_ids_by_short_name(session, &scope, core::slice::from_ref(&args.domain)).await?;
    let annotated = metadata::annotated_element_ids(session, &scope, &definitions).await?;
    let annotated_ids = annotated.get(&args.domain).cloned().unwrap_or_default();

    let domain_elements = session.elements(&scope, &annotated_ids).await;

    let feature_ids: Vec<String> = domain_elements
        .iter()
        .flat_map(|element| element.owned_features.iter().map(|feature| feature.id.clone()))
        .collect();

    let features = session.elements(&scope, &feature_ids).await;

    let progress = misc::batch_progress(
        "Resolving",
        common.progress_enabled(),
        common.use_colors(stderr().is_terminal()),
    );
    let rows = resolve::collect_feature_rows(session, &scope, &features, &progress).await;
    progress.finish_and_clear();

    match &args.csv {
        Some(path) if path == "-" => reports::generate_csv(&rows, stdout().lock()),
        Some(path) => {
            let file = fs::File::create(path)?;
            reports::generate_csv(&rows, file)?;
            println!("Wrote {} row(s) to {path}", rows.len());
            Ok(())
        }
        None => {
            let mut output = String::new();
            reports::generate_console(&rows, common.use_colors(stdout().is_terminal()), &mut output)?;
            print!("{output}");
            Ok(())
        }
    }
}
