use super::common::{Common, CommonArgs, ScopeArgs};
use clap::Parser;
use ohno::bail;
use sysml_probe::Result;

#[derive(Parser, Debug)]
pub struct SetValueArgs {
    /// Element id of the feature to write
    #[arg(value_name = "ELEMENT")]
    pub element: String,

    /// New value for the feature
    #[arg(value_name = "VALUE")]
    pub value: String,

    #[command(flatten)]
    pub scope: ScopeArgs,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn set_feature_value(args: &SetValueArgs) -> Result<()> {
    let common = Common::new(&args.common)?;
    let scope = common.scope(&args.scope)?;

    let new_commit = common.session.write_feature_value(&scope, &args.element, &args.value).await;
    if new_commit.is_empty() {
        bail!("could not create a new commit in project {}", args.scope.project);
    }

    println!("{new_commit}");
    Ok(())
}
