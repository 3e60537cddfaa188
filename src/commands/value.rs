use super::common::{Common, CommonArgs, ScopeArgs};
use clap::Parser;
use ohno::bail;
use sysml_probe::Result;
use sysml_probe::resolve;

#[derive(Parser, Debug)]
pub struct ValueArgs {
    /// Element id of the feature value to resolve
    #[arg(value_name = "ELEMENT")]
    pub element: String,

    #[command(flatten)]
    pub scope: ScopeArgs,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn query_feature_value(args: &ValueArgs) -> Result<()> {
    let common = Common::new(&args.common)?;
    let scope = common.scope(&args.scope)?;

    match resolve::describe_feature_value(&common.session, &scope, &args.element).await {
        Some(description) => {
            println!("{description}");
            Ok(())
        }
        None => bail!("could not resolve a value for element {}", args.element),
    }
}
