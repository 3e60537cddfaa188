use super::common::{Common, CommonArgs, ScopeArgs};
use clap::{ArgGroup, Parser};
use ohno::bail;
use sysml_probe::Result;

#[derive(Parser, Debug)]
#[command(group = ArgGroup::new("selector").required(true).args(["kind", "name"]))]
pub struct ElementsArgs {
    /// List all elements of this @type
    #[arg(long, value_name = "KIND")]
    pub kind: Option<String>,

    /// List all elements with this declared name, including elements that redefine a feature of that name
    #[arg(long, value_name = "NAME", conflicts_with = "owner")]
    pub name: Option<String>,

    /// Restrict the listing to elements owned by this element (combined with --kind)
    #[arg(long, value_name = "ID", requires = "kind")]
    pub owner: Option<String>,

    #[command(flatten)]
    pub scope: ScopeArgs,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn list_elements(args: &ElementsArgs) -> Result<()> {
    let common = Common::new(&args.common)?;
    let scope = common.scope(&args.scope)?;

    let elements = match (&args.owner, &args.kind, &args.name) {
        (Some(owner), Some(kind), _) => common.session.owned_elements_of_kind(&scope, owner, kind).await,
        (None, Some(kind), _) => common.session.elements_by_kind(&scope, kind).await?,
        (None, None, Some(name)) => common.session.elements_by_name(&scope, name).await?,
        _ => bail!("either --kind or --name is required"),
    };

    println!("{} element(s) found", elements.len());
    for element in &elements {
        let label = element.declared_name.as_deref().or(element.name.as_deref()).unwrap_or("");
        println!("{}  {}  {label}", element.id, element.kind);
    }

    Ok(())
}
