use super::common::{Common, CommonArgs};
use clap::Parser;
use sysml_probe::Result;

#[derive(Parser, Debug)]
pub struct ProjectsArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn list_projects(args: &ProjectsArgs) -> Result<()> {
    let common = Common::new(&args.common)?;
    let projects = common.session.projects().await?;

    println!("{} project(s) found", projects.len());
    for project in &projects {
        println!("{}  {}", project.id, project.label());
    }

    Ok(())
}
