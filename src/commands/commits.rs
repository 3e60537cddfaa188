use super::common::{Common, CommonArgs};
use clap::Parser;
use sysml_probe::Result;

#[derive(Parser, Debug)]
pub struct CommitsArgs {
    /// Project id on the model server
    #[arg(long, short = 'p', value_name = "ID")]
    pub project: String,

    #[command(flatten)]
    pub common: CommonArgs,
}

pub async fn list_commits(args: &CommitsArgs) -> Result<()> {
    let common = Common::new(&args.common)?;
    let commits = common.session.commits(&args.project).await?;

    println!("{} commit(s) found", commits.len());
    for commit in &commits {
        let created = commit.created_at.map(|stamp| stamp.to_rfc3339()).unwrap_or_default();
        println!("{}  {}  {}", commit.id, created, commit.description.as_deref().unwrap_or(""));
    }

    Ok(())
}
