use clap::Args;
use std::path::PathBuf;

use projclone::template::{self, CreateOutput};

use super::CmdResult;

#[derive(Args)]
pub struct CreateArgs {
    /// Template project directory, such as ShooterGame (the Game suffix matters)
    pub source: PathBuf,

    /// Target project directory, such as PuzzleGame (the Game suffix matters)
    pub target: PathBuf,

    /// Copyright line substituted for the stock engine header
    #[arg(long, short = 'c')]
    pub copyright: Option<String>,

    /// Purge the target if it already exists
    #[arg(long, short = 'f')]
    pub force: bool,
}

pub fn run_json(args: CreateArgs) -> CmdResult<CreateOutput> {
    let output = template::create(
        &args.source,
        &args.target,
        args.copyright.as_deref(),
        args.force,
    )?;
    Ok((output, 0))
}
