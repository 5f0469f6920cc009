use anyhow::Result;

use ruleprint::cli::RootCommand;

fn main() -> Result<()> {
    RootCommand::execute()
}
