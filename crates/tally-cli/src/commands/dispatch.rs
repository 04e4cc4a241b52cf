use tally_config::TallyConfig;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Open the document and dispatch a parsed command to its handler.
pub fn dispatch(
    command: &Commands,
    config: &TallyConfig,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut ctx = AppContext::open(config, flags)?;
    match command {
        Commands::Status => commands::status::handle(&ctx, flags),
        Commands::History { action } => commands::history::handle(action, &mut ctx, flags),
    }
}
