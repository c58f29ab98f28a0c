use super::args::{Cli, Commands};
use super::handlers;
use crate::context::ExecutionContext;
use crate::logging;
use anyhow::Result;
use tracing::debug;

pub fn run(cli: Cli) -> Result<()> {
    let ctx = ExecutionContext::new(&cli)?;

    match logging::init(ctx.data_dir(), cli.log_level) {
        Ok(path) => debug!(path = %path.display(), "logging initialized"),
        Err(e) => eprintln!("Warning: logging disabled: {:#}", e),
    }

    match cli.command.unwrap_or(Commands::Grid) {
        Commands::Grid => handlers::grid::handle(&ctx),
        Commands::List { format } => handlers::list::handle(&ctx, format),
        Commands::Launch { game } => handlers::launch::handle(&ctx, &game),
    }
}
