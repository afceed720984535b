//! clubsite-cli: terminal client for the club website backend.
#![deny(clippy::all, clippy::pedantic)]

mod args;
mod client;
mod handlers;
mod io;
mod print;
mod prompt;

#[cfg(test)]
mod tests;

use clap::Parser;
use clubsite::infra::telemetry;

use args::{Cli, Commands};
use client::{CliError, build_ctx_from_cli};
use handlers::{admin, blog, forum};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let ctx = build_ctx_from_cli(&cli)?;
    telemetry::init(&ctx.settings.logging)?;

    match cli.command {
        Commands::Forum(cmd) => forum::handle(&ctx, cmd.action).await?,
        Commands::Blog(cmd) => blog::handle(&ctx, cmd.action).await?,
        Commands::Admin(cmd) => admin::handle(&ctx, cmd).await?,
    }

    Ok(())
}
