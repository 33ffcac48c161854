#[macro_use]
extern crate tracing;

use self::{
    args::{App, AppSubcommand},
    config::Environment,
};
use clap::Parser;
use miette::IntoDiagnostic;
use rednote_config::Configuration;
use rednote_observability::LevelFilter;

mod args;
mod comment;
mod config;
mod cookie;

#[tokio::main]
async fn main() -> miette::Result<()> {
    miette::set_panic_hook();
    dotenvy::dotenv().ok();
    rednote_observability::initialise_logging(LevelFilter::INFO)
        .map_err(|error| miette::miette!("{error:#}"))?;

    let app = App::parse();
    let config = match app.config {
        Some(ref path) => Configuration::load(path)
            .await
            .map_err(|error| miette::miette!("Failed to load {}: {error:#}", path.display()))?,
        None => Configuration::default(),
    };
    let env: Environment = envy::prefixed("REDNOTE_").from_env().into_diagnostic()?;

    match app.subcommand {
        AppSubcommand::Comment(cmd) => self::comment::handle(cmd, &config, &env.cookie).await?,
        AppSubcommand::Cookie(cmd) => self::cookie::handle(cmd, &env.cookie)?,
    }

    Ok(())
}
