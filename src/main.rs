use ax_snapshot::cli::commands::{cmd_action, cmd_find, cmd_inputs, cmd_snapshot, cmd_type};
use ax_snapshot::cli::config::{Cli, Commands, load_config, log_level};
use clap::Parser;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(log_level(cli.verbose))
        .parse_default_env()
        .init();

    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Snapshot {
            fixture,
            app,
            window,
            pretty,
        } => {
            cmd_snapshot(&fixture, app.as_deref(), window.as_deref(), pretty, &config)?;
        }
        Commands::Find { fixture, id, window } => {
            cmd_find(&fixture, &id, window.as_deref(), &config)?;
        }
        Commands::Type {
            fixture,
            id,
            text,
            window,
        } => {
            cmd_type(&fixture, &id, &text, window.as_deref(), &config)?;
        }
        Commands::Action {
            fixture,
            id,
            name,
            window,
        } => {
            cmd_action(&fixture, &id, &name, window.as_deref(), &config)?;
        }
        Commands::Inputs { fixture, app } => {
            cmd_inputs(&fixture, app.as_deref(), &config)?;
        }
    }

    Ok(())
}
