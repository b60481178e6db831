use std::io;

use cablecalc::commands::base_commands::{CliArgs, Commands};
use cablecalc::commands::edit_cmd::{
    cable_command, header_command, item_command, labor_preset_command, mode_command,
    reset_command, set_command, staff_command,
};
use cablecalc::commands::export_cmd::export_command;
use cablecalc::commands::project_cmd::{
    auto_save_command, defaults_command, history_command, project_command,
};
use cablecalc::commands::reconcile_cmd::reconcile_command;
use cablecalc::commands::vendor_cmd::{quote_command, vendor_command};
use cablecalc::commands::watch_cmd::watch_command;
use cablecalc::commands::{CommandError, calculate_command};
use cablecalc::services::config::load_config;
use cablecalc::services::session::Session;
use cablecalc::services::store::FileStore;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

async fn run(args: CliArgs) -> Result<String, CommandError> {
    let config = load_config(args.config.as_deref())?;
    let store_dir = args.store.unwrap_or_else(|| config.store_dir.clone());
    debug!(store = %store_dir.display(), "opening store");
    let mut session = Session::open(config, Box::new(FileStore::new(store_dir)))?;

    match args.command {
        Commands::Calculate => Ok(calculate_command(&session)),
        Commands::Set { field, value } => set_command(&mut session, &field, &value),
        Commands::Header {
            name,
            number,
            customer,
            date,
        } => header_command(&mut session, name, number, customer, date),
        Commands::Mode { labor, cable } => mode_command(&mut session, labor, cable),
        Commands::LaborPreset { preset } => labor_preset_command(&mut session, preset),
        Commands::Cable { action } => cable_command(&mut session, action),
        Commands::Item { action } => item_command(&mut session, action),
        Commands::Staff { action } => staff_command(&mut session, action),
        Commands::Vendor { action } => vendor_command(&mut session, action),
        Commands::Quote { action } => quote_command(&mut session, action),
        Commands::Reconcile => reconcile_command(&mut session),
        Commands::Export { action } => export_command(&mut session, action),
        Commands::Project { action } => project_command(&mut session, action),
        Commands::Defaults { action } => defaults_command(&mut session, action),
        Commands::History => history_command(&session),
        Commands::Reset => reset_command(&mut session),
        Commands::AutoSave { state } => auto_save_command(&mut session, state),
        Commands::Watch { interval } => watch_command(&mut session, interval).await,
        Commands::Completions { .. } => Ok(String::new()),
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    let args = CliArgs::parse();
    if let Commands::Completions { shell } = args.command {
        let mut command = CliArgs::command();
        generate(shell, &mut command, "cablecalc", &mut io::stdout());
        return;
    }

    let action = args.command.action();
    match run(args).await {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("Failed to {action}: {e}");
            std::process::exit(1);
        }
    }
}
