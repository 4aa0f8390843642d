pub mod cli;
pub mod config;
pub mod constants;
pub mod db;
pub mod domain;
pub mod entities;
pub mod services;
pub mod state;
pub mod validation;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
pub use config::Config;
use services::ApplicationForm;
use state::SharedState;

pub async fn run(config: Config) -> anyhow::Result<()> {
    let cli = Cli::parse();
    config.validate()?;

    init_logging(&config);

    if matches!(cli.command, Commands::Init) {
        if Config::create_default_if_missing()? {
            println!("✓ Config file created. Edit config.toml and run again.");
        } else {
            println!("config.toml already exists; leaving it untouched.");
        }
        return Ok(());
    }

    let state = SharedState::new(&config).await?;
    dispatch(&state, cli).await
}

fn init_logging(config: &Config) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    // stdout carries command output; logs go to stderr.
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

/// Runs one parsed command against an opened backend.
pub async fn dispatch(state: &SharedState, cli: Cli) -> anyhow::Result<()> {
    let credentials = &cli.credentials;

    match cli.command {
        Commands::Init => Ok(()),

        Commands::Register {
            new_username,
            new_password,
        } => cli::cmd_register(state, &new_username, &new_password).await,

        Commands::Login => cli::cmd_login(state, credentials).await,

        Commands::Apply {
            name,
            mobile,
            address,
            connections,
        } => {
            let form = ApplicationForm {
                name,
                mobile,
                address,
                num_connections: connections,
            };
            cli::cmd_apply(state, credentials, form).await
        }

        Commands::Mine => cli::cmd_my_applications(state, credentials).await,

        Commands::Show { id } => cli::cmd_show_application(state, credentials, &id).await,

        Commands::List { status } => {
            cli::cmd_list_applications(state, credentials, status.as_deref()).await
        }

        Commands::SetStatus { id, status } => {
            cli::cmd_set_status(state, credentials, &id, &status).await
        }

        Commands::Delete { id } => cli::cmd_delete_application(state, credentials, &id).await,

        Commands::Users => cli::cmd_users(state, credentials).await,

        Commands::AddUser {
            new_username,
            new_password,
            role,
        } => cli::cmd_add_user(state, credentials, &new_username, &new_password, &role).await,

        Commands::Stats => cli::cmd_stats(state, credentials).await,

        Commands::Check => cli::cmd_check(state).await,
    }
}
