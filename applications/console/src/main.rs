/// Insyd - terminal client for the Insyd notifications service
use anyhow::Context;
use clap::Parser;
use insyd_client::{InsydClient, NotificationApi};
use insyd_console::{
    cli::{self, Cli, Commands, Outcome, Printer},
    config::{AppConfig, Overrides, DEFAULT_TUI_LOG_FILE},
    logging::{self, LogTarget},
    tui,
};
use insyd_core::{NotificationId, UserId};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let overrides = Overrides {
        config_file: cli.config.clone(),
        base_url: cli.base_url.clone(),
        profile: cli.profile,
    };
    let config = AppConfig::load(&overrides).context("Failed to load configuration")?;
    config.validate()?;

    // The terminal UI owns the screen, so its logs always go to a file
    let command = cli.command.unwrap_or(Commands::Tui);
    let log_target = match (&command, &config.log.file) {
        (_, Some(path)) => LogTarget::File(path.clone()),
        (Commands::Tui, None) => LogTarget::File(PathBuf::from(DEFAULT_TUI_LOG_FILE)),
        (_, None) => LogTarget::Stderr,
    };
    logging::init(cli.debug, &log_target)?;

    tracing::info!(
        base_url = config.base_url(),
        profile = %config.api.profile,
        timeout_secs = config.api.timeout_secs,
        "Starting Insyd"
    );

    let client = InsydClient::new(config.client_config()).context("Invalid API configuration")?;
    let api: Arc<dyn NotificationApi> = Arc::new(client);
    let session = config.session();
    let mut printer = Printer::stdio();

    let outcome = match command {
        Commands::Tui => {
            tui::run(api, session).await?;
            Outcome::Succeeded
        }
        Commands::List { all, user } => {
            let user_id = user.map_or_else(|| session.user_id().clone(), UserId::new);
            cli::list(api.as_ref(), user_id, all, &mut printer).await?
        }
        Commands::MarkRead { id } => {
            cli::mark_read(
                api.as_ref(),
                session.user_id().clone(),
                NotificationId::new(id),
                &mut printer,
            )
            .await?
        }
        Commands::Create {
            user,
            kind,
            content,
        } => {
            cli::create(
                api.as_ref(),
                session.user_id().clone(),
                user,
                kind,
                content,
                &mut printer,
            )
            .await?
        }
    };

    Ok(match outcome {
        Outcome::Succeeded => ExitCode::SUCCESS,
        Outcome::Failed => ExitCode::FAILURE,
    })
}
