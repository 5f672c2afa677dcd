use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use studio_infrastructure::{ConfigService, StudioPaths};
use tracing_subscriber::EnvFilter;

mod bootstrap;
mod commands;

use bootstrap::AppBootstrap;

#[derive(Parser)]
#[command(name = "studio")]
#[command(about = "Studio client - local-first store with remote sync", long_about = None)]
struct Cli {
    /// Directory holding config.toml (defaults to the platform config dir)
    #[arg(long, env = "STUDIO_CONFIG_DIR", global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show session, settings and collection sizes
    Status,
    /// Sign in and store the bearer token
    Login {
        #[arg(long)]
        user_id: String,
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        /// admin, superAdmin or instructor
        #[arg(long, default_value = "admin")]
        role: String,
        #[arg(long)]
        token: String,
        /// Studio name to apply on top of the default settings
        #[arg(long)]
        app_name: Option<String>,
    },
    /// Sign out, erase the token and restore seed data
    Logout,
    /// Pull every collection from the remote service
    Sync,
    /// Flip dark mode
    ToggleTheme,
    /// Change the subscription plan and purchased add-ons
    Subscription {
        plan_id: String,
        #[arg(long)]
        financial: bool,
        #[arg(long)]
        whatsapp: bool,
    },
    /// Operate as another studio's admin
    Impersonate {
        user_id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        app_name: Option<String>,
    },
    /// Return to the real identity
    StopImpersonating,
    /// Compose (and simulate sending) a chatbot message
    Notify {
        student_id: String,
        /// classReminder, expiryWarning, birthdayMessage, paymentConfirmation,
        /// welcomeMessage or rescheduleNotification
        template: String,
        /// Extra template variables as name=value
        #[arg(long = "var", value_parser = commands::parse_var)]
        vars: Vec<(String, String)>,
    },
    /// Dispatch a raw JSON action, e.g. '{"type":"SET_ACTIVE_TAB","tab":"agenda"}'
    Dispatch { action: String },
}

fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_service = ConfigService::new(StudioPaths::new(cli.config_dir));
    let config = config_service
        .get_config()
        .context("Failed to load configuration")?;
    init_tracing(&config.logging.level);

    let data_dir = config_service
        .data_dir()
        .context("Failed to resolve data directory")?;
    let app = AppBootstrap::init(&config, data_dir).await?;

    let outcome = match cli.command {
        Commands::Status => commands::status::show(&app),
        Commands::Login {
            user_id,
            name,
            email,
            role,
            token,
            app_name,
        } => {
            commands::session::login(&app, user_id, name, email, &role, token, app_name).await
        }
        Commands::Logout => commands::session::logout(&app).await,
        Commands::Sync => commands::session::sync(&app).await,
        Commands::ToggleTheme => commands::settings::toggle_theme(&app).await,
        Commands::Subscription {
            plan_id,
            financial,
            whatsapp,
        } => commands::settings::subscription(&app, plan_id, financial, whatsapp).await,
        Commands::Impersonate {
            user_id,
            name,
            app_name,
        } => commands::session::impersonate(&app, user_id, name, app_name).await,
        Commands::StopImpersonating => commands::session::stop_impersonating(&app).await,
        Commands::Notify {
            student_id,
            template,
            vars,
        } => commands::notify::send(&app, &student_id, &template, vars).await,
        Commands::Dispatch { action } => commands::settings::dispatch_raw(&app, &action).await,
    };

    app.shutdown().await;
    outcome
}
