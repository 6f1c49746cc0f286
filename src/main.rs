// src/main.rs - mvgen entry point

use std::sync::Arc;

use clap::Parser;

use mvgen::backend::HttpBackend;
use mvgen::cli::{Cli, Commands};
use mvgen::infra::config::Config;
use mvgen::infra::logger;
use mvgen::session::{FileTokenStore, SessionManager};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logger::init_logging(cli.verbose);

    let config = Config::resolve(cli.config.as_deref().map(std::path::Path::new), cli.backend)?;

    let backend = Arc::new(HttpBackend::new(&config)?);
    let store = FileTokenStore::open_default()?;
    let mut sessions = SessionManager::new(backend.clone(), Box::new(store));

    match cli.command.unwrap_or(Commands::Studio) {
        Commands::Signup { email } => mvgen::cli::auth::run_signup(&mut sessions, email).await,
        Commands::Login { email } => mvgen::cli::auth::run_login(&mut sessions, email).await,
        Commands::Logout => mvgen::cli::auth::run_logout(&mut sessions),
        Commands::Status => {
            mvgen::cli::status::show_status(&config, &sessions);
            Ok(())
        }
        Commands::Generate(args) => {
            mvgen::cli::generate::run_generate(backend, sessions.session_state(), args).await
        }
        Commands::Studio => mvgen::cli::studio::run_studio(backend, &mut sessions).await,
    }
}
