// src/cli/status.rs - Backend and session status display

use crate::infra::config::Config;
use crate::infra::paths;
use crate::session::SessionManager;

pub fn show_status(config: &Config, sessions: &SessionManager) {
    println!("mvgen v{}", env!("CARGO_PKG_VERSION"));
    println!();

    let config_path = paths::config_file_path();
    if config_path.exists() {
        println!("  Config:     {} (loaded)", config_path.display());
    } else {
        println!("  Config:     (using defaults)");
    }
    println!("  Backend:    {}", config.backend.base_url);
    match config.backend.timeout_seconds {
        Some(secs) => println!("  Timeout:    {secs}s"),
        None => println!("  Timeout:    (none)"),
    }

    let session_path = paths::session_file_path();
    match sessions.session_state().token() {
        Some(_) => println!(
            "  Session:    {} ({})",
            sessions.identity().unwrap_or("signed-in"),
            session_path.display()
        ),
        None => println!("  Session:    not logged in"),
    }
}
