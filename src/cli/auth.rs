// src/cli/auth.rs - Sign-up, login and logout commands

use crate::session::{AuthMode, Credentials, SessionManager};

fn prompt_email(email: Option<String>) -> anyhow::Result<String> {
    if let Some(email) = email {
        return Ok(email);
    }
    Ok(inquire::Text::new("Email:")
        .with_placeholder("you@example.com")
        .prompt()?)
}

fn prompt_password(label: &str) -> anyhow::Result<String> {
    Ok(inquire::Password::new(label)
        .with_display_mode(inquire::PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("At least 8 characters")
        .prompt()?)
}

/// Collect credentials for `mode` from the terminal.
fn read_credentials(mode: AuthMode, email: Option<String>) -> anyhow::Result<Credentials> {
    let email = prompt_email(email)?;
    let password = prompt_password("Password:")?;
    let mut credentials = Credentials::new(email, password);
    if mode == AuthMode::SignUp {
        credentials.confirmation = prompt_password("Confirm password:")?;
    }
    Ok(credentials)
}

/// Submit `credentials` in the manager's current mode. Returns true once a
/// session exists.
async fn submit(
    sessions: &mut SessionManager,
    credentials: &mut Credentials,
) -> anyhow::Result<bool> {
    match sessions.mode() {
        AuthMode::SignUp => {
            sessions.sign_up(credentials).await?;
            println!("Account created. Log in to generate videos.");
            Ok(false)
        }
        AuthMode::LogIn => {
            sessions.log_in(credentials).await?;
            println!("Logged in as {}.", credentials.trimmed_email());
            Ok(true)
        }
    }
}

pub async fn run_signup(sessions: &mut SessionManager, email: Option<String>) -> anyhow::Result<()> {
    sessions.set_mode(AuthMode::SignUp);
    let mut credentials = read_credentials(AuthMode::SignUp, email)?;
    submit(sessions, &mut credentials).await?;

    let login_now = inquire::Confirm::new("Log in now?")
        .with_default(true)
        .prompt()
        .unwrap_or(false);
    if login_now {
        submit(sessions, &mut credentials).await?;
    }
    Ok(())
}

pub async fn run_login(sessions: &mut SessionManager, email: Option<String>) -> anyhow::Result<()> {
    sessions.set_mode(AuthMode::LogIn);
    let mut credentials = read_credentials(AuthMode::LogIn, email)?;
    submit(sessions, &mut credentials).await?;
    Ok(())
}

pub fn run_logout(sessions: &mut SessionManager) -> anyhow::Result<()> {
    let was_authenticated = sessions.is_authenticated();
    sessions.log_out()?;
    if was_authenticated {
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

/// The session screen: switch between sign-up and login until a session
/// exists. Returns false when the user leaves without logging in.
pub async fn interactive_auth(sessions: &mut SessionManager) -> anyhow::Result<bool> {
    println!("Marketing Video Generator");
    loop {
        if let Some(message) = sessions.last_error() {
            eprintln!("[error] {message}");
        }

        let tabs = vec!["Sign up", "Log in", "Quit"];
        let starting = match sessions.mode() {
            AuthMode::SignUp => 0,
            AuthMode::LogIn => 1,
        };
        let choice = match inquire::Select::new("Account:", tabs)
            .with_starting_cursor(starting)
            .prompt()
        {
            Ok(choice) => choice,
            Err(_) => return Ok(false),
        };
        let mode = match choice {
            "Sign up" => AuthMode::SignUp,
            "Log in" => AuthMode::LogIn,
            _ => return Ok(false),
        };
        if mode != sessions.mode() {
            sessions.set_mode(mode);
        }

        let mut credentials = read_credentials(sessions.mode(), None)?;
        if !sessions.can_submit(&credentials) {
            if let Err(e) = credentials.validate(sessions.mode()) {
                eprintln!("[error] {e}");
            }
            continue;
        }
        // Failures are kept on the manager and shown at the top of the loop.
        if let Ok(true) = submit(sessions, &mut credentials).await {
            return Ok(true);
        }
    }
}
