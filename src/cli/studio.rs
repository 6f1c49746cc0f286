// src/cli/studio.rs - Interactive generator screen
//
// History lives only as long as this loop does.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use super::{auth, render};
use crate::backend::HttpBackend;
use crate::generation::{ClipDuration, GenerationManager, Resolution};
use crate::session::SessionManager;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    EditPrompt,
    Resolution,
    Duration,
    Generate,
    History,
    Reuse,
    Download,
    Reset,
    LogOut,
    Quit,
}

impl Action {
    const ALL: [Action; 10] = [
        Action::EditPrompt,
        Action::Resolution,
        Action::Duration,
        Action::Generate,
        Action::History,
        Action::Reuse,
        Action::Download,
        Action::Reset,
        Action::LogOut,
        Action::Quit,
    ];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::EditPrompt => "Edit prompt",
            Action::Resolution => "Resolution",
            Action::Duration => "Duration",
            Action::Generate => "Generate video",
            Action::History => "History",
            Action::Reuse => "Reuse prompt from history",
            Action::Download => "Download preview",
            Action::Reset => "Reset",
            Action::LogOut => "Log out",
            Action::Quit => "Quit",
        };
        f.write_str(label)
    }
}

pub async fn run_studio(
    backend: Arc<HttpBackend>,
    sessions: &mut SessionManager,
) -> anyhow::Result<()> {
    if !sessions.is_authenticated() && !auth::interactive_auth(sessions).await? {
        return Ok(());
    }

    let mut generator = GenerationManager::new(backend.clone(), sessions.session_state());
    eprintln!(
        "mvgen v{} | {} | signed in as {}\n",
        env!("CARGO_PKG_VERSION"),
        backend.base_url(),
        sessions.identity().unwrap_or("signed-in"),
    );

    loop {
        println!("{}", render::draft_summary(generator.draft()));
        match generator.preview() {
            Some(url) => println!("Preview: {url}"),
            None => println!("Preview: no video yet"),
        }

        let action = match inquire::Select::new("Action:", Action::ALL.to_vec()).prompt() {
            Ok(action) => action,
            Err(_) => break,
        };

        match action {
            Action::EditPrompt => {
                let current = generator.draft().prompt().to_string();
                if let Ok(Some(prompt)) = inquire::Text::new("Marketing prompt:")
                    .with_initial_value(&current)
                    .with_help_message("Tips: product, audience, setting, mood, camera style")
                    .prompt_skippable()
                {
                    generator.draft_mut().set_prompt(&prompt);
                }
            }
            Action::Resolution => {
                let labels: Vec<&str> = Resolution::ALL.iter().map(|r| r.label()).collect();
                if let Ok(choice) = inquire::Select::new("Resolution:", labels).raw_prompt() {
                    generator.draft_mut().resolution = Resolution::ALL[choice.index];
                }
            }
            Action::Duration => {
                let labels: Vec<String> = ClipDuration::ALL.iter().map(|d| d.to_string()).collect();
                if let Ok(choice) = inquire::Select::new("Duration:", labels).raw_prompt() {
                    generator.draft_mut().duration = ClipDuration::ALL[choice.index];
                }
            }
            Action::Generate => {
                if !generator.can_submit() {
                    eprintln!("[error] Prompt must be at least 10 characters.");
                    continue;
                }
                eprintln!("Generating…");
                match generator.generate().await {
                    Ok(entry) => {
                        for line in render::entry_lines(&entry) {
                            println!("{line}");
                        }
                    }
                    Err(e) => eprintln!("[error] {e}"),
                }
            }
            Action::History => {
                for line in render::history_lines(generator.history()) {
                    println!("{line}");
                }
            }
            Action::Reuse => {
                let entries: Vec<_> = generator.history().recent().cloned().collect();
                if entries.is_empty() {
                    println!("No videos yet.");
                    continue;
                }
                let labels: Vec<String> = entries
                    .iter()
                    .map(|e| format!("{}  {}", e.created_at, render::truncate_prompt(&e.prompt)))
                    .collect();
                if let Ok(choice) = inquire::Select::new("Reuse:", labels).raw_prompt() {
                    generator.reuse(&entries[choice.index]);
                }
            }
            Action::Download => {
                let Some(url) = generator.preview().map(str::to_string) else {
                    println!("No video yet.");
                    continue;
                };
                let Ok(path) = inquire::Text::new("Save to:")
                    .with_default("video.mp4")
                    .prompt()
                else {
                    continue;
                };
                let path = PathBuf::from(path);
                match backend
                    .download(&url, generator.session().token(), &path)
                    .await
                {
                    Ok(bytes) => println!("Saved {} ({} bytes)", path.display(), bytes),
                    Err(e) => eprintln!("[error] {e}"),
                }
            }
            Action::Reset => generator.reset(),
            Action::LogOut => {
                sessions.log_out()?;
                generator.set_session(sessions.session_state());
                println!("Logged out.");
                println!();
                if !auth::interactive_auth(sessions).await? {
                    break;
                }
                generator.set_session(sessions.session_state());
            }
            Action::Quit => break,
        }
        println!();
    }

    Ok(())
}
