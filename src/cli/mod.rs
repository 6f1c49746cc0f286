// src/cli/mod.rs - CLI definition (clap derive)

pub mod auth;
pub mod generate;
pub mod render;
pub mod status;
pub mod studio;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::generation::{ClipDuration, Resolution};

#[derive(Parser)]
#[command(name = "mvgen", about = "Marketing video generator client", version)]
pub struct Cli {
    /// Backend base URL (overrides config.toml and MVGEN_BACKEND_URL)
    #[arg(long, global = true)]
    pub backend: Option<String>,

    /// Config file path
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Log requests and outcomes to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account
    Signup {
        /// Account email (prompted when omitted)
        #[arg(long)]
        email: Option<String>,
    },
    /// Log in and store the access token
    Login {
        /// Account email (prompted when omitted)
        #[arg(long)]
        email: Option<String>,
    },
    /// Forget the stored access token
    Logout,
    /// Show backend and session status
    Status,
    /// Generate one video from a prompt
    Generate(GenerateArgs),
    /// Interactive generator with in-memory history (default command)
    Studio,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GenerateArgs {
    /// Marketing prompt (at least 10 characters)
    #[arg(trailing_var_arg = true)]
    pub prompt: Vec<String>,

    /// Read the prompt from stdin
    #[arg(long)]
    pub stdin: bool,

    /// 1920x1080, 1280x720, 1080x1920 or 1024x1024
    #[arg(short, long, default_value = "1920x1080")]
    pub resolution: Resolution,

    /// Clip length in seconds: 5, 10 or 15
    #[arg(short, long, default_value = "5")]
    pub duration: ClipDuration,

    /// Save the generated video to this file
    #[arg(long)]
    pub download: Option<PathBuf>,
}
