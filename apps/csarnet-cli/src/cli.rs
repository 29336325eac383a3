//! Command-line arguments.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

/// Command-line client for the C-SARNet SAR colorization service.
#[derive(Parser, Debug)]
#[command(name = "csarnet", author, version, about, long_about = None)]
pub struct Cli {
    /// API root, e.g. http://localhost:8000/api (overrides CSARNET_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that the backend is reachable
    Health,
    /// Sign in and store the session tokens
    Login(LoginArgs),
    /// Create an account
    Register(RegisterArgs),
    /// Sign out and forget the stored tokens
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Change profile fields
    UpdateProfile(ProfileArgs),
    /// Replace the profile picture (PNG, JPEG or TIFF, at most 5MB)
    Avatar {
        file: PathBuf,
    },
    /// Upload a SAR image (PNG, JPEG or TIFF, at most 50MB)
    Upload {
        file: PathBuf,
    },
    /// Colorize a SAR image and save the result as PNG
    Colorize {
        file: PathBuf,
        /// Output path (default: <input>_colorized.png)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List your sessions
    Sessions,
    /// List your images
    Images,
    /// Show usage statistics
    Stats,
    /// Show past uploads
    History,
    /// Manage processing jobs
    #[command(subcommand)]
    Job(JobCommand),
    /// Ask the help assistant
    Ask {
        /// Your question; omit to list suggested questions
        question: Vec<String>,
    },
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    #[arg(long, conflicts_with = "username")]
    pub email: Option<String>,
    #[arg(long)]
    pub username: Option<String>,
    #[arg(long, env = "CSARNET_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(long)]
    pub email: String,
    #[arg(long, env = "CSARNET_PASSWORD", hide_env_values = true)]
    pub password: String,
    /// Repeat the password (defaults to --password)
    #[arg(long)]
    pub confirm_password: Option<String>,
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
}

#[derive(Args, Debug)]
pub struct ProfileArgs {
    #[arg(long)]
    pub first_name: Option<String>,
    #[arg(long)]
    pub last_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub date_of_birth: Option<NaiveDate>,
}

#[derive(Subcommand, Debug)]
pub enum JobCommand {
    /// Queue a colorization job for an uploaded image
    Create { image_id: String },
    /// Show a job's status
    Get { job_id: String },
    /// Cancel a pending job
    Cancel { job_id: String },
    /// Poll until the job completes or fails
    Wait {
        job_id: String,
        /// Seconds between polls
        #[arg(long, default_value_t = 2)]
        interval: u64,
        /// Give up after this many polls
        #[arg(long, default_value_t = 150)]
        max_polls: u32,
    },
}
