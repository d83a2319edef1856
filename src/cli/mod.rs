pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "postboard", version)]
#[command(about = "Browse an employee's posts and their comment threads", long_about = None)]
pub struct Cli {
    /// Base URL of the posts API (overrides the config file)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Fetch post authors concurrently instead of one at a time
    #[arg(long, global = true)]
    pub concurrent: bool,

    /// Path to an alternative config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Write logs to this file
    #[arg(short, long, global = true)]
    pub log: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List employees
    Users,
    /// Render one employee's posts
    Posts {
        /// Id of the employee
        user_id: u64,

        /// Show the comments of these posts
        #[arg(short, long = "expand", value_name = "POST_ID")]
        expand: Vec<u64>,
    },
    /// Launch the TUI
    Tui,
}
