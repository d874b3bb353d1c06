use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use mealwidget::store::MealStore;

mod cli_exec;

#[derive(Parser)]
#[command(name = "mealwidget")]
#[command(about = "Home-screen meal menu widget", long_about = None)]
struct Cli {
    /// Widget store directory (defaults to ./.mealwidget)
    #[arg(long, global = true, env = "MEALWIDGET_HOME")]
    store: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Create the widget store
    Init {
        /// Re-initialize if the store already exists
        #[arg(long)]
        force: bool,
    },

    /// Store a new snapshot (JSON text) as the host application would
    Push {
        /// Snapshot JSON
        #[arg(required_unless_present = "file", conflicts_with = "file")]
        json: Option<String>,
        /// Read the snapshot from a file
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Show the stored snapshot and how it decodes
    Show {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Render a widget of the given size
    Render {
        #[arg(long)]
        width: i32,
        #[arg(long)]
        height: i32,
        /// Widget id reported in data requests
        #[arg(long, default_value_t = 0)]
        id: u32,
        /// Emit the render state as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the rows exposed by the menu list provider
    List {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Place a widget instance on the home screen
    Place {
        id: u32,
        #[arg(long)]
        width: i32,
        #[arg(long)]
        height: i32,
    },

    /// Remove a placed widget instance
    Remove { id: u32 },

    /// List placed widget instances
    Instances {
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Confirm the configuration screen for a new widget instance
    Configure {
        id: u32,
        #[arg(long)]
        width: i32,
        #[arg(long)]
        height: i32,
    },

    /// Refresh widgets (all placed instances when no ids are given)
    Update {
        ids: Vec<u32>,
        /// Emit rendered widgets as JSON
        #[arg(long)]
        json: bool,
    },

    /// Deliver the device boot signal
    Boot,

    /// Show how many widget instances are placed
    Info,

    /// Show pending data requests for the host application
    Requests {
        /// Clear the requests after printing them
        #[arg(long)]
        drain: bool,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive preview in the terminal
    Preview,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    mealwidget::logging::init(cli.verbose)?;

    let root = match cli.store {
        Some(root) => root,
        None => MealStore::store_dir(&std::env::current_dir().context("get current dir")?),
    };

    cli_exec::handle_command(&root, cli.command)
}
