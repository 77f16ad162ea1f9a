use clap::{Args, Parser, Subcommand};
use sitelog_engine::RiskLevel;
use std::path::PathBuf;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "sitelog")]
#[command(author, version)]
#[command(about = "Weekly progress log and report assistant for construction sites")]
#[command(after_help = "\
EXAMPLES:

    # Record this week, everything to plan
    sitelog entry add --quick

    # Start from last week's entry and raise the risk level
    sitelog entry add --from-last-week --risk high --risks '**基坑**积水 <c:#dc2626>严重</c>'

    # Summarize a document into the library
    sitelog doc ingest minutes.txt

    # Draft this week's report
    sitelog report generate

CONFIGURATION:

Settings are read from ~/.config/sitelog/config.toml. The Gemini API key is
read from the environment variable named by gemini.api_key_env (API_KEY by
default).")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Directory holding the stored records (overrides the config file)
    #[arg(long, global = true, env = "SITELOG_DATA_DIR")]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record, edit and list weekly entries
    #[command(subcommand)]
    Entry(EntryCommand),
    /// Manage the document library
    #[command(subcommand)]
    Doc(DocCommand),
    /// Generate and read weekly reports
    #[command(subcommand)]
    Report(ReportCommand),
    /// Show headline figures and the newest entries
    Dashboard,
    /// Manage the configuration file
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Browse everything in a terminal UI
    Browse,
}

#[derive(Subcommand)]
pub enum EntryCommand {
    /// Record a new weekly entry
    Add(AddEntryArgs),
    /// Change fields of an existing entry
    Edit {
        id: Uuid,
        #[command(flatten)]
        fields: EntryFields,
    },
    /// Delete an entry
    Delete { id: Uuid },
    /// List entries, newest first
    List {
        /// Show at most this many entries
        #[arg(long)]
        limit: Option<usize>,
        /// Print markup as HTML instead of plain text
        #[arg(long)]
        html: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct AddEntryArgs {
    /// Week label (defaults to the current week)
    #[arg(long)]
    pub week: Option<String>,
    /// Prefill from the most recent entry
    #[arg(long)]
    pub from_last_week: bool,
    /// Fill blank fields with "as planned" defaults
    #[arg(long)]
    pub quick: bool,
    #[command(flatten)]
    pub fields: EntryFields,
}

/// Entry text fields. Values may contain inline markup.
#[derive(Args, Debug, Default)]
pub struct EntryFields {
    #[arg(long)]
    pub progress: Option<String>,
    #[arg(long)]
    pub risks: Option<String>,
    #[arg(long)]
    pub plan: Option<String>,
    /// low, medium or high
    #[arg(long = "risk")]
    pub risk_level: Option<RiskLevel>,
    /// Sketch image reference (data URL or path)
    #[arg(long)]
    pub sketch: Option<String>,
}

#[derive(Subcommand)]
pub enum DocCommand {
    /// Extract key facts from text files and store them
    Ingest {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// List ingested documents
    List,
    /// Remove a document from the library
    Delete { id: Uuid },
}

#[derive(Subcommand)]
pub enum ReportCommand {
    /// Draft a report from recent entries and the library
    Generate,
    /// List stored reports
    List,
    /// Print a report (the latest when no id is given)
    Show {
        id: Option<Uuid>,
        /// Print as HTML
        #[arg(long)]
        html: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Write a config file with the default settings
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print where the config file is read from
    Path,
}
