use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "clubguard")]
#[command(about = "Check route access and resolve record conflicts for club administration")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Route table JSON file (defaults to $CLUBGUARD_ROUTES, then the user config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub routes: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decide whether a subject may open a path
    Access {
        /// Requested path, e.g. /club-dashboard/classes
        path: String,
        /// Subject role (e.g. CLUB_OWNER); omit for an unauthenticated subject
        #[arg(long, value_name = "ROLE")]
        role: Option<String>,
        /// Account status (e.g. active, pending)
        #[arg(long, value_name = "STATUS")]
        status: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the landing path for a subject
    DefaultRoute {
        #[arg(long, value_name = "ROLE")]
        role: Option<String>,
        #[arg(long, value_name = "STATUS")]
        status: Option<String>,
    },
    /// List route patterns from the active route table
    Routes {
        /// Only show patterns for this role
        #[arg(long, value_name = "ROLE")]
        role: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve a conflict between two JSON record files
    Resolve {
        #[command(flatten)]
        records: RecordArgs,
        /// local, remote, merge or manual (recommended from timestamps when omitted)
        #[arg(long, value_name = "STRATEGY")]
        strategy: Option<String>,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// List fields in genuine conflict
    Detect {
        #[command(flatten)]
        records: RecordArgs,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Recommend a strategy from the two versions' timestamps
    Recommend {
        /// ISO-8601 time the local copy was produced
        #[arg(long, value_name = "TIME")]
        local_time: String,
        /// ISO-8601 time the remote copy was produced
        #[arg(long, value_name = "TIME")]
        remote_time: String,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(clap::Args)]
pub struct RecordArgs {
    /// Caller's working copy (JSON object)
    #[arg(long, value_name = "PATH")]
    pub local: PathBuf,
    /// Server's current copy (JSON object)
    #[arg(long, value_name = "PATH")]
    pub remote: PathBuf,
    /// Last common ancestor (JSON object), enables three-way merge
    #[arg(long, value_name = "PATH")]
    pub base: Option<PathBuf>,
    /// ISO-8601 time the local copy was produced
    #[arg(long, value_name = "TIME")]
    pub local_time: Option<String>,
    /// ISO-8601 time the remote copy was produced
    #[arg(long, value_name = "TIME")]
    pub remote_time: Option<String>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
