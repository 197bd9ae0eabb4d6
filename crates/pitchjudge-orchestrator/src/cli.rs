//! CLI surface, in the idiom of `docling-cli`'s `Args`/`Command` split:
//! flags mirror the environment variables so a run can be fully scripted
//! without env vars, but env vars remain the source of truth when a flag
//! is omitted (spec §9).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pitchjudge")]
#[command(about = "Multi-agent hackathon pitch deck evaluation pipeline")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Evaluate every matching deck and emit a leaderboard.
    Run {
        /// Comma/glob pattern matching input decks, e.g. "decks/*.pdf".
        #[arg(long)]
        team_glob: Option<String>,

        /// Max files processed concurrently (default: env `MAX_CONCURRENCY` or 2).
        #[arg(long)]
        max_concurrency: Option<usize>,

        /// Use the single combined scoring+feedback agent instead of split calls.
        #[arg(long)]
        use_combined: bool,

        /// Directory to write the two `.xlsx` workbooks and JSON report stream into.
        #[arg(long, default_value = "output")]
        output_dir: PathBuf,
    },
    /// Count files and images that would be sent to the vision model
    /// without making any network calls (spec §9, dry-run/estimate mode).
    DryRun {
        #[arg(long)]
        team_glob: Option<String>,
    },
}
