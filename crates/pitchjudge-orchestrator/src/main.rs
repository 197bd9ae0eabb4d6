//! Evaluates every deck matched by `TEAM_GLOB`, then emits a console
//! leaderboard and the two `.xlsx` workbooks (spec §4.5).

mod cli;
mod excel;
mod leaderboard;
mod pipeline;
mod tie_break;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use pitchjudge_agents::AgentMode;
use pitchjudge_core::model::{EvaluationContext, LeaderboardEntry};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pitchjudge=info".parse().expect("directive is compile-time constant")),
        )
        .init();

    let args = cli::Args::parse();

    match args.command {
        cli::Command::Run {
            team_glob,
            max_concurrency,
            use_combined,
            output_dir,
        } => run(team_glob, max_concurrency, use_combined, output_dir).await,
        cli::Command::DryRun { team_glob } => dry_run(team_glob).await,
    }
}

fn resolve_team_glob(flag: Option<String>) -> Result<String> {
    flag.or_else(|| std::env::var("TEAM_GLOB").ok())
        .context("no team glob given: pass --team-glob or set TEAM_GLOB")
}

async fn run(
    team_glob: Option<String>,
    max_concurrency: Option<usize>,
    use_combined: bool,
    output_dir: std::path::PathBuf,
) -> Result<()> {
    let pattern = resolve_team_glob(team_glob)?;
    let files = pipeline::expand_team_glob(&pattern)?;
    info!(count = files.len(), "matched input files");

    let mode = if use_combined {
        AgentMode::Combined
    } else {
        AgentMode::from_env()
    };

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .expect("template is compile-time constant"),
    );

    let contexts = pipeline::run_all(files, max_concurrency, mode, Some(progress.clone())).await;
    progress.finish_and_clear();

    for ctx in &contexts {
        print_report(ctx);
    }

    std::fs::create_dir_all(&output_dir)?;

    let mut entries: Vec<LeaderboardEntry> = contexts.iter().map(LeaderboardEntry::from).collect();
    leaderboard::sort(&mut entries);

    let sorted_contexts = reorder_contexts(contexts, &entries);

    excel::write_consolidated(&sorted_contexts, &output_dir.join("consolidated_reports.xlsx"))?;
    excel::write_leaderboard(&sorted_contexts, &output_dir.join("leaderboard.xlsx"))?;

    print_leaderboard_table(&entries);

    Ok(())
}

/// Re-orders the original contexts to match the already-sorted leaderboard
/// entries, so both workbooks and the console table agree on rank.
fn reorder_contexts(contexts: Vec<EvaluationContext>, entries: &[LeaderboardEntry]) -> Vec<EvaluationContext> {
    let mut by_path: std::collections::HashMap<_, _> =
        contexts.into_iter().map(|c| (c.file_path.clone(), c)).collect();
    entries
        .iter()
        .filter_map(|e| by_path.remove(&e.file_path))
        .collect()
}

fn print_report(ctx: &EvaluationContext) {
    if let Some(err) = &ctx.evaluation_error {
        println!("[{}] FAILED: {}", ctx.team_name, err);
        return;
    }
    println!(
        "[{}] weighted_total={:.2} raw_total={}",
        ctx.team_name,
        ctx.scores.weighted_total(),
        ctx.scores.raw_total()
    );
    let json = serde_json::json!({
        "team_name": ctx.team_name,
        "scores": ctx.scores.iter().map(|(k, v)| (k.label().to_string(), v)).collect::<std::collections::BTreeMap<_, _>>(),
        "total_raw": ctx.scores.raw_total(),
        "total_weighted": ctx.scores.weighted_total(),
        "summary": ctx.scoring_summary,
        "workflow_analysis": {
            "overall": ctx.workflow_report.as_ref().map(|r| r.overall_summary.as_str()),
        },
        "feedback": ctx.feedback,
    });
    println!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
}

fn print_leaderboard_table(entries: &[LeaderboardEntry]) {
    println!("\n=== Leaderboard ===");
    for (i, e) in entries.iter().enumerate() {
        let total = match e.weighted_total {
            Some(t) => format!("{t:.2}"),
            None => "ERROR".to_string(),
        };
        println!("{:>3}. {:<30} {:>8}  {}", i + 1, e.team_name, total, e.file_path.display());
    }
}

async fn dry_run(team_glob: Option<String>) -> Result<()> {
    let pattern = resolve_team_glob(team_glob)?;
    let files = pipeline::expand_team_glob(&pattern)?;
    let estimate = pipeline::dry_run(files).await;

    println!("Files matched: {}", estimate.file_count);
    let total_images: usize = estimate.image_counts.iter().map(|(_, n)| n).sum();
    println!("Total vision images that would be sent: {total_images}");
    for (path, n) in &estimate.image_counts {
        println!("  {}: {n} images", path.display());
    }
    Ok(())
}
