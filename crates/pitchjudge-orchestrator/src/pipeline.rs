//! Per-file lifecycle and bulk concurrency, grounded on
//! `video-extract-core::executor::BulkExecutor::execute_bulk`: one
//! `tokio::sync::Semaphore` permit per in-flight file, one `tokio::spawn`
//! task per file, results streamed back over an `mpsc` channel.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use tokio::sync::Semaphore;
use tracing::{info, instrument, warn};

use pitchjudge_agents::AgentMode;
use pitchjudge_core::model::{EvaluationContext, FileInput};

/// Expands `pattern` (comma-separated glob segments) into allowed input
/// files, aborting with a clear error when nothing matches (spec §4.5
/// Entry / invariant 11).
pub fn expand_team_glob(pattern: &str) -> Result<Vec<FileInput>> {
    let mut files = Vec::new();
    for segment in pattern.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        for entry in glob::glob(segment).with_context(|| format!("invalid glob pattern: {segment}"))? {
            let path = entry.with_context(|| format!("error reading glob match for: {segment}"))?;
            if let Some(file) = FileInput::new(&path) {
                files.push(file);
            }
        }
    }
    if files.is_empty() {
        anyhow::bail!(pitchjudge_core::PitchjudgeError::NoFilesMatched(pattern.to_string()));
    }
    Ok(files)
}

fn default_max_concurrency() -> usize {
    std::env::var("MAX_CONCURRENCY")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(2)
}

/// Runs the Loader → Visual Analyzer → Agents → Calibrator lifecycle for
/// one file. Never panics: every stage failure is recorded as
/// `evaluation_error` on the returned context (spec §4.3 step 7, §4.5
/// step 3).
#[instrument(skip_all, fields(team = %file.team_name))]
async fn evaluate_file(file: FileInput, mode: AgentMode) -> EvaluationContext {
    let mut ctx = EvaluationContext::new(file.path.clone(), file.team_name.clone());

    let path = file.path.clone();
    let load_result =
        tokio::task::spawn_blocking(move || pitchjudge_loader::load(&path, pitchjudge_loader::DEFAULT_RENDER_DPI, pitchjudge_loader::DEFAULT_MAX_RENDER_PAGES))
            .await;

    let (text, images) = match load_result {
        Ok(Ok(pair)) => pair,
        Ok(Err(e)) => {
            warn!(error = %e, "loader failed");
            ctx.set_error(format!("load failed: {e}"));
            return ctx;
        }
        Err(e) => {
            warn!(error = %e, "loader task panicked");
            ctx.set_error(format!("load task failed: {e}"));
            return ctx;
        }
    };
    ctx.raw_text = text;
    ctx.images = images.clone();

    let report = pitchjudge_visual::analyze(images).await;
    ctx.attach_workflow_report(report);

    pitchjudge_agents::evaluate(&mut ctx, mode).await;

    if ctx.evaluation_error.is_none() {
        let raw_scores: std::collections::HashMap<_, _> = ctx.scores.iter().collect();
        let diagram_evidence_count = ctx.diagram_evidence_count();
        ctx.scores = pitchjudge_calibrate::calibrate(&ctx.raw_text, &raw_scores, diagram_evidence_count);
    }

    ctx
}

/// Runs every file in `files` under a semaphore-bounded concurrency cap,
/// returning one [`EvaluationContext`] per file regardless of success.
pub async fn run_all(
    files: Vec<FileInput>,
    max_concurrency: Option<usize>,
    mode: AgentMode,
    progress: Option<ProgressBar>,
) -> Vec<EvaluationContext> {
    let max_concurrency = max_concurrency.unwrap_or_else(default_max_concurrency).max(1);
    let semaphore = Arc::new(Semaphore::new(max_concurrency));
    let (tx, mut rx) = tokio::sync::mpsc::channel(files.len().max(1));

    info!(total = files.len(), max_concurrency, "starting pipeline run");

    for file in files {
        let tx = tx.clone();
        let semaphore = semaphore.clone();
        tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await;
            let ctx = evaluate_file(file, mode).await;
            let _ = tx.send(ctx).await;
        });
    }
    drop(tx);

    let mut results = Vec::new();
    while let Some(ctx) = rx.recv().await {
        if let Some(bar) = &progress {
            bar.inc(1);
        }
        results.push(ctx);
    }
    results
}

/// Dry-run estimate: counts files and the vision images each would send,
/// without any network calls (spec §9).
pub struct Estimate {
    pub file_count: usize,
    pub image_counts: Vec<(PathBuf, usize)>,
}

pub async fn dry_run(files: Vec<FileInput>) -> Estimate {
    let mut image_counts = Vec::with_capacity(files.len());
    for file in files {
        let path = file.path.clone();
        let result = tokio::task::spawn_blocking(move || {
            pitchjudge_loader::load(&path, pitchjudge_loader::DEFAULT_RENDER_DPI, pitchjudge_loader::DEFAULT_MAX_RENDER_PAGES)
        })
        .await;
        let count = match result {
            Ok(Ok((_, images))) => pitchjudge_visual::count_for_budget(images),
            _ => 0,
        };
        image_counts.push((file.path, count));
    }
    Estimate {
        file_count: image_counts.len(),
        image_counts,
    }
}
