//! Writes the two `.xlsx` workbooks (spec §4.5 Leaderboard / §6) using
//! `rust_xlsxwriter`, sourced from the wider ecosystem since no repo in
//! the retrieved pack writes `.xlsx` (see DESIGN.md).

use std::path::Path;

use anyhow::Result;
use rust_xlsxwriter::Workbook;

use pitchjudge_core::model::EvaluationContext;
use pitchjudge_core::rubric::RubricKey;

/// One row per team, columns in the fixed order spec §6 defines for this
/// cross-process file contract: team_name, file_path, evaluation_error,
/// the six rubric keys, total_raw, total_weighted, summary,
/// workflow_overall, then the four feedback fields.
pub fn write_consolidated(contexts: &[EvaluationContext], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet().set_name("Evaluations")?;

    let mut headers = vec!["Team Name".to_string(), "File".to_string(), "Error".to_string()];
    headers.extend(RubricKey::ALL.iter().map(|k| k.label().to_string()));
    headers.extend([
        "Raw Total".to_string(),
        "Weighted Total".to_string(),
        "Summary".to_string(),
        "Workflow Overall".to_string(),
        "Feedback: Positive".to_string(),
        "Feedback: Criticism".to_string(),
        "Feedback: Technical".to_string(),
        "Feedback: Suggestions".to_string(),
    ]);
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, header)?;
    }

    for (row_idx, ctx) in contexts.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        let mut col = 0u16;
        sheet.write_string(row, col, &ctx.team_name)?;
        col += 1;
        sheet.write_string(row, col, &ctx.file_path.display().to_string())?;
        col += 1;
        sheet.write_string(row, col, ctx.evaluation_error.as_deref().unwrap_or(""))?;
        col += 1;
        for key in RubricKey::ALL {
            sheet.write_number(row, col, ctx.scores.get(key).unwrap_or(0) as f64)?;
            col += 1;
        }
        sheet.write_number(row, col, ctx.scores.raw_total() as f64)?;
        col += 1;
        sheet.write_number(row, col, ctx.scores.weighted_total())?;
        col += 1;
        sheet.write_string(row, col, &ctx.scoring_summary)?;
        col += 1;
        let overall = ctx.workflow_report.as_ref().map(|r| r.overall_summary.as_str()).unwrap_or("");
        sheet.write_string(row, col, overall)?;
        col += 1;
        sheet.write_string(row, col, &ctx.feedback.positive)?;
        col += 1;
        sheet.write_string(row, col, &ctx.feedback.criticism)?;
        col += 1;
        sheet.write_string(row, col, &ctx.feedback.technical)?;
        col += 1;
        sheet.write_string(row, col, &ctx.feedback.suggestions)?;
    }

    workbook.save(path)?;
    Ok(())
}

/// Ranked leaderboard: Rank, Team Name, Weighted Total, Innovation,
/// Technical, Impact, File.
pub fn write_leaderboard(sorted_contexts: &[EvaluationContext], path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet().set_name("Leaderboard")?;

    let headers = [
        "Rank",
        "Team Name",
        "Weighted Total",
        "Innovation & Uniqueness",
        "Technical Feasibility",
        "Potential Impact",
        "File Name",
    ];
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }

    for (i, ctx) in sorted_contexts.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_number(row, 0, (i + 1) as f64)?;
        sheet.write_string(row, 1, &ctx.team_name)?;
        if ctx.evaluation_error.is_some() {
            sheet.write_string(row, 2, "ERROR")?;
        } else {
            sheet.write_number(row, 2, ctx.scores.weighted_total())?;
        }
        sheet.write_number(row, 3, ctx.scores.get(RubricKey::InnovationUniqueness).unwrap_or(0) as f64)?;
        sheet.write_number(row, 4, ctx.scores.get(RubricKey::TechnicalFeasibility).unwrap_or(0) as f64)?;
        sheet.write_number(row, 5, ctx.scores.get(RubricKey::PotentialImpact).unwrap_or(0) as f64)?;
        sheet.write_string(row, 6, &ctx.file_path.display().to_string())?;
    }

    workbook.save(path)?;
    Ok(())
}
