//! Console rendering and file export of search results.

use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Write;
use std::path::Path;

use crate::flatten::{FlatRow, first_pi_name, flatten_project, organization};
use crate::resolve::{get_value, is_truthy};
use crate::response::SearchResponse;
use crate::util::{cell_text, display_text, format_amount};

/// Writes the summary block: returned count, total and paging when the server sent them.
pub fn print_summary<W: Write>(out: &mut W, data: &SearchResponse) -> Result<()> {
    writeln!(out, "=== NIH RePORTER: projects/search ===")?;
    writeln!(out, "Returned: {}", data.results().len())?;
    if let Some(total) = data.total() {
        writeln!(out, "Total matching: {}", display_text(total))?;
    }
    if let (Some(offset), Some(limit)) = (data.meta_field("offset"), data.meta_field("limit")) {
        writeln!(
            out,
            "Offset/Limit: {}/{}",
            display_text(offset),
            display_text(limit)
        )?;
    }
    writeln!(out)?;
    Ok(())
}

/// Writes up to `max_rows` projects, one block each.
pub fn print_projects<W: Write>(out: &mut W, results: &[Value], max_rows: usize) -> Result<()> {
    for (i, project) in results.iter().take(max_rows).enumerate() {
        let field = |aliases: &[&str]| get_value(project, aliases).cloned().unwrap_or(Value::Null);

        let title = field(&["ProjectTitle", "project_title"]);
        let year = field(&["FiscalYear", "fiscal_year"]);
        let amount = field(&["AwardAmount", "award_amount"]);
        let org = organization(project);
        let org_name = get_value(&org, &["OrgName", "org_name"]).cloned().unwrap_or(Value::Null);
        let pi = first_pi_name(project).unwrap_or(Value::Null);

        writeln!(
            out,
            "[{}] FY{}  ${}",
            i + 1,
            display_text(&year),
            format_amount(&amount)
        )?;
        if is_truthy(&title) {
            writeln!(out, "     Title: {}", display_text(&title))?;
        }
        if is_truthy(&org_name) {
            writeln!(out, "     Org:   {}", display_text(&org_name))?;
        }
        if is_truthy(&pi) {
            writeln!(out, "     PI:    {}", display_text(&pi))?;
        }

        let appl_id = field(&["ApplId", "appl_id"]);
        let project_num = field(&["ProjectNum", "project_num"]);
        if is_truthy(&appl_id) || is_truthy(&project_num) {
            writeln!(
                out,
                "     IDs:   ApplId={}  ProjectNum={}",
                display_text(&appl_id),
                display_text(&project_num)
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Writes the full response as 2-space indented JSON.
pub fn write_json(path: &Path, data: &SearchResponse) -> Result<()> {
    let text = serde_json::to_string_pretty(data).context("failed to serialize response")?;
    std::fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote JSON");
    Ok(())
}

/// Writes one flattened row per project, with a header row.
///
/// Returns the number of data rows. With no projects nothing is written and `0` is returned.
pub fn write_csv(path: &Path, results: &[Value]) -> Result<usize> {
    let rows: Vec<FlatRow> = results.iter().map(flatten_project).collect();
    if rows.is_empty() {
        tracing::debug!(path = %path.display(), "no rows, skipping CSV");
        return Ok(0);
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create output file {}", path.display()))?;
    writer
        .write_record(FlatRow::COLUMNS)
        .context("failed to write CSV header")?;
    for row in &rows {
        writer
            .write_record(row.values().map(cell_text))
            .context("failed to write CSV row")?;
    }
    writer.flush().context("failed to flush CSV output")?;

    tracing::info!(path = %path.display(), rows = rows.len(), "wrote CSV");
    Ok(rows.len())
}
