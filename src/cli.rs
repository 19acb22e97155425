//! Command-line surface: flag definitions and the single-request flow.

use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crate::client::Client;
use crate::payload::{SearchFilters, SearchRequest, build_payload};
use crate::report::{print_projects, print_summary, write_csv, write_json};
use crate::response::SearchResponse;

#[derive(Parser, Debug, Clone)]
#[command(name = "nih-reporter")]
#[command(about = "NIH RePORTER API client (projects/search).")]
#[command(version)]
pub struct Cli {
    /// Fiscal year filter (repeatable). Example: --year 2023
    #[arg(long = "year")]
    pub year: Vec<u32>,

    /// Keyword filter (repeatable). Example: --keyword cancer
    #[arg(long = "keyword")]
    pub keyword: Vec<String>,

    /// Activity code filter (repeatable). Example: --activity R01
    #[arg(long = "activity")]
    pub activity: Vec<String>,

    /// Organization name filter (repeatable). Example: --org 'STANFORD UNIVERSITY'
    #[arg(long = "org")]
    pub org: Vec<String>,

    /// PI name filter (repeatable). Example: --pi Smith
    #[arg(long = "pi")]
    pub pi: Vec<String>,

    /// Number of results to return.
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: u32,

    /// Offset for pagination.
    #[arg(long, default_value_t = 0)]
    pub offset: u32,

    /// HTTP timeout in seconds.
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Override include_fields list. Example: --include_fields ProjectTitle AwardAmount
    #[arg(long = "include_fields", num_args = 0..)]
    pub include_fields: Option<Vec<String>>,

    /// Optional output path for full JSON.
    #[arg(long = "out_json")]
    pub out_json: Option<PathBuf>,

    /// Optional output path for flattened CSV.
    #[arg(long = "out_csv")]
    pub out_csv: Option<PathBuf>,

    /// How many results to print.
    #[arg(long = "print_n", default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub print_n: u64,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence.
    #[arg(long = "log_level", default_value = "warn")]
    pub log_level: String,

    /// Do not show the spinner while waiting for the server.
    #[arg(long = "no_progress")]
    pub no_progress: bool,
}

impl Cli {
    pub fn filters(&self) -> SearchFilters {
        SearchFilters {
            fiscal_years: self.year.clone(),
            keywords: self.keyword.clone(),
            activity_codes: self.activity.clone(),
            org_names: self.org.clone(),
            pi_names: self.pi.clone(),
        }
    }

    pub fn payload(&self) -> SearchRequest {
        build_payload(
            &self.filters(),
            self.offset,
            self.limit,
            self.include_fields.clone(),
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Runs one search and renders it.
///
/// Returns the process exit code: `0` on success, `1` when the request or an export
/// fails. Failures writing the console report are returned as errors.
pub fn run<O: Write, E: Write>(cli: &Cli, client: &Client, out: &mut O, err: &mut E) -> Result<i32> {
    let payload = cli.payload();

    writeln!(out, "Request payload:")?;
    writeln!(out, "{}", serde_json::to_string_pretty(&payload)?)?;
    writeln!(out)?;
    out.flush()?;

    let started = Instant::now();
    let data = match client.search(&payload) {
        Ok(data) => data,
        Err(e) => {
            tracing::debug!(error = ?e, "search failed");
            writeln!(err, "Request failed: {:#}", e)?;
            return Ok(1);
        }
    };
    let elapsed = started.elapsed();

    print_summary(out, &data)?;
    writeln!(out, "Request time: {:.3}s", elapsed.as_secs_f64())?;
    writeln!(out)?;

    print_projects(out, data.results(), cli.print_n as usize)?;

    if let Err(e) = export(cli, &data, out) {
        writeln!(err, "Export failed: {:#}", e)?;
        return Ok(1);
    }
    Ok(0)
}

fn export<O: Write>(cli: &Cli, data: &SearchResponse, out: &mut O) -> Result<()> {
    if let Some(path) = &cli.out_json {
        write_json(path, data)?;
        writeln!(out, "Wrote JSON: {}", path.display())?;
    }
    if let Some(path) = &cli.out_csv {
        let rows = write_csv(path, data.results())
            .with_context(|| format!("CSV export to {} failed", path.display()))?;
        if rows == 0 {
            writeln!(out, "No rows to write to CSV.")?;
        } else {
            writeln!(out, "Wrote CSV: {}", path.display())?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::{DEFAULT_INCLUDE_FIELDS, PiName};

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("nih-reporter").chain(args.iter().copied()))
    }

    #[test]
    fn happy_path() {
        let cli = parse(&[
            "--year", "2024", "--year", "2025", "--pi", "Smith", "--limit", "10", "--offset", "2",
        ])
        .unwrap();
        assert_eq!(cli.year, vec![2024, 2025]);
        assert_eq!(cli.pi, vec!["Smith"]);
        assert_eq!(cli.limit, 10);
        assert_eq!(cli.offset, 2);
        assert_eq!(cli.timeout(), Duration::from_secs(60));
        assert_eq!(cli.print_n, 10);
        assert_eq!(cli.include_fields, None);
    }

    #[test]
    fn rejects_invalid_bounds() {
        for args in [
            &["--limit", "0"][..],
            &["--offset", "-1"][..],
            &["--print_n", "0"][..],
            &["--timeout", "0"][..],
            &["--year", "twenty"][..],
        ] {
            assert!(parse(args).is_err(), "expected {:?} to be rejected", args);
        }
    }

    #[test]
    fn payload_from_flags() {
        let cli = parse(&["--pi", "Smith", "--keyword", "asthma", "--include_fields"]).unwrap();
        let payload = cli.payload();
        assert_eq!(payload.criteria.pi_names, vec![PiName::any("Smith")]);
        assert_eq!(payload.criteria.keywords, vec!["asthma"]);
        assert!(payload.criteria.fiscal_years.is_empty());
        assert_eq!(payload.include_fields, DEFAULT_INCLUDE_FIELDS);
    }

    #[test]
    fn include_fields_override() {
        let cli = parse(&["--include_fields", "ProjectTitle", "AwardAmount"]).unwrap();
        assert_eq!(cli.payload().include_fields, vec!["ProjectTitle", "AwardAmount"]);
    }
}
