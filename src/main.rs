//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `bing_webmaster` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Printing results as JSON
//!
//! All core functionality is implemented in the library crate.

use std::path::PathBuf;
use std::process;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::json;

use bing_webmaster::config::DEFAULT_TOP_LIMIT;
use bing_webmaster::initialization::init_logger_with;
use bing_webmaster::input::{read_url_file, validate_submission_url};
use bing_webmaster::{
    Aggregation, BingWebmaster, Config, DateRange, LogFormat, LogLevel, StatsOptions, StatsReport,
    SubmissionOutcome, TrafficOptions,
};

/// Query statistics and submit URLs through the Bing Webmaster API
#[derive(Debug, Parser)]
#[command(name = "bing_webmaster", version, about)]
struct Cli {
    /// OAuth access token
    #[arg(long, env = "BING_WEBMASTER_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Log level: error, warn, info, debug, or trace
    #[arg(long, value_enum, default_value = "info")]
    log_level: LogLevel,

    /// Log format: plain or json
    #[arg(long, value_enum, default_value = "plain")]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List the sites the token owner can access
    Sites,
    /// Rank and traffic statistics
    Traffic {
        #[command(flatten)]
        range: RangeArgs,
        /// Time bucket of each row
        #[arg(long, value_enum)]
        aggregation: Option<Aggregation>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Keyword statistics
    Keywords(StatsArgs),
    /// Page statistics
    Pages(StatsArgs),
    /// Search query statistics
    Queries(StatsArgs),
    /// Submit one URL for crawling
    SubmitUrl {
        #[arg(long)]
        site: String,
        url: String,
    },
    /// Submit sitemaps given as arguments and/or listed in a file
    SubmitSitemaps {
        #[arg(long)]
        site: String,
        sitemaps: Vec<String>,
        /// File with one sitemap URL per line (`#` starts a comment)
        #[arg(long)]
        file: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
struct RangeArgs {
    /// Site URL as registered in Webmaster Tools
    #[arg(long)]
    site: String,
    /// First day (YYYY-MM-DD); defaults to the start of the trailing range
    #[arg(long)]
    start: Option<NaiveDate>,
    /// Last day (YYYY-MM-DD); defaults to yesterday
    #[arg(long)]
    end: Option<NaiveDate>,
    /// Print only the top N rows per metric instead of every record (0 means 10)
    #[arg(long)]
    top: Option<usize>,
}

#[derive(Debug, Args)]
struct StatsArgs {
    #[command(flatten)]
    range: RangeArgs,
    #[arg(long)]
    limit: Option<u32>,
    #[arg(long)]
    offset: Option<u32>,
}

impl RangeArgs {
    /// Explicit dates, with gaps filled from the trailing default range.
    fn resolve(&self, default_days: i64, today: NaiveDate) -> DateRange {
        let fallback = DateRange::trailing(default_days, today);
        DateRange {
            start: self.start.unwrap_or(fallback.start),
            end: self.end.unwrap_or(fallback.end),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_logger_with(cli.log_level.clone().into(), cli.log_format.clone())
        .context("Failed to initialize logger")?;

    let config = Config::from_env();
    let client =
        BingWebmaster::new(cli.token.clone(), config).context("Failed to create API client")?;

    match run(&client, cli.command).await {
        Ok(all_succeeded) => {
            client.stats().log_summary();
            if !all_succeeded {
                process::exit(1);
            }
            Ok(())
        }
        Err(e) => {
            client.stats().log_summary();
            eprintln!("bing_webmaster error: {:#}", e);
            process::exit(1);
        }
    }
}

/// Runs one subcommand; `Ok(false)` means some submissions failed.
async fn run(client: &BingWebmaster, command: Command) -> Result<bool> {
    let today = chrono::Local::now().date_naive();
    let default_days = client.config().default_date_range_days;

    match command {
        Command::Sites => {
            let sites = client.get_user_sites().await?;
            print_json(&sites)?;
        }
        Command::Traffic {
            range,
            aggregation,
            limit,
        } => {
            let mut options = TrafficOptions::new()
                .date_range(range.resolve(default_days, today))
                .aggregation(aggregation.unwrap_or(client.config().default_aggregation));
            options.limit = limit;
            let report = client
                .get_rank_and_traffic_stats(&range.site, &options)
                .await?;
            print_report(&report, range.top)?;
        }
        Command::Keywords(args) => {
            let report = client
                .get_keyword_stats(&args.range.site, &stats_options(&args, default_days, today))
                .await?;
            print_report(&report, args.range.top)?;
        }
        Command::Pages(args) => {
            let report = client
                .get_page_stats(&args.range.site, &stats_options(&args, default_days, today))
                .await?;
            print_report(&report, args.range.top)?;
        }
        Command::Queries(args) => {
            let report = client
                .get_query_stats(&args.range.site, &stats_options(&args, default_days, today))
                .await?;
            print_report(&report, args.range.top)?;
        }
        Command::SubmitUrl { site, url } => {
            let Some(url) = validate_submission_url(&url) else {
                bail!("Invalid URL: {}", url);
            };
            let outcome = client.submit_url(&site, &url).await?;
            print_json(&outcome)?;
            return Ok(outcome.success);
        }
        Command::SubmitSitemaps {
            site,
            sitemaps,
            file,
        } => {
            let mut urls: Vec<String> = sitemaps
                .iter()
                .filter_map(|s| validate_submission_url(s))
                .collect();
            if let Some(path) = file {
                let listed = read_url_file(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                urls.extend(listed);
            }
            if urls.is_empty() {
                bail!("No valid sitemap URLs given");
            }

            let outcomes = client.submit_sitemaps(&site, &urls).await;
            print_json(&outcomes)?;
            return Ok(outcomes.iter().all(|o: &SubmissionOutcome| o.success));
        }
    }
    Ok(true)
}

fn stats_options(args: &StatsArgs, default_days: i64, today: NaiveDate) -> StatsOptions {
    StatsOptions {
        limit: args.limit,
        offset: args.offset,
        ..StatsOptions::new().date_range(args.range.resolve(default_days, today))
    }
}

fn print_report(report: &StatsReport, top: Option<usize>) -> Result<()> {
    match top {
        None => print_json(report),
        Some(n) => {
            let n = if n == 0 { DEFAULT_TOP_LIMIT } else { n };
            print_json(&json!({
                "kind": report.kind,
                "summary": report.summary,
                "top_by_clicks": report.top_by_clicks(n),
                "top_by_impressions": report.top_by_impressions(n),
                "top_by_position": report.top_by_position(n),
            }))
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", text);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn test_parse_stats_subcommand() {
        let cli = Cli::try_parse_from([
            "bing_webmaster",
            "--token",
            "abc",
            "queries",
            "--site",
            "https://example.com/",
            "--start",
            "2024-01-01",
            "--limit",
            "50",
            "--top",
            "5",
        ])
        .expect("arguments parse");

        assert_eq!(cli.token.as_deref(), Some("abc"));
        match cli.command {
            Command::Queries(args) => {
                assert_eq!(args.range.site, "https://example.com/");
                assert_eq!(args.range.start, Some(date(2024, 1, 1)));
                assert_eq!(args.range.end, None);
                assert_eq!(args.limit, Some(50));
                assert_eq!(args.range.top, Some(5));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_traffic_aggregation() {
        let cli = Cli::try_parse_from([
            "bing_webmaster",
            "traffic",
            "--site",
            "https://example.com/",
            "--aggregation",
            "weekly",
        ])
        .expect("arguments parse");
        assert!(matches!(
            cli.command,
            Command::Traffic {
                aggregation: Some(Aggregation::Weekly),
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_malformed_dates() {
        let result = Cli::try_parse_from([
            "bing_webmaster",
            "pages",
            "--site",
            "https://example.com/",
            "--start",
            "01/02/2024",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_range_resolution_fills_gaps() {
        let today = date(2024, 3, 31);
        let args = RangeArgs {
            site: "s".to_string(),
            start: None,
            end: Some(date(2024, 3, 15)),
            top: None,
        };
        let range = args.resolve(30, today);
        assert_eq!(range.start, date(2024, 3, 1));
        assert_eq!(range.end, date(2024, 3, 15));
    }

    #[test]
    fn test_submit_sitemaps_reads_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "# sitemaps").expect("write");
        writeln!(file, "https://example.com/sitemap.xml").expect("write");
        writeln!(file).expect("write");
        writeln!(file, "example.com/news.xml").expect("write");

        let cli = Cli::try_parse_from([
            "bing_webmaster",
            "submit-sitemaps",
            "--site",
            "https://example.com/",
            "--file",
            file.path().to_str().expect("utf-8 path"),
        ])
        .expect("arguments parse");

        let Command::SubmitSitemaps { file: Some(path), sitemaps, .. } = cli.command else {
            panic!("expected submit-sitemaps with a file");
        };
        assert!(sitemaps.is_empty());
        assert_eq!(
            read_url_file(&path).expect("file readable"),
            vec![
                "https://example.com/sitemap.xml".to_string(),
                "https://example.com/news.xml".to_string()
            ]
        );
    }
}
