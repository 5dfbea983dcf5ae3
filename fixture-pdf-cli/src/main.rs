use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use fixture_pdf::{WarningLetter, WriterConfig, DEFAULT_FILENAME};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(
    name = "fixturepdf",
    about = "Generate the employee warning letter PDF used to test HR Suite uploads",
    version
)]
struct Cli {
    /// Output file path
    #[arg(short, long, default_value = DEFAULT_FILENAME)]
    output: PathBuf,

    /// Date printed on the letter (YYYY-MM-DD), defaults to today
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Leave page content streams uncompressed
    #[arg(long)]
    uncompressed: bool,

    /// Log drawing and writing steps to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(path) => {
            println!("✅ PDF created successfully: {}", path.display());
            println!(
                "This PDF contains selectable text and should work with the HR Suite upload system."
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("❌ Error creating PDF: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "fixture_pdf=debug,fixturepdf=debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: &Cli) -> Result<PathBuf> {
    let letter = cli.date.map_or_else(WarningLetter::today, WarningLetter::new);
    let config = if cli.uncompressed {
        WriterConfig::uncompressed()
    } else {
        WriterConfig::default()
    };
    debug!(date = %letter.date(), ?config, "rendering warning letter");

    letter
        .save(&cli.output, config)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    Ok(cli.output.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["fixturepdf"]).unwrap();
        assert_eq!(cli.output, PathBuf::from("test_warning_letter.pdf"));
        assert!(cli.date.is_none());
        assert!(!cli.uncompressed);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_date_parsing() {
        let cli = Cli::try_parse_from(["fixturepdf", "--date", "2026-10-18"]).unwrap();
        assert_eq!(cli.date, NaiveDate::from_ymd_opt(2026, 10, 18));

        assert!(Cli::try_parse_from(["fixturepdf", "--date", "18/10/2026"]).is_err());
    }

    #[test]
    fn test_run_reports_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("missing").join("letter.pdf");
        let cli = Cli::try_parse_from(["fixturepdf", "-o", output.to_str().unwrap()]).unwrap();

        let err = run(&cli).unwrap_err();
        assert!(format!("{err:#}").contains("failed to write"));
    }
}
