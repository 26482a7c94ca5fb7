use crate::analyzers::coverage::{audit_coverage, ExpectedAbsent};
use crate::cli::args::{Cli, Commands};
use crate::config::{AppConfig, CoverageSettings, SummarizeSettings};
use crate::error::{AuditError, Result, EXIT_FATAL};
use crate::models::{DatasetKind, DatasetTarget};
use crate::processors::ParallelSummarizer;
use crate::utils::constants::*;
use crate::utils::logging::init_logging;
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Run the selected command and return the process exit status.
/// Reports go to stdout, errors to stderr.
pub fn run(cli: Cli) -> u8 {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with_output(cli, &mut out)
}

/// Same as [`run`], writing reports to `out`
pub fn run_with_output(cli: Cli, out: &mut impl Write) -> u8 {
    init_logging(cli.verbose);

    let result = AppConfig::load_optional(cli.config.as_deref())
        .and_then(|config| dispatch(cli.command, config, out));

    match result {
        Ok(status) => status,
        Err(err) => {
            eprintln!("ERROR: {}", err);
            err.exit_code()
        }
    }
}

fn dispatch(command: Commands, config: AppConfig, out: &mut impl Write) -> Result<u8> {
    match command {
        Commands::Coverage {
            reference,
            forecast,
        } => run_coverage(
            CoverageSettings {
                reference: reference.or(config.coverage.reference),
                forecast: forecast.or(config.coverage.forecast),
                extra_expected_absent: config.coverage.extra_expected_absent,
            },
            out,
        ),

        Commands::Summarize {
            daily_historical,
            hourly,
            daily_current,
            forecast,
            last_days,
            max_workers,
            progress,
        } => run_summarize(
            SummarizeSettings {
                daily_historical: daily_historical.or(config.summarize.daily_historical),
                hourly: hourly.or(config.summarize.hourly),
                daily_current: daily_current.or(config.summarize.daily_current),
                forecast: forecast.or(config.summarize.forecast),
                last_days: last_days.or(config.summarize.last_days),
            },
            max_workers,
            progress,
            out,
        ),
    }
}

/// Coverage audit: 0 when fully covered, 1 when municipalities are missing.
/// Load failures propagate and map to exit status 2.
pub fn run_coverage(settings: CoverageSettings, out: &mut impl Write) -> Result<u8> {
    let reference = path_or(settings.reference, DEFAULT_REFERENCE_PATH);
    let forecast = path_or(settings.forecast, DEFAULT_FORECAST_PATH);
    let expected_absent = ExpectedAbsent::builtin().with_extra(settings.extra_expected_absent);

    info!(
        reference = %reference.display(),
        forecast = %forecast.display(),
        "auditing municipal forecast coverage"
    );

    let report = audit_coverage(&reference, &forecast, &expected_absent)?;
    out.write_all(report.render().as_bytes())?;
    out.flush()?;
    Ok(report.exit_code())
}

/// Dataset summaries in fixed order. Missing files are reported inline;
/// header or read failures are reported inline and turn the status to 2.
pub fn run_summarize(
    settings: SummarizeSettings,
    max_workers: usize,
    progress: bool,
    out: &mut impl Write,
) -> Result<u8> {
    let last_days = settings.last_days.unwrap_or(DEFAULT_LAST_DAYS);
    if last_days == 0 {
        return Err(AuditError::Config(
            "--last-days must be at least 1".to_string(),
        ));
    }

    let targets = vec![
        DatasetTarget::new(
            DatasetKind::HistoricalDaily,
            path_or(settings.daily_historical, DEFAULT_DAILY_HISTORICAL_PATH),
        ),
        DatasetTarget::new(
            DatasetKind::Hourly,
            path_or(settings.hourly, DEFAULT_HOURLY_PATH),
        ),
        DatasetTarget::new(
            DatasetKind::CurrentDaily,
            path_or(settings.daily_current, DEFAULT_DAILY_CURRENT_PATH),
        ),
        DatasetTarget::new(
            DatasetKind::Forecast,
            path_or(settings.forecast, DEFAULT_FORECAST_BARCELONA_PATH),
        ),
    ];

    let run = ParallelSummarizer::new(max_workers)
        .with_last_days(last_days)
        .with_progress(progress)
        .run(targets)?;

    out.write_all(run.render().as_bytes())?;
    out.flush()?;

    if run.has_failures() {
        Ok(EXIT_FATAL)
    } else {
        Ok(0)
    }
}

fn path_or(path: Option<PathBuf>, default: &str) -> PathBuf {
    path.unwrap_or_else(|| PathBuf::from(default))
}
