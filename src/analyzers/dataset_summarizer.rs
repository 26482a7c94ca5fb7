use crate::error::{AuditError, Result};
use crate::models::dataset::{keep_max, keep_min};
use crate::models::{DatasetKind, DatasetSummary, DatasetTarget, PerDay};
use crate::readers::{cell, CsvTable};
use crate::utils::constants::{
    COLLECTED_AT_COLUMN, DAILY_DATE_COLUMN, DAILY_STATION_COLUMN, FORECAST_DATE_COLUMN,
    HOURLY_STATION_COLUMN, HOURLY_TIMESTAMP_COLUMN,
};
use crate::utils::progress::ProgressReporter;
use std::collections::{BTreeMap, HashSet};
use std::fmt::Write;
use std::path::Path;
use tracing::debug;

const DAY_PREFIX_LEN: usize = 10;

/// Result of summarising one target
#[derive(Debug)]
pub enum DatasetOutcome {
    Summary(DatasetSummary),
    NotFound,
    Failed(AuditError),
}

impl DatasetOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, DatasetOutcome::Failed(_))
    }

    pub fn render(&self, target: &DatasetTarget, last_n: usize) -> String {
        match self {
            DatasetOutcome::Summary(summary) => summary.render(&target.label, last_n),
            DatasetOutcome::NotFound => format!(
                "=== {} ===\nFile not found: {}\n\n",
                target.label,
                target.path.display()
            ),
            DatasetOutcome::Failed(err) => {
                let mut out = format!("=== {} ===\n", target.label);
                let _ = match err {
                    AuditError::MalformedHeader { .. } => writeln!(out, "Malformed header: {}", err),
                    _ => writeln!(out, "Read error: {}", err),
                };
                out.push('\n');
                out
            }
        }
    }
}

pub struct DatasetSummarizer {
    progress: Option<ProgressReporter>,
}

impl DatasetSummarizer {
    pub fn new() -> Self {
        Self { progress: None }
    }

    pub fn with_progress(progress: ProgressReporter) -> Self {
        Self {
            progress: Some(progress),
        }
    }

    /// Summarise one target. A missing file is reported, not raised.
    pub fn summarize_target(&self, target: &DatasetTarget) -> DatasetOutcome {
        if !target.path.exists() {
            debug!(label = %target.label, path = %target.path.display(), "dataset not found");
            return DatasetOutcome::NotFound;
        }

        if let Some(ref progress) = self.progress {
            progress.set_message(&format!("Scanning {}...", target.label));
        }

        match self.summarize(target.kind, &target.path) {
            Ok(summary) => DatasetOutcome::Summary(summary),
            Err(AuditError::MissingFile { .. }) => DatasetOutcome::NotFound,
            Err(err) => DatasetOutcome::Failed(err),
        }
    }

    pub fn summarize(&self, kind: DatasetKind, path: &Path) -> Result<DatasetSummary> {
        let table = CsvTable::open(path)?;
        for column in kind.required_columns() {
            table.column(column)?;
        }
        let compression = table.compression();

        let summary = match kind {
            DatasetKind::HistoricalDaily | DatasetKind::CurrentDaily => {
                self.summarize_daily(table, DAILY_DATE_COLUMN, DAILY_STATION_COLUMN)?
            }
            DatasetKind::Hourly => self.summarize_hourly(table)?,
            DatasetKind::Forecast => self.summarize_forecast(table)?,
        };

        debug!(
            path = %path.display(),
            %kind,
            ?compression,
            rows = summary.rows,
            "summarised dataset"
        );
        Ok(summary)
    }

    /// Distinct station keys per date, with the date range
    pub fn summarize_daily(
        &self,
        table: CsvTable,
        date_col: &str,
        key_col: &str,
    ) -> Result<DatasetSummary> {
        let [date_idx, key_idx] = table.columns([date_col, key_col])?;
        let mut per_day: BTreeMap<String, HashSet<String>> = BTreeMap::new();
        let mut summary = DatasetSummary::new(PerDay::StationsPerDay(BTreeMap::new()));

        for record in table {
            let record = record?;
            summary.rows += 1;
            self.tick(summary.rows);

            let date = cell(&record, date_idx);
            if date.is_empty() {
                continue;
            }
            per_day
                .entry(date.to_string())
                .or_default()
                .insert(cell(&record, key_idx).to_string());
            keep_min(&mut summary.min_date, date);
            keep_max(&mut summary.max_date, date);
        }

        summary.per_day = PerDay::StationsPerDay(distinct_counts(per_day));
        Ok(summary)
    }

    /// Like the daily summary, keyed on the date part of `fint`. The range
    /// covers full timestamps.
    pub fn summarize_hourly(&self, table: CsvTable) -> Result<DatasetSummary> {
        let [ts_idx, key_idx] = table.columns([HOURLY_TIMESTAMP_COLUMN, HOURLY_STATION_COLUMN])?;
        let mut per_day: BTreeMap<String, HashSet<String>> = BTreeMap::new();
        let mut summary = DatasetSummary::new(PerDay::StationsPerDay(BTreeMap::new()));

        for record in table {
            let record = record?;
            summary.rows += 1;
            self.tick(summary.rows);

            let timestamp = cell(&record, ts_idx);
            if timestamp.is_empty() {
                continue;
            }
            per_day
                .entry(day_of(timestamp).to_string())
                .or_default()
                .insert(cell(&record, key_idx).to_string());
            keep_min(&mut summary.min_ts, timestamp);
            keep_max(&mut summary.max_ts, timestamp);
        }

        summary.per_day = PerDay::StationsPerDay(distinct_counts(per_day));
        Ok(summary)
    }

    /// Rows per forecast date plus the latest `collected_at`
    pub fn summarize_forecast(&self, table: CsvTable) -> Result<DatasetSummary> {
        let [date_idx, collected_idx] = table.columns([FORECAST_DATE_COLUMN, COLLECTED_AT_COLUMN])?;
        let mut per_day: BTreeMap<String, usize> = BTreeMap::new();
        let mut summary = DatasetSummary::new(PerDay::RowsPerDay(BTreeMap::new()));

        for record in table {
            let record = record?;
            summary.rows += 1;
            self.tick(summary.rows);

            let date = cell(&record, date_idx);
            if !date.is_empty() {
                *per_day.entry(date.to_string()).or_insert(0) += 1;
                keep_min(&mut summary.min_date, date);
                keep_max(&mut summary.max_date, date);
            }

            let collected_at = cell(&record, collected_idx);
            if !collected_at.is_empty() {
                keep_max(&mut summary.latest_collected_at, collected_at);
            }
        }

        summary.per_day = PerDay::RowsPerDay(per_day);
        Ok(summary)
    }

    pub fn finish(&self) {
        if let Some(ref progress) = self.progress {
            progress.finish_and_clear();
        }
    }

    fn tick(&self, rows: usize) {
        if let Some(ref progress) = self.progress {
            if rows % 10_000 == 0 {
                progress.increment(10_000);
            }
        }
    }
}

impl Default for DatasetSummarizer {
    fn default() -> Self {
        Self::new()
    }
}

/// First ten characters of a timestamp (the `YYYY-MM-DD` part)
fn day_of(timestamp: &str) -> &str {
    match timestamp.char_indices().nth(DAY_PREFIX_LEN) {
        Some((end, _)) => &timestamp[..end],
        None => timestamp,
    }
}

fn distinct_counts(per_day: BTreeMap<String, HashSet<String>>) -> BTreeMap<String, usize> {
    per_day
        .into_iter()
        .map(|(day, keys)| (day, keys.len()))
        .collect()
}
