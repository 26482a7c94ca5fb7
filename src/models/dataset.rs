use crate::utils::constants::{
    COLLECTED_AT_COLUMN, DAILY_DATE_COLUMN, DAILY_STATION_COLUMN, FORECAST_DATE_COLUMN,
    HOURLY_STATION_COLUMN, HOURLY_TIMESTAMP_COLUMN,
};
use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::PathBuf;

/// Schema of a dataset file. Chosen by the caller, never sniffed from content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    HistoricalDaily,
    Hourly,
    CurrentDaily,
    Forecast,
}

impl DatasetKind {
    pub fn label(&self) -> &'static str {
        match self {
            DatasetKind::HistoricalDaily => "Historical Daily",
            DatasetKind::Hourly => "Hourly",
            DatasetKind::CurrentDaily => "Current Daily",
            DatasetKind::Forecast => "Forecast",
        }
    }

    /// Columns that must appear in the header row
    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            DatasetKind::HistoricalDaily | DatasetKind::CurrentDaily => {
                &[DAILY_DATE_COLUMN, DAILY_STATION_COLUMN]
            }
            DatasetKind::Hourly => &[HOURLY_TIMESTAMP_COLUMN, HOURLY_STATION_COLUMN],
            DatasetKind::Forecast => &[FORECAST_DATE_COLUMN, COLLECTED_AT_COLUMN],
        }
    }
}

impl std::fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One file to summarise
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetTarget {
    pub label: String,
    pub kind: DatasetKind,
    pub path: PathBuf,
}

impl DatasetTarget {
    pub fn new(kind: DatasetKind, path: impl Into<PathBuf>) -> Self {
        Self {
            label: kind.label().to_string(),
            kind,
            path: path.into(),
        }
    }
}

/// Per-day aggregate built while scanning a file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PerDay {
    /// Distinct station keys seen on each day
    StationsPerDay(BTreeMap<String, usize>),
    /// Rows seen on each day
    RowsPerDay(BTreeMap<String, usize>),
}

impl PerDay {
    pub fn heading(&self) -> &'static str {
        match self {
            PerDay::StationsPerDay(_) => "stations_per_day",
            PerDay::RowsPerDay(_) => "rows_per_day",
        }
    }

    pub fn counts(&self) -> &BTreeMap<String, usize> {
        match self {
            PerDay::StationsPerDay(counts) | PerDay::RowsPerDay(counts) => counts,
        }
    }

    /// The most recent `last_n` days, ascending
    pub fn recent(&self, last_n: usize) -> Vec<(&str, usize)> {
        let counts = self.counts();
        let skip = counts.len().saturating_sub(last_n);
        counts
            .iter()
            .skip(skip)
            .map(|(day, count)| (day.as_str(), *count))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSummary {
    pub rows: usize,
    pub min_date: Option<String>,
    pub max_date: Option<String>,
    pub min_ts: Option<String>,
    pub max_ts: Option<String>,
    pub latest_collected_at: Option<String>,
    pub per_day: PerDay,
}

impl DatasetSummary {
    pub fn new(per_day: PerDay) -> Self {
        Self {
            rows: 0,
            min_date: None,
            max_date: None,
            min_ts: None,
            max_ts: None,
            latest_collected_at: None,
            per_day,
        }
    }

    /// Render the summary block. The layout is scraped downstream, so field
    /// order and spelling are fixed.
    pub fn render(&self, label: &str, last_n: usize) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== {} ===", label);
        let _ = writeln!(out, "rows: {}", self.rows);

        let optional = [
            ("min_date", &self.min_date),
            ("max_date", &self.max_date),
            ("min_ts", &self.min_ts),
            ("max_ts", &self.max_ts),
            ("latest_collected_at", &self.latest_collected_at),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                let _ = writeln!(out, "{}: {}", key, value);
            }
        }

        let recent = self.per_day.recent(last_n);
        if !recent.is_empty() {
            let _ = writeln!(
                out,
                "{} (last {} days):",
                self.per_day.heading(),
                recent.len()
            );
            for (day, value) in recent {
                let _ = writeln!(out, "  {}: {}", day, value);
            }
        }

        out.push('\n');
        out
    }
}

/// Track a lexicographic minimum
pub(crate) fn keep_min(slot: &mut Option<String>, candidate: &str) {
    match slot {
        Some(current) if current.as_str() <= candidate => {}
        _ => *slot = Some(candidate.to_string()),
    }
}

/// Track a lexicographic maximum
pub(crate) fn keep_max(slot: &mut Option<String>, candidate: &str) {
    match slot {
        Some(current) if current.as_str() >= candidate => {}
        _ => *slot = Some(candidate.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn counts(entries: &[(&str, usize)]) -> BTreeMap<String, usize> {
        entries.iter().map(|(d, c)| (d.to_string(), *c)).collect()
    }

    #[test]
    fn test_recent_takes_last_days_ascending() {
        let per_day = PerDay::RowsPerDay(counts(&[
            ("2024-01-03", 3),
            ("2024-01-01", 1),
            ("2024-01-02", 2),
        ]));
        assert_eq!(per_day.recent(2), vec![("2024-01-02", 2), ("2024-01-03", 3)]);
        assert_eq!(per_day.recent(10).len(), 3);
    }

    #[test]
    fn test_render_forecast_summary() {
        let mut summary = DatasetSummary::new(PerDay::RowsPerDay(counts(&[
            ("2024-01-01", 3),
            ("2024-01-02", 1),
        ])));
        summary.rows = 4;
        summary.min_date = Some("2024-01-01".to_string());
        summary.max_date = Some("2024-01-02".to_string());
        summary.latest_collected_at = Some("2024-01-02T06:00:00".to_string());

        let expected = "=== Forecast ===\n\
                        rows: 4\n\
                        min_date: 2024-01-01\n\
                        max_date: 2024-01-02\n\
                        latest_collected_at: 2024-01-02T06:00:00\n\
                        rows_per_day (last 2 days):\n  \
                        2024-01-01: 3\n  \
                        2024-01-02: 1\n\n";
        assert_eq!(summary.render("Forecast", 7), expected);
    }

    #[test]
    fn test_render_empty_per_day_omits_block() {
        let summary = DatasetSummary::new(PerDay::StationsPerDay(BTreeMap::new()));
        assert_eq!(summary.render("Hourly", 7), "=== Hourly ===\nrows: 0\n\n");
    }

    #[test]
    fn test_keep_min_max() {
        let mut lo = None;
        let mut hi = None;
        for value in ["2024-01-02", "2024-01-01", "2024-01-03"] {
            keep_min(&mut lo, value);
            keep_max(&mut hi, value);
        }
        assert_eq!(lo.as_deref(), Some("2024-01-01"));
        assert_eq!(hi.as_deref(), Some("2024-01-03"));
    }

    #[test]
    fn test_required_columns_per_kind() {
        assert_eq!(DatasetKind::Hourly.required_columns(), &["fint", "idema"]);
        assert_eq!(
            DatasetKind::Forecast.required_columns(),
            &["fecha", "collected_at"]
        );
        assert_eq!(
            DatasetKind::CurrentDaily.required_columns(),
            DatasetKind::HistoricalDaily.required_columns()
        );
    }
}
