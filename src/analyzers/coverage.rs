use crate::error::Result;
use crate::models::MunicipalityId;
use crate::readers::{cell, CsvTable};
use crate::utils::constants::{
    COMMUNAL_CODES, FORECAST_ID_COLUMN, MISSING_SAMPLE_LIMIT, NEW_MUNICIPALITIES,
    REFERENCE_ID_COLUMN,
};
use std::collections::BTreeSet;
use std::fmt::Write;
use std::path::Path;
use tracing::{debug, warn};

pub const EXIT_COVERED: u8 = 0;
pub const EXIT_MISSING: u8 = 1;

/// Identifiers known to be legitimately absent from forecast output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpectedAbsent {
    ids: BTreeSet<MunicipalityId>,
}

impl ExpectedAbsent {
    /// New municipalities plus communal codes
    pub fn builtin() -> Self {
        Self::from_ids(
            NEW_MUNICIPALITIES
                .iter()
                .chain(COMMUNAL_CODES)
                .map(|id| MunicipalityId::from(*id)),
        )
    }

    pub fn empty() -> Self {
        Self {
            ids: BTreeSet::new(),
        }
    }

    pub fn from_ids(ids: impl IntoIterator<Item = MunicipalityId>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn with_extra(mut self, extra: impl IntoIterator<Item = MunicipalityId>) -> Self {
        self.ids.extend(extra);
        self
    }

    pub fn contains(&self, id: &MunicipalityId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Read the reference catalogue, zero-padding every `CUMUN` value.
pub fn load_reference_ids(path: &Path) -> Result<BTreeSet<MunicipalityId>> {
    load_ids(path, REFERENCE_ID_COLUMN, MunicipalityId::normalize)
}

/// Read forecast identifiers as written, skipping empty cells.
pub fn load_forecast_ids(path: &Path) -> Result<BTreeSet<MunicipalityId>> {
    load_ids(path, FORECAST_ID_COLUMN, MunicipalityId::verbatim)
}

fn load_ids(
    path: &Path,
    column: &str,
    parse: fn(&str) -> Option<MunicipalityId>,
) -> Result<BTreeSet<MunicipalityId>> {
    let table = CsvTable::open(path)?;
    let index = table.column(column)?;

    let mut ids = BTreeSet::new();
    for record in table {
        let record = record?;
        if let Some(id) = parse(cell(&record, index)) {
            ids.insert(id);
        }
    }

    debug!(path = %path.display(), column, count = ids.len(), "loaded identifiers");
    Ok(ids)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageReport {
    pub reference_count: usize,
    pub forecast_count: usize,
    pub expected_absent_count: usize,
    /// Reference ids with no forecast that are not excused, ascending
    pub missing: Vec<MunicipalityId>,
    /// Excused ids that nonetheless have a forecast, ascending
    pub unexpected_present: Vec<MunicipalityId>,
}

impl CoverageReport {
    pub fn compute(
        reference: &BTreeSet<MunicipalityId>,
        forecast: &BTreeSet<MunicipalityId>,
        expected_absent: &ExpectedAbsent,
    ) -> Self {
        let missing = reference
            .difference(forecast)
            .filter(|id| !expected_absent.contains(id))
            .cloned()
            .collect();
        let unexpected_present = forecast
            .iter()
            .filter(|id| expected_absent.contains(id))
            .cloned()
            .collect();

        Self {
            reference_count: reference.len(),
            forecast_count: forecast.len(),
            expected_absent_count: expected_absent.len(),
            missing,
            unexpected_present,
        }
    }

    pub fn is_covered(&self) -> bool {
        self.missing.is_empty()
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_covered() {
            EXIT_COVERED
        } else {
            EXIT_MISSING
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Reference municipalities: {}", self.reference_count);
        let _ = writeln!(out, "Forecast municipalities: {}", self.forecast_count);
        let _ = writeln!(
            out,
            "Ignored IDs (expected absent): {}",
            self.expected_absent_count
        );

        if !self.unexpected_present.is_empty() {
            let _ = writeln!(
                out,
                "WARNING: expected-absent IDs present in forecast data: {}",
                join(&self.unexpected_present)
            );
        }

        if !self.missing.is_empty() {
            let _ = writeln!(
                out,
                "ERROR: {} reference municipios missing from forecasts.",
                self.missing.len()
            );
            let sample = &self.missing[..self.missing.len().min(MISSING_SAMPLE_LIMIT)];
            let ellipsis = if self.missing.len() > MISSING_SAMPLE_LIMIT {
                "..."
            } else {
                ""
            };
            let _ = writeln!(out, "Sample missing IDs: {}{}", join(sample), ellipsis);
        } else {
            out.push_str("Municipal forecast coverage OK (excluding expected gaps).\n");
        }

        out
    }
}

fn join(ids: &[MunicipalityId]) -> String {
    ids.iter()
        .map(MunicipalityId::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load both files and reconcile them. Any load failure aborts before a
/// report exists.
pub fn audit_coverage(
    reference_path: &Path,
    forecast_path: &Path,
    expected_absent: &ExpectedAbsent,
) -> Result<CoverageReport> {
    let reference = load_reference_ids(reference_path)?;
    let forecast = load_forecast_ids(forecast_path)?;
    let report = CoverageReport::compute(&reference, &forecast, expected_absent);

    if !report.unexpected_present.is_empty() {
        warn!(
            count = report.unexpected_present.len(),
            "expected-absent municipalities have forecasts"
        );
    }
    Ok(report)
}
