//! Input validation for plotting calls
//!
//! Every check names the calling function in its message so errors read like
//! `plot_series: Invalid paper size 'B5'. Available sizes: ...`. Problems that
//! do not prevent a chart from being drawn are logged as warnings instead.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDateTime, TimeDelta};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::paper::PaperSize;
use crate::template::TemplateRegistry;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{function}: series list cannot be empty")]
    EmptySeriesList { function: String },

    #[error("{function}: Series {index} has {index_len} timestamps but {values_len} values")]
    LengthMismatch {
        function: String,
        index: usize,
        index_len: usize,
        values_len: usize,
    },

    #[error("{function}: Series {index} ({name}) has a timestamp index that is not in ascending order at position {position}")]
    UnsortedIndex {
        function: String,
        index: usize,
        name: String,
        position: usize,
    },

    #[error("{function}: Series {index} must have a '{attribute}' attribute")]
    MissingAttribute {
        function: String,
        index: usize,
        attribute: &'static str,
    },

    #[error("{function}: Series {index} ({name}) has no time overlap with the first series. First series range: {reference_start} to {reference_end}, Series {index} range: {start} to {end}")]
    NoOverlap {
        function: String,
        index: usize,
        name: String,
        reference_start: NaiveDateTime,
        reference_end: NaiveDateTime,
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("{function}: Invalid template name '{name}'. Available templates: {}", .available.join(", "))]
    InvalidTemplate {
        function: String,
        name: String,
        available: Vec<String>,
    },

    #[error("{function}: Invalid paper size '{name}'. Available sizes: {}", .available.join(", "))]
    InvalidPaperSize {
        function: String,
        name: String,
        available: Vec<String>,
    },

    #[error("{function}: {name} has no valid data after removing NaN and infinite values")]
    NoValidData { function: String, name: String },
}

/// Errors reading a series from CSV
#[derive(Debug, Error)]
pub enum SeriesReadError {
    #[error("failed to open series file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse series CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: invalid timestamp '{value}'")]
    Timestamp { row: usize, value: String },
}

#[derive(Deserialize, Debug)]
struct Record {
    timestamp: String,
    value: Option<f64>,
}

const TIMESTAMP_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];

fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// A named, unit-tagged series of values indexed by timestamp
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    pub name: Option<String>,
    pub unit: Option<String>,
    pub index: Vec<NaiveDateTime>,
    pub values: Vec<f64>,
}

impl TimeSeries {
    pub fn new(index: Vec<NaiveDateTime>, values: Vec<f64>) -> Self {
        Self {
            name: None,
            unit: None,
            index,
            values,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Read a CSV with `timestamp` and `value` columns
    ///
    /// Extra columns are ignored, `#` lines are comments and an empty value
    /// becomes NaN.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, SeriesReadError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .comment(Some(b'#'))
            .from_reader(reader);
        let mut series = Self::default();
        for (row, result) in rdr.deserialize().enumerate() {
            let record: Record = result?;
            let ts = parse_timestamp(&record.timestamp).ok_or_else(|| SeriesReadError::Timestamp {
                row: row + 1,
                value: record.timestamp.clone(),
            })?;
            series.index.push(ts);
            series.values.push(record.value.unwrap_or(f64::NAN));
        }
        Ok(series)
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self, SeriesReadError> {
        Self::from_csv_reader(File::open(path)?)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Earliest and latest timestamp
    pub fn time_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let start = self.index.iter().min()?;
        let end = self.index.iter().max()?;
        Some((*start, *end))
    }

    fn label(&self, position: usize) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("Series {position}"))
    }

    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("unnamed")
    }
}

/// Check the list is non-empty and each series is internally consistent
pub fn validate_series_list(series: &[TimeSeries], function: &str) -> Result<(), ValidationError> {
    if series.is_empty() {
        return Err(ValidationError::EmptySeriesList {
            function: function.to_string(),
        });
    }
    for (i, s) in series.iter().enumerate() {
        if s.index.len() != s.values.len() {
            return Err(ValidationError::LengthMismatch {
                function: function.to_string(),
                index: i,
                index_len: s.index.len(),
                values_len: s.values.len(),
            });
        }
    }
    Ok(())
}

/// Check every index is in ascending time order
pub fn validate_datetime_index(series: &[TimeSeries], function: &str) -> Result<(), ValidationError> {
    for (i, s) in series.iter().enumerate() {
        if let Some(position) = s.index.windows(2).position(|w| w[1] < w[0]) {
            return Err(ValidationError::UnsortedIndex {
                function: function.to_string(),
                index: i,
                name: s.display_name().to_string(),
                position: position + 1,
            });
        }
    }
    Ok(())
}

/// Check names and units, either requiring them or warning when absent
pub fn validate_series_attributes(
    series: &[TimeSeries],
    function: &str,
    require_attributes: bool,
) -> Result<(), ValidationError> {
    for (i, s) in series.iter().enumerate() {
        for (attribute, present) in [("name", s.name.is_some()), ("unit", s.unit.is_some())] {
            if present {
                continue;
            }
            if require_attributes {
                return Err(ValidationError::MissingAttribute {
                    function: function.to_string(),
                    index: i,
                    attribute,
                });
            }
            warn!(
                "{}: Series {} has no {} attribute. Consider setting it for better plot labels.",
                function, i, attribute
            );
        }
    }
    Ok(())
}

/// Check every series overlaps the first in time
///
/// Disjoint ranges are an error; an overlap shorter than half the shorter
/// series is only a warning.
pub fn validate_datetime_compatibility(
    series: &[TimeSeries],
    function: &str,
) -> Result<(), ValidationError> {
    let Some((first, rest)) = series.split_first() else {
        return Ok(());
    };
    let Some((ref_start, ref_end)) = first.time_range() else {
        return Ok(());
    };

    for (offset, s) in rest.iter().enumerate() {
        let i = offset + 1;
        if s.index == first.index {
            continue;
        }
        let Some((start, end)) = s.time_range() else {
            continue;
        };

        if end < ref_start || start > ref_end {
            return Err(ValidationError::NoOverlap {
                function: function.to_string(),
                index: i,
                name: s.display_name().to_string(),
                reference_start: ref_start,
                reference_end: ref_end,
                start,
                end,
            });
        }

        let overlap: TimeDelta = end.min(ref_end) - start.max(ref_start);
        let shortest = (ref_end - ref_start).min(end - start);
        if overlap < shortest / 2 {
            warn!(
                "{}: Series {} ({}) has limited time overlap with the first series. Overlap: {}, Minimum expected: {}",
                function,
                i,
                s.display_name(),
                overlap,
                shortest / 2
            );
        }
    }
    Ok(())
}

pub fn validate_template_name(
    registry: &TemplateRegistry,
    template_name: &str,
    function: &str,
) -> Result<(), ValidationError> {
    if registry.contains(template_name) {
        return Ok(());
    }
    Err(ValidationError::InvalidTemplate {
        function: function.to_string(),
        name: template_name.to_string(),
        available: registry.get_available_templates(),
    })
}

pub fn validate_paper_size(paper_size: &str, function: &str) -> Result<PaperSize, ValidationError> {
    PaperSize::lookup(paper_size).map_err(|_| {
        let mut available = PaperSize::names();
        available.sort_unstable();
        ValidationError::InvalidPaperSize {
            function: function.to_string(),
            name: paper_size.to_string(),
            available: available.into_iter().map(String::from).collect(),
        }
    })
}

/// Warn about NaN, infinite and constant data; fail when nothing is plottable
pub fn validate_data_quality(series: &[TimeSeries], function: &str) -> Result<(), ValidationError> {
    for (i, s) in series.iter().enumerate() {
        let label = s.label(i);

        let nan_count = s.values.iter().filter(|v| v.is_nan()).count();
        if nan_count > 0 {
            warn!(
                "{}: {} contains {} NaN values ({:.1}% of data). These will be excluded from plotting.",
                function,
                label,
                nan_count,
                nan_count as f64 / s.len() as f64 * 100.0
            );
        }

        let inf_count = s.values.iter().filter(|v| v.is_infinite()).count();
        if inf_count > 0 {
            warn!(
                "{}: {} contains {} infinite values. These will be excluded from plotting.",
                function, label, inf_count
            );
        }

        let mut valid = s.values.iter().copied().filter(|v| v.is_finite());
        let Some(first) = valid.next() else {
            return Err(ValidationError::NoValidData {
                function: function.to_string(),
                name: label,
            });
        };
        let mut count = 1;
        let mut constant = true;
        for v in valid {
            count += 1;
            constant &= v == first;
        }
        if count > 1 && constant {
            info!(
                "{}: {} has constant values ({}). This may result in a flat line plot.",
                function, label, first
            );
        }
    }
    Ok(())
}

/// Run every check a plotting function needs, in order
///
/// Returns the parsed paper size on success.
pub fn validate_plot_parameters(
    series: &[TimeSeries],
    registry: &TemplateRegistry,
    template_name: &str,
    paper_size: &str,
    function: &str,
    require_attributes: bool,
) -> Result<PaperSize, ValidationError> {
    validate_series_list(series, function)?;
    validate_datetime_index(series, function)?;
    validate_series_attributes(series, function, require_attributes)?;
    validate_datetime_compatibility(series, function)?;
    validate_template_name(registry, template_name, function)?;
    let paper = validate_paper_size(paper_size, function)?;
    validate_data_quality(series, function)?;
    Ok(paper)
}

/// Per-series facts useful when debugging a rejected plot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub length: usize,
    pub nan_count: usize,
    pub inf_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_range: Option<(NaiveDateTime, NaiveDateTime)>,
}

#[derive(Serialize)]
struct SummaryDocument<'a> {
    series: &'a [SeriesSummary],
}

pub fn validation_summary(series: &[TimeSeries]) -> Vec<SeriesSummary> {
    series
        .iter()
        .enumerate()
        .map(|(i, s)| SeriesSummary {
            index: i,
            name: s.name.clone(),
            unit: s.unit.clone(),
            length: s.len(),
            nan_count: s.values.iter().filter(|v| v.is_nan()).count(),
            inf_count: s.values.iter().filter(|v| v.is_infinite()).count(),
            time_range: s.time_range(),
        })
        .collect()
}

/// Render summaries as a TOML document with one `[[series]]` table each
pub fn summary_to_toml(summaries: &[SeriesSummary]) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(&SummaryDocument { series: summaries })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::TemplateSource;
    use chrono::NaiveDate;

    fn hourly(start_day: u32, hours: i64, value: impl Fn(i64) -> f64) -> TimeSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, start_day)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let index = (0..hours).map(|h| start + TimeDelta::hours(h)).collect();
        let values = (0..hours).map(value).collect();
        TimeSeries::new(index, values)
            .with_name("Dry bulb temperature")
            .with_unit("°C")
    }

    fn registry() -> TemplateRegistry {
        TemplateRegistry::with_builtins(TemplateSource::Embedded).0
    }

    #[test]
    fn test_valid_parameters() {
        let series = vec![hourly(1, 48, |h| h as f64), hourly(1, 48, |h| -(h as f64))];
        let paper =
            validate_plot_parameters(&series, &registry(), "base", "A4_PORTRAIT", "plot_series", true)
                .expect("Should validate");
        assert_eq!(paper, PaperSize::A4Portrait);
    }

    #[test]
    fn test_empty_list() {
        let err = validate_series_list(&[], "histogram").unwrap_err();
        assert_eq!(err.to_string(), "histogram: series list cannot be empty");
    }

    #[test]
    fn test_length_mismatch() {
        let mut s = hourly(1, 3, |_| 1.0);
        s.values.pop();
        let err = validate_series_list(&[s], "exceedance").unwrap_err();
        assert!(matches!(err, ValidationError::LengthMismatch { index_len: 3, values_len: 2, .. }));
    }

    #[test]
    fn test_unsorted_index() {
        let mut s = hourly(1, 4, |_| 1.0);
        s.index.swap(1, 2);
        let err = validate_datetime_index(&[s], "plot_series").unwrap_err();
        assert!(matches!(err, ValidationError::UnsortedIndex { position: 2, .. }));
    }

    #[test]
    fn test_missing_attributes_only_fail_when_required() {
        let s = TimeSeries::new(hourly(1, 2, |_| 0.0).index, vec![1.0, 2.0]);
        assert!(validate_series_attributes(&[s.clone()], "wind_rose", false).is_ok());
        let err = validate_series_attributes(&[s], "wind_rose", true).unwrap_err();
        assert_eq!(err.to_string(), "wind_rose: Series 0 must have a 'name' attribute");
    }

    #[test]
    fn test_disjoint_series_rejected() {
        let series = vec![hourly(1, 24, |_| 1.0), hourly(5, 24, |_| 2.0)];
        let err = validate_datetime_compatibility(&series, "exceedance_bands").unwrap_err();
        assert!(matches!(err, ValidationError::NoOverlap { index: 1, .. }));
        assert!(err.to_string().starts_with("exceedance_bands: Series 1 (Dry bulb temperature) has no time overlap"));
    }

    #[test]
    fn test_partial_overlap_is_accepted() {
        let series = vec![hourly(1, 48, |_| 1.0), hourly(2, 48, |_| 2.0)];
        assert!(validate_datetime_compatibility(&series, "exceedance_bands").is_ok());
    }

    #[test]
    fn test_invalid_template_message() {
        let err = validate_template_name(&registry(), "invalid_template", "plot_series").unwrap_err();
        assert_eq!(
            err.to_string(),
            "plot_series: Invalid template name 'invalid_template'. Available templates: base, base_autosize, test"
        );
    }

    #[test]
    fn test_invalid_paper_size_lists_sorted_names() {
        let err = validate_paper_size("B5", "annual_heatmap").unwrap_err();
        match err {
            ValidationError::InvalidPaperSize { available, .. } => {
                assert_eq!(available.len(), 14);
                assert_eq!(available.first().map(String::as_str), Some("A0_LANDSCAPE"));
                assert_eq!(available.last().map(String::as_str), Some("A6_PORTRAIT"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_all_nan_has_no_valid_data() {
        let s = hourly(1, 3, |_| f64::NAN);
        let err = validate_data_quality(&[s], "histogram").unwrap_err();
        assert_eq!(
            err,
            ValidationError::NoValidData {
                function: "histogram".to_string(),
                name: "Dry bulb temperature".to_string(),
            }
        );
    }

    #[test]
    fn test_partial_nan_is_ok() {
        let s = hourly(1, 4, |h| if h == 0 { f64::NAN } else { f64::INFINITY.min(h as f64) });
        assert!(validate_data_quality(&[s], "histogram").is_ok());
    }

    #[test]
    fn test_summary_counts() {
        let mut s = hourly(1, 4, |h| h as f64);
        s.values[1] = f64::NAN;
        s.values[2] = f64::NEG_INFINITY;
        let summary = validation_summary(&[s]);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].length, 4);
        assert_eq!(summary[0].nan_count, 1);
        assert_eq!(summary[0].inf_count, 1);
        assert!(summary[0].time_range.is_some());
    }

    #[test]
    fn test_summary_renders_as_toml() {
        let mut s = hourly(1, 2, |h| h as f64);
        s.values[0] = f64::NAN;
        let text = summary_to_toml(&validation_summary(&[s])).expect("Should serialize");
        assert!(text.contains("[[series]]"));
        assert!(text.contains("name = \"Dry bulb temperature\""));
        assert!(text.contains("nan_count = 1"));
        assert!(text.contains("2024-01-01T00:00:00"));
    }

    #[test]
    fn test_csv_with_header_and_extra_column() {
        let data = "timestamp,value,flag\n2024-01-01 00:00:00,1.5,a\n2024-01-01T01:00:00, 2.5 ,b\n";
        let s = TimeSeries::from_csv_reader(data.as_bytes()).expect("Should read");
        assert_eq!(s.len(), 2);
        assert_eq!(s.values, vec![1.5, 2.5]);
        assert_eq!(s.index[1] - s.index[0], TimeDelta::hours(1));
    }

    #[test]
    fn test_csv_empty_value_is_nan() {
        let data = "# hourly dry bulb\ntimestamp,value\n2024-01-01 00:00,\n2024-01-01 01:00,3\n";
        let s = TimeSeries::from_csv_reader(data.as_bytes()).expect("Should read");
        assert_eq!(s.len(), 2);
        assert!(s.values[0].is_nan());
        assert_eq!(s.values[1], 3.0);
    }

    #[test]
    fn test_csv_bad_timestamp() {
        let data = "timestamp,value\nyesterday,1.0\n";
        let err = TimeSeries::from_csv_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, SeriesReadError::Timestamp { row: 1, .. }));
        assert_eq!(err.to_string(), "row 1: invalid timestamp 'yesterday'");
    }

    #[test]
    fn test_csv_bad_value() {
        let data = "timestamp,value\n2024-01-01 00:00,warm\n";
        let err = TimeSeries::from_csv_reader(data.as_bytes()).unwrap_err();
        assert!(matches!(err, SeriesReadError::Csv(_)));
    }

    #[test]
    fn test_csv_missing_file() {
        let err = TimeSeries::from_csv_path("/nonexistent/series.csv").unwrap_err();
        assert!(matches!(err, SeriesReadError::Io(_)));
    }
}
