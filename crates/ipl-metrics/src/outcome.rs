//! Result envelope shared by every analysis.

use std::fmt;

use serde::Serialize;

/// Either a computed result or an explicit, well-formed "no data" answer.
///
/// Filtering everything out is not an error; it is reported as
/// [`Outcome::NoData`] with a short reason for the consumer to display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Outcome<T> {
    Ready(T),
    NoData(NoData),
}

impl<T> Outcome<T> {
    pub fn no_data(reason: impl Into<String>) -> Self {
        Outcome::NoData(NoData {
            reason: reason.into(),
        })
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Outcome::Ready(_))
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Outcome::Ready(value) => Some(value),
            Outcome::NoData(_) => None,
        }
    }

    pub fn into_ready(self) -> Option<T> {
        match self {
            Outcome::Ready(value) => Some(value),
            Outcome::NoData(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoData {
    pub reason: String,
}

/// A labeled scalar intended to be stated next to a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStat {
    pub label: String,
    pub value: SummaryValue,
}

impl SummaryStat {
    pub fn number(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value: SummaryValue::Number(value),
        }
    }

    pub fn count(label: impl Into<String>, value: usize) -> Self {
        Self {
            label: label.into(),
            value: SummaryValue::Count(value),
        }
    }

    pub fn text(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: SummaryValue::Text(value.into()),
        }
    }

    /// A number that may be undefined (for example a correlation over
    /// constant data).
    pub fn optional(label: impl Into<String>, value: Option<f64>) -> Self {
        Self {
            label: label.into(),
            value: value.map_or(SummaryValue::Missing, SummaryValue::Number),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SummaryValue {
    Number(f64),
    Count(usize),
    Text(String),
    Missing,
}

impl fmt::Display for SummaryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryValue::Number(value) => {
                if value.fract() == 0.0 && value.abs() < 1e15 {
                    write!(f, "{value:.0}")
                } else {
                    write!(f, "{value:.2}")
                }
            }
            SummaryValue::Count(value) => write!(f, "{value}"),
            SummaryValue::Text(value) => f.write_str(value),
            SummaryValue::Missing => f.write_str("-"),
        }
    }
}

/// Scalars a result wants stated, separate from the series it carries.
pub trait Summarize {
    fn summary(&self) -> Vec<SummaryStat>;
}

impl<T: Summarize> Summarize for Outcome<T> {
    fn summary(&self) -> Vec<SummaryStat> {
        match self {
            Outcome::Ready(value) => value.summary(),
            Outcome::NoData(no_data) => vec![SummaryStat::text("no_data", no_data.reason.clone())],
        }
    }
}
