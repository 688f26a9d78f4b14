//! Workflow scheduling frequency.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{DomainError, ValidationError};

/// How often a workflow's task groups are executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    OneTime,
    Weekly,
    Monthly,
    Quarterly,
    Annually,
    #[default]
    Continuous,
}

impl Frequency {
    /// The canonical string values, in declaration order.
    pub const VALID_FREQUENCIES: [&'static str; 6] = [
        "one_time",
        "weekly",
        "monthly",
        "quarterly",
        "annually",
        "continuous",
    ];

    /// Returns all frequencies.
    pub fn all() -> &'static [Frequency] {
        &[
            Frequency::OneTime,
            Frequency::Weekly,
            Frequency::Monthly,
            Frequency::Quarterly,
            Frequency::Annually,
            Frequency::Continuous,
        ]
    }

    /// Returns the canonical string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::OneTime => "one_time",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
            Frequency::Quarterly => "quarterly",
            Frequency::Annually => "annually",
            Frequency::Continuous => "continuous",
        }
    }

    /// Returns true if workflows with this frequency start new cycles on a schedule.
    pub fn is_recurring(&self) -> bool {
        !matches!(self, Frequency::OneTime | Frequency::Continuous)
    }

    /// The next scheduled start strictly after `after`.
    ///
    /// Month arithmetic clamps to the end of shorter months
    /// (Jan 31 + 1 month = Feb 28/29). Returns `None` for non-recurring
    /// frequencies or when the date would overflow.
    pub fn next_occurrence(&self, after: NaiveDate) -> Option<NaiveDate> {
        match self {
            Frequency::Weekly => after.checked_add_days(Days::new(7)),
            Frequency::Monthly => after.checked_add_months(Months::new(1)),
            Frequency::Quarterly => after.checked_add_months(Months::new(3)),
            Frequency::Annually => after.checked_add_months(Months::new(12)),
            Frequency::OneTime | Frequency::Continuous => None,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Frequency::all()
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ValidationError::invalid_value("frequency", s))
    }
}

/// Validates a frequency as written to a workflow.
///
/// `None` becomes the default (`continuous`). Any other value must be one of
/// [`Frequency::VALID_FREQUENCIES`] exactly; matching is case-sensitive.
///
/// # Errors
///
/// Returns `InvalidValue` carrying the rejected string.
pub fn validate_frequency(value: Option<&str>) -> Result<Frequency, DomainError> {
    match value {
        None => Ok(Frequency::default()),
        Some(raw) => Ok(raw.parse::<Frequency>()?),
    }
}
