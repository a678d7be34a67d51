//! Week identifier and derived week-day entries.

use super::{BoardDomainError, DayOfWeek};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Monday-anchored week identifier.
///
/// Serves as the partition key for tasks: every task belongs to exactly one
/// week, named by the ISO calendar date of that week's Monday. The canonical
/// wire form is `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "NaiveDate", into = "NaiveDate")]
pub struct WeekId(NaiveDate);

impl WeekId {
    /// Returns the identifier of the week containing the given date.
    ///
    /// Any date within a week anchors to that week's Monday.
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        let offset = u64::from(date.weekday().num_days_from_monday());
        // checked_sub_days only fails below NaiveDate::MIN.
        Self(date.checked_sub_days(Days::new(offset)).unwrap_or(date))
    }

    /// Parses a week identifier from its canonical `YYYY-MM-DD` form.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidWeekId`] when the value is not a
    /// calendar date and [`BoardDomainError::NotWeekStart`] when the date is
    /// not a Monday.
    pub fn from_iso(value: &str) -> Result<Self, BoardDomainError> {
        let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
            .map_err(|_parse_err| BoardDomainError::InvalidWeekId(value.to_owned()))?;
        Self::try_from(date)
    }

    /// Returns the Monday this identifier names.
    #[must_use]
    pub const fn start(self) -> NaiveDate {
        self.0
    }

    /// Returns the identifier of the following week.
    #[must_use]
    pub fn next(self) -> Self {
        self.0.checked_add_days(Days::new(7)).map_or(self, Self)
    }

    /// Returns the identifier of the preceding week.
    #[must_use]
    pub fn previous(self) -> Self {
        self.0.checked_sub_days(Days::new(7)).map_or(self, Self)
    }

    /// Derives the seven [`WeekDay`] entries spanning this week.
    ///
    /// Entries run Monday through Sunday, each label paired with its
    /// concrete calendar date.
    #[must_use]
    pub fn week_days(self) -> [WeekDay; 7] {
        DayOfWeek::ALL.map(|day| WeekDay {
            day,
            date: self
                .0
                .checked_add_days(Days::new(u64::from(day.offset_from_monday())))
                .unwrap_or(self.0),
        })
    }
}

impl TryFrom<NaiveDate> for WeekId {
    type Error = BoardDomainError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        if date.weekday() == Weekday::Mon {
            Ok(Self(date))
        } else {
            Err(BoardDomainError::NotWeekStart(date))
        }
    }
}

impl From<WeekId> for NaiveDate {
    fn from(week: WeekId) -> Self {
        week.0
    }
}

impl fmt::Display for WeekId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// A day-of-week label paired with its calendar date for the week in view.
///
/// Derived from a [`WeekId`], never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekDay {
    /// The day-of-week label.
    pub day: DayOfWeek,
    /// The concrete calendar date of that day within the week in view.
    pub date: NaiveDate,
}
