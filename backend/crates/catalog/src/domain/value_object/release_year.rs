//! Release Year Value Object
//!
//! A title's year is never in the future.

use chrono::{Datelike, Utc};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseYearError {
    Negative { year: i32 },
    InFuture { year: i32, current: i32 },
}

impl fmt::Display for ReleaseYearError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negative { year } => write!(f, "Year {year} must not be negative"),
            Self::InFuture { year, current } => {
                write!(f, "Year {year} is later than the current year {current}")
            }
        }
    }
}

impl std::error::Error for ReleaseYearError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReleaseYear(i32);

impl ReleaseYear {
    pub fn new(year: i32) -> Result<Self, ReleaseYearError> {
        Self::new_as_of(year, Utc::now().year())
    }

    /// Validate against an explicit current year
    pub fn new_as_of(year: i32, current: i32) -> Result<Self, ReleaseYearError> {
        if year < 0 {
            return Err(ReleaseYearError::Negative { year });
        }
        if year > current {
            return Err(ReleaseYearError::InFuture { year, current });
        }
        Ok(Self(year))
    }

    pub fn from_db(year: i32) -> Self {
        Self(year)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_bounds() {
        assert!(ReleaseYear::new_as_of(2024, 2024).is_ok());
        assert!(ReleaseYear::new_as_of(1895, 2024).is_ok());
        assert_eq!(
            ReleaseYear::new_as_of(2025, 2024),
            Err(ReleaseYearError::InFuture {
                year: 2025,
                current: 2024
            })
        );
        assert!(ReleaseYear::new_as_of(-1, 2024).is_err());
    }

    #[test]
    fn test_current_year_is_accepted() {
        assert!(ReleaseYear::new(Utc::now().year()).is_ok());
        assert!(ReleaseYear::new(Utc::now().year() + 1).is_err());
    }
}
