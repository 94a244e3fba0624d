//! Review Score Value Object

use std::fmt;

pub const MIN_SCORE: i16 = 1;
pub const MAX_SCORE: i16 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreError {
    pub score: i64,
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Score {} is out of range, expected {MIN_SCORE} to {MAX_SCORE}",
            self.score
        )
    }
}

impl std::error::Error for ScoreError {}

/// Integer from 1 to 10 inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Score(i16);

impl Score {
    /// Takes the wire width so oversized values are reported, not truncated
    pub fn new(score: i64) -> Result<Self, ScoreError> {
        if !(i64::from(MIN_SCORE)..=i64::from(MAX_SCORE)).contains(&score) {
            return Err(ScoreError { score });
        }
        Ok(Self(score as i16))
    }

    pub fn from_db(score: i16) -> Self {
        Self(score)
    }

    #[inline]
    pub fn value(&self) -> i16 {
        self.0
    }
}

impl From<Score> for i64 {
    fn from(score: Score) -> Self {
        i64::from(score.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_bounds() {
        assert_eq!(Score::new(1).map(|s| s.value()), Ok(1));
        assert_eq!(Score::new(10).map(|s| s.value()), Ok(10));
        assert_eq!(Score::new(0), Err(ScoreError { score: 0 }));
        assert_eq!(Score::new(11), Err(ScoreError { score: 11 }));
        assert!(Score::new(65_546).is_err());
        assert!(Score::new(-3).is_err());
    }
}
