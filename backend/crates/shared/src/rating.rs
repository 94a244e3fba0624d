//! Rating
//!
//! A title's rating is the arithmetic mean of its review scores. A title
//! without reviews has no rating at all, which is not the same as 0.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Rating(f64);

impl Rating {
    /// Mean of `scores`, `None` when there are none
    pub fn mean<I>(scores: I) -> Option<Self>
    where
        I: IntoIterator,
        I::Item: Into<i64>,
    {
        let (sum, count) = scores
            .into_iter()
            .fold((0i64, 0i64), |(sum, count), s| (sum + s.into(), count + 1));
        Self::from_aggregate(sum, count)
    }

    /// Build from a `SUM`/`COUNT` pair computed by the store
    pub fn from_aggregate(sum: i64, count: i64) -> Option<Self> {
        if count <= 0 {
            return None;
        }
        Some(Self(sum as f64 / count as f64))
    }

    #[inline]
    pub fn value(&self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_scores_no_rating() {
        assert_eq!(Rating::mean(Vec::<i16>::new()), None);
        assert_eq!(Rating::from_aggregate(0, 0), None);
    }

    #[test]
    fn test_mean_of_scores() {
        assert_eq!(Rating::mean([10i16, 8, 6]), Some(Rating(8.0)));
        assert_eq!(Rating::mean([7i16, 8]).map(|r| r.value()), Some(7.5));
        assert_eq!(Rating::mean([1i16]).map(|r| r.value()), Some(1.0));
    }

    #[test]
    fn test_from_aggregate() {
        assert_eq!(Rating::from_aggregate(24, 3).map(|r| r.value()), Some(8.0));
    }

    #[test]
    fn test_serializes_as_number() {
        let rating = Rating::mean([9i16, 10]).unwrap();
        assert_eq!(serde_json::to_string(&rating).unwrap(), "9.5");
        assert_eq!(serde_json::to_string(&None::<Rating>).unwrap(), "null");
    }
}
