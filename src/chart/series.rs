//! Trend series
//!
//! Chart-ready parallel sequences projected from hourly trend points.

use crate::client::{TrendPoint, TrendsResponse};

/// Labels plus three parallel count series of equal length
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrendSeries {
    labels: Vec<String>,
    positive: Vec<u64>,
    negative: Vec<u64>,
    neutral: Vec<u64>,
}

impl TrendSeries {
    /// Series with no points
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a series from parallel vectors
    ///
    /// # Panics
    ///
    /// Panics if the four vectors differ in length.
    pub fn new(
        labels: Vec<String>,
        positive: Vec<u64>,
        negative: Vec<u64>,
        neutral: Vec<u64>,
    ) -> Self {
        let series = Self {
            labels,
            positive,
            negative,
            neutral,
        };
        assert!(
            series.is_well_formed(),
            "trend series lengths differ: labels={} positive={} negative={} neutral={}",
            series.labels.len(),
            series.positive.len(),
            series.negative.len(),
            series.neutral.len()
        );
        series
    }

    /// Project trend points in input order, one entry per point
    ///
    /// Repeated hour labels are kept as separate entries.
    pub fn from_points(points: &[TrendPoint]) -> Self {
        let mut series = Self {
            labels: Vec::with_capacity(points.len()),
            positive: Vec::with_capacity(points.len()),
            negative: Vec::with_capacity(points.len()),
            neutral: Vec::with_capacity(points.len()),
        };

        for point in points {
            series.labels.push(point.hour.clone());
            series.positive.push(point.positive);
            series.negative.push(point.negative);
            series.neutral.push(point.neutral);
        }

        series
    }

    /// Project the hourly buckets of a trends response
    pub fn from_response(response: &TrendsResponse) -> Self {
        Self::from_points(&response.hourly_sentiment)
    }

    pub fn is_well_formed(&self) -> bool {
        let n = self.labels.len();
        self.positive.len() == n && self.negative.len() == n && self.neutral.len() == n
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn positive(&self) -> &[u64] {
        &self.positive
    }

    pub fn negative(&self) -> &[u64] {
        &self.negative
    }

    pub fn neutral(&self) -> &[u64] {
        &self.neutral
    }

    /// Largest single count across all three series (0 when empty)
    pub fn max_value(&self) -> u64 {
        self.positive
            .iter()
            .chain(&self.negative)
            .chain(&self.neutral)
            .copied()
            .max()
            .unwrap_or(0)
    }
}
