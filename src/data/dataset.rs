use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::DataPoint;
use crate::error::{ChartError, ChartResult};

/// Fixed `[min, max]` range values are clamped into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueDomain {
    pub min: f64,
    pub max: f64,
}

impl ValueDomain {
    pub fn new(min: f64, max: f64) -> ChartResult<Self> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(ChartError::InvalidData(
                "value domain must be finite with min < max".to_owned(),
            ));
        }
        Ok(Self { min, max })
    }

    /// Clamps into the domain. NaN collapses to `min`.
    #[must_use]
    pub fn clamp(self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    #[must_use]
    pub fn as_tuple(self) -> (f64, f64) {
        (self.min, self.max)
    }
}

/// Ordered points plus the value domain they were generated for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    points: Vec<DataPoint>,
    domain: ValueDomain,
}

impl Dataset {
    #[must_use]
    pub fn new(points: Vec<DataPoint>, domain: ValueDomain) -> Self {
        Self { points, domain }
    }

    #[must_use]
    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    #[must_use]
    pub fn into_points(self) -> Vec<DataPoint> {
        self.points
    }

    #[must_use]
    pub fn domain(&self) -> ValueDomain {
        self.domain
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn all_within_domain(&self) -> bool {
        self.points
            .iter()
            .all(|point| self.domain.contains(point.value))
    }

    /// Points tagged with `category`, in insertion order.
    #[must_use]
    pub fn filter_category(&self, category: &str) -> Vec<DataPoint> {
        self.points
            .iter()
            .filter(|point| point.is_category(category))
            .cloned()
            .collect()
    }

    /// Categorized points grouped by first appearance of each category.
    /// Uncategorized points are left out.
    #[must_use]
    pub fn group_by_category(&self) -> IndexMap<String, Vec<DataPoint>> {
        let mut groups: IndexMap<String, Vec<DataPoint>> = IndexMap::new();
        for point in &self.points {
            if let Some(category) = &point.category {
                groups
                    .entry(category.clone())
                    .or_default()
                    .push(point.clone());
            }
        }
        groups
    }

    #[must_use]
    pub fn category_counts(&self) -> IndexMap<String, usize> {
        let mut counts: IndexMap<String, usize> = IndexMap::new();
        for point in &self.points {
            if let Some(category) = &point.category {
                *counts.entry(category.clone()).or_default() += 1;
            }
        }
        counts
    }
}
