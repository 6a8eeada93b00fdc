//! Batch path-length calculations with optional parallelism.
//!
//! Summarising a catalog of routes means walking every point of every
//! route; with the `parallel` feature the routes are processed on the rayon
//! pool.

use crate::{distance, Coordinate, Result};
use serde::{Deserialize, Serialize};

/// Input item for batch path-length calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathItem {
    /// Caller-defined identifier (a route id)
    pub id: String,
    /// Ordered points of the path
    pub points: Vec<Coordinate>,
}

/// Result of a path-length calculation for a single item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathLength {
    /// The item ID
    pub id: String,
    /// Total length in meters (None if any point is invalid)
    pub meters: Option<f64>,
}

/// Sums the great-circle distance over consecutive pairs of points.
///
/// Paths with fewer than two points have length zero. The first invalid
/// point aborts the sum.
///
/// # Example
/// ```
/// use walktrack_geo::{path_length, Coordinate};
///
/// let path = [
///     Coordinate::new(35.6812, 139.7671),
///     Coordinate::new(35.6812, 139.7671),
///     Coordinate::new(35.6580, 139.7016),
/// ];
/// let meters = path_length(&path).unwrap();
/// assert!((meters - 6454.8044).abs() < 0.001);
/// ```
pub fn path_length(points: &[Coordinate]) -> Result<f64> {
    points
        .windows(2)
        .try_fold(0.0, |total, pair| -> Result<f64> {
            Ok(total + distance(&pair[0], &pair[1])?)
        })
}

/// Calculates the length of every path.
///
/// # Returns
/// One result per input item, in input order.
pub fn calculate_path_lengths(items: &[PathItem]) -> Vec<PathLength> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        items.par_iter().map(calculate_single_length).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        items.iter().map(calculate_single_length).collect()
    }
}

#[inline]
fn calculate_single_length(item: &PathItem) -> PathLength {
    PathLength {
        id: item.id.clone(),
        meters: path_length(&item.points).ok(),
    }
}
