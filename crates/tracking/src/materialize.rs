//! Route materialization from persisted rows.
//!
//! Persistence stores one flat row per GPS fix, tagged with the route
//! label. Reading routes back means grouping those rows by label and
//! rebuilding a [`Route`] per group.

use crate::route::Route;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use walktrack_core::sample::LocationPoint;
use walktrack_telemetry::Timer;

/// A persisted GPS fix
///
/// `direction` is the stored name of the sample's heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRow {
    /// Store-assigned, increasing insertion id
    pub id: i64,
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: f64,
    pub speed: Option<f64>,
    pub direction: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

/// Map a stored row back to a GPS sample.
pub fn row_to_sample(row: &LocationRow) -> LocationPoint {
    LocationPoint {
        latitude: row.latitude,
        longitude: row.longitude,
        timestamp: row.timestamp,
        accuracy: row.accuracy,
        speed: row.speed,
        heading: row.direction,
    }
}

/// Lowercase and collapse each whitespace run into a single hyphen.
///
/// # Example
/// ```
/// use walktrack_tracking::materialize::slugify;
///
/// assert_eq!(slugify("Morning  Walk\tHome"), "morning-walk-home");
/// ```
pub fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut in_whitespace = false;

    for c in label.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            slug.extend(c.to_lowercase());
            in_whitespace = false;
        }
    }

    slug
}

/// Stable route id: `slug(label)-firstRowId`.
pub fn route_id(label: &str, first_row_id: i64) -> String {
    format!("{}-{}", slugify(label), first_row_id)
}

/// Group rows by label into routes.
///
/// Rows must already be ordered by timestamp (then id) within each label;
/// that order is kept as the route's point order. Groups are returned in
/// first-seen label order. No rows, no routes.
pub fn materialize_routes(rows: &[LocationRow]) -> Vec<Route> {
    let _timer = Timer::start("materialize_routes");

    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, i64, Vec<LocationPoint>)> = Vec::new();

    for row in rows {
        let slot = *index.entry(row.label.as_str()).or_insert_with(|| {
            groups.push((row.label.as_str(), row.id, Vec::new()));
            groups.len() - 1
        });
        groups[slot].2.push(row_to_sample(row));
    }

    let routes: Vec<Route> = groups
        .into_iter()
        .filter_map(|(label, first_id, points)| {
            Route::from_points(route_id(label, first_id), label, points)
        })
        .collect();

    tracing::debug!(rows = rows.len(), routes = routes.len(), "Materialized routes");
    routes
}
