//! Route aggregate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use walktrack_core::sample::LocationPoint;
use walktrack_geo::{path_length, speed_kmh, Coordinate, PathItem};

/// A completed, persisted walk
///
/// Built by [`materialize_routes`](crate::materialize::materialize_routes)
/// and never mutated afterwards; a refreshed route replaces the old one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub id: String,
    pub name: String,
    /// Points in ascending timestamp order
    pub location_points: Vec<LocationPoint>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub point_count: usize,
}

impl Route {
    /// Build a route, deriving start, end and count from the points.
    ///
    /// Returns `None` for an empty point list.
    pub fn from_points(
        id: impl Into<String>,
        name: impl Into<String>,
        location_points: Vec<LocationPoint>,
    ) -> Option<Self> {
        let start_time = location_points.iter().map(|p| p.timestamp).min()?;
        let end_time = location_points.iter().map(|p| p.timestamp).max()?;

        Some(Self {
            id: id.into(),
            name: name.into(),
            point_count: location_points.len(),
            location_points,
            start_time,
            end_time,
        })
    }

    /// Elapsed time between the first and last fix
    pub fn duration(&self) -> chrono::Duration {
        self.end_time - self.start_time
    }

    pub(crate) fn path_item(&self) -> PathItem {
        PathItem {
            id: self.id.clone(),
            points: self.coordinates(),
        }
    }

    fn coordinates(&self) -> Vec<Coordinate> {
        self.location_points
            .iter()
            .map(LocationPoint::coordinate)
            .collect()
    }

    /// Distance, duration and average speed of the walk
    pub fn summary(&self) -> RouteSummary {
        let distance_m = path_length(&self.coordinates()).ok();
        RouteSummary::new(self, distance_m)
    }
}

/// Derived statistics of a route
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSummary {
    pub id: String,
    pub name: String,
    pub point_count: usize,
    /// Great-circle path length; None if a stored point is invalid
    pub distance_m: Option<f64>,
    pub duration_secs: f64,
    /// None for zero-length durations or unknown distance
    pub average_speed_kmh: Option<f64>,
}

impl RouteSummary {
    pub(crate) fn new(route: &Route, distance_m: Option<f64>) -> Self {
        let duration_secs = route.duration().num_milliseconds() as f64 / 1000.0;
        let average_speed_kmh = distance_m.and_then(|d| speed_kmh(d, duration_secs).ok());

        Self {
            id: route.id.clone(),
            name: route.name.clone(),
            point_count: route.point_count,
            distance_m,
            duration_secs,
            average_speed_kmh,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(secs: i64, latitude: f64) -> LocationPoint {
        let t0 = DateTime::<Utc>::from_timestamp(1_714_550_400, 0).unwrap();
        LocationPoint::new(latitude, 139.7671, t0 + Duration::seconds(secs), 5.0)
    }

    #[test]
    fn test_from_points_derives_bounds() {
        let points = vec![at(0, 35.0), at(60, 35.001), at(120, 35.002)];
        let route = Route::from_points("r-1", "Walk", points).unwrap();
        assert_eq!(route.point_count, 3);
        assert_eq!(route.start_time, at(0, 0.0).timestamp);
        assert_eq!(route.end_time, at(120, 0.0).timestamp);
        assert!(route.start_time <= route.end_time);
        assert_eq!(route.duration(), Duration::seconds(120));
    }

    #[test]
    fn test_from_points_empty() {
        assert!(Route::from_points("r", "Walk", vec![]).is_none());
    }

    #[test]
    fn test_summary() {
        // 0.009 degrees of latitude is roughly 1 km
        let route = Route::from_points("r-1", "Walk", vec![at(0, 35.0), at(600, 35.009)]).unwrap();
        let summary = route.summary();

        let distance = summary.distance_m.unwrap();
        assert!((distance - 1000.75).abs() < 1.0, "{distance}");
        assert_eq!(summary.duration_secs, 600.0);
        let speed = summary.average_speed_kmh.unwrap();
        assert!((speed - 6.0).abs() < 0.01, "{speed}");
    }

    #[test]
    fn test_summary_single_point_has_no_speed() {
        let route = Route::from_points("r-1", "Walk", vec![at(0, 35.0)]).unwrap();
        let summary = route.summary();
        assert_eq!(summary.distance_m, Some(0.0));
        assert_eq!(summary.average_speed_kmh, None);
    }
}
