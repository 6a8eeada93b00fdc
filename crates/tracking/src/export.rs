//! CSV export of routes.
//!
//! One row per GPS fix, header always present. Quoting follows RFC 4180:
//! fields containing a comma, quote or line break are wrapped in quotes.

use crate::route::Route;
use chrono::{DateTime, SecondsFormat, Utc};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use walktrack_core::config::ExportConfig;
use walktrack_core::{Error, ErrorCode, Result};

/// Column names of the exported file
pub const CSV_HEADER: [&str; 7] = [
    "Route",
    "Latitude",
    "Longitude",
    "Timestamp",
    "Accuracy",
    "Speed",
    "Heading",
];

fn csv_error(err: impl std::error::Error + Send + Sync + 'static) -> Error {
    Error::new(ErrorCode::CsvWriteFailed, format!("Failed to write CSV: {}", err)).with_source(err)
}

fn optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Render routes as CSV text.
///
/// # Example
/// ```
/// use walktrack_tracking::export::make_csv_data;
///
/// let csv = make_csv_data(&[]).unwrap();
/// assert_eq!(csv, "Route,Latitude,Longitude,Timestamp,Accuracy,Speed,Heading\n");
/// ```
pub fn make_csv_data(routes: &[Route]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER).map_err(csv_error)?;

    for route in routes {
        for point in &route.location_points {
            writer
                .write_record([
                    route.name.clone(),
                    point.latitude.to_string(),
                    point.longitude.to_string(),
                    point.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
                    point.accuracy.to_string(),
                    optional(point.speed),
                    optional(point.heading),
                ])
                .map_err(csv_error)?;
        }
    }

    let bytes = writer.into_inner().map_err(|e| csv_error(e.into_error()))?;
    let data = String::from_utf8(bytes).map_err(csv_error)?;

    tracing::debug!(routes = routes.len(), bytes = data.len(), "Built CSV export");
    Ok(data)
}

/// File name for an export made at `now`: `<prefix>_YYYYMMDD_HHMMSS.csv`
pub fn export_file_name(prefix: &str, now: DateTime<Utc>) -> String {
    format!("{}_{}.csv", prefix, now.format("%Y%m%d_%H%M%S"))
}

/// [`export_file_name`] with the prefix from the `[export]` section
pub fn configured_file_name(config: &ExportConfig, now: DateTime<Utc>) -> String {
    export_file_name(&config.file_prefix, now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use walktrack_core::sample::LocationPoint;

    const HEADER: &str = "Route,Latitude,Longitude,Timestamp,Accuracy,Speed,Heading";

    fn t0() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_714_550_400, 0).unwrap()
    }

    fn route(name: &str, points: Vec<LocationPoint>) -> Route {
        Route::from_points("r-1", name, points).unwrap()
    }

    #[test]
    fn test_empty_is_header_only() {
        assert_eq!(make_csv_data(&[]).unwrap(), format!("{HEADER}\n"));
    }

    #[test]
    fn test_null_speed_and_heading_are_empty() {
        let r = route("Walk", vec![LocationPoint::new(35.6812, 139.7671, t0(), 5.0)]);
        let csv = make_csv_data(&[r]).unwrap();

        assert_eq!(
            csv,
            format!("{HEADER}\nWalk,35.6812,139.7671,2024-05-01T08:00:00.000Z,5,,\n")
        );
    }

    #[test]
    fn test_all_fields() {
        let point = LocationPoint::new(-33.8688, 151.2093, t0() + Duration::milliseconds(250), 3.5)
            .with_speed(1.4)
            .with_heading(270.0);
        let csv = make_csv_data(&[route("Harbour", vec![point])]).unwrap();

        assert_eq!(
            csv.lines().nth(1),
            Some("Harbour,-33.8688,151.2093,2024-05-01T08:00:00.250Z,3.5,1.4,270")
        );
    }

    #[test]
    fn test_quotes_special_names() {
        let point = LocationPoint::new(1.0, 2.0, t0(), 1.0);
        let routes = [
            route("Park, East", vec![point.clone()]),
            route("The \"Long\" Way", vec![point.clone()]),
            route("Two\nLines", vec![point]),
        ];
        let csv = make_csv_data(&routes).unwrap();

        let rows: Vec<&str> = csv.split_inclusive('\n').skip(1).collect();
        assert_eq!(rows[0], "\"Park, East\",1,2,2024-05-01T08:00:00.000Z,1,,\n");
        assert_eq!(rows[1], "\"The \"\"Long\"\" Way\",1,2,2024-05-01T08:00:00.000Z,1,,\n");
        assert_eq!(rows[2], "\"Two\n");
        assert_eq!(rows[3], "Lines\",1,2,2024-05-01T08:00:00.000Z,1,,\n");
    }

    #[test]
    fn test_rows_follow_route_and_point_order() {
        let a = route(
            "A",
            vec![
                LocationPoint::new(1.0, 1.0, t0(), 1.0),
                LocationPoint::new(2.0, 2.0, t0() + Duration::seconds(1), 1.0),
            ],
        );
        let b = route("B", vec![LocationPoint::new(3.0, 3.0, t0(), 1.0)]);
        let csv = make_csv_data(&[a, b]).unwrap();

        let names: Vec<&str> = csv
            .lines()
            .skip(1)
            .map(|line| line.split(',').next().unwrap())
            .collect();
        assert_eq!(names, ["A", "A", "B"]);
        assert_eq!(csv.lines().count(), 4);
    }

    #[test]
    fn test_export_file_name() {
        let now = t0() + Duration::seconds(3723);
        assert_eq!(
            export_file_name("walking_routes", now),
            "walking_routes_20240501_090203.csv"
        );
    }

    #[test]
    fn test_configured_file_name() {
        let mut config = ExportConfig::default();
        assert_eq!(
            configured_file_name(&config, t0()),
            "walking_routes_20240501_080000.csv"
        );

        config.file_prefix = "evening".to_string();
        assert_eq!(configured_file_name(&config, t0()), "evening_20240501_080000.csv");
    }
}
