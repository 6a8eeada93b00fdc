//! Walking-route recording for walktrack
//!
//! This crate provides:
//!
//! - **Session**: the Idle/Collecting state machine that accumulates GPS
//!   samples during a walk
//! - **Materialization**: rebuilding routes from flat persisted rows
//! - **Storage**: the row store contract and a route-level service over it
//! - **Catalog**: an in-memory, newest-first view of all routes
//! - **Export**: CSV rendering of routes
//!
//! # Example
//!
//! ```rust
//! use chrono::{DateTime, Duration, Utc};
//! use walktrack_core::LocationPoint;
//! use walktrack_tracking::{
//!     make_csv_data, CollectionSession, MemoryPointStore, RouteCatalog, RouteStorage,
//! };
//!
//! let t0 = DateTime::<Utc>::from_timestamp(1_714_550_400, 0).unwrap();
//! let mut session = CollectionSession::with_clock(move || t0);
//! session.start();
//! session.add_sample(LocationPoint::new(35.6812, 139.7671, t0, 5.0));
//! session.add_sample(LocationPoint::new(35.6580, 139.7016, t0 + Duration::minutes(65), 5.0));
//! let recorded = session.finish().unwrap();
//!
//! let mut storage = RouteStorage::new();
//! storage.initialize(MemoryPointStore::new());
//! storage.save_route("Marunouchi to Shibuya", &recorded.samples).unwrap();
//!
//! let mut catalog = RouteCatalog::new();
//! storage.refresh_catalog(&mut catalog).unwrap();
//! assert_eq!(catalog.get_route_count(), 1);
//! assert_eq!(catalog.get_all_routes()[0].id, "marunouchi-to-shibuya-1");
//!
//! let csv = make_csv_data(catalog.get_all_routes()).unwrap();
//! assert_eq!(csv.lines().count(), 3);
//! ```

#![warn(clippy::all)]

pub mod catalog;
pub mod clock;
pub mod export;
pub mod materialize;
pub mod route;
pub mod session;
pub mod storage;

pub use catalog::RouteCatalog;
pub use clock::{Clock, FixedClock, SystemClock};
pub use export::{configured_file_name, export_file_name, make_csv_data, CSV_HEADER};
pub use materialize::{materialize_routes, route_id, row_to_sample, slugify, LocationRow};
pub use route::{Route, RouteSummary};
pub use session::{CollectionSession, RecordedSession, SessionSnapshot, SessionState};
pub use storage::{MemoryPointStore, PointStore, RouteStorage};
