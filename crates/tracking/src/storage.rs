//! Route persistence.
//!
//! Samples are stored as flat rows tagged with their route label behind the
//! [`PointStore`] trait. [`RouteStorage`] wraps a store handle, refuses to
//! work until one is installed, and turns rows back into routes via
//! [`materialize_routes`].

use crate::catalog::RouteCatalog;
use crate::materialize::{materialize_routes, LocationRow};
use crate::route::Route;
use walktrack_core::sample::LocationPoint;
use walktrack_core::validation::validate_label;
use walktrack_core::{Error, Result, ResultExt};

/// Row-oriented persistence for GPS fixes
pub trait PointStore {
    /// Append one row per point under `label`, returning the number written.
    fn insert_points(&mut self, label: &str, points: &[LocationPoint]) -> Result<usize>;

    /// Every row, ordered by label, then timestamp, then id.
    fn select_all(&self) -> Result<Vec<LocationRow>>;

    /// Rows of one label, ordered by timestamp, then id.
    fn select_by_label(&self, label: &str) -> Result<Vec<LocationRow>>;

    /// Remove every row of `label`, returning the number removed.
    fn delete_by_label(&mut self, label: &str) -> Result<usize>;

    /// Number of distinct labels.
    fn count_labels(&self) -> Result<usize>;
}

/// In-process [`PointStore`] with monotonically increasing row ids
#[derive(Debug, Default)]
pub struct MemoryPointStore {
    rows: Vec<LocationRow>,
    next_id: i64,
}

impl MemoryPointStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn sorted(mut rows: Vec<LocationRow>) -> Vec<LocationRow> {
        rows.sort_by(|a, b| {
            a.label
                .cmp(&b.label)
                .then(a.timestamp.cmp(&b.timestamp))
                .then(a.id.cmp(&b.id))
        });
        rows
    }
}

impl PointStore for MemoryPointStore {
    fn insert_points(&mut self, label: &str, points: &[LocationPoint]) -> Result<usize> {
        for point in points {
            self.next_id += 1;
            self.rows.push(LocationRow {
                id: self.next_id,
                label: label.to_string(),
                latitude: point.latitude,
                longitude: point.longitude,
                accuracy: point.accuracy,
                speed: point.speed,
                direction: point.heading,
                timestamp: point.timestamp,
            });
        }
        Ok(points.len())
    }

    fn select_all(&self) -> Result<Vec<LocationRow>> {
        Ok(Self::sorted(self.rows.clone()))
    }

    fn select_by_label(&self, label: &str) -> Result<Vec<LocationRow>> {
        let rows = self
            .rows
            .iter()
            .filter(|row| row.label == label)
            .cloned()
            .collect();
        Ok(Self::sorted(rows))
    }

    fn delete_by_label(&mut self, label: &str) -> Result<usize> {
        let before = self.rows.len();
        self.rows.retain(|row| row.label != label);
        Ok(before - self.rows.len())
    }

    fn count_labels(&self) -> Result<usize> {
        let mut labels: Vec<&str> = self.rows.iter().map(|row| row.label.as_str()).collect();
        labels.sort_unstable();
        labels.dedup();
        Ok(labels.len())
    }
}

/// Route-level access to a [`PointStore`]
///
/// Every operation fails with
/// [`ErrorCode::NotInitialized`](walktrack_core::ErrorCode::NotInitialized)
/// until [`initialize`](Self::initialize) installs a store.
#[derive(Debug)]
pub struct RouteStorage<S> {
    store: Option<S>,
}

impl<S> Default for RouteStorage<S> {
    fn default() -> Self {
        Self { store: None }
    }
}

impl<S: PointStore> RouteStorage<S> {
    /// Storage without a store handle
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initialize(&mut self, store: S) {
        self.store = Some(store);
        tracing::info!("Route storage initialized");
    }

    pub fn is_initialized(&self) -> bool {
        self.store.is_some()
    }

    /// Take the store handle back, leaving the storage uninitialized
    pub fn close(&mut self) -> Option<S> {
        self.store.take()
    }

    fn store(&self) -> Result<&S> {
        self.store.as_ref().ok_or_else(Error::not_initialized)
    }

    fn store_mut(&mut self) -> Result<&mut S> {
        self.store.as_mut().ok_or_else(Error::not_initialized)
    }

    /// Persist a finished walk under `label`.
    ///
    /// Saving under a label that already exists appends to that route.
    pub fn save_route(&mut self, label: &str, samples: &[LocationPoint]) -> Result<usize> {
        let store = self.store_mut()?;
        validate_label(label).into_result()?;
        if samples.is_empty() {
            return Err(Error::empty_route(label));
        }

        let written = store
            .insert_points(label, samples)
            .context(format!("While saving route '{}'", label))?;
        tracing::info!(label, points = written, "Saved route");
        Ok(written)
    }

    /// Every persisted route, in label order
    pub fn load_routes(&self) -> Result<Vec<Route>> {
        let rows = self.store()?.select_all().context("While loading routes")?;
        let routes = materialize_routes(&rows);
        tracing::debug!(rows = rows.len(), routes = routes.len(), "Loaded routes");
        Ok(routes)
    }

    pub fn load_routes_by_label(&self, label: &str) -> Result<Vec<Route>> {
        let rows = self
            .store()?
            .select_by_label(label)
            .context(format!("While loading route '{}'", label))?;
        Ok(materialize_routes(&rows))
    }

    /// Delete every row stored under `label`.
    ///
    /// Returns true if anything was removed.
    pub fn delete_routes(&mut self, label: &str) -> Result<bool> {
        let removed = self
            .store_mut()?
            .delete_by_label(label)
            .context(format!("While deleting route '{}'", label))?;
        if removed > 0 {
            tracing::info!(label, rows = removed, "Deleted route");
        }
        Ok(removed > 0)
    }

    /// Number of distinct route labels
    pub fn route_count(&self) -> Result<usize> {
        self.store()?.count_labels()
    }

    /// Rebuild `catalog` from persistence.
    ///
    /// The catalog is left untouched if loading fails.
    pub fn refresh_catalog(&self, catalog: &mut RouteCatalog) -> Result<()> {
        let routes = self.load_routes()?;
        catalog.replace_all(routes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::make_csv_data;
    use crate::session::CollectionSession;
    use chrono::{DateTime, Duration, Utc};
    use walktrack_core::ErrorCode;

    fn t0() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_714_550_400, 0).unwrap()
    }

    fn walk(start_secs: i64, n: usize) -> Vec<LocationPoint> {
        (0..n)
            .map(|i| {
                let ts = t0() + Duration::seconds(start_secs + i as i64 * 10);
                LocationPoint::new(35.6812 + i as f64 * 0.0001, 139.7671, ts, 5.0)
            })
            .collect()
    }

    fn storage() -> RouteStorage<MemoryPointStore> {
        let mut storage = RouteStorage::new();
        storage.initialize(MemoryPointStore::new());
        storage
    }

    #[test]
    fn test_uninitialized_rejects_everything() {
        let mut storage = RouteStorage::<MemoryPointStore>::new();
        assert!(!storage.is_initialized());

        let err = storage.save_route("Walk", &walk(0, 2)).unwrap_err();
        assert!(err.is_not_initialized());
        assert!(storage.load_routes().unwrap_err().is_not_initialized());
        let err = storage.load_routes_by_label("Walk").unwrap_err();
        assert!(err.is_not_initialized());
        let err = storage.delete_routes("Walk").unwrap_err();
        assert!(err.is_not_initialized());
        assert!(storage.route_count().unwrap_err().is_not_initialized());

        let mut catalog = RouteCatalog::new();
        let err = storage.refresh_catalog(&mut catalog).unwrap_err();
        assert!(err.is_not_initialized());
    }

    #[test]
    fn test_save_rejects_blank_label_and_empty_samples() {
        let mut storage = storage();

        let err = storage.save_route("  ", &walk(0, 2)).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidLabel);

        let err = storage.save_route("Walk", &[]).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyRoute);
        assert_eq!(storage.route_count().unwrap(), 0);
    }

    #[test]
    fn test_save_and_load() {
        let mut storage = storage();
        assert_eq!(storage.save_route("Morning Walk", &walk(0, 3)).unwrap(), 3);
        assert_eq!(storage.save_route("Evening", &walk(3600, 2)).unwrap(), 2);

        let routes = storage.load_routes().unwrap();
        assert_eq!(routes.len(), 2);
        // Label order from the store
        assert_eq!(routes[0].name, "Evening");
        assert_eq!(routes[0].id, "evening-4");
        assert_eq!(routes[1].name, "Morning Walk");
        assert_eq!(routes[1].id, "morning-walk-1");
        assert_eq!(routes[1].point_count, 3);
        assert_eq!(storage.route_count().unwrap(), 2);

        let morning = storage.load_routes_by_label("Morning Walk").unwrap();
        assert_eq!(morning, vec![routes[1].clone()]);
        assert!(storage.load_routes_by_label("Nope").unwrap().is_empty());
    }

    #[test]
    fn test_saving_same_label_merges() {
        let mut storage = storage();
        storage.save_route("Walk", &walk(100, 2)).unwrap();
        storage.save_route("Walk", &walk(0, 1)).unwrap();

        let routes = storage.load_routes().unwrap();
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].point_count, 3);
        assert_eq!(routes[0].start_time, t0());
        // First row in timestamp order was inserted last
        assert_eq!(routes[0].id, "walk-3");
    }

    #[test]
    fn test_delete_routes() {
        let mut storage = storage();
        storage.save_route("Walk", &walk(0, 2)).unwrap();
        storage.save_route("Jog", &walk(100, 2)).unwrap();

        assert!(storage.delete_routes("Walk").unwrap());
        assert!(!storage.delete_routes("Walk").unwrap());
        assert_eq!(storage.route_count().unwrap(), 1);
        assert_eq!(storage.close().unwrap().row_count(), 2);
        assert!(!storage.is_initialized());
    }

    #[test]
    fn test_session_to_csv() {
        let start = t0();
        let mut session = CollectionSession::with_clock(move || start);
        session.start();
        for sample in walk(0, 3) {
            assert!(session.add_sample(sample));
        }
        let recorded = session.finish().unwrap();
        assert_eq!(session.sample_count(), 0);

        let mut storage = storage();
        storage.save_route("Lunch Loop", &recorded.samples).unwrap();
        storage.save_route("Older", &walk(-7200, 2)).unwrap();

        let mut catalog = RouteCatalog::new();
        storage.refresh_catalog(&mut catalog).unwrap();
        assert_eq!(catalog.get_route_count(), 2);
        assert_eq!(catalog.get_all_routes()[0].name, "Lunch Loop");

        let csv = make_csv_data(catalog.get_all_routes()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 1 + 3 + 2);
        assert_eq!(lines[1], "Lunch Loop,35.6812,139.7671,2024-05-01T08:00:00.000Z,5,,");

        assert!(storage.delete_routes("Lunch Loop").unwrap());
        storage.refresh_catalog(&mut catalog).unwrap();
        assert_eq!(catalog.get_route_count(), 1);
    }

    struct UnavailableStore;

    impl PointStore for UnavailableStore {
        fn insert_points(&mut self, _label: &str, _points: &[LocationPoint]) -> Result<usize> {
            Err(Error::storage("database is locked"))
        }

        fn select_all(&self) -> Result<Vec<LocationRow>> {
            Err(Error::storage("database is locked"))
        }

        fn select_by_label(&self, _label: &str) -> Result<Vec<LocationRow>> {
            Err(Error::storage("database is locked"))
        }

        fn delete_by_label(&mut self, _label: &str) -> Result<usize> {
            Err(Error::storage("database is locked"))
        }

        fn count_labels(&self) -> Result<usize> {
            Err(Error::storage("database is locked"))
        }
    }

    #[test]
    fn test_store_failures_carry_context() {
        let mut storage = RouteStorage::new();
        storage.initialize(UnavailableStore);

        let err = storage.save_route("Walk", &walk(0, 2)).unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageError);
        assert_eq!(err.context.as_deref(), Some("While saving route 'Walk'"));

        let err = storage.delete_routes("Walk").unwrap_err();
        assert_eq!(err.context.as_deref(), Some("While deleting route 'Walk'"));
    }

    #[test]
    fn test_failed_refresh_keeps_catalog() {
        let mut catalog = RouteCatalog::new();
        let route = Route::from_points("walk-1", "Walk", walk(0, 2)).unwrap();
        catalog.add_route(route);

        let mut storage = RouteStorage::new();
        storage.initialize(UnavailableStore);

        let err = storage.refresh_catalog(&mut catalog).unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageError);
        assert_eq!(err.context.as_deref(), Some("While loading routes"));
        assert_eq!(catalog.get_route_count(), 1);
    }
}
