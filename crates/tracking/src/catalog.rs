//! In-memory route catalog.
//!
//! A read-through cache over persisted routes: a map from id to position
//! plus the routes themselves, kept sorted newest first. It never talks to
//! persistence; [`RouteStorage::refresh_catalog`](crate::storage::RouteStorage::refresh_catalog)
//! rebuilds it.

use crate::route::{Route, RouteSummary};
use std::collections::HashMap;
use walktrack_geo::calculate_path_lengths;

/// Routes sorted by start time, newest first
#[derive(Debug, Clone, Default)]
pub struct RouteCatalog {
    routes: Vec<Route>,
    index: HashMap<String, usize>,
}

impl RouteCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a route, replacing any route with the same id.
    ///
    /// Routes with equal start times keep their insertion order; a
    /// replaced route keeps the position of the one it replaces.
    pub fn add_route(&mut self, route: Route) {
        match self.index.get(&route.id) {
            Some(&position) => self.routes[position] = route,
            None => self.routes.push(route),
        }
        self.resort();
    }

    /// Replace the whole catalog.
    pub fn replace_all(&mut self, routes: impl IntoIterator<Item = Route>) {
        self.routes.clear();
        self.index.clear();
        for route in routes {
            match self.index.get(&route.id) {
                Some(&position) => self.routes[position] = route,
                None => {
                    self.index.insert(route.id.clone(), self.routes.len());
                    self.routes.push(route);
                }
            }
        }
        self.resort();
        tracing::debug!(routes = self.routes.len(), "Route catalog rebuilt");
    }

    /// All routes, newest first
    pub fn get_all_routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn get_route(&self, id: &str) -> Option<&Route> {
        self.index.get(id).map(|&position| &self.routes[position])
    }

    /// Routes whose name matches exactly, newest first
    pub fn get_routes_by_title(&self, name: &str) -> Vec<&Route> {
        self.routes.iter().filter(|route| route.name == name).collect()
    }

    /// Remove every route with this name.
    ///
    /// Returns true if at least one route was removed.
    pub fn delete_route_by_title(&mut self, name: &str) -> bool {
        let before = self.routes.len();
        self.routes.retain(|route| route.name != name);
        let removed = before - self.routes.len();

        if removed > 0 {
            self.reindex();
            tracing::debug!(name, removed, "Deleted routes from catalog");
        }
        removed > 0
    }

    pub fn get_route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn clear(&mut self) {
        self.routes.clear();
        self.index.clear();
    }

    /// Summaries of every route, in catalog order
    pub fn summaries(&self) -> Vec<RouteSummary> {
        let items: Vec<_> = self.routes.iter().map(Route::path_item).collect();
        calculate_path_lengths(&items)
            .into_iter()
            .zip(&self.routes)
            .map(|(length, route)| RouteSummary::new(route, length.meters))
            .collect()
    }

    fn resort(&mut self) {
        // Stable: equal start times keep insertion order
        self.routes.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        self.reindex();
    }

    fn reindex(&mut self) {
        self.index = self
            .routes
            .iter()
            .enumerate()
            .map(|(position, route)| (route.id.clone(), position))
            .collect();
    }

    #[cfg(test)]
    fn is_consistent(&self) -> bool {
        self.index.len() == self.routes.len()
            && self
                .routes
                .iter()
                .enumerate()
                .all(|(position, route)| self.index.get(&route.id) == Some(&position))
    }
}
