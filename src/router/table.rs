// Route table: the navigation system's view of what is currently installed.

use std::sync::RwLock;

use crate::routes::{constant_routes, ComponentHandle, NavigableRoute, RouteMeta, CATCH_ALL_PATH};

/// Result of resolving a target path against the installed tree
#[derive(Debug, Clone)]
pub struct RouteMatch {
    /// Fully joined path of the matched node
    pub path: String,
    pub name: String,
    pub meta: RouteMeta,
    pub component: ComponentHandle,
    pub redirect: Option<String>,
}

/// Installed route tree. Starts with the constant routes; the coordinator
/// swaps in the full generated tree and resets it back on teardown.
pub struct RouteTable {
    routes: RwLock<Vec<NavigableRoute>>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self {
            routes: RwLock::new(constant_routes()),
        }
    }

    /// Replace the installed tree wholesale
    pub fn install(&self, routes: Vec<NavigableRoute>) {
        *self.write() = routes;
    }

    /// Drop every dynamic route, leaving only the constant set
    pub fn reset_to_constant(&self) {
        *self.write() = constant_routes();
    }

    pub fn routes(&self) -> Vec<NavigableRoute> {
        self.read().clone()
    }

    /// Match a target path against the installed tree, in installation
    /// order. The catch-all participates like any other entry, so keeping it
    /// last keeps it from shadowing real routes.
    pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
        let routes = self.read();
        let mut catch_all = None;

        for route in routes.iter() {
            if let Some(m) = match_node(route, "", path, &mut catch_all) {
                return Some(m);
            }
        }
        catch_all
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<NavigableRoute>> {
        self.routes.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<NavigableRoute>> {
        self.routes.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::new()
    }
}

fn join_path(parent: &str, child: &str) -> String {
    if child.starts_with('/') || parent.is_empty() {
        child.to_string()
    } else {
        format!("{}/{}", parent.trim_end_matches('/'), child)
    }
}

fn to_match(route: &NavigableRoute, full_path: String) -> RouteMatch {
    RouteMatch {
        path: full_path,
        name: route.name.clone(),
        meta: route.meta.clone(),
        component: route.component.clone(),
        redirect: route.redirect.clone(),
    }
}

fn match_node(
    route: &NavigableRoute,
    parent: &str,
    target: &str,
    catch_all: &mut Option<RouteMatch>,
) -> Option<RouteMatch> {
    if route.path == CATCH_ALL_PATH {
        if catch_all.is_none() {
            *catch_all = Some(to_match(route, target.to_string()));
        }
        return None;
    }

    let full = join_path(parent, &route.path);

    for child in &route.children {
        if let Some(m) = match_node(child, &full, target, catch_all) {
            return Some(m);
        }
    }

    if full == target {
        return Some(to_match(route, full));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::not_found_route;

    #[test]
    fn resolves_constant_routes() {
        let table = RouteTable::new();
        assert_eq!(table.resolve("/login").unwrap().name, "Login");
        assert_eq!(table.resolve("/dashboard").unwrap().name, "Dashboard");
        // root carries its redirect
        assert_eq!(table.resolve("/").unwrap().redirect.as_deref(), Some("/dashboard"));
    }

    #[test]
    fn unknown_path_misses_without_catch_all() {
        let table = RouteTable::new();
        assert!(table.resolve("/system/user").is_none());
    }

    #[test]
    fn catch_all_matches_anything_but_never_shadows() {
        let table = RouteTable::new();
        let mut routes = constant_routes();
        routes.push(not_found_route());
        table.install(routes);

        assert_eq!(table.resolve("/dashboard").unwrap().name, "Dashboard");
        let miss = table.resolve("/does/not/exist").unwrap();
        assert_eq!(miss.name, "NotFound");
        assert_eq!(miss.redirect.as_deref(), Some("/404"));
    }

    #[test]
    fn reset_drops_dynamic_routes() {
        let table = RouteTable::new();
        let mut routes = constant_routes();
        routes.push(not_found_route());
        table.install(routes);
        assert!(table.resolve("/anything").is_some());

        table.reset_to_constant();
        assert!(table.resolve("/anything").is_none());
    }
}
