// Route generation coordinator: owns the one-shot "dynamic routes are
// installed" state for the session.

use std::sync::{Arc, Mutex};

use crate::router::table::RouteTable;
use crate::routes::{
    constant_routes, convert_routes, fallback_routes, not_found_route, ConvertError,
    NavigableRoute, RouteDescriptor,
};

enum GenerationState {
    NotGenerated,
    Generated(Arc<Vec<NavigableRoute>>),
}

/// Process-wide coordinator; `generate` is idempotent per session, so
/// concurrent navigations racing the same generation install exactly one
/// route tree and all observe the same result.
pub struct RouteCoordinator {
    table: Arc<RouteTable>,
    state: Mutex<GenerationState>,
}

impl RouteCoordinator {
    pub fn new(table: Arc<RouteTable>) -> Self {
        Self {
            table,
            state: Mutex::new(GenerationState::NotGenerated),
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(*self.lock(), GenerationState::Generated(_))
    }

    /// The installed tree, when generation has happened
    pub fn installed(&self) -> Option<Arc<Vec<NavigableRoute>>> {
        match &*self.lock() {
            GenerationState::Generated(routes) => Some(routes.clone()),
            GenerationState::NotGenerated => None,
        }
    }

    /// Convert and install the session's route tree exactly once.
    ///
    /// An empty descriptor set means the backend menu fetch failed or
    /// returned nothing; the statically known catalog is used instead. The
    /// catch-all is appended last so it cannot shadow a real route. On
    /// converter failure the state stays `NotGenerated` and nothing is
    /// installed.
    pub fn generate(
        &self,
        raw_routes: &[RouteDescriptor],
    ) -> Result<Arc<Vec<NavigableRoute>>, ConvertError> {
        let mut state = self.lock();

        // Second and later callers get the first call's result
        if let GenerationState::Generated(routes) = &*state {
            return Ok(routes.clone());
        }

        let dynamic = if raw_routes.is_empty() {
            convert_routes(&fallback_routes())?
        } else {
            convert_routes(raw_routes)?
        };

        let mut installed = constant_routes();
        installed.extend(dynamic);
        installed.push(not_found_route());

        let installed = Arc::new(installed);
        self.table.install(installed.as_ref().clone());
        *state = GenerationState::Generated(installed.clone());
        Ok(installed)
    }

    /// Uninstall dynamic routes and allow a future regeneration. Called on
    /// logout and on generation-failure recovery; skipping it would leave a
    /// stale `Generated` state that silently skips regeneration after a
    /// fresh login.
    pub fn reset_routes(&self) {
        let mut state = self.lock();
        self.table.reset_to_constant();
        *state = GenerationState::NotGenerated;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, GenerationState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::{NavigableRoute, RouteMeta, CATCH_ALL_PATH};

    fn descriptor(name: &str, path: &str, component: &str) -> RouteDescriptor {
        RouteDescriptor {
            name: name.to_string(),
            path: path.to_string(),
            component: component.to_string(),
            meta: RouteMeta::titled(name),
            children: Vec::new(),
            redirect: None,
        }
    }

    fn coordinator() -> (Arc<RouteTable>, RouteCoordinator) {
        let table = Arc::new(RouteTable::new());
        let coordinator = RouteCoordinator::new(table.clone());
        (table, coordinator)
    }

    #[test]
    fn generate_is_idempotent_and_first_call_wins() {
        let (_, coordinator) = coordinator();

        let first = coordinator
            .generate(&[descriptor("Reports", "/reports", "reports/index")])
            .unwrap();
        let second = coordinator
            .generate(&[descriptor("Other", "/other", "other/index")])
            .unwrap();

        // second call is a no-op returning the first call's result
        assert!(Arc::ptr_eq(&first, &second));
        let names = NavigableRoute::preorder_names(&second);
        assert!(names.contains(&"Reports".to_string()));
        assert!(!names.contains(&"Other".to_string()));
    }

    #[test]
    fn catch_all_is_always_last() {
        let (_, coordinator) = coordinator();
        let installed = coordinator
            .generate(&[descriptor("Reports", "/reports", "reports/index")])
            .unwrap();

        assert_eq!(installed.last().unwrap().path, CATCH_ALL_PATH);
        assert_eq!(
            installed.iter().filter(|r| r.path == CATCH_ALL_PATH).count(),
            1
        );
    }

    #[test]
    fn empty_input_installs_the_static_fallback() {
        let (table, coordinator) = coordinator();
        coordinator.generate(&[]).unwrap();

        assert!(coordinator.is_generated());
        assert_eq!(table.resolve("/system/user").unwrap().name, "User");
    }

    #[test]
    fn converter_failure_leaves_state_not_generated() {
        let (table, coordinator) = coordinator();

        let err = coordinator.generate(&[descriptor("Bad", "/bad", "")]);
        assert!(err.is_err());
        assert!(!coordinator.is_generated());
        assert!(coordinator.installed().is_none());
        // nothing was installed
        assert!(table.resolve("/bad").is_none());
    }

    #[test]
    fn reset_allows_regeneration_with_fresh_routes() {
        let (table, coordinator) = coordinator();
        coordinator
            .generate(&[descriptor("Reports", "/reports", "reports/index")])
            .unwrap();

        coordinator.reset_routes();
        assert!(!coordinator.is_generated());
        assert!(table.resolve("/reports").is_none());

        coordinator
            .generate(&[descriptor("Audits", "/audits", "audits/index")])
            .unwrap();
        assert_eq!(table.resolve("/audits").unwrap().name, "Audits");
    }
}
