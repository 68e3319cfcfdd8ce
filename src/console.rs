// Console assembly: explicitly constructed, dependency-injected services
// with process-wide lifetime. `logout` is the documented teardown entry
// point; it resets the session store and the route coordinator together.

use std::sync::Arc;

use serde::Serialize;

use crate::api::{AuthApi, HttpAuthApi, LoginCredentials, UserInfo};
use crate::capability::CapabilitySet;
use crate::router::{NavigationGuard, NavigationOutcome, Navigator, RouteCoordinator, RouteTable};
use crate::routes::{NavigableRoute, CATCH_ALL_PATH};
use crate::session::credentials::CredentialStore;
use crate::session::{SessionError, SessionStore};

/// Menu node derived from the installed route tree, filtered for rendering
#[derive(Debug, Clone, Serialize)]
pub struct MenuEntry {
    pub title: String,
    pub path: String,
    pub icon: String,
    pub children: Vec<MenuEntry>,
}

pub struct Console {
    pub session: Arc<SessionStore>,
    pub coordinator: Arc<RouteCoordinator>,
    pub table: Arc<RouteTable>,
    navigator: Navigator,
}

impl Console {
    /// Wire the full service graph from the global application config
    pub fn from_config() -> anyhow::Result<Self> {
        let api = HttpAuthApi::from_config()
            .map_err(|e| anyhow::anyhow!("failed to build transport: {e}"))?;
        let credentials = CredentialStore::from_config()?;
        Ok(Self::assemble(Arc::new(api), credentials))
    }

    /// Wire the service graph around an explicit transport; tests inject
    /// mocks here
    pub fn assemble(api: Arc<dyn AuthApi>, credentials: CredentialStore) -> Self {
        let session = Arc::new(SessionStore::new(api, credentials));
        let table = Arc::new(RouteTable::new());
        let coordinator = Arc::new(RouteCoordinator::new(table.clone()));

        let allow_list = crate::config::config().auth.public_paths.clone();
        let guard = NavigationGuard::new(session.clone(), coordinator.clone())
            .with_allow_list(allow_list);
        let navigator = Navigator::new(table.clone(), guard);

        Self {
            session,
            coordinator,
            table,
            navigator,
        }
    }

    pub async fn login(&self, form: &LoginCredentials) -> Result<(), SessionError> {
        self.session.login(form).await
    }

    /// Teardown: backend logout (best-effort), local session clear, dynamic
    /// route uninstall
    pub async fn logout(&self) {
        self.session.logout().await;
        self.coordinator.reset_routes();
    }

    pub async fn navigate(&self, to: &str) -> NavigationOutcome {
        self.navigator.navigate(to).await
    }

    pub fn profile(&self) -> Option<UserInfo> {
        self.session.profile()
    }

    pub fn capabilities(&self) -> CapabilitySet {
        self.session.capabilities()
    }

    /// Render-time menu view of the installed routes: hidden entries and
    /// entries whose permission the session lacks are filtered here, never
    /// during conversion
    pub fn menu(&self) -> Vec<MenuEntry> {
        let caps = self.capabilities();
        build_menu(&self.table.routes(), &caps)
    }
}

fn build_menu(routes: &[NavigableRoute], caps: &CapabilitySet) -> Vec<MenuEntry> {
    let mut entries = Vec::new();

    for route in routes {
        if route.path == CATCH_ALL_PATH || route.meta.hidden {
            continue;
        }
        if let Some(required) = &route.meta.permission {
            if !caps.has_permission(required) {
                continue;
            }
        }

        let children = build_menu(&route.children, caps);

        if route.meta.title.is_empty() {
            // structural node (e.g. the layout root): splice children up
            entries.extend(children);
        } else {
            entries.push(MenuEntry {
                title: route.meta.title.clone(),
                path: route.path.clone(),
                icon: route.meta.icon.clone(),
                children,
            });
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::{constant_routes, convert_routes, fallback_routes};

    #[test]
    fn menu_hides_entries_lacking_permission() {
        let mut routes = constant_routes();
        routes.extend(convert_routes(&fallback_routes()).unwrap());

        let admin = CapabilitySet::new(
            vec!["*:*:*".to_string()],
            vec![],
        );
        let limited = CapabilitySet::new(
            vec!["system:user:list".to_string()],
            vec![],
        );

        let admin_menu = build_menu(&routes, &admin);
        let limited_menu = build_menu(&routes, &limited);

        let admin_system = admin_menu.iter().find(|e| e.path == "/system").unwrap();
        assert_eq!(admin_system.children.len(), 7);

        let limited_system = limited_menu.iter().find(|e| e.path == "/system").unwrap();
        assert_eq!(limited_system.children.len(), 1);
        assert_eq!(limited_system.children[0].title, "Users");
    }

    #[test]
    fn menu_skips_hidden_routes_and_catch_all() {
        let caps = CapabilitySet::new(vec!["*:*:*".to_string()], vec![]);
        let mut routes = constant_routes();
        routes.push(crate::routes::not_found_route());

        let menu = build_menu(&routes, &caps);
        assert!(menu.iter().all(|e| e.path != "/login"));
        assert!(menu.iter().all(|e| e.path != CATCH_ALL_PATH));
        // dashboard is spliced up from the untitled layout root
        assert!(menu.iter().any(|e| e.title == "Dashboard"));
    }
}
