use serde::{Deserialize, Serialize};

/// Symbolic component value meaning "render inside the shared layout"
pub const LAYOUT_COMPONENT: &str = "Layout";

/// Display metadata attached to a route node; passed through conversion verbatim
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteMeta {
    pub title: String,
    pub icon: String,
    pub hidden: bool,
    pub affix: bool,
    pub no_cache: bool,
    /// Permission identifier gating the rendered menu entry; evaluated at
    /// render time, never during conversion
    pub permission: Option<String>,
}

impl RouteMeta {
    pub fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }
}

/// Backend-supplied route/menu definition prior to conversion.
///
/// Tree-shaped; `children` order is significant and determines menu order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDescriptor {
    #[serde(default)]
    pub name: String,
    pub path: String,
    pub component: String,
    #[serde(default)]
    pub meta: RouteMeta,
    #[serde(default)]
    pub children: Vec<RouteDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

/// Component reference after conversion: either the shared layout or a
/// lazily loaded view, keyed by its path under the views root. Actual
/// loading is the rendering collaborator's problem; resolution failure is
/// deferred to first navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComponentHandle {
    Layout,
    LazyView(String),
}

impl ComponentHandle {
    pub fn view_path(&self) -> Option<&str> {
        match self {
            ComponentHandle::Layout => None,
            ComponentHandle::LazyView(path) => Some(path),
        }
    }
}

/// Route usable by the navigation system; same shape and order as the
/// descriptor it was converted from
#[derive(Debug, Clone, PartialEq)]
pub struct NavigableRoute {
    pub name: String,
    pub path: String,
    pub component: ComponentHandle,
    pub meta: RouteMeta,
    pub children: Vec<NavigableRoute>,
    pub redirect: Option<String>,
}

impl NavigableRoute {
    /// Pre-order traversal of route names, mostly useful in tests and menu
    /// rendering
    pub fn preorder_names(routes: &[NavigableRoute]) -> Vec<String> {
        let mut out = Vec::new();
        fn walk(route: &NavigableRoute, out: &mut Vec<String>) {
            out.push(route.name.clone());
            for child in &route.children {
                walk(child, out);
            }
        }
        for route in routes {
            walk(route, &mut out);
        }
        out
    }
}
