// Route tree conversion: backend descriptors to navigable routes.
//
// Structural translation only. Permission filtering of what the user sees is
// a render-time concern handled through the capability evaluator; no node is
// dropped, reordered or filtered here.

use thiserror::Error;

use crate::routes::types::{
    ComponentHandle, NavigableRoute, RouteDescriptor, LAYOUT_COMPONENT,
};

#[derive(Debug, Error)]
pub enum ConvertError {
    /// The descriptor references a component form that is neither the shared
    /// layout nor a loadable view identifier. Fatal to route generation.
    #[error("invalid route descriptor at '{path}': unresolvable component '{component}'")]
    InvalidRouteDescriptor { path: String, component: String },
}

/// Depth-first, order-preserving rewrite of a descriptor tree.
///
/// Sibling order and nesting depth survive unchanged; `meta` and `redirect`
/// are copied verbatim.
pub fn convert_routes(descriptors: &[RouteDescriptor]) -> Result<Vec<NavigableRoute>, ConvertError> {
    descriptors.iter().map(convert_node).collect()
}

fn convert_node(descriptor: &RouteDescriptor) -> Result<NavigableRoute, ConvertError> {
    let component = resolve_component(descriptor)?;
    let children = convert_routes(&descriptor.children)?;

    Ok(NavigableRoute {
        name: descriptor.name.clone(),
        path: descriptor.path.clone(),
        component,
        meta: descriptor.meta.clone(),
        children,
        redirect: descriptor.redirect.clone(),
    })
}

fn resolve_component(descriptor: &RouteDescriptor) -> Result<ComponentHandle, ConvertError> {
    let raw = descriptor.component.as_str();

    if raw == LAYOUT_COMPONENT {
        return Ok(ComponentHandle::Layout);
    }

    // View identifiers are relative paths under the views root. Only the
    // shape is validated here; loading is deferred to first navigation.
    let valid = !raw.is_empty()
        && !raw.starts_with('/')
        && !raw.split('/').any(|seg| seg.is_empty() || seg == "..");

    if !valid {
        return Err(ConvertError::InvalidRouteDescriptor {
            path: descriptor.path.clone(),
            component: raw.to_string(),
        });
    }

    Ok(ComponentHandle::LazyView(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::types::RouteMeta;

    fn leaf(name: &str, path: &str, component: &str) -> RouteDescriptor {
        RouteDescriptor {
            name: name.to_string(),
            path: path.to_string(),
            component: component.to_string(),
            meta: RouteMeta::titled(name),
            children: Vec::new(),
            redirect: None,
        }
    }

    #[test]
    fn layout_sentinel_resolves_to_shared_layout() {
        let mut parent = leaf("System", "/system", "Layout");
        parent.children.push(leaf("User", "user", "system/user/index"));

        let converted = convert_routes(&[parent]).unwrap();
        assert_eq!(converted[0].component, ComponentHandle::Layout);
        assert_eq!(
            converted[0].children[0].component,
            ComponentHandle::LazyView("system/user/index".to_string())
        );
    }

    #[test]
    fn preserves_sibling_order_and_depth() {
        let mut a = leaf("a", "/a", "Layout");
        a.children.push(leaf("b", "b", "a/b/index"));
        a.children.push(leaf("c", "c", "a/c/index"));
        let d = leaf("d", "/d", "d/index");

        let converted = convert_routes(&[a, d]).unwrap();
        assert_eq!(
            NavigableRoute::preorder_names(&converted),
            vec!["a", "b", "c", "d"]
        );
    }

    #[test]
    fn redirect_and_meta_copied_verbatim() {
        let mut desc = leaf("System", "/system", "Layout");
        desc.redirect = Some("/system/user".to_string());
        desc.meta.icon = "Setting".to_string();
        desc.meta.hidden = true;
        desc.meta.permission = Some("system:user:list".to_string());

        let converted = convert_routes(&[desc.clone()]).unwrap();
        assert_eq!(converted[0].redirect.as_deref(), Some("/system/user"));
        assert_eq!(converted[0].meta, desc.meta);
    }

    #[test]
    fn unknown_component_form_is_fatal_and_names_the_path() {
        for bad in ["", "/absolute/view", "up/../escape", "double//slash"] {
            let err = convert_routes(&[leaf("Bad", "/bad", bad)]).unwrap_err();
            let ConvertError::InvalidRouteDescriptor { path, .. } = err;
            assert_eq!(path, "/bad");
        }
    }

    #[test]
    fn failure_in_a_child_aborts_the_whole_conversion() {
        let mut parent = leaf("System", "/system", "Layout");
        parent.children.push(leaf("Bad", "bad", ""));

        assert!(convert_routes(&[parent]).is_err());
    }
}
