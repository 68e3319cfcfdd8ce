pub mod convert;
pub mod statics;
pub mod types;

pub use convert::{convert_routes, ConvertError};
pub use statics::{constant_routes, fallback_routes, not_found_route, CATCH_ALL_PATH};
pub use types::{ComponentHandle, NavigableRoute, RouteDescriptor, RouteMeta, LAYOUT_COMPONENT};
