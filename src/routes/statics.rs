// Built-in route catalogs.
//
// `constant_routes` are installed for every session, authenticated or not.
// `fallback_routes` is the statically known menu used when the backend route
// fetch fails (degraded mode): the console stays usable with its stock
// administrative views.

use crate::routes::types::{
    ComponentHandle, NavigableRoute, RouteDescriptor, RouteMeta, LAYOUT_COMPONENT,
};

/// Catch-all path; the coordinator appends this last so it never shadows a
/// real route
pub const CATCH_ALL_PATH: &str = "*";

fn nav(
    name: &str,
    path: &str,
    component: ComponentHandle,
    meta: RouteMeta,
    children: Vec<NavigableRoute>,
    redirect: Option<&str>,
) -> NavigableRoute {
    NavigableRoute {
        name: name.to_string(),
        path: path.to_string(),
        component,
        meta,
        children,
        redirect: redirect.map(str::to_string),
    }
}

fn view(path: &str) -> ComponentHandle {
    ComponentHandle::LazyView(path.to_string())
}

fn hidden(title: &str) -> RouteMeta {
    RouteMeta {
        title: title.to_string(),
        hidden: true,
        ..RouteMeta::default()
    }
}

/// Routes every session can reach, including anonymous ones
pub fn constant_routes() -> Vec<NavigableRoute> {
    vec![
        nav("Login", "/login", view("login/index"), hidden("Login"), vec![], None),
        nav("404", "/404", view("error/404"), hidden("404"), vec![], None),
        nav("401", "/401", view("error/401"), hidden("401"), vec![], None),
        nav(
            "Root",
            "/",
            ComponentHandle::Layout,
            RouteMeta::default(),
            vec![
                nav(
                    "Dashboard",
                    "dashboard",
                    view("dashboard/index"),
                    RouteMeta {
                        title: "Dashboard".to_string(),
                        icon: "HomeFilled".to_string(),
                        affix: true,
                        ..RouteMeta::default()
                    },
                    vec![],
                    None,
                ),
                nav(
                    "Profile",
                    "profile",
                    view("profile/index"),
                    RouteMeta {
                        title: "Profile".to_string(),
                        icon: "User".to_string(),
                        hidden: true,
                        ..RouteMeta::default()
                    },
                    vec![],
                    None,
                ),
                nav(
                    "Notification",
                    "notification",
                    view("notification/index"),
                    RouteMeta {
                        title: "Notifications".to_string(),
                        icon: "Bell".to_string(),
                        hidden: true,
                        ..RouteMeta::default()
                    },
                    vec![],
                    None,
                ),
            ],
            Some("/dashboard"),
        ),
    ]
}

/// Terminal catch-all; must be installed after every real route
pub fn not_found_route() -> NavigableRoute {
    nav(
        "NotFound",
        CATCH_ALL_PATH,
        view("error/404"),
        hidden("Not Found"),
        vec![],
        Some("/404"),
    )
}

fn menu(name: &str, path: &str, component: &str, title: &str, icon: &str, permission: &str) -> RouteDescriptor {
    RouteDescriptor {
        name: name.to_string(),
        path: path.to_string(),
        component: component.to_string(),
        meta: RouteMeta {
            title: title.to_string(),
            icon: icon.to_string(),
            permission: Some(permission.to_string()),
            ..RouteMeta::default()
        },
        children: Vec::new(),
        redirect: None,
    }
}

fn section(name: &str, path: &str, title: &str, icon: &str, redirect: &str, children: Vec<RouteDescriptor>) -> RouteDescriptor {
    RouteDescriptor {
        name: name.to_string(),
        path: path.to_string(),
        component: LAYOUT_COMPONENT.to_string(),
        meta: RouteMeta {
            title: title.to_string(),
            icon: icon.to_string(),
            ..RouteMeta::default()
        },
        children,
        redirect: Some(redirect.to_string()),
    }
}

/// Statically known administrative menu, used when the backend menu fetch
/// fails
pub fn fallback_routes() -> Vec<RouteDescriptor> {
    vec![
        section(
            "System",
            "/system",
            "System",
            "Setting",
            "/system/user",
            vec![
                menu("User", "user", "system/user/index", "Users", "User", "system:user:list"),
                menu("Role", "role", "system/role/index", "Roles", "UserFilled", "system:role:list"),
                menu("Menu", "menu", "system/menu/index", "Menus", "Menu", "system:menu:list"),
                menu("Dept", "dept", "system/dept/index", "Departments", "OfficeBuilding", "system:dept:list"),
                menu("Post", "post", "system/post/index", "Posts", "Briefcase", "system:post:list"),
                menu("Dict", "dict", "system/dict/index", "Dictionaries", "Collection", "system:dict:list"),
                menu("Config", "config", "system/config/index", "Parameters", "Tools", "system:config:list"),
            ],
        ),
        section(
            "Monitor",
            "/monitor",
            "Monitoring",
            "Monitor",
            "/monitor/online",
            vec![
                menu("Online", "online", "monitor/online/index", "Online Users", "Connection", "monitor:online:list"),
                menu("Job", "job", "monitor/job/index", "Scheduled Jobs", "Timer", "monitor:job:list"),
                menu("Operlog", "operlog", "monitor/operlog/index", "Operation Log", "Document", "monitor:operlog:list"),
                menu("Loginlog", "loginlog", "monitor/loginlog/index", "Login Log", "Key", "monitor:loginlog:list"),
                menu("Server", "server", "monitor/server/index", "Server Status", "Cpu", "monitor:server:list"),
            ],
        ),
        section(
            "Tool",
            "/tool",
            "Tools",
            "Box",
            "/tool/generator",
            vec![
                menu("Generator", "generator", "tool/generator/index", "Code Generator", "DocumentAdd", "tool:gen:list"),
                menu("FileManage", "file", "file/index", "Files", "Folder", "tool:file:list"),
                menu("DataAnalysis", "analysis", "analysis/index", "Analytics", "DataAnalysis", "tool:analysis:list"),
            ],
        ),
    ]
}
