// Navigator: drives guard verdicts and route-table resolution to a terminal
// outcome, the way the host navigation loop would.

use std::sync::Arc;

use crate::router::guard::{GuardVerdict, NavigationGuard, NavigationRequest};
use crate::router::table::{RouteMatch, RouteTable};

/// Redirect/retry hops tolerated before declaring the attempt stuck
const MAX_HOPS: usize = 8;

/// Terminal result of a navigation attempt
#[derive(Debug, Clone)]
pub enum NavigationOutcome {
    /// Navigation settled on an installed route
    Rendered(RouteMatch),
    /// The target resolved nowhere, even after the not-found fallback
    NotFound(String),
    /// Redirect/retry budget exhausted
    Aborted(String),
}

impl NavigationOutcome {
    pub fn path(&self) -> &str {
        match self {
            NavigationOutcome::Rendered(m) => &m.path,
            NavigationOutcome::NotFound(path) | NavigationOutcome::Aborted(path) => path,
        }
    }
}

pub struct Navigator {
    table: Arc<RouteTable>,
    guard: NavigationGuard,
}

impl Navigator {
    pub fn new(table: Arc<RouteTable>, guard: NavigationGuard) -> Self {
        Self { table, guard }
    }

    /// Navigate to `to`, following guard redirects, the post-generation
    /// re-dispatch and route redirects until the attempt settles
    pub async fn navigate(&self, to: &str) -> NavigationOutcome {
        let mut target = to.to_string();
        let mut from = String::new();

        for _ in 0..MAX_HOPS {
            let req = NavigationRequest {
                to: target.clone(),
                from: from.clone(),
            };

            match self.guard.before_each(&req).await {
                GuardVerdict::Retry => {
                    // Same target, now against the freshly installed tree
                    continue;
                }
                GuardVerdict::Redirect(next) => {
                    from = std::mem::replace(&mut target, next);
                    continue;
                }
                GuardVerdict::Allow => match self.table.resolve(&target) {
                    Some(m) => match m.redirect {
                        Some(next) => {
                            from = std::mem::replace(&mut target, next);
                            continue;
                        }
                        None => {
                            tracing::debug!(path = %m.path, route = %m.name, "navigation settled");
                            return NavigationOutcome::Rendered(m);
                        }
                    },
                    None => {
                        if target == "/404" {
                            return NavigationOutcome::NotFound(target);
                        }
                        from = std::mem::replace(&mut target, "/404".to_string());
                        continue;
                    }
                },
            }
        }

        tracing::warn!(to, "navigation exceeded redirect budget");
        NavigationOutcome::Aborted(target)
    }
}
