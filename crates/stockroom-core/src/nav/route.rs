//! Static route table.

use crate::types::user::permission;

/// Where unauthenticated visitors are sent.
pub const LOGIN_PATH: &str = "/login";

/// Where visitors without access are sent.
pub const DEFAULT_PATH: &str = "/";

/// Access requirements attached to a route.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
    pub requires_owner: bool,
    pub permission: Option<String>,
}

impl RouteMeta {
    /// Reachable without a session.
    pub fn public() -> Self {
        Self::default()
    }

    /// Any logged-in user.
    pub fn authenticated() -> Self {
        Self {
            requires_auth: true,
            ..Self::default()
        }
    }

    /// Owners only.
    pub fn owner() -> Self {
        Self {
            requires_auth: true,
            requires_owner: true,
            permission: None,
        }
    }

    /// Logged-in users holding `permission` (owners always pass).
    pub fn permission(permission: impl Into<String>) -> Self {
        Self {
            requires_auth: true,
            requires_owner: false,
            permission: Some(permission.into()),
        }
    }
}

/// A navigable path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub path: String,
    pub name: String,
    pub title: String,
    pub meta: RouteMeta,
    /// Static alias: visiting this path lands on `redirect` instead.
    pub redirect: Option<String>,
}

impl Route {
    pub fn new(path: &str, name: &str, title: &str, meta: RouteMeta) -> Self {
        Self {
            path: path.to_string(),
            name: name.to_string(),
            title: title.to_string(),
            meta,
            redirect: None,
        }
    }

    pub fn redirect_to(mut self, target: &str) -> Self {
        self.redirect = Some(target.to_string());
        self
    }
}

/// The immutable set of routes, built once at startup.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    fallback: String,
}

impl RouteTable {
    /// Build a table; unknown paths resolve to `fallback`.
    pub fn new(routes: Vec<Route>, fallback: &str) -> Self {
        Self {
            routes,
            fallback: fallback.to_string(),
        }
    }

    /// The stock back-office layout.
    pub fn standard() -> Self {
        Self::new(
            vec![
                Route::new("/", "Root", "Home", RouteMeta::authenticated())
                    .redirect_to("/dashboard"),
                Route::new(LOGIN_PATH, "Login", "Sign in", RouteMeta::public()),
                Route::new(
                    "/dashboard",
                    "Dashboard",
                    "Dashboard",
                    RouteMeta::authenticated(),
                ),
                Route::new(
                    "/inventory",
                    "Inventory",
                    "Inventory",
                    RouteMeta::permission(permission::INVENTORY),
                ),
                Route::new(
                    "/stock-in",
                    "StockIn",
                    "Stock in",
                    RouteMeta::permission(permission::STOCK_IN),
                ),
                Route::new(
                    "/stock-out",
                    "StockOut",
                    "Stock out",
                    RouteMeta::permission(permission::STOCK_OUT),
                ),
                Route::new(
                    "/transactions",
                    "Transactions",
                    "Transactions",
                    RouteMeta::permission(permission::TRANSACTIONS),
                ),
                Route::new(
                    "/performance",
                    "Performance",
                    "Performance",
                    RouteMeta::permission(permission::PERFORMANCE),
                ),
                Route::new(
                    "/companies",
                    "Companies",
                    "Suppliers & customers",
                    RouteMeta::permission(permission::COMPANIES),
                ),
                Route::new(
                    "/finance",
                    "Finance",
                    "Income & expense",
                    RouteMeta::permission(permission::FINANCE),
                ),
                Route::new(
                    "/stock-orders",
                    "StockOrders",
                    "Stock orders",
                    RouteMeta::permission(permission::STOCK_ORDERS),
                ),
                Route::new("/logs", "OperationLogs", "Operation logs", RouteMeta::owner()),
                Route::new("/users", "Users", "Users", RouteMeta::owner()),
            ],
            DEFAULT_PATH,
        )
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Exact lookup by normalised path.
    pub fn find(&self, path: &str) -> Option<&Route> {
        let path = normalize(path);
        self.routes.iter().find(|r| r.path == path)
    }

    /// Look up `path`, falling back to the catch-all for unknown paths.
    pub fn lookup(&self, path: &str) -> Option<&Route> {
        self.find(path).or_else(|| self.find(&self.fallback))
    }
}

/// Strip query, fragment and trailing slashes; ensure a leading slash.
pub fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_matches('/');
    format!("/{}", trimmed)
}
