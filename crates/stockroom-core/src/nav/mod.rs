//! Route table, navigation guard and navigator.

mod guard;
mod navigator;
mod route;

pub use guard::{GuardDecision, NavigationGuard};
pub use navigator::{NavigationOutcome, Navigator};
pub use route::{DEFAULT_PATH, LOGIN_PATH, Route, RouteMeta, RouteTable, normalize};
