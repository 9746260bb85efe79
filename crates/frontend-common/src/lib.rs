//! Routing, navigation guard and session wiring shared by JobAgent frontends

pub mod app;
pub mod guard;
pub mod navigator;
pub mod router;
pub mod routes;
#[cfg(target_arch = "wasm32")]
pub mod storage;

pub use app::AppContext;
pub use guard::{GuardDecision, NavigationGuard};
#[cfg(target_arch = "wasm32")]
pub use navigator::BrowserNavigator;
pub use navigator::{HistoryNavigator, NavigationEntry, NavigationKind, Navigator};
pub use router::{Resolution, Router};
pub use routes::{ROUTES, Route, RouteDescriptor};
#[cfg(target_arch = "wasm32")]
pub use storage::LocalTokenStore;
