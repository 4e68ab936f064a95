mod middleware;
mod registry;
mod route;

pub use middleware::{ErrorMiddlewareErrorKind, MiddlewareErrorKind};
pub use registry::RegistryErrorKind;
pub use route::{InvokeErrorKind, RouteErrorKind};
