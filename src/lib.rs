pub(crate) mod adapter;
pub(crate) mod errors;
pub(crate) mod handler;
pub(crate) mod methods;
pub(crate) mod middleware;
pub(crate) mod registry;
pub(crate) mod route;
pub(crate) mod selector;

pub use errors::{
    ErrorMiddlewareErrorKind, InvokeErrorKind, MiddlewareErrorKind, RegistryErrorKind, RouteErrorKind,
};
pub use handler::{ErrorHandler, Flow, Handler, HandlerResult, Next};
pub use methods::MethodMap;
pub use middleware::{ErrorMiddlewareInvoker, MiddlewareInvoker};
pub use registry::{MapRegistry, Registry, Value};
pub use route::{MethodHandler, RouteInvoker};
pub use selector::{Constructor, ServiceSelector};
