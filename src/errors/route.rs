use super::registry::RegistryErrorKind;

/// Construction-time failure of a route invoker.
#[derive(thiserror::Error, Debug)]
pub enum RouteErrorKind {
    #[error("Cannot make route invoker for non-existent service '{0}'")]
    UnknownService(Box<str>),
}

/// Invocation-time failure of a method-bound route handler.
#[derive(thiserror::Error, Debug)]
pub enum InvokeErrorKind {
    #[error("Could not fetch service '{0}' from registry")]
    ServiceResolution(Box<str>),
    #[error("Service '{0}' in registry is not a route service")]
    NotARouteService(Box<str>),
    #[error(transparent)]
    Dependencies(RegistryErrorKind),
    #[error("Could not construct route service: {0}")]
    Construct(#[source] anyhow::Error),
    #[error("Invoked method '{method}' not in route service '{service}'")]
    MethodNotFound { service: Box<str>, method: Box<str> },
    #[error(transparent)]
    Handler(anyhow::Error),
}
