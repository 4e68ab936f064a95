/// Failure of a lazily resolved middleware handler.
#[derive(thiserror::Error, Debug)]
pub enum MiddlewareErrorKind {
    /// Factory failure; the message prefix is part of the public contract,
    /// the original error stays reachable through `source()`.
    #[error("Could not fetch middleware from middlewareFactory: {0}")]
    Factory(#[source] anyhow::Error),
    #[error("Could not fetch middleware from middlewareFactory")]
    Missing,
    #[error(transparent)]
    Handler(anyhow::Error),
}

/// Failure of a lazily resolved error-middleware handler.
///
/// Unlike [`MiddlewareErrorKind`], factory failures pass through without a
/// message prefix.
#[derive(thiserror::Error, Debug)]
pub enum ErrorMiddlewareErrorKind {
    #[error(transparent)]
    Factory(anyhow::Error),
    #[error("Could not fetch error middleware from middlewareFactory")]
    Missing,
    #[error(transparent)]
    Handler(anyhow::Error),
}
