use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::{
    adapter::{AdaptedErrorHandler, AdaptedHandler},
    errors::{ErrorMiddlewareErrorKind, MiddlewareErrorKind},
    handler::{ErrorHandler, Flow, Handler, Next},
    registry::Registry,
};

type BoxedFactory<R, Req, Res> =
    Box<dyn Fn(&R) -> Result<Option<Handler<Req, Res>>, anyhow::Error> + Send + Sync>;
type BoxedErrorFactory<R, Req, Res> =
    Box<dyn Fn(&R) -> Result<Option<ErrorHandler<Req, Res>>, anyhow::Error> + Send + Sync>;

/// A single handler backed by a lazily invoked middleware factory.
///
/// The factory runs only when the first request actually reaches the
/// middleware; its product is then cached for the life of the invoker.
pub struct MiddlewareInvoker<R, Req, Res> {
    registry: R,
    factory: BoxedFactory<R, Req, Res>,
    middleware: Mutex<Option<Arc<AdaptedHandler<Req, Res>>>>,
}

impl<R, Req, Res> MiddlewareInvoker<R, Req, Res>
where
    R: Registry,
{
    #[must_use]
    pub fn new<F>(registry: R, factory: F) -> Self
    where
        F: Fn(&R) -> Result<Option<Handler<Req, Res>>, anyhow::Error> + Send + Sync + 'static,
    {
        Self {
            registry,
            factory: Box::new(factory),
            middleware: Mutex::new(None),
        }
    }

    /// Handler entry point with the host's 3-argument signature.
    ///
    /// # Errors
    /// Factory failures on first use (with the fixed message prefix), the
    /// missing-middleware error, and the middleware's own synchronous failure.
    pub fn call(&self, request: Req, response: Res, next: Next) -> Result<Flow, MiddlewareErrorKind> {
        let middleware = self.ensure_resolved()?;
        middleware.call(request, response, next).map_err(MiddlewareErrorKind::Handler)
    }

    fn ensure_resolved(&self) -> Result<Arc<AdaptedHandler<Req, Res>>, MiddlewareErrorKind> {
        let mut slot = self.middleware.lock();
        if let Some(middleware) = &*slot {
            return Ok(middleware.clone());
        }

        let handler = match (self.factory)(&self.registry) {
            Ok(Some(handler)) => handler,
            Ok(None) => {
                let err = MiddlewareErrorKind::Missing;
                warn!("{}", err);
                return Err(err);
            }
            Err(err) => {
                let err = MiddlewareErrorKind::Factory(err);
                warn!("{}", err);
                return Err(err);
            }
        };

        let middleware = Arc::new(AdaptedHandler::new(handler));
        *slot = Some(middleware.clone());
        debug!("Middleware resolved");
        Ok(middleware)
    }
}

/// Error-first counterpart of [`MiddlewareInvoker`].
///
/// Factory failures pass through without the message prefix here.
pub struct ErrorMiddlewareInvoker<R, Req, Res> {
    registry: R,
    factory: BoxedErrorFactory<R, Req, Res>,
    middleware: Mutex<Option<Arc<AdaptedErrorHandler<Req, Res>>>>,
}

impl<R, Req, Res> ErrorMiddlewareInvoker<R, Req, Res>
where
    R: Registry,
{
    #[must_use]
    pub fn new<F>(registry: R, factory: F) -> Self
    where
        F: Fn(&R) -> Result<Option<ErrorHandler<Req, Res>>, anyhow::Error> + Send + Sync + 'static,
    {
        Self {
            registry,
            factory: Box::new(factory),
            middleware: Mutex::new(None),
        }
    }

    /// Handler entry point with the host's error-first 4-argument signature.
    ///
    /// # Errors
    /// Factory failures on first use (unprefixed), the missing-middleware
    /// error, and the middleware's own synchronous failure.
    pub fn call(
        &self,
        error: anyhow::Error,
        request: Req,
        response: Res,
        next: Next,
    ) -> Result<Flow, ErrorMiddlewareErrorKind> {
        let middleware = self.ensure_resolved()?;
        middleware
            .call(error, request, response, next)
            .map_err(ErrorMiddlewareErrorKind::Handler)
    }

    fn ensure_resolved(&self) -> Result<Arc<AdaptedErrorHandler<Req, Res>>, ErrorMiddlewareErrorKind> {
        let mut slot = self.middleware.lock();
        if let Some(middleware) = &*slot {
            return Ok(middleware.clone());
        }

        let handler = match (self.factory)(&self.registry) {
            Ok(Some(handler)) => handler,
            Ok(None) => {
                let err = ErrorMiddlewareErrorKind::Missing;
                warn!("{}", err);
                return Err(err);
            }
            Err(err) => {
                let err = ErrorMiddlewareErrorKind::Factory(err);
                warn!("{}", err);
                return Err(err);
            }
        };

        let middleware = Arc::new(AdaptedErrorHandler::new(handler));
        *slot = Some(middleware.clone());
        debug!("Error middleware resolved");
        Ok(middleware)
    }
}
