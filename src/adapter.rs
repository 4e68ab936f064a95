use crate::handler::{ErrorHandler, Flow, Handler, Next};

/// Uniform-signature adaptation over a 3-argument handler.
///
/// A synchronous handler's failure is returned to the caller's synchronous
/// path; an asynchronous handler gets the continuation attached as its
/// rejection handler, so its failure is delivered instead of being dropped.
pub(crate) struct AdaptedHandler<Req, Res> {
    inner: Handler<Req, Res>,
}

impl<Req, Res> AdaptedHandler<Req, Res> {
    #[inline]
    #[must_use]
    pub(crate) fn new(inner: Handler<Req, Res>) -> Self {
        Self { inner }
    }

    pub(crate) fn call(&self, request: Req, response: Res, next: Next) -> Result<Flow, anyhow::Error> {
        match &self.inner {
            Handler::Sync(handler) => handler(request, response, next).map(|()| Flow::Done),
            Handler::Async(handler) => {
                let future = handler(request, response, next.clone());
                Ok(Flow::Suspended(Box::pin(async move {
                    if let Err(err) = future.await {
                        next(Some(err));
                    }
                })))
            }
        }
    }
}

/// Uniform-signature adaptation over the error-first 4-argument signature.
pub(crate) struct AdaptedErrorHandler<Req, Res> {
    inner: ErrorHandler<Req, Res>,
}

impl<Req, Res> AdaptedErrorHandler<Req, Res> {
    #[inline]
    #[must_use]
    pub(crate) fn new(inner: ErrorHandler<Req, Res>) -> Self {
        Self { inner }
    }

    pub(crate) fn call(
        &self,
        error: anyhow::Error,
        request: Req,
        response: Res,
        next: Next,
    ) -> Result<Flow, anyhow::Error> {
        match &self.inner {
            ErrorHandler::Sync(handler) => handler(error, request, response, next).map(|()| Flow::Done),
            ErrorHandler::Async(handler) => {
                let future = handler(error, request, response, next.clone());
                Ok(Flow::Suspended(Box::pin(async move {
                    if let Err(err) = future.await {
                        next(Some(err));
                    }
                })))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;
    use std::sync::Arc;

    use super::{AdaptedErrorHandler, AdaptedHandler};
    use crate::handler::{ErrorHandler, Handler, Next};

    struct Request;
    struct Response;

    fn recording_next() -> (Next, Arc<Mutex<Vec<Option<String>>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let next: Next = Arc::new({
            let seen = seen.clone();
            move |err: Option<anyhow::Error>| seen.lock().push(err.map(|err| err.to_string()))
        });
        (next, seen)
    }

    #[test]
    fn test_sync_completion() {
        let adapted = AdaptedHandler::new(Handler::sync_fn(|_: Request, _: Response, next: Next| {
            next(None);
            Ok(())
        }));
        let (next, seen) = recording_next();

        let flow = adapted.call(Request, Response, next).unwrap();

        assert!(flow.is_done());
        assert_eq!(*seen.lock(), [None]);
    }

    #[test]
    fn test_sync_error_propagates_synchronously() {
        let adapted = AdaptedHandler::new(Handler::sync_fn(|_: Request, _: Response, _: Next| {
            Err(anyhow::anyhow!("boom"))
        }));
        let (next, seen) = recording_next();

        let err = adapted.call(Request, Response, next).unwrap_err();

        assert_eq!(err.to_string(), "boom");
        assert!(seen.lock().is_empty());
    }

    #[tokio::test]
    async fn test_async_rejection_goes_to_continuation() {
        let adapted = AdaptedHandler::new(Handler::async_fn(|_: Request, _: Response, _: Next| async {
            Err(anyhow::anyhow!("late boom"))
        }));
        let (next, seen) = recording_next();

        let flow = adapted.call(Request, Response, next).unwrap();
        assert!(!flow.is_done());
        flow.finish().await;

        assert_eq!(*seen.lock(), [Some("late boom".to_string())]);
    }

    #[tokio::test]
    async fn test_async_completion_leaves_continuation_alone() {
        let adapted = AdaptedHandler::new(Handler::async_fn(|_: Request, _: Response, _: Next| async {
            Ok(())
        }));
        let (next, seen) = recording_next();

        let flow = adapted.call(Request, Response, next).unwrap();
        flow.finish().await;

        assert!(seen.lock().is_empty());
    }

    #[test]
    fn test_error_handler_sync_error_propagates_synchronously() {
        let adapted = AdaptedErrorHandler::new(ErrorHandler::sync_fn(
            |error: anyhow::Error, _: Request, _: Response, _: Next| Err(error.context("rethrown")),
        ));
        let (next, seen) = recording_next();

        let err = adapted
            .call(anyhow::anyhow!("upstream"), Request, Response, next)
            .unwrap_err();

        assert_eq!(err.to_string(), "rethrown");
        assert!(seen.lock().is_empty());
    }

    #[tokio::test]
    async fn test_error_handler_async_rejection_goes_to_continuation() {
        let adapted = AdaptedErrorHandler::new(ErrorHandler::async_fn(
            |error: anyhow::Error, _: Request, _: Response, _: Next| async move { Err(error) },
        ));
        let (next, seen) = recording_next();

        let flow = adapted
            .call(anyhow::anyhow!("upstream"), Request, Response, next)
            .unwrap();
        flow.finish().await;

        assert_eq!(*seen.lock(), [Some("upstream".to_string())]);
    }
}
