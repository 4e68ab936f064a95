use futures_core::future::BoxFuture;
use std::{future::Future, sync::Arc};

/// Continuation used to hand control back to the host dispatcher.
///
/// Called with `None` to pass control on, or with `Some(err)` to divert into
/// the host's error-handling path.
pub type Next = Arc<dyn Fn(Option<anyhow::Error>) + Send + Sync>;

pub type HandlerResult = Result<(), anyhow::Error>;

type SyncFn<Req, Res> = Box<dyn Fn(Req, Res, Next) -> HandlerResult + Send + Sync>;
type AsyncFn<Req, Res> = Box<dyn Fn(Req, Res, Next) -> BoxFuture<'static, HandlerResult> + Send + Sync>;

/// A handler with the host's 3-argument signature.
///
/// The sync/async split is chosen at registration time, so the invoker never
/// has to probe a returned value for awaitability.
pub enum Handler<Req, Res> {
    Sync(SyncFn<Req, Res>),
    Async(AsyncFn<Req, Res>),
}

impl<Req, Res> Handler<Req, Res> {
    #[must_use]
    pub fn sync_fn<F>(f: F) -> Self
    where
        F: Fn(Req, Res, Next) -> HandlerResult + Send + Sync + 'static,
    {
        Self::Sync(Box::new(f))
    }

    #[must_use]
    pub fn async_fn<F, Fut>(f: F) -> Self
    where
        F: Fn(Req, Res, Next) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        Self::Async(Box::new(move |request, response, next| Box::pin(f(request, response, next))))
    }
}

type SyncErrorFn<Req, Res> = Box<dyn Fn(anyhow::Error, Req, Res, Next) -> HandlerResult + Send + Sync>;
type AsyncErrorFn<Req, Res> = Box<dyn Fn(anyhow::Error, Req, Res, Next) -> BoxFuture<'static, HandlerResult> + Send + Sync>;

/// A handler with the host's error-first 4-argument signature.
pub enum ErrorHandler<Req, Res> {
    Sync(SyncErrorFn<Req, Res>),
    Async(AsyncErrorFn<Req, Res>),
}

impl<Req, Res> ErrorHandler<Req, Res> {
    #[must_use]
    pub fn sync_fn<F>(f: F) -> Self
    where
        F: Fn(anyhow::Error, Req, Res, Next) -> HandlerResult + Send + Sync + 'static,
    {
        Self::Sync(Box::new(f))
    }

    #[must_use]
    pub fn async_fn<F, Fut>(f: F) -> Self
    where
        F: Fn(anyhow::Error, Req, Res, Next) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        Self::Async(Box::new(move |error, request, response, next| {
            Box::pin(f(error, request, response, next))
        }))
    }
}

/// What an invoked handler hands back to the host dispatcher.
pub enum Flow {
    /// The handler ran to completion synchronously.
    Done,
    /// The handler suspended; the host must drive this future to completion.
    /// Its failure has already been routed into the continuation, so the
    /// future itself resolves to `()`.
    Suspended(BoxFuture<'static, ()>),
}

impl std::fmt::Debug for Flow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Done => f.write_str("Done"),
            Self::Suspended(_) => f.write_str("Suspended(..)"),
        }
    }
}

impl Flow {
    #[inline]
    #[must_use]
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Drives a suspended handler to completion. No-op when already done.
    pub async fn finish(self) {
        if let Self::Suspended(future) = self {
            future.await;
        }
    }
}
