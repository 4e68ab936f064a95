use parking_lot::Mutex;
use std::{collections::BTreeMap, sync::Arc};
use tracing::{debug, debug_span, warn};

use crate::{
    errors::{InvokeErrorKind, RouteErrorKind},
    handler::{Flow, Next},
    methods::MethodMap,
    registry::Registry,
    selector::ServiceSelector,
};

/// Produces per-method handlers bound to a lazily resolved route service.
///
/// The service is fetched only once the first handler actually runs. This
/// keeps registration order between the registry and the route table
/// decoupled: routes can be wired before their services exist.
pub struct RouteInvoker<R, Req, Res> {
    shared: Arc<SharedService<R, Req, Res>>,
    invokers: Mutex<BTreeMap<Box<str>, Arc<MethodHandler<R, Req, Res>>>>,
}

struct SharedService<R, Req, Res> {
    registry: R,
    selector: ServiceSelector<Req, Res>,
    service: Mutex<Option<Arc<MethodMap<Req, Res>>>>,
}

impl<R, Req, Res> RouteInvoker<R, Req, Res>
where
    R: Registry,
    Req: 'static,
    Res: 'static,
{
    /// # Errors
    /// [`RouteErrorKind::UnknownService`] if a by-name selector targets an
    /// identifier absent from the registry. By-construction selectors are
    /// not validated until first invocation.
    pub fn new(registry: R, selector: ServiceSelector<Req, Res>) -> Result<Self, RouteErrorKind> {
        if let ServiceSelector::ByName(name) = &selector {
            if !registry.has(name) {
                return Err(RouteErrorKind::UnknownService(name.clone()));
            }
        }

        Ok(Self {
            shared: Arc::new(SharedService {
                registry,
                selector,
                service: Mutex::new(None),
            }),
            invokers: Mutex::new(BTreeMap::new()),
        })
    }

    /// Returns the handler bound to `method`, creating it on first request.
    /// Repeated calls with the same name return the same instance.
    #[must_use]
    pub fn invoker(&self, method: &str) -> Arc<MethodHandler<R, Req, Res>> {
        let mut invokers = self.invokers.lock();
        if let Some(invoker) = invokers.get(method) {
            return invoker.clone();
        }

        let invoker = Arc::new(MethodHandler {
            shared: self.shared.clone(),
            method: method.into(),
        });
        invokers.insert(method.into(), invoker.clone());
        invoker
    }
}

/// Handler bound to one method name, sharing its invoker's memoized service.
pub struct MethodHandler<R, Req, Res> {
    shared: Arc<SharedService<R, Req, Res>>,
    method: Box<str>,
}

impl<R, Req, Res> MethodHandler<R, Req, Res>
where
    R: Registry,
    Req: 'static,
    Res: 'static,
{
    /// Handler entry point with the host's 3-argument signature.
    ///
    /// # Errors
    /// Service resolution errors on first use, [`InvokeErrorKind::MethodNotFound`]
    /// whenever the method is absent from the resolved service, and the
    /// handler's own synchronous failure.
    pub fn call(&self, request: Req, response: Res, next: Next) -> Result<Flow, InvokeErrorKind> {
        let span = debug_span!("invoke", method = &*self.method);
        let _guard = span.enter();

        let service = self.shared.ensure_resolved()?;

        // Method presence is checked on every invocation; only the service
        // resolution is cached.
        let Some(handler) = service.get(&self.method) else {
            let err = InvokeErrorKind::MethodNotFound {
                service: self.shared.selector.service_name().into(),
                method: self.method.clone(),
            };
            warn!("{}", err);
            return Err(err);
        };

        handler.call(request, response, next).map_err(InvokeErrorKind::Handler)
    }
}

impl<R, Req, Res> SharedService<R, Req, Res>
where
    R: Registry,
    Req: 'static,
    Res: 'static,
{
    /// Resolves the service on first use. The slot lock is held across
    /// resolution, so concurrent first invocations serialize; a failed
    /// resolution leaves the slot empty and the next invocation retries.
    fn ensure_resolved(&self) -> Result<Arc<MethodMap<Req, Res>>, InvokeErrorKind> {
        let mut slot = self.service.lock();
        if let Some(service) = &*slot {
            return Ok(service.clone());
        }

        let service = self.resolve_service()?;
        *slot = Some(service.clone());
        debug!(service = self.selector.service_name(), "Route service resolved");
        Ok(service)
    }

    fn resolve_service(&self) -> Result<Arc<MethodMap<Req, Res>>, InvokeErrorKind> {
        match &self.selector {
            ServiceSelector::ByName(name) => {
                let Some(value) = self.registry.resolve(name) else {
                    let err = InvokeErrorKind::ServiceResolution(name.clone());
                    warn!("{}", err);
                    return Err(err);
                };

                match value.downcast::<MethodMap<Req, Res>>() {
                    Ok(service) => Ok(service),
                    Err(_) => {
                        let err = InvokeErrorKind::NotARouteService(name.clone());
                        warn!("{}", err);
                        Err(err)
                    }
                }
            }
            ServiceSelector::ByConstruction {
                constructor,
                dependencies,
            } => {
                let ids = dependencies.iter().map(AsRef::as_ref).collect::<Vec<_>>();
                let resolved = self
                    .registry
                    .resolve_all(&ids, true)
                    .map_err(InvokeErrorKind::Dependencies)?;
                // Strict resolution leaves no gaps.
                let dependencies = resolved.into_iter().flatten().collect();

                let service = constructor(dependencies).map_err(InvokeErrorKind::Construct)?;
                Ok(Arc::new(service))
            }
        }
    }
}
