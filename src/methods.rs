use std::collections::BTreeMap;

use crate::{adapter::AdaptedHandler, handler::Handler};

/// Method table of a route service: the static mapping from method name to
/// handler that callers supply at registration time.
///
/// Tables are stored type-erased in the registry, so this is a concrete type
/// the route invoker can downcast back to.
pub struct MethodMap<Req, Res> {
    methods: BTreeMap<Box<str>, AdaptedHandler<Req, Res>>,
}

impl<Req, Res> MethodMap<Req, Res> {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            methods: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_method(mut self, name: impl Into<Box<str>>, handler: Handler<Req, Res>) -> Self {
        self.methods.insert(name.into(), AdaptedHandler::new(handler));
        self
    }

    #[must_use]
    pub(crate) fn get(&self, name: &str) -> Option<&AdaptedHandler<Req, Res>> {
        self.methods.get(name)
    }
}

impl<Req, Res> Default for MethodMap<Req, Res> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
