use crate::{methods::MethodMap, registry::Value};

/// Constructs a route service from its positionally resolved dependencies.
pub type Constructor<Req, Res> =
    Box<dyn Fn(Vec<Value>) -> Result<MethodMap<Req, Res>, anyhow::Error> + Send + Sync>;

/// How the route service is obtained from the registry.
pub enum ServiceSelector<Req, Res> {
    /// Fetch an already registered service by identifier.
    ByName(Box<str>),
    /// Instantiate the service, resolving the listed dependency identifiers
    /// positionally from the registry in strict mode.
    ByConstruction {
        constructor: Constructor<Req, Res>,
        dependencies: Vec<Box<str>>,
    },
}

impl<Req, Res> ServiceSelector<Req, Res> {
    #[inline]
    #[must_use]
    pub fn by_name(name: impl Into<Box<str>>) -> Self {
        Self::ByName(name.into())
    }

    #[must_use]
    pub fn by_construction<F, I>(constructor: F, dependencies: I) -> Self
    where
        F: Fn(Vec<Value>) -> Result<MethodMap<Req, Res>, anyhow::Error> + Send + Sync + 'static,
        I: IntoIterator,
        I::Item: Into<Box<str>>,
    {
        Self::ByConstruction {
            constructor: Box::new(constructor),
            dependencies: dependencies.into_iter().map(Into::into).collect(),
        }
    }

    /// Service name used in diagnostics.
    #[must_use]
    pub(crate) fn service_name(&self) -> &str {
        match self {
            Self::ByName(name) => name,
            Self::ByConstruction { .. } => "<constructed>",
        }
    }
}
