use std::{any::Any, collections::BTreeMap, sync::Arc};

use crate::errors::RegistryErrorKind;

/// A type-erased value held by the registry.
pub type Value = Arc<dyn Any + Send + Sync>;

/// Capability surface of the DI container this crate binds against.
///
/// The registry is owned by the caller and treated as read-only here.
pub trait Registry: Send + Sync {
    /// Membership test for an identifier.
    fn has(&self, id: &str) -> bool;

    /// Resolves a single identifier, `None` when it is unknown or wired to
    /// nothing.
    fn resolve(&self, id: &str) -> Option<Value>;

    /// Batch-resolves identifiers in order. In strict mode an unknown
    /// identifier fails the whole batch; otherwise it yields a `None` gap.
    fn resolve_all(&self, ids: &[&str], strict: bool) -> Result<Vec<Option<Value>>, RegistryErrorKind>;
}

impl<R: Registry + ?Sized> Registry for Arc<R> {
    #[inline]
    fn has(&self, id: &str) -> bool {
        (**self).has(id)
    }

    #[inline]
    fn resolve(&self, id: &str) -> Option<Value> {
        (**self).resolve(id)
    }

    #[inline]
    fn resolve_all(&self, ids: &[&str], strict: bool) -> Result<Vec<Option<Value>>, RegistryErrorKind> {
        (**self).resolve_all(ids, strict)
    }
}

/// Minimal map-backed registry, enough for tests and for hosts wiring
/// services by hand without a full container.
#[derive(Default, Clone)]
pub struct MapRegistry {
    values: BTreeMap<Box<str>, Value>,
}

impl MapRegistry {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn provide<T: Send + Sync + 'static>(mut self, id: impl Into<Box<str>>, value: T) -> Self {
        self.values.insert(id.into(), Arc::new(value));
        self
    }
}

impl Registry for MapRegistry {
    fn has(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    fn resolve(&self, id: &str) -> Option<Value> {
        self.values.get(id).cloned()
    }

    fn resolve_all(&self, ids: &[&str], strict: bool) -> Result<Vec<Option<Value>>, RegistryErrorKind> {
        let mut values = Vec::with_capacity(ids.len());
        for &id in ids {
            match self.values.get(id) {
                Some(value) => values.push(Some(value.clone())),
                None if strict => return Err(RegistryErrorKind::NotFound { id: id.into() }),
                None => values.push(None),
            }
        }
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::{MapRegistry, Registry as _};
    use crate::errors::RegistryErrorKind;

    #[test]
    fn test_membership_and_resolution() {
        let registry = MapRegistry::new().provide("num", 1_i32);

        assert!(registry.has("num"));
        assert!(!registry.has("missing"));

        let value = registry.resolve("num").unwrap();
        assert_eq!(*value.downcast::<i32>().unwrap(), 1);
        assert!(registry.resolve("missing").is_none());
    }

    #[test]
    fn test_resolve_all_strict_fails_on_unknown_identifier() {
        let registry = MapRegistry::new().provide("num", 1_i32);

        let err = registry.resolve_all(&["num", "missing"], true).unwrap_err();

        assert!(matches!(err, RegistryErrorKind::NotFound { id } if &*id == "missing"));
    }

    #[test]
    fn test_resolve_all_lenient_yields_gaps() {
        let registry = MapRegistry::new().provide("a", 1_i32).provide("c", 3_i32);

        let values = registry.resolve_all(&["a", "b", "c"], false).unwrap();

        assert_eq!(values.len(), 3);
        assert!(values[0].is_some());
        assert!(values[1].is_none());
        assert!(values[2].is_some());
    }
}
