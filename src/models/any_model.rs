use super::{Model, ModelRef};
use crate::error::{FixtureError, FixtureResult};
use std::any::{Any, TypeId};
use std::fmt;

/// Owned, heap-allocated, type-erased model instance.
///
/// This is the handle the builder store, the build pipeline and the fixture
/// pass around. Connectors mutate the boxed value in place, so a change is
/// visible to every later reader of the same slot.
pub struct AnyModel {
    inner: Box<dyn Model>,
}

impl AnyModel {
    pub fn new<T: Model>(model: T) -> Self {
        Self {
            inner: Box::new(model),
        }
    }

    /// `TypeId` of the concrete model, not of the box.
    pub fn type_id(&self) -> TypeId {
        self.inner.as_ref().as_any().type_id()
    }

    pub fn type_name(&self) -> &'static str {
        self.inner.as_ref().model_type_name()
    }

    pub fn is<T: Model>(&self) -> bool {
        self.inner.as_ref().as_any().is::<T>()
    }

    pub fn as_model(&self) -> &dyn Model {
        self.inner.as_ref()
    }

    pub fn downcast_ref<T: Model>(&self) -> Option<&T> {
        self.inner.as_ref().as_any().downcast_ref::<T>()
    }

    pub fn downcast_mut<T: Model>(&mut self) -> Option<&mut T> {
        self.inner.as_mut().as_any_mut().downcast_mut::<T>()
    }

    /// Typed borrow that reports a mismatch as [`FixtureError::InvalidType`].
    pub(crate) fn expect_ref<T: Model>(&self, model_ref: ModelRef) -> FixtureResult<&T> {
        let found = self.type_name();
        self.downcast_ref::<T>()
            .ok_or_else(|| FixtureError::InvalidType {
                model_ref,
                expected: std::any::type_name::<T>(),
                found,
            })
    }

    pub(crate) fn expect_mut<T: Model>(&mut self, model_ref: ModelRef) -> FixtureResult<&mut T> {
        let found = self.type_name();
        self.downcast_mut::<T>()
            .ok_or_else(|| FixtureError::InvalidType {
                model_ref,
                expected: std::any::type_name::<T>(),
                found,
            })
    }

    /// Take the model back out by value, returning `self` unchanged on a mismatch.
    pub fn downcast<T: Model>(self) -> Result<T, Self> {
        if !self.is::<T>() {
            return Err(self);
        }
        match self.inner.into_any().downcast::<T>() {
            Ok(model) => Ok(*model),
            Err(_) => unreachable!("type id checked above"),
        }
    }
}

impl fmt::Debug for AnyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.inner.as_ref(), f)
    }
}
