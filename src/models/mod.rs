//! # Model Layer
//!
//! Identities, the type-erased model handle and relation edges shared by the
//! builder, the resolver and the fixture.

pub mod any_model;
pub mod model_ref;
pub mod relation;
pub mod typed_model_ref;

// Re-export for easy access
pub use any_model::AnyModel;
pub use model_ref::ModelRef;
pub use relation::{Connector, ModelRelation};
pub use typed_model_ref::TypedModelRef;

use std::any::Any;
use std::fmt;

/// Upcast helpers implemented for every `'static` type.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

/// Marker for record types that may live in a fixture.
///
/// Only types implementing `Model` can be registered, added or retrieved, so
/// non-record shapes are rejected when the calling code is compiled. Use
/// [`impl_model!`](crate::impl_model) for the common case.
pub trait Model: AsAny + fmt::Debug {
    fn model_type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
