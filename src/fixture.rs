//! # Fixture
//!
//! Read-only result of a build: one finalized model per ref, exposed to the
//! test for assertions. There is no mutation API; typed retrieval only ever
//! hands out shared borrows.

use crate::constants::operations;
use crate::error::{FixtureError, FixtureResult};
use crate::logging::log_model_operation;
use crate::models::{AnyModel, Model, ModelRef, TypedModelRef};
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct Fixture {
    models: HashMap<ModelRef, AnyModel>,
    build_order: Vec<ModelRef>,
}

impl Fixture {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            models: HashMap::with_capacity(capacity),
            build_order: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn insert(&mut self, model_ref: ModelRef, model: AnyModel) {
        log_model_operation(
            operations::MODEL_WRITTEN,
            model_ref,
            model.type_name(),
            "stored",
            None,
        );
        if self.models.insert(model_ref, model).is_none() {
            self.build_order.push(model_ref);
        }
    }

    pub(crate) fn get_any(&self, model_ref: ModelRef) -> Option<&AnyModel> {
        self.models.get(&model_ref)
    }

    /// Finalized model for `model_ref`, or `None` if it was never built
    pub fn get_model(&self, model_ref: impl Into<ModelRef>) -> Option<&dyn Model> {
        self.models.get(&model_ref.into()).map(AnyModel::as_model)
    }

    /// Typed retrieval under the ref's own type tag
    pub fn get<T: Model>(&self, model_ref: TypedModelRef<T>) -> FixtureResult<&T> {
        self.get_as::<T>(model_ref)
    }

    /// Typed retrieval under an explicit type, for models a writer converted
    pub fn get_as<T: Model>(&self, model_ref: impl Into<ModelRef>) -> FixtureResult<&T> {
        let model_ref = model_ref.into();
        self.models
            .get(&model_ref)
            .ok_or(FixtureError::ModelRefNotFound { model_ref })?
            .expect_ref::<T>(model_ref)
    }

    /// Every finalized model of type `T`, in build order
    pub fn models<T: Model>(&self) -> Vec<&T> {
        self.build_order
            .iter()
            .filter_map(|model_ref| self.models.get(model_ref))
            .filter_map(AnyModel::downcast_ref::<T>)
            .collect()
    }

    pub fn contains(&self, model_ref: impl Into<ModelRef>) -> bool {
        self.models.contains_key(&model_ref.into())
    }

    /// Refs in the order the pipeline finalized them
    pub fn build_order(&self) -> &[ModelRef] {
        &self.build_order
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
