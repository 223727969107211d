//! # Build Pipeline
//!
//! Walks the resolved order and finalizes one model at a time:
//!
//! 1. take the in-progress model out of the store
//! 2. run every connector whose target is this model, against the
//!    **finalized** foreign model already in the fixture
//! 3. run the writer registered for the model's runtime type, or pass the
//!    model through when the configuration allows it
//! 4. store the writer's output in the fixture under the original ref
//!
//! Foreign models are always read from the fixture, never from the store, so
//! a dependent sees the writer's output even when the writer changed the
//! model's type. The first failure aborts the build.

use crate::config::BuilderConfig;
use crate::constants::operations;
use crate::error::{FixtureError, FixtureResult};
use crate::fixture::Fixture;
use crate::logging::log_model_operation;
use crate::models::{AnyModel, ModelRef, ModelRelation};
use crate::registry::TypeRegistry;
use std::collections::HashMap;

pub struct BuildPipeline<'a> {
    registry: &'a mut TypeRegistry,
    config: &'a BuilderConfig,
}

impl<'a> BuildPipeline<'a> {
    pub fn new(registry: &'a mut TypeRegistry, config: &'a BuilderConfig) -> Self {
        Self { registry, config }
    }

    pub fn run(
        mut self,
        order: Vec<ModelRef>,
        mut models: HashMap<ModelRef, AnyModel>,
        relations: Vec<ModelRelation>,
    ) -> FixtureResult<Fixture> {
        let mut relations_by_target = group_by_target(relations);
        let mut fixture = Fixture::with_capacity(order.len());

        for model_ref in order {
            let mut model = models
                .remove(&model_ref)
                .ok_or(FixtureError::ModelRefNotFound { model_ref })?;

            for relation in relations_by_target.remove(&model_ref).unwrap_or_default() {
                let foreign_ref = relation.foreign_ref;
                // Only reachable through a cycle or a resolver defect
                let foreign = fixture
                    .get_any(foreign_ref)
                    .ok_or(FixtureError::ModelRefNotFound {
                        model_ref: foreign_ref,
                    })?;

                relation.connect(&mut model, foreign)?;
                log_model_operation(
                    operations::MODEL_CONNECTED,
                    model_ref,
                    model.type_name(),
                    "connected",
                    Some(&foreign_ref.to_string()),
                );
            }

            let finalized = self.finalize(model_ref, model)?;
            fixture.insert(model_ref, finalized);
        }

        Ok(fixture)
    }

    fn finalize(&mut self, model_ref: ModelRef, model: AnyModel) -> FixtureResult<AnyModel> {
        match self.registry.write(model_ref, model) {
            Ok(written) => written,
            Err(model) if self.config.allow_missing_writer => {
                log_model_operation(
                    operations::MODEL_PASSED_THROUGH,
                    model_ref,
                    model.type_name(),
                    "no_writer",
                    None,
                );
                Ok(model)
            }
            Err(model) => Err(FixtureError::WriterNotFound {
                model_ref,
                type_name: model.type_name(),
            }),
        }
    }
}

/// Group relations by target, keeping declaration order within each group
fn group_by_target(relations: Vec<ModelRelation>) -> HashMap<ModelRef, Vec<ModelRelation>> {
    let mut grouped: HashMap<ModelRef, Vec<ModelRelation>> = HashMap::new();
    for relation in relations {
        grouped.entry(relation.target_ref).or_default().push(relation);
    }
    grouped
}
