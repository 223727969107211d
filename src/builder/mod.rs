//! # Fixture Builder
//!
//! Collects registrations and declarations, then builds a [`Fixture`] in one
//! call.
//!
//! ## Lifecycle
//!
//! ```text
//! register_constructor / register_writer   -> TypeRegistry
//! add_model* / add_relation*               -> model store + relation set
//! build()                                  -> DependencyResolver -> BuildPipeline -> Fixture
//! ```
//!
//! The builder exclusively owns every in-progress model until `build`, which
//! consumes it. Connectors and writers run only during `build`.
//!
//! ## Usage
//!
//! ```rust
//! use codefixture::{impl_model, FixtureBuilder};
//!
//! #[derive(Debug, Default)]
//! struct Group {
//!     id: i64,
//! }
//!
//! #[derive(Debug, Default)]
//! struct Person {
//!     group_id: i64,
//! }
//!
//! impl_model!(Group, Person);
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = FixtureBuilder::new();
//! builder.register_writer(|group: Group| Ok(group));
//! builder.register_writer(|person: Person| Ok(person));
//!
//! let group = builder.add_model_with(|g: &mut Group| g.id = 2)?;
//! let person = builder.add_model::<Person>()?;
//! builder.add_relation(person, group, |person, group| person.group_id = group.id)?;
//!
//! let fixture = builder.build()?;
//! assert_eq!(fixture.get(person)?.group_id, 2);
//! # Ok(())
//! # }
//! ```

pub mod pipeline;
pub mod resolver;

pub use pipeline::BuildPipeline;
pub use resolver::{DependencyResolver, ResolvedOrder};

use crate::config::BuilderConfig;
use crate::constants::operations;
use crate::error::{FixtureError, FixtureResult};
use crate::fixture::Fixture;
use crate::log_builder;
use crate::models::{AnyModel, Connector, Model, ModelRef, ModelRelation, TypedModelRef};
use crate::registry::TypeRegistry;
use std::any::type_name;
use std::collections::HashMap;
use std::fmt;
use tracing::{info, warn};

#[derive(Default)]
pub struct FixtureBuilder {
    config: BuilderConfig,
    registry: TypeRegistry,
    models: HashMap<ModelRef, AnyModel>,
    insertion_order: Vec<ModelRef>,
    relations: Vec<ModelRelation>,
}

impl FixtureBuilder {
    /// Builder with the default (strict) configuration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BuilderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Register the factory used for new `T` models, replacing any prior one
    pub fn register_constructor<T, F>(&mut self, constructor: F)
    where
        T: Model,
        F: Fn() -> T + 'static,
    {
        self.registry.register_constructor(constructor);
    }

    /// Register the writer that finalizes `T` models, replacing any prior one
    pub fn register_writer<T, U, W>(&mut self, writer: W)
    where
        T: Model,
        U: Model,
        W: FnMut(T) -> anyhow::Result<U> + 'static,
    {
        self.registry.register_writer(writer);
    }

    /// Add a `T` built by its constructor, or `T::default()` without one
    pub fn add_model<T: Model + Default>(&mut self) -> FixtureResult<TypedModelRef<T>> {
        self.add_model_with(|_: &mut T| {})
    }

    /// Add a `T` built by its constructor (or `T::default()`), then adjusted
    /// by `setter`
    pub fn add_model_with<T, F>(&mut self, setter: F) -> FixtureResult<TypedModelRef<T>>
    where
        T: Model + Default,
        F: FnOnce(&mut T),
    {
        let model_ref = ModelRef::new();
        let mut model = match self.registry.construct::<T>(model_ref) {
            Some(constructed) => constructed?,
            None => T::default(),
        };
        setter(&mut model);
        Ok(self.insert_model(model_ref, model))
    }

    /// Add a `T` that has no `Default`; its constructor must be registered
    pub fn add_registered_model_with<T, F>(
        &mut self,
        setter: F,
    ) -> FixtureResult<TypedModelRef<T>>
    where
        T: Model,
        F: FnOnce(&mut T),
    {
        let model_ref = ModelRef::new();
        let mut model =
            self.registry
                .construct::<T>(model_ref)
                .ok_or(FixtureError::ConstructorNotFound {
                    type_name: type_name::<T>(),
                })??;
        setter(&mut model);
        Ok(self.insert_model(model_ref, model))
    }

    /// Add a ready-made instance as-is
    pub fn add_model_value<T: Model>(&mut self, model: T) -> TypedModelRef<T> {
        self.insert_model(ModelRef::new(), model)
    }

    fn insert_model<T: Model>(&mut self, model_ref: ModelRef, model: T) -> TypedModelRef<T> {
        log_builder!(debug, operations::MODEL_ADDED,
            model_ref: model_ref,
            model_type: type_name::<T>()
        );
        self.models.insert(model_ref, AnyModel::new(model));
        self.insertion_order.push(model_ref);
        TypedModelRef::from_ref(model_ref)
    }

    /// Declare that `target` depends on the finalized `foreign` model
    ///
    /// `connector` runs during the build with the in-progress target and the
    /// finalized foreign model.
    pub fn add_relation<T, U, F>(
        &mut self,
        target: TypedModelRef<T>,
        foreign: TypedModelRef<U>,
        connector: F,
    ) -> FixtureResult<()>
    where
        T: Model,
        U: Model,
        F: FnOnce(&mut T, &U) + 'static,
    {
        self.add_relation_untyped(target.model_ref(), foreign.model_ref(), connector)
    }

    /// Like [`add_relation`](Self::add_relation) for untyped refs
    ///
    /// The connector's types are only checked when it runs; a mismatch fails
    /// the build with [`FixtureError::InvalidType`].
    pub fn add_relation_untyped<T, U, F>(
        &mut self,
        target: ModelRef,
        foreign: ModelRef,
        connector: F,
    ) -> FixtureResult<()>
    where
        T: Model,
        U: Model,
        F: FnOnce(&mut T, &U) + 'static,
    {
        let connector: Connector = Box::new(
            move |target_model: &mut AnyModel, foreign_model: &AnyModel| -> FixtureResult<()> {
                let foreign_value = foreign_model.expect_ref::<U>(foreign)?;
                let target_value = target_model.expect_mut::<T>(target)?;
                connector(target_value, foreign_value);
                Ok(())
            },
        );
        self.push_relation(ModelRelation::new(target, foreign, connector))
    }

    /// Declare an ordering-only dependency with no connector
    pub fn add_dependency(
        &mut self,
        target: impl Into<ModelRef>,
        foreign: impl Into<ModelRef>,
    ) -> FixtureResult<()> {
        self.push_relation(ModelRelation::ordering_only(target.into(), foreign.into()))
    }

    fn push_relation(&mut self, relation: ModelRelation) -> FixtureResult<()> {
        self.ensure_stored(relation.target_ref)?;
        self.ensure_stored(relation.foreign_ref)?;

        log_builder!(debug, operations::RELATION_ADDED,
            target_ref: relation.target_ref,
            foreign_ref: relation.foreign_ref
        );
        self.relations.push(relation);
        Ok(())
    }

    fn ensure_stored(&self, model_ref: ModelRef) -> FixtureResult<()> {
        if self.models.contains_key(&model_ref) {
            Ok(())
        } else {
            Err(FixtureError::ModelRefNotFound { model_ref })
        }
    }

    /// In-progress model, before any connector or writer has run
    pub fn get_model<T: Model>(&self, model_ref: TypedModelRef<T>) -> FixtureResult<&T> {
        let model_ref = model_ref.model_ref();
        self.models
            .get(&model_ref)
            .ok_or(FixtureError::ModelRefNotFound { model_ref })?
            .expect_ref::<T>(model_ref)
    }

    pub fn get_model_mut<T: Model>(&mut self, model_ref: TypedModelRef<T>) -> FixtureResult<&mut T> {
        let model_ref = model_ref.model_ref();
        self.models
            .get_mut(&model_ref)
            .ok_or(FixtureError::ModelRefNotFound { model_ref })?
            .expect_mut::<T>(model_ref)
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }

    fn resolver(&self) -> DependencyResolver {
        DependencyResolver::new(self.insertion_order.iter().copied()).with_edges(
            self.relations
                .iter()
                .map(|relation| (relation.target_ref, relation.foreign_ref)),
        )
    }

    /// Compute the build order without building
    pub fn resolve_order(&self) -> FixtureResult<ResolvedOrder> {
        self.resolver().resolve(self.config.max_resolution_passes)
    }

    /// Resolve the order, then finalize every model into a [`Fixture`]
    ///
    /// All or nothing: the first failure is returned and no fixture is
    /// produced.
    pub fn build(self) -> FixtureResult<Fixture> {
        let model_count = self.models.len();
        let relation_count = self.relations.len();

        let resolved = match self.resolve_order() {
            Ok(resolved) => resolved,
            Err(error) => {
                warn!(error = %error, "Dependency resolution failed");
                return Err(error);
            }
        };
        log_builder!(debug, operations::ORDER_RESOLVED,
            models: model_count,
            passes: resolved.passes
        );

        let Self {
            config,
            mut registry,
            models,
            relations,
            ..
        } = self;

        match BuildPipeline::new(&mut registry, &config).run(resolved.order, models, relations) {
            Ok(fixture) => {
                info!(
                    operation = operations::BUILD_COMPLETED,
                    models = model_count,
                    relations = relation_count,
                    "Fixture built"
                );
                Ok(fixture)
            }
            Err(error) => {
                warn!(operation = operations::BUILD_FAILED, error = %error, "Fixture build failed");
                Err(error)
            }
        }
    }
}

impl fmt::Debug for FixtureBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixtureBuilder")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .field("models", &self.models.len())
            .field("relations", &self.relations.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Person {
        name: String,
        group_id: i64,
    }

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Group {
        id: i64,
    }

    /// No `Default`; only reachable through a registered constructor
    #[derive(Debug, Clone, PartialEq)]
    struct Account {
        owner: String,
    }

    crate::impl_model!(Person, Group, Account);

    #[test]
    fn test_constructor_sets_default_value() {
        let mut builder = FixtureBuilder::new();
        builder.register_constructor(|| Person {
            name: "default".to_string(),
            ..Person::default()
        });

        let mut seen = String::new();
        builder
            .add_model_with(|p: &mut Person| seen = p.name.clone())
            .unwrap();
        assert_eq!(seen, "default");
    }

    #[test]
    fn test_no_setter_has_constructor() {
        let mut builder = FixtureBuilder::new();
        builder.register_constructor(|| Person {
            name: "default".to_string(),
            ..Person::default()
        });

        let person = builder.add_model::<Person>().unwrap();
        assert_eq!(builder.get_model(person).unwrap().name, "default");
    }

    #[test]
    fn test_no_setter_no_constructor() {
        let mut builder = FixtureBuilder::new();
        let person = builder.add_model::<Person>().unwrap();
        assert_eq!(builder.get_model(person).unwrap(), &Person::default());
    }

    #[test]
    fn test_setter_overrides_constructor() {
        let mut builder = FixtureBuilder::new();
        builder.register_constructor(|| Person {
            name: "default".to_string(),
            ..Person::default()
        });

        let person = builder
            .add_model_with(|p: &mut Person| p.name = "override".to_string())
            .unwrap();
        assert_eq!(builder.get_model(person).unwrap().name, "override");
    }

    #[test]
    fn test_registered_model_requires_constructor() {
        let mut builder = FixtureBuilder::new();
        let result = builder.add_registered_model_with(|_: &mut Account| {});
        assert!(matches!(
            result,
            Err(FixtureError::ConstructorNotFound { type_name }) if type_name.ends_with("Account")
        ));

        builder.register_constructor(|| Account {
            owner: "root".to_string(),
        });
        let account = builder
            .add_registered_model_with(|a: &mut Account| a.owner.push_str("@example"))
            .unwrap();
        assert_eq!(builder.get_model(account).unwrap().owner, "root@example");
    }

    #[test]
    fn test_add_model_value_is_stored_as_is() {
        let mut builder = FixtureBuilder::new();
        let group = builder.add_model_value(Group { id: 42 });
        assert_eq!(builder.get_model(group).unwrap().id, 42);
        assert_eq!(builder.model_count(), 1);
    }

    #[test]
    fn test_add_relation_rejects_unknown_refs() {
        let mut builder = FixtureBuilder::new();
        let person = builder.add_model::<Person>().unwrap();
        let stranger: TypedModelRef<Group> = TypedModelRef::new();

        let error = builder
            .add_relation(person, stranger, |_, _| {})
            .unwrap_err();
        assert!(matches!(
            error,
            FixtureError::ModelRefNotFound { model_ref } if model_ref == stranger.model_ref()
        ));

        let error = builder
            .add_relation(stranger.retyped::<Person>(), person.retyped::<Group>(), |_, _| {})
            .unwrap_err();
        assert!(matches!(
            error,
            FixtureError::ModelRefNotFound { model_ref } if model_ref == stranger.model_ref()
        ));
        assert_eq!(builder.relation_count(), 0);
    }

    #[test]
    fn test_get_model_with_wrong_type() {
        let mut builder = FixtureBuilder::new();
        let group = builder.add_model::<Group>().unwrap();

        let error = builder.get_model(group.retyped::<Person>()).unwrap_err();
        assert!(error.is_programmer_error());
    }

    #[test]
    fn test_get_model_mut_before_build() {
        let mut builder = FixtureBuilder::new();
        builder.register_writer(|group: Group| Ok(group));
        let group = builder.add_model::<Group>().unwrap();

        builder.get_model_mut(group).unwrap().id = 5;

        let fixture = builder.build().unwrap();
        assert_eq!(fixture.get(group).unwrap().id, 5);
    }

    #[test]
    fn test_resolve_order_without_building() {
        let mut builder = FixtureBuilder::new();
        let person = builder.add_model::<Person>().unwrap();
        let group = builder.add_model::<Group>().unwrap();
        builder.add_dependency(person, group).unwrap();

        let resolved = builder.resolve_order().unwrap();
        assert_eq!(
            resolved.order,
            vec![group.model_ref(), person.model_ref()]
        );
    }

    #[test]
    fn test_build_sets_relation() {
        let mut builder = FixtureBuilder::new();
        builder.register_writer(|group: Group| Ok(group));
        builder.register_writer(|person: Person| Ok(person));

        let group = builder.add_model_with(|g: &mut Group| g.id = 2).unwrap();
        let person = builder.add_model::<Person>().unwrap();
        builder
            .add_relation(person, group, |person, group| person.group_id = group.id)
            .unwrap();

        let fixture = builder.build().unwrap();
        assert_eq!(fixture.get(person).unwrap().group_id, 2);
    }

    #[test]
    fn test_untyped_connector_type_mismatch_fails_build() {
        let mut builder = FixtureBuilder::new();
        builder.register_writer(|group: Group| Ok(group));
        builder.register_writer(|person: Person| Ok(person));

        let group = builder.add_model::<Group>().unwrap();
        let person = builder.add_model::<Person>().unwrap();
        // Connector claims the foreign side is a Person
        builder
            .add_relation_untyped(
                person.model_ref(),
                group.model_ref(),
                |_: &mut Person, _: &Person| {},
            )
            .unwrap();

        let error = builder.build().unwrap_err();
        assert!(matches!(
            error,
            FixtureError::InvalidType { model_ref, .. } if model_ref == group.model_ref()
        ));
    }

    #[test]
    fn test_cyclic_relations_fail_build() {
        let mut builder = FixtureBuilder::new();
        let a = builder.add_model::<Group>().unwrap();
        let b = builder.add_model::<Group>().unwrap();
        builder.add_dependency(a, b).unwrap();
        builder.add_dependency(b, a).unwrap();

        assert!(matches!(
            builder.build(),
            Err(FixtureError::CyclicDependency { .. })
        ));
    }

    #[test]
    fn test_debug_summarizes_state() {
        let mut builder = FixtureBuilder::new();
        builder.add_model::<Group>().unwrap();
        let debug = format!("{builder:?}");
        assert!(debug.contains("models: 1"));
    }
}
