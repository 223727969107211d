//! # Type Registry
//!
//! Per-type constructors and writers, keyed by `TypeId`.
//!
//! Registration is generic: the closure's concrete types are captured at the
//! call site and erased behind the uniform [`ConstructorFn`] / [`WriterFn`]
//! signatures, so the build pipeline can dispatch on the runtime type of a
//! stored [`AnyModel`] without knowing any model type statically.

use crate::error::{FixtureError, FixtureResult};
use crate::models::{AnyModel, Model, ModelRef};
use std::any::{type_name, TypeId};
use std::collections::HashMap;
use tracing::debug;

/// Erased constructor producing a default instance of one model type
pub type ConstructorFn = Box<dyn Fn() -> AnyModel>;

/// Erased writer turning an in-progress model into its finalized form
pub type WriterFn = Box<dyn FnMut(ModelRef, AnyModel) -> FixtureResult<AnyModel>>;

struct ConstructorEntry {
    type_name: &'static str,
    construct: ConstructorFn,
}

struct WriterEntry {
    input_type: &'static str,
    output_type: &'static str,
    write: WriterFn,
}

/// Summary of what a registry currently holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryStats {
    pub constructors: usize,
    pub writers: usize,
    pub constructor_types: Vec<&'static str>,
    pub writer_types: Vec<(&'static str, &'static str)>,
}

#[derive(Default)]
pub struct TypeRegistry {
    constructors: HashMap<TypeId, ConstructorEntry>,
    writers: HashMap<TypeId, WriterEntry>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the default-instance factory for `T`, replacing any prior one
    pub fn register_constructor<T, F>(&mut self, constructor: F)
    where
        T: Model,
        F: Fn() -> T + 'static,
    {
        let replaced = self
            .constructors
            .insert(
                TypeId::of::<T>(),
                ConstructorEntry {
                    type_name: type_name::<T>(),
                    construct: Box::new(move || AnyModel::new(constructor())),
                },
            )
            .is_some();

        debug!(model_type = type_name::<T>(), replaced, "Constructor registered");
    }

    /// Register the writer for input type `T`, replacing any prior one
    ///
    /// The writer may return a different type `U`; the finalized model stored
    /// in the fixture then has type `U`.
    pub fn register_writer<T, U, W>(&mut self, mut writer: W)
    where
        T: Model,
        U: Model,
        W: FnMut(T) -> anyhow::Result<U> + 'static,
    {
        let write: WriterFn = Box::new(move |model_ref: ModelRef, model: AnyModel| {
            let found = model.type_name();
            let input = model.downcast::<T>().map_err(|_| FixtureError::InvalidType {
                model_ref,
                expected: type_name::<T>(),
                found,
            })?;

            writer(input)
                .map(AnyModel::new)
                .map_err(|source| FixtureError::WriterFailed {
                    model_ref,
                    type_name: type_name::<T>(),
                    source,
                })
        });

        let replaced = self
            .writers
            .insert(
                TypeId::of::<T>(),
                WriterEntry {
                    input_type: type_name::<T>(),
                    output_type: type_name::<U>(),
                    write,
                },
            )
            .is_some();

        debug!(
            input_type = type_name::<T>(),
            output_type = type_name::<U>(),
            replaced,
            "Writer registered"
        );
    }

    pub fn has_constructor<T: Model>(&self) -> bool {
        self.constructors.contains_key(&TypeId::of::<T>())
    }

    pub fn has_writer<T: Model>(&self) -> bool {
        self.writers.contains_key(&TypeId::of::<T>())
    }

    /// Build a `T` with its registered constructor, if there is one
    pub fn construct<T: Model>(&self, model_ref: ModelRef) -> Option<FixtureResult<T>> {
        let entry = self.constructors.get(&TypeId::of::<T>())?;
        let model = (entry.construct)();
        let found = model.type_name();
        Some(model.downcast::<T>().map_err(|_| FixtureError::InvalidType {
            model_ref,
            expected: entry.type_name,
            found,
        }))
    }

    /// Run the writer registered for the model's runtime type
    ///
    /// Returns `None` when no writer is registered, handing the model back so
    /// the caller can decide whether to pass it through.
    pub fn write(
        &mut self,
        model_ref: ModelRef,
        model: AnyModel,
    ) -> Result<FixtureResult<AnyModel>, AnyModel> {
        match self.writers.get_mut(&model.type_id()) {
            Some(entry) => Ok((entry.write)(model_ref, model)),
            None => Err(model),
        }
    }

    pub fn constructor_count(&self) -> usize {
        self.constructors.len()
    }

    pub fn writer_count(&self) -> usize {
        self.writers.len()
    }

    pub fn stats(&self) -> RegistryStats {
        let mut constructor_types: Vec<_> =
            self.constructors.values().map(|entry| entry.type_name).collect();
        constructor_types.sort_unstable();

        let mut writer_types: Vec<_> = self
            .writers
            .values()
            .map(|entry| (entry.input_type, entry.output_type))
            .collect();
        writer_types.sort_unstable();

        RegistryStats {
            constructors: self.constructors.len(),
            writers: self.writers.len(),
            constructor_types,
            writer_types,
        }
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stats = self.stats();
        f.debug_struct("TypeRegistry")
            .field("constructors", &stats.constructor_types)
            .field("writers", &stats.writer_types)
            .finish()
    }
}
