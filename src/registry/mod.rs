//! # Registry Infrastructure
//!
//! Type-indexed registration of model constructors and writers.
//!
//! ## Architecture
//!
//! ```text
//! TypeRegistry
//! ├── constructors   TypeId -> Fn() -> AnyModel
//! └── writers        TypeId -> FnMut(ModelRef, AnyModel) -> Result<AnyModel>
//! ```

pub mod type_registry;

pub use type_registry::{ConstructorFn, RegistryStats, TypeRegistry, WriterFn};
