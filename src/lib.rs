#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Codefixture
//!
//! Dependency-aware construction of interrelated test fixture models.
//!
//! ## Overview
//!
//! Tests often need a small graph of records where some must be fully built,
//! and usually "persisted", before others can point at them: a person needs
//! the id of a saved group, an order needs a saved customer. This crate lets a
//! test declare those models and their relations in any order, then builds
//! them in dependency order, running a per-type *writer* on each model so the
//! finalized form (for example a record with a generated id) is what
//! dependents get wired to.
//!
//! ## Architecture
//!
//! ```text
//! FixtureBuilder
//! ├── TypeRegistry        (constructors + writers, keyed by type)
//! ├── model store         (ModelRef -> in-progress AnyModel)
//! ├── relation set        (target, foreign, connector)
//! └── build()
//!     ├── DependencyResolver   (rank relaxation, bounded against cycles)
//!     └── BuildPipeline        (connect -> write -> store)
//!         └── Fixture          (read-only, ModelRef -> finalized model)
//! ```
//!
//! ## Module Organization
//!
//! - [`models`] - Identities, the type-erased model handle and relations
//! - [`registry`] - Per-type constructors and writers
//! - [`builder`] - Builder API, dependency resolver and build pipeline
//! - [`fixture`] - Finalized, read-only result store
//! - [`config`] - Builder configuration
//! - [`error`] - Structured error handling
//! - [`logging`] - Structured logging setup and helpers
//!
//! ## Quick Start
//!
//! ```rust
//! use codefixture::{impl_model, FixtureBuilder};
//!
//! #[derive(Debug, Default)]
//! struct DraftMaterial {
//!     name: String,
//! }
//!
//! #[derive(Debug)]
//! struct Material {
//!     id: i64,
//!     name: String,
//! }
//!
//! #[derive(Debug, Default)]
//! struct Stock {
//!     material_id: i64,
//! }
//!
//! impl_model!(DraftMaterial, Material, Stock);
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = FixtureBuilder::new();
//!
//! // "Persist" drafts, assigning ids in write order
//! let mut next_id = 0;
//! builder.register_writer(move |draft: DraftMaterial| {
//!     next_id += 1;
//!     Ok(Material { id: next_id, name: draft.name })
//! });
//! builder.register_writer(|stock: Stock| Ok(stock));
//!
//! let stock = builder.add_model::<Stock>()?;
//! let material = builder.add_model_with(|m: &mut DraftMaterial| m.name = "steel".into())?;
//!
//! // The connector sees the written Material, not the draft
//! builder.add_relation(stock, material.retyped::<Material>(), |stock, material| {
//!     stock.material_id = material.id;
//! })?;
//!
//! let fixture = builder.build()?;
//! assert_eq!(fixture.get(stock)?.material_id, 1);
//! assert_eq!(fixture.get_as::<Material>(material)?.name, "steel");
//! # Ok(())
//! # }
//! ```
//!
//! ## Testing
//!
//! ```bash
//! cargo test --lib    # Unit tests
//! cargo test          # All tests
//! ```

#[macro_use]
pub mod macros;

pub mod builder;
pub mod config;
pub mod constants;
pub mod error;
pub mod fixture;
pub mod logging;
pub mod models;
pub mod registry;

pub use builder::{DependencyResolver, FixtureBuilder, ResolvedOrder};
pub use config::BuilderConfig;
pub use error::{FixtureError, FixtureResult};
pub use fixture::Fixture;
pub use logging::init_structured_logging;
pub use models::{AnyModel, Model, ModelRef, ModelRelation, TypedModelRef};
pub use registry::{RegistryStats, TypeRegistry};
