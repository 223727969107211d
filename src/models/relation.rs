use super::{AnyModel, ModelRef};
use crate::error::FixtureResult;
use std::fmt;

/// Type-erased connector: receives the in-progress target and the finalized
/// foreign model, and wires the target in place.
pub type Connector = Box<dyn FnOnce(&mut AnyModel, &AnyModel) -> FixtureResult<()>>;

/// Declared dependency edge: `target_ref` depends on the finalized model of
/// `foreign_ref`.
pub struct ModelRelation {
    pub target_ref: ModelRef,
    pub foreign_ref: ModelRef,
    pub connector: Connector,
}

impl ModelRelation {
    pub fn new(target_ref: ModelRef, foreign_ref: ModelRef, connector: Connector) -> Self {
        Self {
            target_ref,
            foreign_ref,
            connector,
        }
    }

    /// Edge with a connector that does nothing, for ordering-only relations.
    pub fn ordering_only(target_ref: ModelRef, foreign_ref: ModelRef) -> Self {
        Self::new(
            target_ref,
            foreign_ref,
            Box::new(|_: &mut AnyModel, _: &AnyModel| Ok(())),
        )
    }

    pub fn connect(self, target: &mut AnyModel, foreign: &AnyModel) -> FixtureResult<()> {
        (self.connector)(target, foreign)
    }
}

impl fmt::Debug for ModelRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelRelation")
            .field("target_ref", &self.target_ref)
            .field("foreign_ref", &self.foreign_ref)
            .field("connector", &"Connector")
            .finish()
    }
}
