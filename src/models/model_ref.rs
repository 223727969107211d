use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque identity naming one model slot in a builder and its fixture.
///
/// Every call to [`ModelRef::new`] yields a fresh v4 UUID; refs carry no
/// meaning beyond equality and are only ever used as keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelRef(Uuid);

impl ModelRef {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ModelRef {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for ModelRef {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_new_refs_are_unique() {
        let refs: HashSet<ModelRef> = (0..1000).map(|_| ModelRef::new()).collect();
        assert_eq!(refs.len(), 1000);
    }

    #[test]
    fn test_display_matches_uuid() {
        let uuid = Uuid::new_v4();
        let model_ref = ModelRef::from(uuid);
        assert_eq!(model_ref.to_string(), uuid.to_string());
        assert_eq!(model_ref.as_uuid(), &uuid);
    }

    #[test]
    fn test_serializes_as_plain_uuid() {
        let model_ref = ModelRef::new();
        let json = serde_json::to_string(&model_ref).unwrap();
        assert_eq!(json, format!("\"{model_ref}\""));
    }
}
