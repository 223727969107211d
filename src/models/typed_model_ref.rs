use super::ModelRef;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// A [`ModelRef`] tagged at compile time with the type of model it names.
///
/// The tag only steers typed retrieval; equality and hashing use the raw ref,
/// so a typed ref and its untyped counterpart always name the same slot.
pub struct TypedModelRef<T> {
    model_ref: ModelRef,
    _marker: PhantomData<fn() -> T>,
}

impl<T> TypedModelRef<T> {
    pub fn new() -> Self {
        Self::from_ref(ModelRef::new())
    }

    pub(crate) fn from_ref(model_ref: ModelRef) -> Self {
        Self {
            model_ref,
            _marker: PhantomData,
        }
    }

    pub fn model_ref(&self) -> ModelRef {
        self.model_ref
    }

    /// Reinterpret the ref under another type tag.
    ///
    /// Used to name the finalized form of a model whose writer converts `T`
    /// into `U`, e.g. when the ref is the foreign side of a relation.
    pub fn retyped<U>(self) -> TypedModelRef<U> {
        TypedModelRef::from_ref(self.model_ref)
    }
}

impl<T> Default for TypedModelRef<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for TypedModelRef<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedModelRef<T> {}

impl<T> PartialEq for TypedModelRef<T> {
    fn eq(&self, other: &Self) -> bool {
        self.model_ref == other.model_ref
    }
}

impl<T> Eq for TypedModelRef<T> {}

impl<T> PartialEq<ModelRef> for TypedModelRef<T> {
    fn eq(&self, other: &ModelRef) -> bool {
        self.model_ref == *other
    }
}

impl<T> Hash for TypedModelRef<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.model_ref.hash(state);
    }
}

impl<T> fmt::Debug for TypedModelRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypedModelRef")
            .field(&std::any::type_name::<T>())
            .field(&self.model_ref)
            .finish()
    }
}

impl<T> fmt::Display for TypedModelRef<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.model_ref, f)
    }
}

impl<T> From<TypedModelRef<T>> for ModelRef {
    fn from(typed: TypedModelRef<T>) -> Self {
        typed.model_ref
    }
}
