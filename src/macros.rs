//! Utility macros for declaring fixture models.

/// Implement [`Model`](crate::models::Model) for one or more record types
///
/// Every model type must be `'static` and `Debug`; the macro adds the marker
/// impl so the type can be registered with and added to a builder.
///
/// # Examples
///
/// ```
/// use codefixture::impl_model;
///
/// #[derive(Debug, Default)]
/// pub struct Group {
///     pub id: i64,
/// }
///
/// #[derive(Debug, Default)]
/// pub struct Person {
///     pub name: String,
///     pub group_id: i64,
/// }
///
/// impl_model!(Group, Person);
/// ```
#[macro_export]
macro_rules! impl_model {
    ($($model:ty),+ $(,)?) => {
        $(
            impl $crate::models::Model for $model {}
        )+
    };
}
