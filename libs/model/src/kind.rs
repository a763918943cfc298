//! Document kinds and index-name resolution.

use heck::ToSnakeCase;

/// Marker for one kind of document stored in one index.
///
/// The index name defaults to the snake_case form of the implementing type's
/// name (`BlogPost` -> `blog_post`); set [`DocumentKind::INDEX`] to override it.
///
/// ```rust
/// use esorm_model::DocumentKind;
///
/// struct BlogPost;
/// impl DocumentKind for BlogPost {}
///
/// struct LegacyUser;
/// impl DocumentKind for LegacyUser {
///     const INDEX: Option<&'static str> = Some("users_v2");
/// }
///
/// assert_eq!(BlogPost::index_name(), "blog_post");
/// assert_eq!(LegacyUser::index_name(), "users_v2");
/// ```
pub trait DocumentKind: Send + Sync + 'static {
    const INDEX: Option<&'static str> = None;

    fn index_name() -> String {
        match Self::INDEX {
            Some(index) => index.to_string(),
            None => derived_index_name::<Self>(),
        }
    }
}

/// Snake-cased type name without module path or generic arguments.
pub fn derived_index_name<K: ?Sized>() -> String {
    let full = std::any::type_name::<K>();
    let base = full.split('<').next().unwrap_or(full);
    let base = base.rsplit("::").next().unwrap_or(base);
    base.to_snake_case()
}
