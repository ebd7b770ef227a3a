//! Cache key helpers.
//!
//! Keys are namespaced strings joined with [`KEY_DELIMITER`]. Parts are not
//! escaped: a part containing the delimiter can collide with another key.

use std::fmt::Display;

/// Separator between key parts.
pub const KEY_DELIMITER: char = ':';

/// Joins a namespace prefix and identifying parts into a composite key.
///
/// ```
/// use smart_cache::create_cache_key;
///
/// assert_eq!(create_cache_key("users", ["123", "profile"]), "users:123:profile");
/// assert_eq!(create_cache_key("subjects", Vec::<String>::new()), "subjects");
/// ```
pub fn create_cache_key<I>(prefix: &str, parts: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    let mut key = String::from(prefix);
    for part in parts {
        key.push(KEY_DELIMITER);
        key.push_str(&part.to_string());
    }
    key
}

/// Builds a composite key from parts of mixed types.
///
/// ```
/// use smart_cache::cache_key;
///
/// let user_id = 42;
/// assert_eq!(cache_key!("permissions", user_id, "course", 7), "permissions:42:course:7");
/// ```
#[macro_export]
macro_rules! cache_key {
    ($prefix:expr $(, $part:expr)* $(,)?) => {{
        let mut key = ::std::string::String::from($prefix);
        $(
            key.push($crate::KEY_DELIMITER);
            key.push_str(&::std::string::ToString::to_string(&$part));
        )*
        key
    }};
}
