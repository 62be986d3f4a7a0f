//! Session schema search path.

/// Schema holding the PostgreSQL compatibility functions.
pub const PG_CATALOG_SCHEMA: &str = "pg_catalog";

/// Schema used when the session does not set one.
pub const DEFAULT_SCHEMA: &str = "doc";

/// Ordered list of schemas consulted for unqualified function names.
///
/// `pg_catalog` is always part of the path. Unless the user lists it
/// explicitly it is searched first, before the user-supplied schemas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchPath {
    /// Effective order, `pg_catalog` included.
    schemas: Vec<String>,
    pg_catalog_is_explicit: bool,
}

impl SearchPath {
    /// Search path over `schemas`; an empty list means the default schema.
    pub fn new<I, S>(schemas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut schemas: Vec<String> = schemas.into_iter().map(Into::into).collect();
        if schemas.is_empty() {
            schemas.push(DEFAULT_SCHEMA.to_owned());
        }
        let pg_catalog_is_explicit = schemas.iter().any(|s| s == PG_CATALOG_SCHEMA);
        if !pg_catalog_is_explicit {
            schemas.insert(0, PG_CATALOG_SCHEMA.to_owned());
        }
        SearchPath {
            schemas,
            pg_catalog_is_explicit,
        }
    }

    /// Parse a `search_path` session setting such as `"custom, doc"`.
    ///
    /// Items are trimmed, empty items skipped and double-quoted identifiers
    /// unquoted (`""` inside quotes is a literal quote).
    pub fn from_setting(setting: &str) -> Self {
        Self::new(
            setting
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(unquote),
        )
    }

    /// Schema new objects are created in: the first user-supplied schema.
    pub fn current_schema(&self) -> &str {
        let index = usize::from(!self.pg_catalog_is_explicit);
        self.schemas
            .get(index)
            .map_or(DEFAULT_SCHEMA, String::as_str)
    }

    /// Schemas in lookup order.
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.schemas.iter().map(String::as_str)
    }

    /// The path as the user wrote it, without the implicit `pg_catalog`.
    pub fn show_path(&self) -> String {
        let skip = usize::from(!self.pg_catalog_is_explicit);
        self.schemas[skip..].join(", ")
    }
}

impl Default for SearchPath {
    fn default() -> Self {
        SearchPath::new([DEFAULT_SCHEMA])
    }
}

impl<'a> IntoIterator for &'a SearchPath {
    type Item = &'a str;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, String>, fn(&'a String) -> &'a str>;

    fn into_iter(self) -> Self::IntoIter {
        self.schemas.iter().map(String::as_str as fn(&'a String) -> &'a str)
    }
}

fn unquote(item: &str) -> String {
    match item
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(inner) => inner.replace("\"\"", "\""),
        None => item.to_owned(),
    }
}
