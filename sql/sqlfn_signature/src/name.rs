//! Schema-qualified function names.

use std::fmt;

/// A function name, optionally qualified by a schema.
///
/// Unqualified names participate in search-path lookup; qualified names are
/// looked up exactly.
#[derive(Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionName {
    schema: Option<String>,
    name: String,
}

impl FunctionName {
    pub fn new(schema: Option<&str>, name: impl Into<String>) -> Self {
        FunctionName {
            schema: schema.map(str::to_owned),
            name: name.into(),
        }
    }

    /// A name without schema (process-global built-ins, or a name awaiting
    /// search-path resolution).
    pub fn unqualified(name: impl Into<String>) -> Self {
        FunctionName {
            schema: None,
            name: name.into(),
        }
    }

    pub fn qualified(schema: impl Into<String>, name: impl Into<String>) -> Self {
        FunctionName {
            schema: Some(schema.into()),
            name: name.into(),
        }
    }

    #[inline]
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn is_qualified(&self) -> bool {
        self.schema.is_some()
    }

    /// The same function name placed in `schema`.
    pub fn with_schema(&self, schema: &str) -> Self {
        FunctionName::qualified(schema, self.name.clone())
    }

    /// Name as shown to users: `schema.name` or `name`.
    pub fn display_name(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{schema}.{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}
