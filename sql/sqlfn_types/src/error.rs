//! Errors raised while materializing or parsing type signatures.

/// Failure to turn a `TypeSignature` into a concrete `DataType`, or to parse
/// one from text.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TypeSignatureError {
    /// A type variable is still present in the signature.
    #[error("cannot create a type from a signature with unbound type variable `{0}`")]
    UnboundVariable(String),
    /// The base name does not denote a known type.
    #[error("unknown type `{0}`")]
    UnknownType(String),
    /// The base type was given the wrong number of parameters.
    #[error("type `{base}` expects {expected} parameter(s), found {found}")]
    ParameterCount {
        base: String,
        expected: usize,
        found: usize,
    },
    /// The textual form could not be parsed.
    #[error("malformed type signature `{input}`")]
    Malformed { input: String },
}
