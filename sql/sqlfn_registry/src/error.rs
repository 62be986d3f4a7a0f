//! Resolution errors.

use std::fmt::Write;

use sqlfn_signature::{FunctionName, Signature};
use sqlfn_types::DataType;
use thiserror::Error;

/// Why a call site could not be resolved.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No candidate matched the argument types, or several matched equally
    /// well after full coercion. `candidates` holds every signature
    /// registered under the resolved name (empty if the name is unknown).
    #[error("{}", unknown_function_message(.name, .argument_types, .candidates))]
    UnknownFunction {
        name: FunctionName,
        argument_types: Vec<DataType>,
        candidates: Vec<Signature>,
    },

    /// A call pinned to a signature that is not registered (any more).
    #[error("Unknown function signature: {0}")]
    SignatureNotFound(Signature),
}

impl ResolveError {
    pub fn unknown_function(name: FunctionName, argument_types: Vec<DataType>, candidates: Vec<Signature>) -> Self {
        ResolveError::UnknownFunction {
            name,
            argument_types,
            candidates,
        }
    }

    /// Candidate signatures reported with the error.
    pub fn candidates(&self) -> &[Signature] {
        match self {
            ResolveError::UnknownFunction { candidates, .. } => candidates,
            ResolveError::SignatureNotFound(_) => &[],
        }
    }
}

fn unknown_function_message(name: &FunctionName, argument_types: &[DataType], candidates: &[Signature]) -> String {
    let arguments = join(argument_types);
    let mut message = format!("Unknown function: {name}({arguments})");
    if candidates.is_empty() {
        return message;
    }
    if argument_types.is_empty() {
        message.push('.');
    } else {
        let _ = write!(message, ", no overload found for matching argument types: ({arguments}).");
    }
    message.push_str(" Possible candidates: ");
    message.push_str(&join(candidates));
    message
}

fn join<T: std::fmt::Display>(items: &[T]) -> String {
    let mut out = String::new();
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{item}");
    }
    out
}
