//! Already-planned call sites.

use sqlfn_signature::{FunctionName, Signature};
use sqlfn_types::DataType;

use crate::Symbol;

/// A function call as carried by a plan.
///
/// Plans shipped between nodes keep the signature chosen at analysis time so
/// that re-resolution does not depend on the receiving node's search path.
/// Calls built before that signature was known carry `None` and go through
/// full resolution.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionCall<S> {
    name: FunctionName,
    arguments: Vec<S>,
    signature: Option<Signature>,
    return_type: DataType,
}

impl<S: Symbol> FunctionCall<S> {
    /// A call that still needs full resolution.
    pub fn new(name: FunctionName, arguments: Vec<S>) -> Self {
        FunctionCall {
            name,
            arguments,
            signature: None,
            return_type: DataType::Undefined,
        }
    }

    /// A call pinned to `signature` with a known bound return type.
    pub fn with_signature(arguments: Vec<S>, signature: Signature, return_type: DataType) -> Self {
        FunctionCall {
            name: signature.name().clone(),
            arguments,
            signature: Some(signature),
            return_type,
        }
    }

    #[inline]
    pub fn name(&self) -> &FunctionName {
        &self.name
    }

    #[inline]
    pub fn arguments(&self) -> &[S] {
        &self.arguments
    }

    #[inline]
    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    /// Bound return type; `undefined` until the call is resolved.
    #[inline]
    pub fn return_type(&self) -> &DataType {
        &self.return_type
    }

    /// Value types of the arguments, in order.
    pub fn argument_types(&self) -> Vec<DataType> {
        self.arguments.iter().map(|arg| arg.value_type().clone()).collect()
    }
}
