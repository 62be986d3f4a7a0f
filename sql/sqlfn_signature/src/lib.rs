//! Function signatures and signature binding.
//!
//! A `Signature` declares the shape of a function: its qualified name, kind,
//! declared argument types (optionally variadic), return type and the
//! `BindingInfo` that says which type variables it uses and whether implicit
//! coercion is allowed.
//!
//! `SignatureBinder` unifies a declared signature against the actual argument
//! types of a call site, producing a `BoundSignature` with every variable
//! substituted.
//!
//! # Binding
//!
//! ```text
//! declared  array_cat(array(E), array(E)):array(E)
//! actual    (array(integer), array(bigint))
//! mode      PrecedenceOnly
//! bound     array_cat(array(bigint), array(bigint)):array(bigint)
//! ```

mod binder;
mod binding;
mod name;
pub mod oid;
mod signature;

pub use binder::{BoundVariables, SignatureBinder};
pub use binding::{BindingInfo, TypeVariableConstraint, VariableKind};
pub use name::FunctionName;
pub use signature::{BoundSignature, FunctionKind, Signature, SignatureBuilder};

// Coercion modes are part of the binder's vocabulary.
pub use sqlfn_types::CoercionMode;
