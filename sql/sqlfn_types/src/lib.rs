//! SQL type system for function resolution.
//!
//! Two representations live side by side:
//! - `DataType`: the concrete runtime type of a value or expression
//! - `TypeSignature`: a tree describing a declared parameter or return type,
//!   which may contain named type variables (`array(E)`)
//!
//! `TypeSignature::create_type` materializes a `DataType` once every variable
//! has been bound; `DataType::type_signature` goes the other way.
//!
//! # Coercion
//!
//! Implicit conversions are ranked by `CoercionMode`:
//!
//! ```text
//! None            exact match only
//! PrecedenceOnly  promotion along the precedence lattice (integer -> bigint -> double precision)
//! Full            any implicit cast path (text -> timestamp with time zone)
//! ```

mod coercion;
mod data_type;
mod error;
mod flags;
mod type_signature;

pub use coercion::{can_cast_implicitly, can_promote, coerces, CoercionMode};
pub use data_type::DataType;
pub use error::TypeSignatureError;
pub use flags::TypeFlags;
pub use type_signature::TypeSignature;
