//! Implicit coercion rules.
//!
//! Two relations are defined over `DataType`:
//!
//! - **promotion** (`can_promote`): lossless widening along the precedence
//!   lattice inside one family, plus `undefined` to anything
//! - **implicit cast** (`can_cast_implicitly`): every conversion the engine
//!   applies without an explicit `CAST`, including cross-family ones
//!
//! Promotion is a subset of implicit casting.
//!
//! ```text
//! byte -> smallint -> integer -> bigint -> numeric -> real -> double precision
//! date -> timestamp without time zone -> timestamp with time zone
//! undefined -> *
//! ```

use crate::DataType;

/// How permissive argument matching is, from strictest to loosest.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum CoercionMode {
    /// The actual type must equal the declared type.
    None,
    /// The actual type may be promoted along the precedence lattice.
    PrecedenceOnly,
    /// Any implicit cast is allowed.
    Full,
}

impl CoercionMode {
    /// Whether any conversion at all is permitted.
    #[inline]
    pub fn allows_coercion(self) -> bool {
        self != CoercionMode::None
    }
}

/// Check whether `from` can be widened to `to` without changing family.
pub fn can_promote(from: &DataType, to: &DataType) -> bool {
    if from == to || from.is_undefined() {
        return true;
    }
    match (from, to) {
        (DataType::Array(from_inner), DataType::Array(to_inner)) => {
            can_promote(from_inner, to_inner)
        }
        (from, to) if from.is_numeric() && to.is_numeric() => to.precedes(from),
        (DataType::Date, DataType::Timestamp | DataType::TimestampTz)
        | (DataType::Timestamp, DataType::TimestampTz) => true,
        _ => false,
    }
}

/// Check whether `from` converts to `to` implicitly.
pub fn can_cast_implicitly(from: &DataType, to: &DataType) -> bool {
    if can_promote(from, to) {
        return true;
    }
    match (from, to) {
        (DataType::Array(from_inner), DataType::Array(to_inner)) => {
            can_cast_implicitly(from_inner, to_inner)
        }
        // numeric narrowing, e.g. double precision -> integer
        (from, to) if from.is_numeric() && to.is_numeric() => true,
        // text literals are parsed into the target type
        (DataType::Text, to) => !matches!(to, DataType::Array(_) | DataType::Undefined),
        // scalars render to text
        (from, DataType::Text) => from.flags().contains(crate::TypeFlags::TO_TEXT),
        // epoch milliseconds
        (DataType::Integer | DataType::Long, DataType::Timestamp | DataType::TimestampTz)
        | (DataType::Timestamp | DataType::TimestampTz, DataType::Long | DataType::Date)
        | (DataType::TimestampTz, DataType::Timestamp) => true,
        // [lon, lat]
        (DataType::Array(inner), DataType::GeoPoint) => inner.is_numeric(),
        _ => false,
    }
}

/// Check whether `from` is acceptable where `to` is expected under `mode`.
pub fn coerces(from: &DataType, to: &DataType, mode: CoercionMode) -> bool {
    match mode {
        CoercionMode::None => from == to,
        CoercionMode::PrecedenceOnly => can_promote(from, to),
        CoercionMode::Full => can_cast_implicitly(from, to),
    }
}
