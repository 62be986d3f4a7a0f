//! Pre-computed type category flags.
//!
//! `TypeFlags` classify a `DataType` into families so that coercion rules
//! and type-variable constraints can ask "is this numeric?" without matching
//! on every variant.

use bitflags::bitflags;

bitflags! {
    /// Family and capability flags of a data type.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    pub struct TypeFlags: u16 {
        // === Family Flags (bits 0-7) ===

        /// The placeholder type of untyped literals such as `NULL`.
        const IS_UNDEFINED = 1 << 0;
        /// Integral or fractional number.
        const IS_NUMERIC = 1 << 1;
        /// Integral number (subset of `IS_NUMERIC`).
        const IS_INTEGRAL = 1 << 2;
        /// Character data.
        const IS_TEXTUAL = 1 << 3;
        /// Date, timestamp or interval.
        const IS_TEMPORAL = 1 << 4;
        /// Array of another type.
        const IS_COLLECTION = 1 << 5;
        /// Structured type (object, geo point).
        const IS_STRUCTURED = 1 << 6;

        // === Capability Flags (bits 8-15) ===

        /// Values support ordering comparisons.
        const IS_COMPARABLE = 1 << 8;
        /// Values can be rendered to `text` implicitly.
        const TO_TEXT = 1 << 9;
    }
}

impl TypeFlags {
    /// Check if the numeric family flag is set.
    #[inline]
    pub fn is_numeric(self) -> bool {
        self.contains(Self::IS_NUMERIC)
    }

    /// Check if the undefined flag is set.
    #[inline]
    pub fn is_undefined(self) -> bool {
        self.contains(Self::IS_UNDEFINED)
    }
}

#[cfg(test)]
mod tests;
