//! Concrete SQL data types.
//!
//! `DataType` is what an argument expression reports as its value type. Each
//! type carries a stable id, a precedence rank (higher wins when two types
//! must be reconciled) and its `TypeFlags` family.

use std::fmt;

use crate::{TypeFlags, TypeSignature};

/// A concrete runtime type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataType {
    /// Type of untyped literals (`NULL`); coerces to every other type.
    Undefined,
    Boolean,
    /// 8-bit signed integer.
    Byte,
    /// 16-bit signed integer (`smallint`).
    Short,
    /// 32-bit signed integer.
    Integer,
    /// 64-bit signed integer (`bigint`).
    Long,
    /// 32-bit float (`real`).
    Float,
    /// 64-bit float (`double precision`).
    Double,
    /// Arbitrary precision decimal.
    Numeric,
    Text,
    Date,
    /// `timestamp without time zone`
    Timestamp,
    /// `timestamp with time zone`
    TimestampTz,
    Interval,
    Ip,
    GeoPoint,
    Object,
    /// Homogeneous array of the inner type.
    Array(Box<DataType>),
}

impl DataType {
    /// Name of the `array` type constructor.
    pub const ARRAY_NAME: &'static str = "array";

    /// Every non-parameterized type, in id order.
    pub const PRIMITIVES: [DataType; 17] = [
        DataType::Undefined,
        DataType::Boolean,
        DataType::Byte,
        DataType::Short,
        DataType::Integer,
        DataType::Long,
        DataType::Float,
        DataType::Double,
        DataType::Numeric,
        DataType::Text,
        DataType::Date,
        DataType::Timestamp,
        DataType::TimestampTz,
        DataType::Interval,
        DataType::Ip,
        DataType::GeoPoint,
        DataType::Object,
    ];

    /// Convenience constructor for `array(inner)`.
    pub fn array(inner: DataType) -> Self {
        DataType::Array(Box::new(inner))
    }

    /// Stable numeric id of the type family. Arrays share one id regardless
    /// of their element type.
    pub const fn id(&self) -> u8 {
        match self {
            DataType::Undefined => 0,
            DataType::Boolean => 1,
            DataType::Byte => 2,
            DataType::Short => 3,
            DataType::Integer => 4,
            DataType::Long => 5,
            DataType::Float => 6,
            DataType::Double => 7,
            DataType::Numeric => 8,
            DataType::Text => 9,
            DataType::Date => 10,
            DataType::Timestamp => 11,
            DataType::TimestampTz => 12,
            DataType::Interval => 13,
            DataType::Ip => 14,
            DataType::GeoPoint => 15,
            DataType::Object => 16,
            DataType::Array(_) => 100,
        }
    }

    /// SQL name of the type (array element type excluded).
    pub const fn name(&self) -> &'static str {
        match self {
            DataType::Undefined => "undefined",
            DataType::Boolean => "boolean",
            DataType::Byte => "byte",
            DataType::Short => "smallint",
            DataType::Integer => "integer",
            DataType::Long => "bigint",
            DataType::Float => "real",
            DataType::Double => "double precision",
            DataType::Numeric => "numeric",
            DataType::Text => "text",
            DataType::Date => "date",
            DataType::Timestamp => "timestamp without time zone",
            DataType::TimestampTz => "timestamp with time zone",
            DataType::Interval => "interval",
            DataType::Ip => "ip",
            DataType::GeoPoint => "geo_point",
            DataType::Object => "object",
            DataType::Array(_) => Self::ARRAY_NAME,
        }
    }

    /// Look up a non-parameterized type by its SQL name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::PRIMITIVES.into_iter().find(|t| t.name() == name)
    }

    /// Precedence rank on the coercion lattice.
    ///
    /// When two types must be reconciled, the one with the higher rank is the
    /// target. Ranks are only meaningful relative to each other.
    pub const fn precedence(&self) -> u8 {
        match self {
            DataType::Undefined => 0,
            DataType::Text => 10,
            DataType::Ip => 11,
            DataType::Boolean => 12,
            DataType::Byte => 20,
            DataType::Short => 21,
            DataType::Integer => 22,
            DataType::Long => 23,
            DataType::Numeric => 24,
            DataType::Float => 25,
            DataType::Double => 26,
            DataType::Date => 30,
            DataType::Timestamp => 31,
            DataType::TimestampTz => 32,
            DataType::Interval => 33,
            DataType::GeoPoint => 40,
            DataType::Object => 50,
            DataType::Array(_) => 60,
        }
    }

    /// Whether `self` ranks strictly above `other` on the precedence lattice.
    #[inline]
    pub fn precedes(&self, other: &DataType) -> bool {
        self.precedence() > other.precedence()
    }

    /// Family and capability flags.
    pub fn flags(&self) -> TypeFlags {
        let scalar = TypeFlags::IS_COMPARABLE | TypeFlags::TO_TEXT;
        match self {
            DataType::Undefined => TypeFlags::IS_UNDEFINED,
            DataType::Boolean | DataType::Ip => scalar,
            DataType::Byte | DataType::Short | DataType::Integer | DataType::Long => {
                scalar | TypeFlags::IS_NUMERIC | TypeFlags::IS_INTEGRAL
            }
            DataType::Float | DataType::Double | DataType::Numeric => {
                scalar | TypeFlags::IS_NUMERIC
            }
            DataType::Text => scalar | TypeFlags::IS_TEXTUAL,
            DataType::Date | DataType::Timestamp | DataType::TimestampTz | DataType::Interval => {
                scalar | TypeFlags::IS_TEMPORAL
            }
            DataType::GeoPoint | DataType::Object => TypeFlags::IS_STRUCTURED,
            DataType::Array(_) => TypeFlags::IS_COLLECTION,
        }
    }

    #[inline]
    pub fn is_undefined(&self) -> bool {
        matches!(self, DataType::Undefined)
    }

    #[inline]
    pub fn is_numeric(&self) -> bool {
        self.flags().is_numeric()
    }

    /// Element type of an array, `None` for scalars.
    pub fn inner(&self) -> Option<&DataType> {
        match self {
            DataType::Array(inner) => Some(inner),
            _ => None,
        }
    }

    /// The type signature describing this type.
    pub fn type_signature(&self) -> TypeSignature {
        match self {
            DataType::Array(inner) => TypeSignature::array(inner.type_signature()),
            other => TypeSignature::base(other.name()),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Array(inner) => write!(f, "{}({inner})", Self::ARRAY_NAME),
            other => f.write_str(other.name()),
        }
    }
}
