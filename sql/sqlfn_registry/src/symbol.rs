//! Argument expressions as seen by resolution.

use sqlfn_types::DataType;

/// An analyzed argument expression.
///
/// Resolution only looks at the value type; literals, column references and
/// nested calls all reduce to one.
pub trait Symbol {
    fn value_type(&self) -> &DataType;
}

/// A bare type stands for an expression of that type.
impl Symbol for DataType {
    #[inline]
    fn value_type(&self) -> &DataType {
        self
    }
}

impl<S: Symbol + ?Sized> Symbol for &S {
    #[inline]
    fn value_type(&self) -> &DataType {
        (**self).value_type()
    }
}
