//! Binding metadata attached to every signature.

use sqlfn_types::DataType;

/// What a type variable may be bound to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VariableKind {
    /// Any type.
    Any,
    /// Numeric types only. `undefined` is admitted as well since it can
    /// still be widened to a numeric type by a later occurrence.
    Numeric,
}

/// A named type variable and its constraint.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeVariableConstraint {
    name: String,
    kind: VariableKind,
}

impl TypeVariableConstraint {
    /// A variable that binds to any type.
    pub fn any(name: impl Into<String>) -> Self {
        TypeVariableConstraint {
            name: name.into(),
            kind: VariableKind::Any,
        }
    }

    /// A variable restricted to numeric types.
    pub fn numeric(name: impl Into<String>) -> Self {
        TypeVariableConstraint {
            name: name.into(),
            kind: VariableKind::Numeric,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    /// Check whether `data_type` may be bound to this variable.
    pub fn admits(&self, data_type: &DataType) -> bool {
        match self.kind {
            VariableKind::Any => true,
            VariableKind::Numeric => data_type.is_numeric() || data_type.is_undefined(),
        }
    }
}

/// Generic and coercion metadata of a signature.
///
/// Every `Signature` owns one; resolution reads it to decide which matching
/// tiers a candidate takes part in.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BindingInfo {
    type_variable_constraints: Vec<TypeVariableConstraint>,
    coercion_allowed: bool,
}

impl BindingInfo {
    pub fn new(type_variable_constraints: Vec<TypeVariableConstraint>, coercion_allowed: bool) -> Self {
        BindingInfo {
            type_variable_constraints,
            coercion_allowed,
        }
    }

    #[inline]
    pub fn type_variable_constraints(&self) -> &[TypeVariableConstraint] {
        &self.type_variable_constraints
    }

    /// Whether the signature declares no type variables.
    #[inline]
    pub fn is_exact(&self) -> bool {
        self.type_variable_constraints.is_empty()
    }

    #[inline]
    pub fn is_coercion_allowed(&self) -> bool {
        self.coercion_allowed
    }

    /// Constraint declared for the variable `name`.
    pub fn constraint(&self, name: &str) -> Option<&TypeVariableConstraint> {
        self.type_variable_constraints
            .iter()
            .find(|constraint| constraint.name == name)
    }

    pub(crate) fn declare(&mut self, constraint: TypeVariableConstraint) {
        if self.constraint(&constraint.name).is_none() {
            self.type_variable_constraints.push(constraint);
        }
    }

    pub(crate) fn set_coercion_allowed(&mut self, allowed: bool) {
        self.coercion_allowed = allowed;
    }
}

impl Default for BindingInfo {
    /// No type variables, coercion allowed.
    fn default() -> Self {
        BindingInfo::new(Vec::new(), true)
    }
}
