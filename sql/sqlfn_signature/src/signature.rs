//! Declared and bound function signatures.

use std::fmt;

use sqlfn_types::{DataType, TypeSignature, TypeSignatureError};

use crate::{BindingInfo, FunctionName, TypeVariableConstraint};

/// Category of a function.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FunctionKind {
    Scalar,
    Aggregate,
    Table,
    Window,
}

impl FunctionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            FunctionKind::Scalar => "scalar",
            FunctionKind::Aggregate => "aggregate",
            FunctionKind::Table => "table",
            FunctionKind::Window => "window",
        }
    }
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Declared shape of a function.
///
/// Immutable once built. If `variable_arity` is set, the last declared
/// argument type matches zero or more trailing actual arguments.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Signature {
    name: FunctionName,
    kind: FunctionKind,
    argument_types: Vec<TypeSignature>,
    variable_arity: bool,
    return_type: TypeSignature,
    binding_info: BindingInfo,
}

impl Signature {
    /// Start building a signature. The return type defaults to `undefined`.
    pub fn builder(name: FunctionName, kind: FunctionKind) -> SignatureBuilder {
        SignatureBuilder {
            name,
            kind,
            argument_types: Vec::new(),
            variable_arity: false,
            return_type: DataType::Undefined.type_signature(),
            binding_info: BindingInfo::default(),
        }
    }

    pub fn scalar(name: FunctionName) -> SignatureBuilder {
        Self::builder(name, FunctionKind::Scalar)
    }

    pub fn aggregate(name: FunctionName) -> SignatureBuilder {
        Self::builder(name, FunctionKind::Aggregate)
    }

    pub fn table(name: FunctionName) -> SignatureBuilder {
        Self::builder(name, FunctionKind::Table)
    }

    pub fn window(name: FunctionName) -> SignatureBuilder {
        Self::builder(name, FunctionKind::Window)
    }

    #[inline]
    pub fn name(&self) -> &FunctionName {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> FunctionKind {
        self.kind
    }

    /// Declared argument types, variadic tail not expanded.
    #[inline]
    pub fn argument_types(&self) -> &[TypeSignature] {
        &self.argument_types
    }

    #[inline]
    pub fn is_variable_arity(&self) -> bool {
        self.variable_arity
    }

    #[inline]
    pub fn return_type(&self) -> &TypeSignature {
        &self.return_type
    }

    #[inline]
    pub fn binding_info(&self) -> &BindingInfo {
        &self.binding_info
    }
}

impl fmt::Display for Signature {
    /// `name(arg, ...):return`, with `...` after a variadic last argument.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        let last = self.argument_types.len().saturating_sub(1);
        for (i, arg) in self.argument_types.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
            if self.variable_arity && i == last {
                f.write_str("...")?;
            }
        }
        write!(f, "):{}", self.return_type)
    }
}

/// Builder for `Signature`.
#[derive(Clone, Debug)]
pub struct SignatureBuilder {
    name: FunctionName,
    kind: FunctionKind,
    argument_types: Vec<TypeSignature>,
    variable_arity: bool,
    return_type: TypeSignature,
    binding_info: BindingInfo,
}

impl SignatureBuilder {
    #[must_use]
    pub fn argument_types(mut self, types: impl IntoIterator<Item = TypeSignature>) -> Self {
        self.argument_types = types.into_iter().collect();
        self
    }

    #[must_use]
    pub fn return_type(mut self, return_type: TypeSignature) -> Self {
        self.return_type = return_type;
        self
    }

    /// Mark the last argument type as variadic.
    #[must_use]
    pub fn variable_arity(mut self) -> Self {
        self.variable_arity = true;
        self
    }

    #[must_use]
    pub fn type_variable(mut self, constraint: TypeVariableConstraint) -> Self {
        self.binding_info.declare(constraint);
        self
    }

    /// Exclude the signature from the coercion tiers of resolution.
    #[must_use]
    pub fn forbid_coercion(mut self) -> Self {
        self.binding_info.set_coercion_allowed(false);
        self
    }

    /// Finish the signature.
    ///
    /// Variables used in argument or return types without an explicit
    /// constraint are declared as `Any`, so the binding info always
    /// describes every variable the signature mentions.
    pub fn build(mut self) -> Signature {
        debug_assert!(
            !self.variable_arity || !self.argument_types.is_empty(),
            "variadic signature `{}` needs at least one argument type",
            self.name
        );
        if self.argument_types.is_empty() {
            self.variable_arity = false;
        }

        let mut used = Vec::new();
        for arg in &self.argument_types {
            arg.collect_variables(&mut used);
        }
        self.return_type.collect_variables(&mut used);
        let undeclared: Vec<String> = used
            .into_iter()
            .filter(|var| self.binding_info.constraint(var).is_none())
            .map(str::to_owned)
            .collect();
        for var in undeclared {
            self.binding_info.declare(TypeVariableConstraint::any(var));
        }

        Signature {
            name: self.name,
            kind: self.kind,
            argument_types: self.argument_types,
            variable_arity: self.variable_arity,
            return_type: self.return_type,
            binding_info: self.binding_info,
        }
    }
}

/// A signature after binding: argument types expanded to the call's arity
/// and every type variable replaced by a concrete type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundSignature {
    name: FunctionName,
    kind: FunctionKind,
    argument_types: Vec<TypeSignature>,
    return_type: TypeSignature,
}

impl BoundSignature {
    pub fn new(
        name: FunctionName,
        kind: FunctionKind,
        argument_types: Vec<TypeSignature>,
        return_type: TypeSignature,
    ) -> Self {
        debug_assert!(
            !argument_types.iter().any(TypeSignature::has_variables) && !return_type.has_variables(),
            "bound signature of `{name}` still contains type variables"
        );
        BoundSignature {
            name,
            kind,
            argument_types,
            return_type,
        }
    }

    /// Bind `declared` to already-known concrete argument and return types.
    pub fn from_types(declared: &Signature, argument_types: &[DataType], return_type: &DataType) -> Self {
        Self::new(
            declared.name().clone(),
            declared.kind(),
            argument_types.iter().map(DataType::type_signature).collect(),
            return_type.type_signature(),
        )
    }

    #[inline]
    pub fn name(&self) -> &FunctionName {
        &self.name
    }

    #[inline]
    pub fn kind(&self) -> FunctionKind {
        self.kind
    }

    #[inline]
    pub fn argument_types(&self) -> &[TypeSignature] {
        &self.argument_types
    }

    #[inline]
    pub fn return_type(&self) -> &TypeSignature {
        &self.return_type
    }

    /// Concrete argument types.
    pub fn argument_data_types(&self) -> Result<Vec<DataType>, TypeSignatureError> {
        self.argument_types.iter().map(TypeSignature::create_type).collect()
    }

    /// Concrete return type.
    pub fn return_data_type(&self) -> Result<DataType, TypeSignatureError> {
        self.return_type.create_type()
    }
}

impl fmt::Display for BoundSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, arg) in self.argument_types.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{arg}")?;
        }
        write!(f, "):{}", self.return_type)
    }
}

#[cfg(test)]
mod tests;
