//! Type signatures: the declared-type language of function signatures.
//!
//! A `TypeSignature` is an immutable tree:
//!
//! ```text
//! integer                 Type { base: "integer", parameters: [] }
//! array(E)                Type { base: "array", parameters: [Variable("E")] }
//! E                       Variable("E")
//! ```
//!
//! Equality is structural, including variable names: `array(E)` and
//! `array(T)` are different signatures.

use std::fmt;

use crate::{DataType, TypeSignatureError};

/// A possibly-parameterized type descriptor that may contain type variables.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeSignature {
    /// A base type, optionally applied to parameter signatures.
    Type {
        base: String,
        parameters: Vec<TypeSignature>,
    },
    /// A named placeholder bound during signature binding.
    Variable(String),
}

impl TypeSignature {
    /// A non-parameterized base type.
    pub fn base(name: impl Into<String>) -> Self {
        TypeSignature::Type {
            base: name.into(),
            parameters: Vec::new(),
        }
    }

    /// A base type constructor applied to parameters.
    pub fn parameterized(name: impl Into<String>, parameters: Vec<TypeSignature>) -> Self {
        TypeSignature::Type {
            base: name.into(),
            parameters,
        }
    }

    /// `array(inner)`.
    pub fn array(inner: TypeSignature) -> Self {
        Self::parameterized(DataType::ARRAY_NAME, vec![inner])
    }

    /// A type variable placeholder.
    pub fn variable(name: impl Into<String>) -> Self {
        TypeSignature::Variable(name.into())
    }

    #[inline]
    pub fn is_variable(&self) -> bool {
        matches!(self, TypeSignature::Variable(_))
    }

    /// Base name for types, variable name for variables.
    pub fn name(&self) -> &str {
        match self {
            TypeSignature::Type { base, .. } => base,
            TypeSignature::Variable(name) => name,
        }
    }

    /// Parameters of a type constructor; empty for variables.
    pub fn parameters(&self) -> &[TypeSignature] {
        match self {
            TypeSignature::Type { parameters, .. } => parameters,
            TypeSignature::Variable(_) => &[],
        }
    }

    /// Whether any variable occurs anywhere in the tree.
    pub fn has_variables(&self) -> bool {
        match self {
            TypeSignature::Variable(_) => true,
            TypeSignature::Type { parameters, .. } => parameters.iter().any(Self::has_variables),
        }
    }

    /// Append the names of all variables in the tree, in pre-order.
    pub fn collect_variables<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            TypeSignature::Variable(name) => out.push(name),
            TypeSignature::Type { parameters, .. } => {
                for parameter in parameters {
                    parameter.collect_variables(out);
                }
            }
        }
    }

    /// Replace variables for which `lookup` returns a signature.
    ///
    /// Variables without a replacement are kept as they are.
    pub fn substitute<F>(&self, lookup: &F) -> TypeSignature
    where
        F: Fn(&str) -> Option<TypeSignature>,
    {
        match self {
            TypeSignature::Variable(name) => lookup(name).unwrap_or_else(|| self.clone()),
            TypeSignature::Type { base, parameters } => TypeSignature::Type {
                base: base.clone(),
                parameters: parameters.iter().map(|p| p.substitute(lookup)).collect(),
            },
        }
    }

    /// Materialize the concrete `DataType` of a variable-free signature.
    pub fn create_type(&self) -> Result<DataType, TypeSignatureError> {
        match self {
            TypeSignature::Variable(name) => Err(TypeSignatureError::UnboundVariable(name.clone())),
            TypeSignature::Type { base, parameters } if base == DataType::ARRAY_NAME => {
                match parameters.as_slice() {
                    [inner] => Ok(DataType::array(inner.create_type()?)),
                    _ => Err(TypeSignatureError::ParameterCount {
                        base: base.clone(),
                        expected: 1,
                        found: parameters.len(),
                    }),
                }
            }
            TypeSignature::Type { base, parameters } => {
                let data_type = DataType::from_name(base)
                    .ok_or_else(|| TypeSignatureError::UnknownType(base.clone()))?;
                if !parameters.is_empty() {
                    return Err(TypeSignatureError::ParameterCount {
                        base: base.clone(),
                        expected: 0,
                        found: parameters.len(),
                    });
                }
                Ok(data_type)
            }
        }
    }

    /// Parse the textual form produced by `Display`.
    ///
    /// Identifiers made only of uppercase ASCII letters are type variables
    /// (`E`, `V`); everything else is a base type name, which may contain
    /// spaces (`double precision`).
    pub fn parse(input: &str) -> Result<TypeSignature, TypeSignatureError> {
        let mut parser = SignatureParser { input, pos: 0 };
        let signature = parser.parse_signature()?;
        if parser.pos != input.len() {
            return Err(parser.malformed());
        }
        Ok(signature)
    }
}

impl From<&DataType> for TypeSignature {
    fn from(data_type: &DataType) -> Self {
        data_type.type_signature()
    }
}

impl fmt::Display for TypeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSignature::Variable(name) => f.write_str(name),
            TypeSignature::Type { base, parameters } => {
                f.write_str(base)?;
                if !parameters.is_empty() {
                    f.write_str("(")?;
                    for (i, parameter) in parameters.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{parameter}")?;
                    }
                    f.write_str(")")?;
                }
                Ok(())
            }
        }
    }
}

/// Recursive-descent parser over `name` / `name(sig, sig, ...)`.
struct SignatureParser<'a> {
    input: &'a str,
    pos: usize,
}

impl SignatureParser<'_> {
    fn parse_signature(&mut self) -> Result<TypeSignature, TypeSignatureError> {
        let rest = &self.input[self.pos..];
        let name_len = rest.find(['(', ',', ')']).unwrap_or(rest.len());
        let name = rest[..name_len].trim();
        if name.is_empty() {
            return Err(self.malformed());
        }
        self.pos += name_len;

        if !self.eat('(') {
            return Ok(if name.bytes().all(|b| b.is_ascii_uppercase()) {
                TypeSignature::variable(name)
            } else {
                TypeSignature::base(name)
            });
        }

        let mut parameters = vec![self.parse_signature()?];
        while self.eat(',') {
            parameters.push(self.parse_signature()?);
        }
        if !self.eat(')') {
            return Err(self.malformed());
        }
        Ok(TypeSignature::parameterized(name, parameters))
    }

    /// Consume `c` (and surrounding whitespace) if it is next.
    fn eat(&mut self, c: char) -> bool {
        let rest = &self.input[self.pos..];
        let trimmed = rest.trim_start();
        if trimmed.starts_with(c) {
            let after = trimmed[c.len_utf8()..].trim_start();
            self.pos = self.input.len() - after.len();
            true
        } else {
            false
        }
    }

    fn malformed(&self) -> TypeSignatureError {
        TypeSignatureError::Malformed {
            input: self.input.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests;
