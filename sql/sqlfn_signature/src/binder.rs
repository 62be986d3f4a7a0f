//! Signature binding: unify declared argument types with actual ones.
//!
//! # Algorithm
//!
//! 1. Expand the declared argument list to the actual arity. A variadic
//!    signature repeats its last declared type; any other arity mismatch is
//!    an immediate no-match.
//! 2. Walk declared and actual types pairwise:
//!    - a variable binds to the actual type, or, if already bound, must be
//!      compatible with the existing binding under the coercion mode (coercion
//!      modes widen the binding to the higher-precedence side)
//!    - a parameterized type with variables unifies structurally; `undefined`
//!      against it binds its free variables to `undefined` (coercion modes
//!      only)
//!    - a concrete type must match or coerce per mode
//! 3. Verify every actual type against its declared type with the final
//!    bindings substituted, since widening may have happened after an
//!    earlier position was checked.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use sqlfn_types::{coerces, CoercionMode, DataType, TypeSignature};

use crate::{BoundSignature, Signature};

/// Inline capacity for expanded argument lists; most calls have few arguments.
type ExpandedArgs<'a> = SmallVec<[&'a TypeSignature; 8]>;

/// Mapping from type variable name to the concrete type it is bound to.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct BoundVariables {
    bindings: FxHashMap<String, TypeSignature>,
}

impl BoundVariables {
    #[inline]
    pub fn get(&self, name: &str) -> Option<&TypeSignature> {
        self.bindings.get(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Substitute every bound variable in `signature`.
    pub fn apply(&self, signature: &TypeSignature) -> TypeSignature {
        signature.substitute(&|name: &str| self.bindings.get(name).cloned())
    }

    fn bind(&mut self, name: &str, data_type: &DataType) {
        self.bindings.insert(name.to_owned(), data_type.type_signature());
    }
}

/// Binds a declared signature to actual argument types under one coercion
/// mode.
#[derive(Copy, Clone, Debug)]
pub struct SignatureBinder<'a> {
    declared: &'a Signature,
    mode: CoercionMode,
}

impl<'a> SignatureBinder<'a> {
    pub fn new(declared: &'a Signature, mode: CoercionMode) -> Self {
        SignatureBinder { declared, mode }
    }

    /// Binder used for specificity comparison between candidates.
    pub fn with_precedence_only(declared: &'a Signature) -> Self {
        Self::new(declared, CoercionMode::PrecedenceOnly)
    }

    #[inline]
    pub fn mode(&self) -> CoercionMode {
        self.mode
    }

    /// Bind the declared signature to `actual` argument types.
    ///
    /// Returns `None` if the arity does not fit, a type does not match under
    /// the coercion mode, or the return type is left with unbound variables.
    pub fn bind(&self, actual: &[TypeSignature]) -> Option<BoundSignature> {
        let formals = self.expand(actual.len())?;
        let bound = self.bind_expanded(&formals, actual)?;

        let argument_types: Vec<TypeSignature> =
            formals.iter().map(|formal| bound.apply(formal)).collect();
        let return_type = bound.apply(self.declared.return_type());
        if return_type.has_variables() {
            tracing::trace!(
                signature = %self.declared,
                "return type has variables not bound by any argument"
            );
            return None;
        }

        Some(BoundSignature::new(
            self.declared.name().clone(),
            self.declared.kind(),
            argument_types,
            return_type,
        ))
    }

    /// Unify the declared argument types with `actual` without building a
    /// bound signature.
    pub fn bind_variables(&self, actual: &[TypeSignature]) -> Option<BoundVariables> {
        let formals = self.expand(actual.len())?;
        self.bind_expanded(&formals, actual)
    }

    /// Declared argument types expanded to `arity`.
    fn expand(&self, arity: usize) -> Option<ExpandedArgs<'a>> {
        let declared = self.declared.argument_types();
        match declared.split_last() {
            Some((variadic, fixed)) if self.declared.is_variable_arity() => {
                if arity < fixed.len() {
                    return None;
                }
                let repeated = std::iter::repeat(variadic).take(arity - fixed.len());
                Some(fixed.iter().chain(repeated).collect())
            }
            _ if declared.len() == arity => Some(declared.iter().collect()),
            _ => None,
        }
    }

    fn bind_expanded(
        &self,
        formals: &[&TypeSignature],
        actual: &[TypeSignature],
    ) -> Option<BoundVariables> {
        let actual_types = actual
            .iter()
            .map(TypeSignature::create_type)
            .collect::<Result<Vec<_>, _>>()
            .ok()?;

        let mut bound = BoundVariables::default();
        for (formal, actual) in formals.iter().zip(&actual_types) {
            self.unify(formal, actual, &mut bound)?;
        }

        for (formal, actual) in formals.iter().zip(&actual_types) {
            let target = bound.apply(formal).create_type().ok()?;
            if !coerces(actual, &target, self.mode) {
                return None;
            }
        }
        Some(bound)
    }

    fn unify(&self, formal: &TypeSignature, actual: &DataType, bound: &mut BoundVariables) -> Option<()> {
        match formal {
            TypeSignature::Variable(name) => self.unify_variable(name, actual, bound),
            TypeSignature::Type { .. } if !formal.has_variables() => {
                let declared = formal.create_type().ok()?;
                coerces(actual, &declared, self.mode).then_some(())
            }
            TypeSignature::Type { base, parameters } => {
                if actual.is_undefined() {
                    if !self.mode.allows_coercion() {
                        return None;
                    }
                    let mut free = Vec::new();
                    formal.collect_variables(&mut free);
                    for name in free {
                        if bound.get(name).is_none() {
                            bound.bind(name, &DataType::Undefined);
                        }
                    }
                    return Some(());
                }
                match (actual, parameters.as_slice()) {
                    (DataType::Array(inner), [element]) if base == DataType::ARRAY_NAME => {
                        self.unify(element, inner, bound)
                    }
                    _ => None,
                }
            }
        }
    }

    fn unify_variable(&self, name: &str, actual: &DataType, bound: &mut BoundVariables) -> Option<()> {
        let binding_info = self.declared.binding_info();
        debug_assert!(
            binding_info.constraint(name).is_some(),
            "type variable `{name}` of `{}` has no constraint",
            self.declared
        );
        if let Some(constraint) = binding_info.constraint(name) {
            if !constraint.admits(actual) {
                return None;
            }
        }

        let Some(existing) = bound.get(name) else {
            bound.bind(name, actual);
            return Some(());
        };
        let existing = existing.create_type().ok()?;
        if existing == *actual {
            return Some(());
        }
        if !self.mode.allows_coercion() {
            return None;
        }

        // Widen towards the higher-precedence side when both directions work.
        let widen = coerces(&existing, actual, self.mode);
        if widen && actual.precedes(&existing) {
            bound.bind(name, actual);
            Some(())
        } else if coerces(actual, &existing, self.mode) {
            Some(())
        } else if widen {
            bound.bind(name, actual);
            Some(())
        } else {
            None
        }
    }
}
