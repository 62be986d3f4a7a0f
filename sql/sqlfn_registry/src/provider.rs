//! Registered functions and the implementations they produce.
//!
//! A `FunctionProvider` pairs a declared `Signature` with a factory. Once
//! resolution has picked a provider and bound its signature, the factory
//! turns `(declared, bound)` into an `Implementation`. Factories never
//! resolve anything themselves.

use std::fmt;
use std::sync::Arc;

use sqlfn_signature::{BoundSignature, FunctionKind, Signature};

/// A resolved function, ready to be planned.
pub trait FunctionImplementation: fmt::Debug + Send + Sync {
    /// The declared signature the implementation was created from.
    fn signature(&self) -> &Signature;

    /// The signature bound to the call site's argument types.
    fn bound_signature(&self) -> &BoundSignature;

    fn kind(&self) -> FunctionKind {
        self.signature().kind()
    }

    /// The user-defined function behind this implementation, if any.
    fn as_user_defined(&self) -> Option<&UserDefinedFunction> {
        None
    }
}

/// Shared handle to an implementation.
pub type Implementation = Arc<dyn FunctionImplementation>;

type FactoryFn = dyn Fn(&Signature, &BoundSignature) -> Implementation + Send + Sync;

/// Builds an implementation from a declared and a bound signature.
#[derive(Clone)]
pub struct FunctionFactory(Arc<FactoryFn>);

impl FunctionFactory {
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn(&Signature, &BoundSignature) -> Implementation + Send + Sync + 'static,
    {
        FunctionFactory(Arc::new(factory))
    }

    /// Factory producing `BuiltinFunction`s.
    pub fn builtin() -> Self {
        Self::new(|declared, bound| Arc::new(BuiltinFunction::new(declared.clone(), bound.clone())))
    }

    #[inline]
    pub fn create(&self, declared: &Signature, bound: &BoundSignature) -> Implementation {
        (self.0)(declared, bound)
    }
}

impl fmt::Debug for FunctionFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FunctionFactory(..)")
    }
}

/// A declared signature and the factory for its implementations.
#[derive(Clone, Debug)]
pub struct FunctionProvider {
    signature: Signature,
    factory: FunctionFactory,
}

impl FunctionProvider {
    pub fn new(signature: Signature, factory: FunctionFactory) -> Self {
        FunctionProvider { signature, factory }
    }

    /// A built-in function.
    pub fn builtin(signature: Signature) -> Self {
        Self::new(signature, FunctionFactory::builtin())
    }

    /// A user-defined function written in `language`.
    pub fn user_defined(signature: Signature, language: impl Into<String>, definition: impl Into<String>) -> Self {
        let language: Arc<str> = Arc::from(language.into());
        let definition: Arc<str> = Arc::from(definition.into());
        let factory = FunctionFactory::new(move |declared, bound| {
            Arc::new(UserDefinedFunction {
                signature: declared.clone(),
                bound_signature: bound.clone(),
                language: Arc::clone(&language),
                definition: Arc::clone(&definition),
            })
        });
        Self::new(signature, factory)
    }

    #[inline]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    #[inline]
    pub fn factory(&self) -> &FunctionFactory {
        &self.factory
    }

    /// Create the implementation for a binding of this provider's signature.
    pub fn create(&self, bound: &BoundSignature) -> Implementation {
        self.factory.create(&self.signature, bound)
    }
}

/// Implementation of a built-in function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuiltinFunction {
    signature: Signature,
    bound_signature: BoundSignature,
}

impl BuiltinFunction {
    pub fn new(signature: Signature, bound_signature: BoundSignature) -> Self {
        BuiltinFunction {
            signature,
            bound_signature,
        }
    }
}

impl FunctionImplementation for BuiltinFunction {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn bound_signature(&self) -> &BoundSignature {
        &self.bound_signature
    }
}

/// Implementation of a user-defined function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserDefinedFunction {
    signature: Signature,
    bound_signature: BoundSignature,
    language: Arc<str>,
    definition: Arc<str>,
}

impl UserDefinedFunction {
    /// Language the body is written in, e.g. `javascript`.
    #[inline]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Function body as given in `CREATE FUNCTION`.
    #[inline]
    pub fn definition(&self) -> &str {
        &self.definition
    }
}

impl FunctionImplementation for UserDefinedFunction {
    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn bound_signature(&self) -> &BoundSignature {
        &self.bound_signature
    }

    fn as_user_defined(&self) -> Option<&UserDefinedFunction> {
        Some(self)
    }
}
