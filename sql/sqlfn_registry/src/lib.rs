//! Function registry and overload resolution.
//!
//! `Functions` holds two tables of `FunctionProvider`s keyed by
//! `FunctionName`: built-ins, fixed at startup, and user-defined functions,
//! replaced per schema by DDL. Resolution picks exactly one provider for a
//! call site and builds its implementation.
//!
//! # Lookup Order
//!
//! ```text
//! No schema:    built-ins (name, then search path) -> user-defined (name, then search path)
//! With schema:  built-ins (schema.name) -> user-defined (schema.name)
//! ```
//!
//! # Matching Tiers
//!
//! Candidates for the resolved name are tried in four tiers; the first tier
//! that yields exactly one match wins:
//!
//! 1. no type variables, no coercion
//! 2. type variables, no coercion
//! 3. coercion allowed, precedence-only coercion
//! 4. coercion allowed, full coercion
//!
//! Tiers 3 and 4 reduce several matches by specificity (see `specificity`).

pub mod builtins;
mod call;
mod error;
mod provider;
mod registry;
mod resolver;
mod search_path;
mod specificity;
mod symbol;
mod tracing_setup;

pub use call::FunctionCall;
pub use error::ResolveError;
pub use provider::{
    BuiltinFunction, FunctionFactory, FunctionImplementation, FunctionProvider, Implementation,
    UserDefinedFunction,
};
pub use registry::{FunctionTable, Functions, FunctionsBuilder};
pub use search_path::{SearchPath, DEFAULT_SCHEMA, PG_CATALOG_SCHEMA};
pub use symbol::Symbol;
pub use tracing_setup::init_tracing;
