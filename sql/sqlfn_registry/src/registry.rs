//! The function registry: built-in and user-defined provider tables.
//!
//! Built-ins are assembled once with `FunctionsBuilder` and never change.
//! User-defined functions live in an immutable snapshot that DDL replaces
//! wholesale, one schema at a time:
//!
//! ```text
//! reader:  snapshot.read() -> Arc clone -> look up freely
//! writer:  writer.lock() -> copy snapshot minus schema -> add entries -> swap
//! ```
//!
//! Readers hold the read lock only for the `Arc` clone, so a resolution in
//! flight keeps seeing the snapshot it started with.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;
use sqlfn_signature::{oid, FunctionName, Signature};

use crate::FunctionProvider;

/// Providers keyed by function name, in registration order per name.
pub type FunctionTable = FxHashMap<FunctionName, Vec<FunctionProvider>>;

/// Add `provider` to `table`. A provider with an identical signature is
/// replaced in place; returns whether that happened.
fn insert_provider(table: &mut FunctionTable, provider: FunctionProvider) -> bool {
    let providers = table.entry(provider.signature().name().clone()).or_default();
    match providers
        .iter_mut()
        .find(|existing| existing.signature() == provider.signature())
    {
        Some(existing) => {
            *existing = provider;
            true
        }
        None => {
            providers.push(provider);
            false
        }
    }
}

fn sorted_names(table: &FunctionTable) -> Vec<FunctionName> {
    let mut names: Vec<FunctionName> = table.keys().cloned().collect();
    names.sort();
    names
}

/// Assembles the built-in table.
#[derive(Debug, Default)]
pub struct FunctionsBuilder {
    builtins: FunctionTable,
}

impl FunctionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a built-in. Registering the same signature again replaces
    /// the earlier provider.
    pub fn register(&mut self, provider: FunctionProvider) -> &mut Self {
        if insert_provider(&mut self.builtins, provider) {
            tracing::debug!("replaced built-in with identical signature");
        }
        self
    }

    /// Number of registered signatures.
    pub fn len(&self) -> usize {
        self.builtins.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.builtins.is_empty()
    }

    pub fn build(self) -> Functions {
        Functions {
            builtins: self.builtins,
            udfs: UdfRegistry::default(),
        }
    }
}

/// Copy-on-write table of user-defined functions.
#[derive(Default)]
pub(crate) struct UdfRegistry {
    snapshot: RwLock<Arc<FunctionTable>>,
    /// Serializes writers so no update is lost between copy and swap.
    writer: Mutex<()>,
}

impl UdfRegistry {
    /// The current table; unaffected by later DDL.
    pub(crate) fn snapshot(&self) -> Arc<FunctionTable> {
        Arc::clone(&self.snapshot.read())
    }

    /// Replace every entry of `schema` with `providers`.
    fn replace_schema(&self, schema: &str, providers: Vec<FunctionProvider>) {
        let _writer = self.writer.lock();
        let current = self.snapshot();
        let mut next: FunctionTable = current
            .iter()
            .filter(|(name, _)| name.schema() != Some(schema))
            .map(|(name, providers)| (name.clone(), providers.clone()))
            .collect();
        for provider in providers {
            insert_provider(&mut next, provider);
        }
        *self.snapshot.write() = Arc::new(next);
    }
}

/// Registry of callable functions and the entry point for resolution.
///
/// `Send + Sync`; share it behind an `Arc`.
pub struct Functions {
    pub(crate) builtins: FunctionTable,
    pub(crate) udfs: UdfRegistry,
}

impl Functions {
    pub fn builder() -> FunctionsBuilder {
        FunctionsBuilder::new()
    }

    /// Registry holding the standard built-in catalog.
    pub fn with_builtins() -> Self {
        let mut builder = FunctionsBuilder::new();
        crate::builtins::register_builtins(&mut builder);
        builder.build()
    }

    /// Built-in providers registered under exactly `name`.
    pub fn builtin_resolvers(&self, name: &FunctionName) -> &[FunctionProvider] {
        self.builtins.get(name).map_or(&[], Vec::as_slice)
    }

    /// User-defined providers registered under exactly `name`.
    pub fn udf_resolvers(&self, name: &FunctionName) -> Vec<FunctionProvider> {
        self.udfs.snapshot().get(name).cloned().unwrap_or_default()
    }

    /// Names of all built-ins, sorted.
    pub fn builtin_function_names(&self) -> Vec<FunctionName> {
        sorted_names(&self.builtins)
    }

    /// Names of all user-defined functions, sorted.
    pub fn udf_function_names(&self) -> Vec<FunctionName> {
        sorted_names(&self.udfs.snapshot())
    }

    /// Atomically replace the user-defined functions of `schema`.
    ///
    /// Entries of `schema` not in `providers` are dropped. Every provider in
    /// `providers` is merged in, including ones named in another schema.
    #[tracing::instrument(level = "debug", skip(self, providers))]
    pub fn register_schema(&self, schema: &str, providers: impl IntoIterator<Item = FunctionProvider>) {
        let providers: Vec<FunctionProvider> = providers.into_iter().collect();
        tracing::debug!(functions = providers.len(), "registering schema functions");
        self.udfs.replace_schema(schema, providers);
    }

    /// Drop every user-defined function of `schema`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn deregister_schema(&self, schema: &str) {
        self.udfs.replace_schema(schema, Vec::new());
    }

    /// Signature whose object identifier is `oid`.
    ///
    /// User-defined functions are scanned before built-ins.
    pub fn find_signature_by_oid(&self, oid: i32) -> Option<Signature> {
        let udfs = self.udfs.snapshot();
        let found = udfs
            .values()
            .chain(self.builtins.values())
            .flatten()
            .map(FunctionProvider::signature)
            .find(|signature| oid::function_oid(signature) == oid)
            .cloned();
        found
    }
}

impl std::fmt::Debug for Functions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Functions")
            .field("builtins", &self.builtins.len())
            .field("udfs", &self.udfs.snapshot().len())
            .finish()
    }
}
