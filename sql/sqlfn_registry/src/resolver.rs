//! Overload resolution.

use sqlfn_signature::{BoundSignature, FunctionName, Signature, SignatureBinder};
use sqlfn_types::{CoercionMode, DataType, TypeSignature};

use crate::registry::FunctionTable;
use crate::specificity::{select_most_specific, ApplicableFunction};
use crate::{FunctionCall, FunctionProvider, Functions, Implementation, ResolveError, SearchPath, Symbol};

/// Matching tiers, tried in order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Tier {
    /// Candidates without type variables, no coercion.
    Exact,
    /// Candidates with type variables, no coercion.
    Generic,
    /// Candidates allowing coercion, precedence-only coercion.
    Precedence,
    /// Candidates allowing coercion, full coercion.
    Coercion,
}

impl Tier {
    const ALL: [Tier; 4] = [Tier::Exact, Tier::Generic, Tier::Precedence, Tier::Coercion];

    fn mode(self) -> CoercionMode {
        match self {
            Tier::Exact | Tier::Generic => CoercionMode::None,
            Tier::Precedence => CoercionMode::PrecedenceOnly,
            Tier::Coercion => CoercionMode::Full,
        }
    }

    fn admits(self, signature: &Signature) -> bool {
        let binding_info = signature.binding_info();
        match self {
            Tier::Exact => binding_info.is_exact(),
            Tier::Generic => !binding_info.is_exact(),
            Tier::Precedence | Tier::Coercion => binding_info.is_coercion_allowed(),
        }
    }
}

impl Functions {
    /// Resolve a call of `schema.name` (or plain `name`) with `arguments`.
    ///
    /// Built-ins are consulted before user-defined functions. If one of the
    /// two tables knows the name but no candidate fits, resolution fails
    /// without looking at the other table.
    #[tracing::instrument(level = "debug", skip_all, fields(schema = ?schema, name = name))]
    pub fn resolve<S: Symbol>(
        &self,
        schema: Option<&str>,
        name: &str,
        arguments: &[S],
        search_path: &SearchPath,
    ) -> Result<Implementation, ResolveError> {
        let name = FunctionName::new(schema, name);
        let argument_types: Vec<DataType> = arguments.iter().map(|arg| arg.value_type().clone()).collect();

        if let Some(found) = resolve_in(&self.builtins, &name, &argument_types, search_path)? {
            return Ok(found);
        }
        let udfs = self.udfs.snapshot();
        if let Some(found) = resolve_in(&udfs, &name, &argument_types, search_path)? {
            return Ok(found);
        }
        Err(ResolveError::unknown_function(name, argument_types, Vec::new()))
    }

    /// Create the implementation of an exactly known signature.
    ///
    /// No matching happens: `argument_types` and `return_type` are taken as
    /// the bound types.
    pub fn resolve_by_signature(
        &self,
        signature: &Signature,
        argument_types: &[DataType],
        return_type: &DataType,
    ) -> Result<Implementation, ResolveError> {
        let udfs = self.udfs.snapshot();
        let provider = find_provider(&self.builtins, signature)
            .or_else(|| find_provider(&udfs, signature))
            .ok_or_else(|| ResolveError::SignatureNotFound(signature.clone()))?;
        let bound = BoundSignature::from_types(signature, argument_types, return_type);
        Ok(provider.create(&bound))
    }

    /// Resolve an already-planned call: by its pinned signature if it has
    /// one, by name and argument types otherwise.
    pub fn resolve_call<S: Symbol>(
        &self,
        call: &FunctionCall<S>,
        search_path: &SearchPath,
    ) -> Result<Implementation, ResolveError> {
        match call.signature() {
            Some(signature) => self.resolve_by_signature(signature, &call.argument_types(), call.return_type()),
            None => self.resolve(call.name().schema(), call.name().name(), call.arguments(), search_path),
        }
    }
}

fn find_provider<'t>(table: &'t FunctionTable, signature: &Signature) -> Option<&'t FunctionProvider> {
    table
        .get(signature.name())?
        .iter()
        .find(|provider| provider.signature() == signature)
}

/// Candidates for `name` in one table: the name as given, then (for
/// unqualified names) the first search-path schema that has any.
fn candidates<'t>(table: &'t FunctionTable, name: &FunctionName, search_path: &SearchPath) -> Option<&'t [FunctionProvider]> {
    if let Some(providers) = table.get(name) {
        return Some(providers.as_slice());
    }
    if name.is_qualified() {
        return None;
    }
    search_path
        .iter()
        .find_map(|schema| table.get(&name.with_schema(schema)))
        .map(Vec::as_slice)
}

/// `Ok(None)` if `table` has no candidates for the name.
fn resolve_in(
    table: &FunctionTable,
    name: &FunctionName,
    argument_types: &[DataType],
    search_path: &SearchPath,
) -> Result<Option<Implementation>, ResolveError> {
    let Some(candidates) = candidates(table, name, search_path).filter(|c| !c.is_empty()) else {
        return Ok(None);
    };
    let actual: Vec<TypeSignature> = argument_types.iter().map(DataType::type_signature).collect();

    for tier in Tier::ALL {
        if let Some(found) = match_tier(tier, candidates, &actual, argument_types) {
            return Ok(Some(found));
        }
    }

    tracing::debug!(candidates = candidates.len(), "no candidate matches");
    Err(ResolveError::unknown_function(
        name.clone(),
        argument_types.to_vec(),
        candidates.iter().map(|p| p.signature().clone()).collect(),
    ))
}

fn match_tier(
    tier: Tier,
    candidates: &[FunctionProvider],
    actual: &[TypeSignature],
    argument_types: &[DataType],
) -> Option<Implementation> {
    let mode = tier.mode();
    let mut applicable: Vec<ApplicableFunction<'_>> = candidates
        .iter()
        .filter(|provider| tier.admits(provider.signature()))
        .filter_map(|provider| {
            SignatureBinder::new(provider.signature(), mode)
                .bind(actual)
                .map(|bound| ApplicableFunction::new(provider, bound))
        })
        .collect();
    tracing::trace!(?tier, applicable = applicable.len(), "bound candidates");

    if mode.allows_coercion() {
        applicable = select_most_specific(applicable, actual, argument_types);
    }
    match applicable.as_slice() {
        [winner] => {
            tracing::trace!(?tier, signature = %winner.declared(), "resolved");
            Some(winner.create())
        }
        [] => None,
        ambiguous => {
            tracing::debug!(
                ?tier,
                candidates = ambiguous.len(),
                "several candidates match equally well"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests;
