//! Choosing among several candidates that all bind to a call site.
//!
//! Used by the coercion tiers only. Each step keeps the candidates no other
//! candidate strictly beats:
//!
//! 1. most arguments matching their bound type exactly
//! 2. most specific: `a` is more specific than `b` if `a`'s bound argument
//!    types bind to `b`'s declared signature under precedence-only coercion
//!    and `a` declares at least as many arguments as `b`; `a` beats `b` only
//!    if the reverse does not hold as well
//! 3. if several remain and they agree on the return type, or every actual
//!    argument is `undefined`, take the one whose signature sorts first
//!
//! Step 3 is an arbitrary pick. It only has to be stable so that the same
//! call always resolves the same way.

use std::cmp::Ordering;

use sqlfn_signature::{BoundSignature, Signature, SignatureBinder};
use sqlfn_types::{DataType, TypeSignature};

use crate::{FunctionProvider, Implementation};

/// A provider together with its binding for the current call site.
#[derive(Clone, Debug)]
pub(crate) struct ApplicableFunction<'p> {
    provider: &'p FunctionProvider,
    bound: BoundSignature,
}

impl<'p> ApplicableFunction<'p> {
    pub(crate) fn new(provider: &'p FunctionProvider, bound: BoundSignature) -> Self {
        ApplicableFunction { provider, bound }
    }

    #[inline]
    pub(crate) fn declared(&self) -> &'p Signature {
        self.provider.signature()
    }

    #[inline]
    pub(crate) fn bound(&self) -> &BoundSignature {
        &self.bound
    }

    pub(crate) fn create(&self) -> Implementation {
        self.provider.create(&self.bound)
    }

    /// Total order used by the final tie-break.
    fn cmp_for_tie_break(&self, other: &Self) -> Ordering {
        self.declared()
            .to_string()
            .cmp(&other.declared().to_string())
            .then_with(|| self.bound.to_string().cmp(&other.bound.to_string()))
    }
}

/// Reduce `applicable` to the most specific candidates.
///
/// Returns a single element when a winner exists; several when the
/// candidates stay ambiguous.
pub(crate) fn select_most_specific<'p>(
    applicable: Vec<ApplicableFunction<'p>>,
    actual: &[TypeSignature],
    argument_types: &[DataType],
) -> Vec<ApplicableFunction<'p>> {
    if applicable.len() <= 1 {
        return applicable;
    }

    let most_specific = select_undominated(applicable, |left, right| {
        exact_matches(left, actual) > exact_matches(right, actual)
    });
    if most_specific.len() <= 1 {
        return most_specific;
    }

    let most_specific = select_undominated(most_specific, is_more_specific_than);
    if most_specific.len() <= 1 {
        return most_specific;
    }

    if return_type_is_the_same(&most_specific) || argument_types.iter().all(DataType::is_undefined) {
        tracing::debug!(
            candidates = most_specific.len(),
            "picking first of equally specific candidates"
        );
        return most_specific
            .into_iter()
            .min_by(ApplicableFunction::cmp_for_tie_break)
            .into_iter()
            .collect();
    }
    most_specific
}

/// Keep every candidate no other candidate strictly dominates.
///
/// `a` dominates `b` if `a` is more specific than `b` but not the other way
/// round. Mutually specific candidates both survive. The input order is
/// preserved, so the result does not depend on which candidate came first.
fn select_undominated<'p, F>(candidates: Vec<ApplicableFunction<'p>>, is_more_specific: F) -> Vec<ApplicableFunction<'p>>
where
    F: Fn(&ApplicableFunction<'p>, &ApplicableFunction<'p>) -> bool,
{
    let dominates = |a: &ApplicableFunction<'p>, b: &ApplicableFunction<'p>| {
        is_more_specific(a, b) && !is_more_specific(b, a)
    };
    let undominated: Vec<bool> = candidates
        .iter()
        .map(|candidate| !candidates.iter().any(|other| dominates(other, candidate)))
        .collect();
    candidates
        .into_iter()
        .zip(undominated)
        .filter_map(|(candidate, keep)| keep.then_some(candidate))
        .collect()
}

fn exact_matches(function: &ApplicableFunction<'_>, actual: &[TypeSignature]) -> usize {
    function
        .bound()
        .argument_types()
        .iter()
        .zip(actual)
        .filter(|(bound, actual)| bound == actual)
        .count()
}

/// Whether `left` is at least as narrow as `right`.
pub(crate) fn is_more_specific_than(left: &ApplicableFunction<'_>, right: &ApplicableFunction<'_>) -> bool {
    SignatureBinder::with_precedence_only(right.declared())
        .bind_variables(left.bound().argument_types())
        .is_some()
        && left.declared().argument_types().len() >= right.declared().argument_types().len()
}

fn return_type_is_the_same(candidates: &[ApplicableFunction<'_>]) -> bool {
    let mut return_types = candidates.iter().map(|f| f.bound().return_data_type().ok());
    match return_types.next() {
        Some(Some(first)) => return_types.all(|other| other.as_ref() == Some(&first)),
        _ => false,
    }
}
