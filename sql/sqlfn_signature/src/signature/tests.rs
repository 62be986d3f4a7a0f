#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;

use super::*;
use crate::VariableKind;

fn ts(text: &str) -> TypeSignature {
    TypeSignature::parse(text).expect("valid type signature")
}

#[test]
fn display_variadic() {
    let sig = Signature::scalar(FunctionName::unqualified("concat"))
        .argument_types([ts("text")])
        .variable_arity()
        .return_type(ts("text"))
        .build();
    assert_eq!(sig.to_string(), "concat(text...):text");
}

#[test]
fn display_qualified_no_args() {
    let sig = Signature::scalar(FunctionName::qualified("doc", "now"))
        .return_type(ts("timestamp with time zone"))
        .build();
    assert_eq!(sig.to_string(), "doc.now():timestamp with time zone");
}

#[test]
fn build_declares_undeclared_variables() {
    let sig = Signature::scalar(FunctionName::unqualified("array_cat"))
        .argument_types([ts("array(E)"), ts("array(E)")])
        .return_type(ts("array(E)"))
        .build();
    let info = sig.binding_info();
    assert!(!info.is_exact());
    assert_eq!(info.type_variable_constraints().len(), 1);
    assert_eq!(info.constraint("E").map(TypeVariableConstraint::kind), Some(VariableKind::Any));
}

#[test]
fn explicit_constraint_wins_over_default() {
    let sig = Signature::scalar(FunctionName::unqualified("abs"))
        .argument_types([ts("N")])
        .return_type(ts("N"))
        .type_variable(TypeVariableConstraint::numeric("N"))
        .build();
    assert_eq!(
        sig.binding_info().constraint("N").map(TypeVariableConstraint::kind),
        Some(VariableKind::Numeric)
    );
}

#[test]
fn forbid_coercion() {
    let sig = Signature::scalar(FunctionName::unqualified("to_char"))
        .argument_types([ts("timestamp without time zone"), ts("text")])
        .return_type(ts("text"))
        .forbid_coercion()
        .build();
    assert!(!sig.binding_info().is_coercion_allowed());
}

#[test]
fn default_return_type_is_undefined() {
    let sig = Signature::aggregate(FunctionName::unqualified("x")).build();
    assert_eq!(sig.return_type(), &DataType::Undefined.type_signature());
    assert_eq!(sig.kind(), FunctionKind::Aggregate);
}

#[test]
fn bound_signature_from_types() {
    let declared = Signature::scalar(FunctionName::unqualified("abs"))
        .argument_types([ts("N")])
        .return_type(ts("N"))
        .build();
    let bound = BoundSignature::from_types(&declared, &[DataType::Long], &DataType::Long);
    assert_eq!(bound.to_string(), "abs(bigint):bigint");
    assert_eq!(bound.argument_data_types(), Ok(vec![DataType::Long]));
    assert_eq!(bound.return_data_type(), Ok(DataType::Long));
}

#[test]
fn signatures_with_different_variable_names_differ() {
    let a = Signature::scalar(FunctionName::unqualified("f"))
        .argument_types([ts("E")])
        .return_type(ts("E"))
        .build();
    let b = Signature::scalar(FunctionName::unqualified("f"))
        .argument_types([ts("T")])
        .return_type(ts("T"))
        .build();
    assert_ne!(a, b);
}
