use pretty_assertions::assert_eq;

use super::*;

#[test]
fn display_nested() {
    let sig = TypeSignature::parameterized(
        "array",
        vec![TypeSignature::array(TypeSignature::variable("E"))],
    );
    assert_eq!(sig.to_string(), "array(array(E))");
}

#[test]
fn parse_base_with_spaces() {
    assert_eq!(
        TypeSignature::parse("double precision"),
        Ok(TypeSignature::base("double precision"))
    );
}

#[test]
fn parse_variable_and_array() {
    assert_eq!(TypeSignature::parse("E"), Ok(TypeSignature::variable("E")));
    assert_eq!(
        TypeSignature::parse("array(E)"),
        Ok(TypeSignature::array(TypeSignature::variable("E")))
    );
}

#[test]
fn parse_multiple_parameters() {
    assert_eq!(
        TypeSignature::parse("map( text , array(V) )"),
        Ok(TypeSignature::parameterized(
            "map",
            vec![
                TypeSignature::base("text"),
                TypeSignature::array(TypeSignature::variable("V")),
            ]
        ))
    );
}

#[test]
fn parse_rejects_malformed() {
    for input in ["", "array(", "array()", "array(text", "text)", "array(text) x"] {
        assert!(
            matches!(
                TypeSignature::parse(input),
                Err(TypeSignatureError::Malformed { .. })
            ),
            "{input:?} should be malformed"
        );
    }
}

#[test]
fn display_parse_round_trip() {
    for text in ["integer", "array(text)", "array(array(E))", "timestamp with time zone"] {
        let parsed = TypeSignature::parse(text);
        assert_eq!(parsed.map(|s| s.to_string()), Ok(text.to_owned()));
    }
}

#[test]
fn structural_equality_includes_variable_names() {
    assert_ne!(
        TypeSignature::array(TypeSignature::variable("E")),
        TypeSignature::array(TypeSignature::variable("T"))
    );
}

#[test]
fn create_type_fails_on_unbound_variable() {
    let sig = TypeSignature::array(TypeSignature::variable("E"));
    assert_eq!(
        sig.create_type(),
        Err(TypeSignatureError::UnboundVariable("E".to_owned()))
    );
}

#[test]
fn create_type_checks_parameter_count() {
    assert_eq!(
        TypeSignature::parameterized("integer", vec![TypeSignature::base("text")]).create_type(),
        Err(TypeSignatureError::ParameterCount {
            base: "integer".to_owned(),
            expected: 0,
            found: 1,
        })
    );
    assert_eq!(
        TypeSignature::base("array").create_type(),
        Err(TypeSignatureError::ParameterCount {
            base: "array".to_owned(),
            expected: 1,
            found: 0,
        })
    );
}

#[test]
fn create_type_unknown_base() {
    assert_eq!(
        TypeSignature::base("varchar2").create_type(),
        Err(TypeSignatureError::UnknownType("varchar2".to_owned()))
    );
}

#[test]
fn create_type_inverts_type_signature() {
    for t in DataType::PRIMITIVES {
        assert_eq!(t.type_signature().create_type(), Ok(t.clone()));
    }
}

#[test]
fn substitute_replaces_bound_variables_only() {
    let sig = TypeSignature::parameterized(
        "map",
        vec![TypeSignature::variable("K"), TypeSignature::variable("V")],
    );
    let substituted = sig.substitute(&|name: &str| {
        (name == "K").then(|| TypeSignature::base("text"))
    });
    assert_eq!(substituted.to_string(), "map(text, V)");
    assert!(substituted.has_variables());
}

#[test]
fn collect_variables_in_pre_order() {
    let sig = TypeSignature::parse("map(K, array(V))");
    let sig = match sig {
        Ok(sig) => sig,
        Err(e) => panic!("{e}"),
    };
    let mut vars = Vec::new();
    sig.collect_variables(&mut vars);
    assert_eq!(vars, vec!["K", "V"]);
}
