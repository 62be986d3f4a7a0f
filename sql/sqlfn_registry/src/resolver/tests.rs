#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]

use pretty_assertions::assert_eq;

use super::*;

fn ts(text: &str) -> TypeSignature {
    TypeSignature::parse(text).expect("valid type signature")
}

fn signature(name: FunctionName, arguments: &[&str], return_type: &str) -> Signature {
    Signature::scalar(name)
        .argument_types(arguments.iter().map(|t| ts(t)))
        .return_type(ts(return_type))
        .build()
}

fn builtin(name: &str, arguments: &[&str], return_type: &str) -> FunctionProvider {
    FunctionProvider::builtin(signature(FunctionName::unqualified(name), arguments, return_type))
}

fn udf(schema: &str, name: &str, arguments: &[&str], return_type: &str) -> FunctionProvider {
    FunctionProvider::user_defined(
        signature(FunctionName::qualified(schema, name), arguments, return_type),
        "javascript",
        "function f() {}",
    )
}

fn functions(builtins: impl IntoIterator<Item = FunctionProvider>) -> Functions {
    let mut builder = Functions::builder();
    for provider in builtins {
        builder.register(provider);
    }
    builder.build()
}

fn empty() -> Functions {
    Functions::builder().build()
}

fn types(names: &[&str]) -> Vec<DataType> {
    names
        .iter()
        .map(|name| ts(name).create_type().expect("concrete type"))
        .collect()
}

/// `declared -> bound` of the resolved implementation.
fn resolve(functions: &Functions, name: &str, arguments: &[&str], path: &SearchPath) -> Result<String, ResolveError> {
    functions
        .resolve(None, name, &types(arguments), path)
        .map(|found| format!("{} -> {}", found.signature(), found.bound_signature()))
}

#[test]
fn exact_tier_wins_over_generic() {
    let functions = functions([builtin("f", &["E"], "E"), builtin("f", &["integer"], "text")]);
    assert_eq!(
        resolve(&functions, "f", &["integer"], &SearchPath::default()),
        Ok("f(integer):text -> f(integer):text".to_owned())
    );
}

#[test]
fn generic_tier_wins_over_coercion() {
    let functions = functions([
        builtin("f", &["bigint", "bigint"], "bigint"),
        builtin("f", &["E", "E"], "E"),
    ]);
    assert_eq!(
        resolve(&functions, "f", &["integer", "integer"], &SearchPath::default()),
        Ok("f(E, E):E -> f(integer, integer):integer".to_owned())
    );
}

#[test]
fn precedence_tier_wins_over_full_coercion() {
    let functions = functions([builtin("f", &["text"], "text"), builtin("f", &["bigint"], "bigint")]);
    assert_eq!(
        resolve(&functions, "f", &["integer"], &SearchPath::default()),
        Ok("f(bigint):bigint -> f(bigint):bigint".to_owned())
    );
}

#[test]
fn full_coercion_is_the_last_resort() {
    let functions = functions([builtin("f", &["integer"], "integer")]);
    assert_eq!(
        resolve(&functions, "f", &["text"], &SearchPath::default()),
        Ok("f(integer):integer -> f(integer):integer".to_owned())
    );
}

#[test]
fn forbidden_coercion_only_matches_exactly() {
    let to_char = Signature::scalar(FunctionName::unqualified("to_char"))
        .argument_types([ts("timestamp without time zone"), ts("text")])
        .return_type(ts("text"))
        .forbid_coercion()
        .build();
    let functions = functions([FunctionProvider::builtin(to_char)]);
    let path = SearchPath::default();

    assert!(resolve(&functions, "to_char", &["timestamp without time zone", "text"], &path).is_ok());

    let error = resolve(&functions, "to_char", &["timestamp with time zone", "text"], &path)
        .expect_err("coercion is forbidden");
    assert_eq!(
        error.to_string(),
        "Unknown function: to_char(timestamp with time zone, text), no overload found for \
         matching argument types: (timestamp with time zone, text). Possible candidates: \
         to_char(timestamp without time zone, text):text"
    );
    assert!(!error.candidates()[0].binding_info().is_coercion_allowed());
}

#[test]
fn ambiguous_exact_matches_fall_through() {
    let functions = functions([
        FunctionProvider::builtin(
            Signature::scalar(FunctionName::unqualified("concat"))
                .argument_types([ts("text")])
                .variable_arity()
                .return_type(ts("text"))
                .build(),
        ),
        builtin("concat", &["text", "text"], "text"),
    ]);
    let path = SearchPath::default();

    assert_eq!(
        resolve(&functions, "concat", &["text", "text"], &path),
        Ok("concat(text, text):text -> concat(text, text):text".to_owned())
    );
    assert_eq!(
        resolve(&functions, "concat", &["text"], &path),
        Ok("concat(text...):text -> concat(text):text".to_owned())
    );
    assert_eq!(
        resolve(&functions, "concat", &[], &path),
        Ok("concat(text...):text -> concat():text".to_owned())
    );
    assert_eq!(
        resolve(&functions, "concat", &["text", "text", "text"], &path),
        Ok("concat(text...):text -> concat(text, text, text):text".to_owned())
    );
}

#[test]
fn ambiguity_after_full_coercion_is_unknown_function() {
    let functions = functions([
        builtin("f", &["integer", "bigint"], "integer"),
        builtin("f", &["bigint", "integer"], "bigint"),
    ]);
    let error = resolve(&functions, "f", &["integer", "integer"], &SearchPath::default())
        .expect_err("ambiguous call");
    let candidates: Vec<String> = error.candidates().iter().map(ToString::to_string).collect();
    assert_eq!(candidates, vec!["f(integer, bigint):integer", "f(bigint, integer):bigint"]);
}

#[test]
fn same_arguments_with_different_return_types_are_ambiguous() {
    let bigint = builtin("k", &["bigint"], "bigint");
    let text = builtin("k", &["bigint"], "text");

    for providers in [[bigint.clone(), text.clone()], [text, bigint]] {
        let functions = functions(providers);
        let error = resolve(&functions, "k", &["integer"], &SearchPath::default())
            .expect_err("neither overload is more specific");
        assert!(matches!(error, ResolveError::UnknownFunction { .. }));
        assert_eq!(error.candidates().len(), 2);
    }
}

#[test]
fn search_path_order_decides() {
    let functions = empty();
    functions.register_schema("a", [udf("a", "f", &["integer"], "integer")]);
    functions.register_schema("b", [udf("b", "f", &["integer"], "bigint")]);

    assert_eq!(
        resolve(&functions, "f", &["integer"], &SearchPath::new(["a", "b"])),
        Ok("a.f(integer):integer -> a.f(integer):integer".to_owned())
    );
    assert_eq!(
        resolve(&functions, "f", &["integer"], &SearchPath::new(["b", "a"])),
        Ok("b.f(integer):bigint -> b.f(integer):bigint".to_owned())
    );

    let qualified = functions
        .resolve(Some("b"), "f", &[DataType::Integer], &SearchPath::new(["a"]))
        .expect("qualified call");
    assert_eq!(qualified.signature().name(), &FunctionName::qualified("b", "f"));
}

#[test]
fn first_schema_with_candidates_is_final() {
    let functions = empty();
    functions.register_schema("a", [udf("a", "f", &["boolean"], "boolean")]);
    functions.register_schema("b", [udf("b", "f", &["integer"], "integer")]);

    let error = resolve(&functions, "f", &["integer"], &SearchPath::new(["a", "b"]))
        .expect_err("a.f does not accept integer");
    let candidates: Vec<String> = error.candidates().iter().map(ToString::to_string).collect();
    assert_eq!(candidates, vec!["a.f(boolean):boolean"]);
}

#[test]
fn builtins_shadow_user_defined_functions() {
    let functions = functions([builtin("f", &["integer"], "integer")]);
    functions.register_schema("doc", [udf("doc", "f", &["integer"], "integer")]);
    let path = SearchPath::default();

    let found = functions
        .resolve(None, "f", &[DataType::Integer], &path)
        .expect("built-in");
    assert!(found.as_user_defined().is_none());

    let found = functions
        .resolve(Some("doc"), "f", &[DataType::Integer], &path)
        .expect("user-defined");
    assert!(found.as_user_defined().is_some());
}

#[test]
fn builtin_mismatch_does_not_consult_user_defined_functions() {
    let functions = functions([builtin("f", &["boolean"], "boolean")]);
    functions.register_schema("doc", [udf("doc", "f", &["integer"], "integer")]);

    let error = resolve(&functions, "f", &["integer"], &SearchPath::default()).expect_err("no fallthrough");
    let candidates: Vec<String> = error.candidates().iter().map(ToString::to_string).collect();
    assert_eq!(candidates, vec!["f(boolean):boolean"]);
}

#[test]
fn user_defined_function_found_through_search_path() {
    let functions = empty();
    functions.register_schema("doc", [udf("doc", "my_fn", &["bigint"], "bigint")]);

    let found = functions
        .resolve(None, "my_fn", &[DataType::Integer], &SearchPath::default())
        .expect("doc.my_fn");
    assert_eq!(found.bound_signature().to_string(), "doc.my_fn(bigint):bigint");
    assert_eq!(
        found.as_user_defined().map(|udf| udf.language().to_owned()),
        Some("javascript".to_owned())
    );
}

#[test]
fn unknown_qualified_name_is_not_searched() {
    let functions = functions([builtin("concat", &["text", "text"], "text")]);
    let error = functions
        .resolve(Some("x"), "concat", &[DataType::Text, DataType::Text], &SearchPath::default())
        .expect_err("x.concat does not exist");
    assert_eq!(error.to_string(), "Unknown function: x.concat(text, text)");
}

#[test]
fn pg_catalog_is_searched_implicitly() {
    let functions = functions([FunctionProvider::builtin(signature(
        FunctionName::qualified(crate::PG_CATALOG_SCHEMA, "format_type"),
        &["integer", "integer"],
        "text",
    ))]);

    for path in [SearchPath::default(), SearchPath::new(["doc", "pg_catalog"])] {
        assert_eq!(
            resolve(&functions, "format_type", &["integer", "integer"], &path),
            Ok("pg_catalog.format_type(integer, integer):text -> \
                pg_catalog.format_type(integer, integer):text"
                .to_owned())
        );
    }
}

#[test]
fn resolve_by_signature_uses_given_types() {
    let coalesce = Signature::scalar(FunctionName::unqualified("coalesce"))
        .argument_types([ts("E")])
        .variable_arity()
        .return_type(ts("E"))
        .build();
    let functions = functions([FunctionProvider::builtin(coalesce.clone())]);

    let found = functions
        .resolve_by_signature(&coalesce, &[DataType::Integer, DataType::Integer], &DataType::Integer)
        .expect("registered signature");
    assert_eq!(found.signature(), &coalesce);
    assert_eq!(found.bound_signature().to_string(), "coalesce(integer, integer):integer");

    let unknown = signature(FunctionName::unqualified("coalesce"), &["text"], "text");
    assert_eq!(
        functions
            .resolve_by_signature(&unknown, &[DataType::Text], &DataType::Text)
            .map(|found| found.bound_signature().to_string()),
        Err(ResolveError::SignatureNotFound(unknown))
    );
}

#[test]
fn resolve_call_prefers_pinned_signature() {
    let functions = empty();
    functions.register_schema("a", [udf("a", "f", &["integer"], "integer")]);
    functions.register_schema("b", [udf("b", "f", &["integer"], "bigint")]);
    let path = SearchPath::new(["a"]);

    let unpinned = FunctionCall::new(FunctionName::unqualified("f"), vec![DataType::Integer]);
    let found = functions.resolve_call(&unpinned, &path).expect("a.f");
    assert_eq!(found.signature().name(), &FunctionName::qualified("a", "f"));

    let pinned_signature = signature(FunctionName::qualified("b", "f"), &["integer"], "bigint");
    let pinned = FunctionCall::with_signature(vec![DataType::Integer], pinned_signature.clone(), DataType::Long);
    let found = functions.resolve_call(&pinned, &path).expect("b.f");
    assert_eq!(found.signature(), &pinned_signature);
    assert_eq!(found.bound_signature().to_string(), "b.f(integer):bigint");
}
