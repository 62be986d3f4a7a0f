//! The built-in function catalog.
//!
//! Built-ins are registered unqualified, except for PostgreSQL
//! compatibility functions which live in `pg_catalog` and are reached
//! through the search path.

use sqlfn_signature::{FunctionName, Signature, SignatureBuilder, TypeVariableConstraint};
use sqlfn_types::{DataType, TypeSignature};

use crate::{FunctionProvider, FunctionsBuilder, PG_CATALOG_SCHEMA};

fn t(data_type: &DataType) -> TypeSignature {
    data_type.type_signature()
}

fn var(name: &str) -> TypeSignature {
    TypeSignature::variable(name)
}

fn array_of(element: TypeSignature) -> TypeSignature {
    TypeSignature::array(element)
}

fn name(name: &str) -> FunctionName {
    FunctionName::unqualified(name)
}

fn register(builder: &mut FunctionsBuilder, signature: SignatureBuilder) {
    builder.register(FunctionProvider::builtin(signature.build()));
}

/// Install the built-in catalog.
pub fn register_builtins(builder: &mut FunctionsBuilder) {
    register_scalars(builder);
    register_aggregates(builder);
    register_table_functions(builder);
    register_window_functions(builder);
    register_pg_catalog(builder);
    tracing::debug!(functions = builder.len(), "registered built-in functions");
}

fn register_scalars(builder: &mut FunctionsBuilder) {
    let text = t(&DataType::Text);
    let integer = t(&DataType::Integer);

    // concat
    register(
        builder,
        Signature::scalar(name("concat"))
            .argument_types([text.clone(), text.clone()])
            .return_type(text.clone()),
    );
    register(
        builder,
        Signature::scalar(name("concat"))
            .argument_types([text.clone()])
            .variable_arity()
            .return_type(text.clone()),
    );
    register(
        builder,
        Signature::scalar(name("concat"))
            .argument_types([array_of(var("E")), array_of(var("E"))])
            .return_type(array_of(var("E"))),
    );

    register(
        builder,
        Signature::scalar(name("abs"))
            .argument_types([var("N")])
            .return_type(var("N"))
            .type_variable(TypeVariableConstraint::numeric("N")),
    );
    register(
        builder,
        Signature::scalar(name("coalesce"))
            .argument_types([var("E")])
            .variable_arity()
            .return_type(var("E")),
    );

    // substr
    register(
        builder,
        Signature::scalar(name("substr"))
            .argument_types([text.clone(), integer.clone()])
            .return_type(text.clone()),
    );
    register(
        builder,
        Signature::scalar(name("substr"))
            .argument_types([text.clone(), integer.clone(), integer])
            .return_type(text.clone()),
    );

    register(
        builder,
        Signature::scalar(name("array_cat"))
            .argument_types([array_of(var("E")), array_of(var("E"))])
            .return_type(array_of(var("E"))),
    );

    // date/time
    register(
        builder,
        Signature::scalar(name("now")).return_type(t(&DataType::TimestampTz)),
    );
    for timestamp in [DataType::TimestampTz, DataType::Timestamp] {
        register(
            builder,
            Signature::scalar(name("date_trunc"))
                .argument_types([text.clone(), t(&timestamp)])
                .return_type(t(&timestamp)),
        );
    }
    register(
        builder,
        Signature::scalar(name("to_char"))
            .argument_types([t(&DataType::Timestamp), text.clone()])
            .return_type(text)
            .forbid_coercion(),
    );
}

fn register_aggregates(builder: &mut FunctionsBuilder) {
    let bigint = t(&DataType::Long);

    register(
        builder,
        Signature::aggregate(name("count")).return_type(bigint.clone()),
    );
    register(
        builder,
        Signature::aggregate(name("count"))
            .argument_types([var("V")])
            .return_type(bigint.clone()),
    );

    // Integral sums widen to bigint, the rest keep their type.
    let sums = [
        (DataType::Integer, DataType::Long),
        (DataType::Long, DataType::Long),
        (DataType::Float, DataType::Float),
        (DataType::Double, DataType::Double),
        (DataType::Numeric, DataType::Numeric),
    ];
    for (argument, result) in &sums {
        register(
            builder,
            Signature::aggregate(name("sum"))
                .argument_types([t(argument)])
                .return_type(t(result)),
        );
    }

    for data_type in [DataType::Double, DataType::Numeric] {
        register(
            builder,
            Signature::aggregate(name("avg"))
                .argument_types([t(&data_type)])
                .return_type(t(&data_type)),
        );
    }
}

fn register_table_functions(builder: &mut FunctionsBuilder) {
    let bigint = t(&DataType::Long);
    register(
        builder,
        Signature::table(name("generate_series"))
            .argument_types([bigint.clone(), bigint.clone()])
            .return_type(bigint),
    );
}

fn register_window_functions(builder: &mut FunctionsBuilder) {
    register(
        builder,
        Signature::window(name("row_number")).return_type(t(&DataType::Integer)),
    );
}

fn register_pg_catalog(builder: &mut FunctionsBuilder) {
    let integer = t(&DataType::Integer);
    register(
        builder,
        Signature::scalar(FunctionName::qualified(PG_CATALOG_SCHEMA, "format_type"))
            .argument_types([integer.clone(), integer])
            .return_type(t(&DataType::Text)),
    );
}
