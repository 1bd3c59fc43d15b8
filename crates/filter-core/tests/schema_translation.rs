// crates/filter-core/tests/schema_translation.rs
use filter_core::{
    DropReason, FieldDescriptor, FilterTranslator, FilterValue, LazyTarget, OperatorSetType,
    Schema, SchemaFieldIndex, SchemaNode, SchemaRegistry, TableFilter,
};
use filter_protocol::decode_schema;
use serde_json::json;

fn filters(entries: Vec<(&str, FilterValue)>) -> TableFilter {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// Flat instrument schema: one field per operator set.
fn instrument_schema() -> Schema {
    Schema::new(SchemaNode::object([
        ("ticker", SchemaNode::maybe(SchemaNode::OperatorSet(OperatorSetType::String))),
        ("price", SchemaNode::maybe(SchemaNode::OperatorSet(OperatorSetType::Number))),
        ("date", SchemaNode::maybe(SchemaNode::OperatorSet(OperatorSetType::Date))),
        ("isActive", SchemaNode::maybe(SchemaNode::OperatorSet(OperatorSetType::Boolean))),
    ]))
}

/// Bond filter input with nested objects, lazy references and a cycle
/// back to the root type.
fn bond_schema() -> Schema {
    let registry = SchemaRegistry::new()
        .with(
            "BondFilterInput",
            SchemaNode::object([
                ("and", SchemaNode::maybe(SchemaNode::array(SchemaNode::lazy("BondFilterInput")))),
                ("or", SchemaNode::maybe(SchemaNode::array(SchemaNode::lazy("BondFilterInput")))),
                ("name", SchemaNode::maybe(SchemaNode::lazy("StringOperationFilterInput"))),
                ("couponRate", SchemaNode::maybe(SchemaNode::lazy("DecimalOperationFilterInput"))),
                ("instrument", SchemaNode::maybe(SchemaNode::lazy("InstrumentFilterInput"))),
                ("volumes", SchemaNode::maybe(SchemaNode::lazy("VolumesFilterInput"))),
            ]),
        )
        .with(
            "InstrumentFilterInput",
            SchemaNode::object([
                ("ticker", SchemaNode::maybe(SchemaNode::lazy("StringOperationFilterInput"))),
                ("exchange", SchemaNode::maybe(SchemaNode::Scalar)),
                ("bond", SchemaNode::maybe(SchemaNode::lazy("BondFilterInput"))),
            ]),
        )
        .with(
            "VolumesFilterInput",
            SchemaNode::object([
                ("volume", SchemaNode::maybe(SchemaNode::lazy("IntOperationFilterInput"))),
                ("lastTradeDate", SchemaNode::maybe(SchemaNode::lazy("DateTimeOperationFilterInput"))),
            ]),
        );

    Schema::with_registry(SchemaNode::lazy("BondFilterInput"), registry)
}

#[test]
fn interval_keys_on_number_field_use_gte_and_lte() {
    let f = filters(vec![("priceFrom", 10.into()), ("priceTo", 100.into())]);

    let expr = FilterTranslator::translate_with_schema(&f, &instrument_schema());

    assert_eq!(
        expr.to_json(),
        json!({ "and": [ { "price": { "gte": 10 } }, { "price": { "lte": 100 } } ] })
    );
}

#[test]
fn array_value_becomes_or_of_eq_in_array_order() {
    let f = filters(vec![("ticker", vec!["SBER", "GAZP"].into())]);

    let expr = FilterTranslator::translate_with_schema(&f, &instrument_schema());

    assert_eq!(
        expr.to_json(),
        json!({ "and": [ { "or": [
            { "ticker": { "eq": "SBER" } },
            { "ticker": { "eq": "GAZP" } }
        ] } ] })
    );
}

#[test]
fn date_bound_is_serialized_as_utc_midnight() {
    let f = filters(vec![("dateFrom", "01.01.2023".into())]);

    let expr = FilterTranslator::translate_with_schema(&f, &instrument_schema());

    assert_eq!(
        expr.to_json(),
        json!({ "and": [ { "date": { "gte": "2023-01-01T00:00:00.000Z" } } ] })
    );
}

#[test]
fn each_operator_set_gets_its_own_condition() {
    let f = filters(vec![
        ("ticker", "SB".into()),
        ("price", "12.5".into()),
        ("date", "15.03.2024".into()),
        ("isActive", true.into()),
    ]);

    let expr = FilterTranslator::translate_with_schema(&f, &instrument_schema());

    assert_eq!(
        expr.to_json(),
        json!({ "and": [
            { "ticker": { "contains": "SB" } },
            { "price": { "eq": 12.5 } },
            { "date": { "eq": "2024-03-15T00:00:00.000Z" } },
            { "isActive": { "eq": true } }
        ] })
    );
}

#[test]
fn invalid_date_drops_only_that_key() {
    let f = filters(vec![
        ("dateFrom", "31.13.2021".into()),
        ("ticker", "GAZP".into()),
        ("dateTo", "29.02.2023".into()),
    ]);

    let report = FilterTranslator::translate_with_schema_report(&f, &instrument_schema());

    assert_eq!(
        report.expression.to_json(),
        json!({ "and": [ { "ticker": { "contains": "GAZP" } } ] })
    );
    assert_eq!(report.dropped.len(), 2);
    assert_eq!(report.dropped[0].key, "dateFrom");
    assert_eq!(report.dropped[0].reason, DropReason::InvalidDate("31.13.2021".to_string()));
    assert_eq!(report.dropped[1].key, "dateTo");
}

#[test]
fn two_digit_year_is_dropped_as_invalid_date() {
    let f = filters(vec![("dateTo", "01.01.23".into())]);

    let report = FilterTranslator::translate_with_schema_report(&f, &instrument_schema());

    assert_eq!(report.expression.to_json(), json!({ "and": [] }));
    assert_eq!(report.dropped[0].reason, DropReason::InvalidDate("01.01.23".to_string()));
}

#[test]
fn unknown_keys_are_dropped_silently() {
    let f = filters(vec![("sector", "energy".into()), ("ticker", "LKOH".into())]);

    let report = FilterTranslator::translate_with_schema_report(&f, &instrument_schema());

    assert_eq!(
        report.expression.to_json(),
        json!({ "and": [ { "ticker": { "contains": "LKOH" } } ] })
    );
    assert_eq!(report.dropped_keys().collect::<Vec<_>>(), vec!["sector"]);
    assert_eq!(report.dropped[0].reason, DropReason::UnknownField);
}

#[test]
fn non_numeric_string_on_number_field_is_dropped() {
    let f = filters(vec![("priceFrom", "cheap".into())]);

    let report = FilterTranslator::translate_with_schema_report(&f, &instrument_schema());

    assert_eq!(report.expression.to_json(), json!({ "and": [] }));
    assert!(matches!(report.dropped[0].reason, DropReason::InvalidNumber(_)));
}

#[test]
fn walk_skips_reserved_keys_and_stops_at_cycles() {
    let index = SchemaFieldIndex::from_schema(&bond_schema());

    let paths: Vec<String> = index.iter().map(FieldDescriptor::dotted_path).collect();
    assert_eq!(index.get("instrument.ticker").map(FieldDescriptor::depth), Some(2));
    assert_eq!(
        paths,
        vec![
            "name",
            "couponRate",
            "instrument.ticker",
            "instrument.exchange",
            "instrument.bond",
            "volumes.volume",
            "volumes.lastTradeDate",
        ]
    );

    let types: Vec<OperatorSetType> = index.iter().map(|f| f.operator_set).collect();
    assert_eq!(
        types,
        vec![
            OperatorSetType::String,
            OperatorSetType::Number,
            OperatorSetType::String,
            OperatorSetType::String,
            OperatorSetType::String,
            OperatorSetType::Number,
            OperatorSetType::Date,
        ]
    );
}

#[test]
fn nested_fields_wrap_outward_along_the_path() {
    let f = filters(vec![
        ("ticker", "SU26".into()),
        ("volumeFrom", 1000.into()),
        ("lastTradeDateTo", "01.02.2024".into()),
    ]);

    let expr = FilterTranslator::translate_with_schema(&f, &bond_schema());

    assert_eq!(
        expr.to_json(),
        json!({ "and": [
            { "instrument": { "ticker": { "contains": "SU26" } } },
            { "volumes": { "volume": { "gte": 1000 } } },
            { "volumes": { "lastTradeDate": { "lte": "2024-02-01T00:00:00.000Z" } } }
        ] })
    );
}

#[test]
fn nested_array_value_is_or_at_the_leaf_level() {
    let f = filters(vec![("ticker", vec!["SU26238", "SU26240"].into())]);

    let expr = FilterTranslator::translate_with_schema(&f, &bond_schema());

    assert_eq!(
        expr.to_json(),
        json!({ "and": [ { "instrument": { "or": [
            { "ticker": { "eq": "SU26238" } },
            { "ticker": { "eq": "SU26240" } }
        ] } } ] })
    );
}

#[test]
fn unsuffixed_key_produces_one_level_per_path_segment() {
    let schema = Schema::new(SchemaNode::object([(
        "issuer",
        SchemaNode::maybe(SchemaNode::object([(
            "rating",
            SchemaNode::object([("agency", SchemaNode::OperatorSet(OperatorSetType::String))]),
        )])),
    )]));
    let f = filters(vec![("agency", "ACRA".into())]);

    let expr = FilterTranslator::translate_with_schema(&f, &schema);

    let term = &expr.children()[0];
    let mut depth = 0;
    let mut node = term.to_json();
    while let Some((key, inner)) = node.as_object().and_then(|m| m.iter().next()) {
        if key == "contains" {
            break;
        }
        depth += 1;
        node = inner.clone();
    }
    assert_eq!(depth, 3);
    assert_eq!(node, json!({ "contains": "ACRA" }));
}

#[test]
fn declared_index_translates_like_the_walked_one() {
    let declared = SchemaFieldIndex::from_descriptors([
        FieldDescriptor::from_dotted("name", OperatorSetType::String),
        FieldDescriptor::from_dotted("couponRate", OperatorSetType::Number),
        FieldDescriptor::from_dotted("instrument.ticker", OperatorSetType::String),
        FieldDescriptor::from_dotted("volumes.lastTradeDate", OperatorSetType::Date),
    ]);
    let f = filters(vec![
        ("couponRateTo", 9.into()),
        ("ticker", "SU".into()),
        ("lastTradeDateFrom", "10.10.2024".into()),
    ]);

    let from_declared = FilterTranslator::translate_with_index(&f, &declared);
    let from_walk = FilterTranslator::translate_with_schema(&f, &bond_schema());

    assert_eq!(from_declared, from_walk);
}

#[test]
fn translation_is_repeatable() {
    let translator = FilterTranslator::from_schema(&bond_schema());
    let f = filters(vec![
        ("name", "OFZ".into()),
        ("couponRateFrom", 7.into()),
        ("ticker", vec!["A", "B"].into()),
    ]);

    let first = translator.translate(&f);
    let second = translator.translate(&f);

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn registry_resolves_standard_operation_inputs_without_declaration() {
    let schema = bond_schema();

    assert!(matches!(
        schema.registry.resolve("InstrumentFilterInput"),
        Some(LazyTarget::Node(SchemaNode::Object(_)))
    ));
    assert_eq!(
        schema.registry.resolve("DateTimeOperationFilterInput"),
        Some(LazyTarget::OperatorSet(OperatorSetType::Date))
    );
    assert!(schema.registry.resolve("UnknownFilterInput").is_none());
}

#[test]
fn standard_operation_inputs_win_over_registered_objects() {
    let operators = || {
        SchemaNode::object(
            ["eq", "neq", "gt", "gte", "lt", "lte"]
                .map(|op| (op, SchemaNode::maybe(SchemaNode::Scalar))),
        )
    };
    let registry = SchemaRegistry::new()
        .with(
            "QuoteFilterInput",
            SchemaNode::object([
                ("price", SchemaNode::maybe(SchemaNode::lazy("DecimalOperationFilterInput"))),
                ("settle", SchemaNode::maybe(SchemaNode::lazy("DateTimeOperationFilterInput"))),
            ]),
        )
        .with("DecimalOperationFilterInput", operators())
        .with("DateTimeOperationFilterInput", operators());
    let schema = Schema::with_registry(SchemaNode::lazy("QuoteFilterInput"), registry);

    assert_eq!(
        schema.registry.resolve("DecimalOperationFilterInput"),
        Some(LazyTarget::OperatorSet(OperatorSetType::Number))
    );

    let f = filters(vec![("priceFrom", 10.into()), ("settleTo", "01.01.2023".into())]);
    let expr = FilterTranslator::translate_with_schema(&f, &schema);

    assert_eq!(
        expr.to_json(),
        json!({ "and": [
            { "price": { "gte": 10 } },
            { "settle": { "lte": "2023-01-01T00:00:00.000Z" } }
        ] })
    );
}

#[test]
fn generated_schema_declaring_operation_inputs_keeps_leaf_types() {
    let schema = decode_schema(include_str!("data/declared_operation_inputs.json"))
        .expect("fixture schema decodes");
    let index = SchemaFieldIndex::from_schema(&schema);

    let typed: Vec<(String, OperatorSetType)> = index
        .iter()
        .map(|f| (f.dotted_path(), f.operator_set))
        .collect();
    assert_eq!(
        typed,
        vec![
            ("ticker".to_string(), OperatorSetType::String),
            ("price".to_string(), OperatorSetType::Number),
            ("lots".to_string(), OperatorSetType::Number),
            ("settle".to_string(), OperatorSetType::Date),
            ("isTradable".to_string(), OperatorSetType::Boolean),
        ]
    );

    let f = filters(vec![
        ("ticker", "SU".into()),
        ("priceFrom", "99.5".into()),
        ("lotsTo", 10.into()),
        ("settleFrom", "02.01.2024".into()),
        ("isTradable", true.into()),
    ]);
    let expr = FilterTranslator::translate_with_index(&f, &index);

    assert_eq!(
        expr.to_json(),
        json!({ "and": [
            { "ticker": { "contains": "SU" } },
            { "price": { "gte": 99.5 } },
            { "lots": { "lte": 10 } },
            { "settle": { "gte": "2024-01-02T00:00:00.000Z" } },
            { "isTradable": { "eq": true } }
        ] })
    );
}

#[test]
fn complete_translation_reports_nothing_dropped() {
    let f = filters(vec![("name", "OFZ".into()), ("couponRateFrom", 3.into())]);

    let report = FilterTranslator::translate_with_schema_report(&f, &bond_schema());

    assert!(report.is_complete());
    assert_eq!(report.expression.children().len(), 2);
}

#[test]
fn null_values_are_left_out() {
    let f = filters(vec![("ticker", FilterValue::Null), ("priceTo", 5.into())]);

    let report = FilterTranslator::translate_with_schema_report(&f, &instrument_schema());

    assert_eq!(
        report.expression.to_json(),
        json!({ "and": [ { "price": { "lte": 5 } } ] })
    );
    assert_eq!(report.dropped[0].reason, DropReason::EmptyValue);
}
