use super::*;
use crate::field_type::FieldType;
use crate::schema::{DropdownOption, FilterFieldSpec};

fn product_schema() -> Arc<FieldSchema> {
    Arc::new(FieldSchema::new(vec![
        FilterFieldSpec::string("name", "Name"),
        FilterFieldSpec::number("price", "Price"),
        FilterFieldSpec::boolean("active", "Active"),
        FilterFieldSpec::dropdown_static(
            "category",
            "Category",
            vec![DropdownOption::new(1, "A"), DropdownOption::new(2, "B")],
        ),
        FilterFieldSpec::date("createdAt", "Created"),
    ]))
}

#[test]
fn test_new_state_is_empty() {
    let state = FilterState::new(product_schema());
    assert!(state.is_empty());
    assert!(state.to_active_filters().is_empty());
    assert_eq!(state.to_query_string(), "");
}

#[test]
fn test_set_value_uses_field_default_operator() {
    let mut state = FilterState::new(product_schema());
    state.set_value("name", "widget").unwrap();
    assert_eq!(state.entry("name").unwrap().operator, Operator::Contains);
    state.set_value("price", "10").unwrap();
    assert_eq!(state.entry("price").unwrap().operator, Operator::Eq);
}

#[test]
fn test_set_operator_clears_operands() {
    let mut state = FilterState::new(product_schema());
    state.set_operator("price", Operator::Between).unwrap();
    state.set_value("price", "10").unwrap();
    state.set_value_to("price", "50").unwrap();

    state.set_operator("price", Operator::Gte).unwrap();
    let entry = state.entry("price").unwrap();
    assert_eq!(entry.operator, Operator::Gte);
    assert_eq!(entry.value, None);
    assert_eq!(entry.value_to, None);
}

#[test]
fn test_set_same_operator_also_clears() {
    let mut state = FilterState::new(product_schema());
    state.set_value("name", "widget").unwrap();
    state.set_operator("name", Operator::Contains).unwrap();
    assert_eq!(state.entry("name").unwrap().value, None);
}

#[test]
fn test_stale_single_value_not_reused_as_range_bound() {
    let mut state = FilterState::new(product_schema());
    state.set_value("price", "10").unwrap();
    state.set_operator("price", Operator::Between).unwrap();
    state.set_value_to("price", "50").unwrap();
    assert!(state.to_active_filters().is_empty());
}

#[test]
fn test_between_needs_both_bounds() {
    let mut state = FilterState::new(product_schema());
    state.set_operator("price", Operator::Between).unwrap();
    state.set_value("price", "10").unwrap();
    assert!(state.to_active_filters().is_empty());

    state.set_value("price", "").unwrap();
    state.set_value_to("price", "50").unwrap();
    assert!(state.to_active_filters().is_empty());

    state.set_value("price", "10").unwrap();
    assert_eq!(
        state.to_active_filters(),
        vec![FilterValue {
            field: "price".to_string(),
            operator: Operator::Between,
            value: "10".to_string(),
            value_to: Some("50".to_string()),
        }]
    );
}

#[test]
fn test_empty_value_is_not_a_filter() {
    let mut state = FilterState::new(product_schema());
    state.set_value("name", "").unwrap();
    assert!(!state.is_empty());
    assert!(state.to_active_filters().is_empty());
}

#[test]
fn test_value_to_dropped_for_single_operand_operator() {
    let mut state = FilterState::new(product_schema());
    state.set_value("price", "5").unwrap();
    state.set_value_to("price", "9").unwrap();
    let active = state.to_active_filters();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].value_to, None);
    assert_eq!(state.to_query_string(), "price_eq=5");
}

#[test]
fn test_active_filters_follow_schema_order() {
    let mut state = FilterState::new(product_schema());
    state.set_value("createdAt", "2024-01-01").unwrap();
    state.set_bool("active", true).unwrap();
    state.set_value("name", "widget").unwrap();
    let fields: Vec<_> = state
        .to_active_filters()
        .into_iter()
        .map(|f| f.field)
        .collect();
    assert_eq!(fields, vec!["name", "active", "createdAt"]);
}

#[test]
fn test_one_entry_per_field() {
    let mut state = FilterState::new(product_schema());
    state.set_value("name", "a").unwrap();
    state.set_value("name", "b").unwrap();
    let active = state.to_active_filters();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].value, "b");
}

#[test]
fn test_range_and_contains_query() {
    let mut state = FilterState::new(product_schema());
    state.set_operator("price", Operator::Between).unwrap();
    state.set_value("price", "10").unwrap();
    state.set_value_to("price", "50").unwrap();
    state.set_operator("name", Operator::Contains).unwrap();
    state.set_value("name", "widget").unwrap();

    let query = state.to_query_string();
    let mut params: Vec<_> = query.split('&').collect();
    params.sort();
    assert_eq!(
        params,
        vec!["name_contains=widget", "price_from=10", "price_to=50"]
    );
    assert_eq!(query, state.to_query_string());
}

#[test]
fn test_typed_setters() {
    let mut state = FilterState::new(product_schema());
    state.set_bool("active", false).unwrap();
    state.set_operator("price", Operator::Between).unwrap();
    state.set_number("price", 9.5).unwrap();
    state.set_number_to("price", 20.0).unwrap();
    state.set_operator("createdAt", Operator::Between).unwrap();
    state
        .set_date("createdAt", NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        .unwrap();
    state
        .set_date_to("createdAt", NaiveDate::from_ymd_opt(2024, 3, 31).unwrap())
        .unwrap();
    assert_eq!(
        state.to_query_string(),
        "price_from=9.5&price_to=20&active_eq=false&createdAt_from=2024-03-01&createdAt_to=2024-03-31"
    );
}

#[test]
fn test_non_finite_numbers_rejected() {
    let mut state = FilterState::new(product_schema());
    assert!(matches!(
        state.set_number("price", f64::NAN),
        Err(FilterError::InvalidNumber(ref field, _)) if field == "price"
    ));
    assert_eq!(
        state.set_number("price", f64::INFINITY),
        Err(FilterError::InvalidNumber("price".to_string(), f64::INFINITY))
    );
    state.set_operator("price", Operator::Between).unwrap();
    state.set_number("price", 1.0).unwrap();
    assert!(state.set_number_to("price", f64::NEG_INFINITY).is_err());

    assert_eq!(state.entry("price").unwrap().value_to, None);
    assert_eq!(state.to_query_string(), "");
}

#[test]
fn test_unknown_field_rejected() {
    let mut state = FilterState::new(product_schema());
    assert_eq!(
        state.set_value("colour", "red"),
        Err(FilterError::UnknownField("colour".to_string()))
    );
    assert!(state.is_empty());
}

#[test]
fn test_operator_not_offered_rejected() {
    let mut state = FilterState::new(product_schema());
    assert_eq!(
        state.set_operator("active", Operator::Ne),
        Err(FilterError::OperatorNotOffered(
            "active".to_string(),
            Operator::Ne
        ))
    );
    assert_eq!(
        state.set_operator("category", Operator::Contains),
        Err(FilterError::OperatorNotOffered(
            "category".to_string(),
            Operator::Contains
        ))
    );
}

#[test]
fn test_selected_operator() {
    let mut state = FilterState::new(product_schema());
    assert_eq!(state.selected_operator("name"), Some(Operator::Contains));
    state.set_operator("name", Operator::EndsWith).unwrap();
    assert_eq!(state.selected_operator("name"), Some(Operator::EndsWith));
    assert_eq!(state.selected_operator("missing"), None);
}

#[test]
fn test_clear_and_remove() {
    let mut state = FilterState::new(product_schema());
    state.set_value("name", "widget").unwrap();
    state.set_value("price", "3").unwrap();

    let removed = state.remove("name").unwrap();
    assert_eq!(removed.value.as_deref(), Some("widget"));
    assert_eq!(state.to_query_string(), "price_eq=3");

    state.clear();
    assert!(state.is_empty());
    assert_eq!(state.to_query_string(), "");
}

#[test]
fn test_states_are_independent() {
    let schema = product_schema();
    let mut first = FilterState::new(schema.clone());
    let second = FilterState::new(schema);
    first.set_value("name", "x").unwrap();
    assert!(second.is_empty());
}

#[test]
fn test_explicit_operator_field_default() {
    let schema = Arc::new(FieldSchema::new(vec![FilterFieldSpec::new(
        "qty",
        "Quantity",
        FieldType::Number,
    )
    .with_operators(&[Operator::Gte, Operator::Lte])]));
    let mut state = FilterState::new(schema);
    state.set_value("qty", "3").unwrap();
    assert_eq!(state.to_query_string(), "qty_gte=3");
}
