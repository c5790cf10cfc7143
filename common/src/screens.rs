//! Field schemas of the built-in list screens.
//!
//! Every screen appends the shared audit block to its own fields.

use crate::field_type::Operator;
use crate::schema::{DropdownOption, FieldSchema, FilterFieldSpec};

pub const AUDIT_SECTION: &str = "Audit";

/// A list screen: its backend list endpoint and filter schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenDefinition {
    pub name: &'static str,
    pub list_path: &'static str,
    pub schema: FieldSchema,
}

const SCREENS: &[(&str, &str, fn() -> FieldSchema)] = &[
    ("products", "/api/products", products),
    ("categories", "/api/categories", categories),
    ("staff", "/api/staff", staff),
    ("customers", "/api/customers", customers),
    ("orders", "/api/orders", orders),
];

pub fn names() -> impl Iterator<Item = &'static str> {
    SCREENS.iter().map(|(name, _, _)| *name)
}

pub fn builtin(name: &str) -> Option<ScreenDefinition> {
    SCREENS
        .iter()
        .find(|(screen, _, _)| *screen == name)
        .map(|&(name, list_path, schema)| ScreenDefinition {
            name,
            list_path,
            schema: schema(),
        })
}

pub fn audit_fields() -> Vec<FilterFieldSpec> {
    vec![
        FilterFieldSpec::date("createdAt", "Created at").in_section(AUDIT_SECTION),
        FilterFieldSpec::date("updatedAt", "Updated at").in_section(AUDIT_SECTION),
    ]
}

fn categories_lookup(name: &str, label: &str) -> FilterFieldSpec {
    FilterFieldSpec::dropdown_remote(name, label, "/api/categories", "id", "name")
}

pub fn products() -> FieldSchema {
    FieldSchema::new(vec![
        FilterFieldSpec::string("name", "Name"),
        FilterFieldSpec::string("sku", "SKU")
            .with_operators(&[Operator::StartsWith, Operator::Eq]),
        categories_lookup("categoryId", "Category"),
        FilterFieldSpec::number("price", "Price").in_section("Pricing"),
        FilterFieldSpec::number("stock", "Stock").in_section("Pricing"),
        FilterFieldSpec::boolean("active", "Active"),
    ])
    .concat(audit_fields())
}

pub fn categories() -> FieldSchema {
    FieldSchema::new(vec![
        FilterFieldSpec::string("name", "Name"),
        FilterFieldSpec::string("description", "Description"),
        categories_lookup("parentId", "Parent category"),
        FilterFieldSpec::boolean("active", "Active"),
    ])
    .concat(audit_fields())
}

pub fn staff() -> FieldSchema {
    FieldSchema::new(vec![
        FilterFieldSpec::string("firstName", "First name"),
        FilterFieldSpec::string("lastName", "Last name"),
        FilterFieldSpec::string("email", "Email"),
        FilterFieldSpec::dropdown_static(
            "role",
            "Role",
            vec![
                DropdownOption::new("admin", "Administrator"),
                DropdownOption::new("manager", "Manager"),
                DropdownOption::new("staff", "Staff"),
            ],
        ),
        FilterFieldSpec::date("hireDate", "Hire date").in_section("Employment"),
        FilterFieldSpec::number("salary", "Salary").in_section("Employment"),
        FilterFieldSpec::boolean("active", "Active"),
    ])
    .concat(audit_fields())
}

pub fn customers() -> FieldSchema {
    FieldSchema::new(vec![
        FilterFieldSpec::string("name", "Name"),
        FilterFieldSpec::string("email", "Email"),
        FilterFieldSpec::string("phone", "Phone")
            .with_operators(&[Operator::StartsWith, Operator::EndsWith, Operator::Eq]),
        FilterFieldSpec::string("city", "City").in_section("Address"),
        FilterFieldSpec::string("country", "Country").in_section("Address"),
        FilterFieldSpec::boolean("newsletter", "Newsletter"),
    ])
    .concat(audit_fields())
}

pub fn orders() -> FieldSchema {
    FieldSchema::new(vec![
        FilterFieldSpec::string("orderNumber", "Order number")
            .with_operators(&[Operator::Eq, Operator::StartsWith]),
        FilterFieldSpec::dropdown_remote("customerId", "Customer", "/api/customers", "id", "name"),
        FilterFieldSpec::dropdown_static(
            "status",
            "Status",
            vec![
                DropdownOption::new("pending", "Pending"),
                DropdownOption::new("processing", "Processing"),
                DropdownOption::new("shipped", "Shipped"),
                DropdownOption::new("delivered", "Delivered"),
                DropdownOption::new("cancelled", "Cancelled"),
            ],
        ),
        FilterFieldSpec::number("total", "Total")
            .with_default_operator(Operator::Between)
            .in_section("Amounts"),
        FilterFieldSpec::date("orderDate", "Order date").with_default_operator(Operator::Between),
        FilterFieldSpec::boolean("paid", "Paid"),
    ])
    .concat(audit_fields())
}
