use erp_client::ListScreen;
use erp_common::{screens, DropdownConfig, FieldSchema, FilterFieldSpec};
use std::fmt::Write;
use tabular::{Row, Table};

pub fn handle_screens_command() {
    print!("{}", render_screens());
}

pub fn handle_fields_command(screen: &ListScreen) {
    println!("Screen {} ({})", screen.name(), screen.list_path());
    print!("{}", render_fields(screen.schema()));
}

fn render_screens() -> String {
    let mut table = Table::new("{:<}  {:<}  {:>}")
        .with_row(Row::from_cells(["Screen", "Path", "Fields"].iter().cloned()));
    for name in screens::names() {
        if let Some(definition) = screens::builtin(name) {
            table.add_row(
                Row::new()
                    .with_cell(definition.name)
                    .with_cell(definition.list_path)
                    .with_cell(definition.schema.len()),
            );
        }
    }
    table.to_string()
}

/// Operators in display order; the default is marked with `*` when the
/// field offers a choice.
fn operators_cell(field: &FilterFieldSpec) -> String {
    if !field.shows_operator_selector() {
        return field.default_operator().to_string();
    }
    let default = field.default_operator();
    field
        .resolved_operators()
        .iter()
        .map(|op| {
            if *op == default {
                format!("{}*", op)
            } else {
                op.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn options_cell(field: &FilterFieldSpec) -> String {
    match &field.dropdown_config {
        Some(DropdownConfig::Static(config)) => format!("{} static", config.static_options.len()),
        Some(DropdownConfig::Remote(config)) => config.endpoint.clone(),
        None => String::new(),
    }
}

fn render_fields(schema: &FieldSchema) -> String {
    let mut out = String::new();
    for section in schema.sections() {
        if let Some(name) = section.name {
            let _ = writeln!(out, "\n[{}]", name);
        }
        let mut table = Table::new("{:<}  {:<}  {:<}  {:<}  {:<}").with_row(Row::from_cells(
            ["Field", "Label", "Type", "Operators", "Options"].iter().cloned(),
        ));
        for field in section.fields {
            table.add_row(
                Row::new()
                    .with_cell(&field.name)
                    .with_cell(&field.label)
                    .with_cell(field.field_type)
                    .with_cell(operators_cell(field))
                    .with_cell(options_cell(field)),
            );
        }
        out.push_str(&table.to_string());
    }
    out
}
