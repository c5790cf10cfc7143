use erp_client::{ListScreen, Transport};
use std::fmt::Write;

pub async fn handle_options_command(screen: &mut ListScreen, transport: &dyn Transport) {
    screen.mount(transport).await;
    print!("{}", render_options(screen));
}

fn render_options(screen: &ListScreen) -> String {
    let mut out = String::new();
    let mut any = false;
    for field in screen.schema().dropdown_fields() {
        any = true;
        let options = screen.options().options(&field.name);
        let _ = writeln!(out, "{} ({}): {} option(s)", field.label, field.name, options.len());
        for option in options {
            let _ = writeln!(out, "  {}  {}", option.id, option.name);
        }
    }
    if !any {
        let _ = writeln!(out, "Screen {} has no dropdown fields", screen.name());
    }
    out
}
