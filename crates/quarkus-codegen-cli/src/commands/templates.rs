use quarkus_codegen_core::templates::embedded::EmbeddedTemplates;

use crate::output;
use crate::FlavorChoice;

/// List the templates bundled for a flavor, with their sizes.
///
/// Any of these paths can be overridden with `generate --templates <dir>`.
pub fn run(flavor: FlavorChoice) {
    let templates = EmbeddedTemplates::new(flavor.as_flavor());
    output::print_header(&format!("quarkus-codegen templates: {}", templates.flavor()));

    for (path, size) in templates.sizes() {
        output::print_key_value(path, &output::format_size(size));
    }
    println!();
}
