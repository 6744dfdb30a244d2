//! Styles command handler.

use muse::PromptTemplate;

/// Prints the numbered styles of a template.
pub fn handle_styles_command(template: PromptTemplate) {
    println!("{} ({})", template.title(), template);
    for (i, style) in template.styles().iter().enumerate() {
        println!("  {}. {}", i + 1, style);
    }
}
