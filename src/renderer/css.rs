//! CSS text for a style directive

use super::config::CssConfig;
use super::style::StyleDirective;

/// Render a directive as CSS declarations, optionally wrapped in a rule
pub fn render_css(directive: &StyleDirective, config: &CssConfig) -> String {
    let declarations = directive.declarations(&config.anchor_property);
    let (indent, separator) = match (config.pretty_print, &config.selector) {
        (true, Some(_)) => ("  ", "\n"),
        (true, None) => ("", "\n"),
        (false, _) => ("", " "),
    };

    let body = declarations
        .iter()
        .map(|(name, value)| format!("{}{}: {};", indent, name, value))
        .collect::<Vec<_>>()
        .join(separator);

    match &config.selector {
        Some(selector) if declarations.is_empty() => format!("{} {{}}", selector),
        Some(selector) => format!("{} {{{}{}{}}}", selector, separator, body, separator),
        None => body,
    }
}
