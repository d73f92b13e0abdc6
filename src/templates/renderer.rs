/*!
 * Placeholder substitution for legal templates.
 *
 * Templates use `{{ name }}` placeholders. Rendering is fail-soft: a
 * template with malformed markup is returned unchanged and the problem is
 * logged, so a bad template never blocks document generation.
 */

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use thiserror::Error;

/// Variable reference inside `{{ }}`, dotted lookups allowed
static VARIABLE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z0-9_]+)*$").unwrap()
});

/// Reasons a template cannot be rendered
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TemplateSyntaxError {
    #[error("Unclosed variable tag at byte {0}")]
    UnclosedVariable(usize),

    #[error("Empty variable tag at byte {0}")]
    EmptyVariable(usize),

    #[error("Filters are not supported: '{0}'")]
    UnsupportedFilter(String),

    #[error("Invalid variable name: '{0}'")]
    InvalidVariable(String),

    #[error("Block tags are not supported")]
    UnsupportedBlockTag,
}

/// Render `template` against `context`.
///
/// Empty templates and empty contexts are returned as-is. Names missing from
/// the context render as empty text. Malformed markup returns the original.
pub fn render(template: &str, context: &BTreeMap<String, String>) -> String {
    if template.is_empty() || context.is_empty() {
        return template.to_string();
    }

    match try_render(template, context) {
        Ok(rendered) => rendered,
        Err(e) => {
            warn!("Template rendering failed, using raw text: {}", e);
            template.to_string()
        }
    }
}

/// Strict rendering that reports malformed markup
pub fn try_render(
    template: &str,
    context: &BTreeMap<String, String>,
) -> Result<String, TemplateSyntaxError> {
    if template.contains("{%") {
        return Err(TemplateSyntaxError::UnsupportedBlockTag);
    }

    let mut output = String::with_capacity(template.len());
    let mut rest = template;
    let mut offset = 0;

    while let Some(open) = rest.find("{{") {
        output.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];
        let close = after_open
            .find("}}")
            .ok_or(TemplateSyntaxError::UnclosedVariable(offset + open))?;

        let name = after_open[..close].trim();
        if name.is_empty() {
            return Err(TemplateSyntaxError::EmptyVariable(offset + open));
        }
        if name.contains('|') {
            return Err(TemplateSyntaxError::UnsupportedFilter(name.to_string()));
        }
        if !VARIABLE_NAME.is_match(name) {
            return Err(TemplateSyntaxError::InvalidVariable(name.to_string()));
        }

        if let Some(value) = context.get(name) {
            output.push_str(value);
        }

        let consumed = open + 2 + close + 2;
        offset += consumed;
        rest = &rest[consumed..];
    }

    output.push_str(rest);
    Ok(output)
}
