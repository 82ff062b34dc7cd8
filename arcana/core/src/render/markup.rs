//! Markup helpers shared by the views

use crate::content::SEARCH_SUGGESTIONS;
use crate::controller::Action;

/// Escape text for use in element content and quoted attribute values
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// ` data-action="..."` carrying the serialized action, ready to splice into a tag
pub(crate) fn action_attr(action: &Action) -> String {
    let json = serde_json::to_string(action).unwrap_or_default();
    format!(r#" data-action="{}""#, escape(&json))
}

/// Clickable search suggestions, the first `count` of them
pub(crate) fn suggestion_chips(count: usize) -> String {
    let chips: String = SEARCH_SUGGESTIONS
        .iter()
        .take(count)
        .map(|(icon, term)| {
            let action = Action::Search {
                query: (*term).to_string(),
            };
            format!(
                r#"<span class="suggestion-chip"{}>{icon} {}</span>"#,
                action_attr(&action),
                escape(term)
            )
        })
        .collect();
    format!(r#"<div class="suggestions">{chips}</div>"#)
}
