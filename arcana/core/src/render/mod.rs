//! Renderer
//!
//! Pure functions from view models to HTML markup. Nothing here performs I/O;
//! the controller hands the returned strings to a
//! [`Surface`](crate::controller::Surface).
//!
//! All text that came from the backend or the user goes through [`escape`].
//! Interactive elements carry a `data-action` attribute holding the
//! serialized [`Action`] a click should dispatch.

mod markup;

pub use markup::escape;

use markup::{action_attr, suggestion_chips};

use crate::content::{text, Suit, EMPTY_RESULT_SUGGESTIONS, SEARCH_SUGGESTIONS};
use crate::controller::Action;
use crate::mapper::{CardDetailView, ReadingCard, ReadingView, SearchView, Summary, ViewModel};
use crate::model::SpreadKind;

/// Render any view model
#[must_use]
pub fn render(view: &ViewModel) -> String {
    match view {
        ViewModel::Reading(reading) => render_reading(reading),
        ViewModel::Search(search) => render_search(search),
        ViewModel::Detail(detail) => render_detail(detail),
    }
}

// ============================================================================
// Readings
// ============================================================================

fn suit_badge(suit: &Suit) -> String {
    format!(
        r#"<span class="card-suit">{} {}</span>"#,
        suit.icon(),
        escape(suit.name())
    )
}

fn annotation(label: &str, value: Option<&str>) -> String {
    value.map_or_else(String::new, |value| {
        format!(
            r#"<div class="interpretation-text"><strong>{}:</strong> <span>{}</span></div>"#,
            escape(label),
            escape(value)
        )
    })
}

/// One card of a reading
#[must_use]
pub fn render_card(entry: &ReadingCard) -> String {
    let card = &entry.card;
    let orientation = entry.orientation;

    let mut html = format!(
        r#"<div class="card {}"><div class="card-header"><span class="card-icon">{}</span><h3 class="card-name">{}</h3><span class="card-position {}">{}</span></div><div class="card-content">"#,
        orientation.css_class(),
        card.type_icon(),
        escape(&card.name),
        orientation.color_class(),
        orientation.label(),
    );

    if let Some(ref slot) = card.slot {
        html.push_str(&format!(
            r#"<div class="position-badge">{}</div>"#,
            escape(slot)
        ));
    }

    if let Some(ref message) = entry.daily_message {
        html.push_str(&format!(
            r#"<div class="daily-message">✨ {}</div>"#,
            escape(message)
        ));
    }

    html.push_str(&format!(
        r#"<p class="card-meaning">{}</p>"#,
        escape(&entry.meaning)
    ));

    if let Some(ref suit) = card.suit {
        html.push_str(&suit_badge(suit));
    }

    html.push_str(&annotation(text::ADVICE, card.advice.as_deref()));
    html.push_str(&annotation(text::CONTEXT, card.context.as_deref()));
    html.push_str(&annotation(text::ROLE, card.role.as_deref()));

    html.push_str("</div></div>");
    html
}

fn render_summary(summary: &Summary, with_note: bool) -> String {
    match summary {
        Summary::Supplied(body) => {
            let note = if with_note {
                format!(r#"<div class="free-will-note">{}</div>"#, text::FREE_WILL)
            } else {
                String::new()
            };
            format!(
                r#"<div class="info-box summary"><h3>{}</h3><div class="summary-content">{}</div>{note}</div>"#,
                text::SUMMARY,
                escape(body)
            )
        }
        Summary::Computed(narrative) => format!(
            r#"<div class="info-box interpretation"><h3>{}</h3><p>{}</p></div>"#,
            text::INTERPRETATION,
            narrative.text()
        ),
    }
}

/// A spread, daily card or answered question
///
/// A reading without cards renders [`render_empty`]. The summary block only
/// appears for readings of two or more cards.
#[must_use]
pub fn render_reading(reading: &ReadingView) -> String {
    if reading.cards.is_empty() {
        return render_empty();
    }

    let mut html = format!(r#"<h2 class="reading-title">{}</h2>"#, escape(&reading.title));

    if let Some(ref question) = reading.question {
        html.push_str(&format!(
            r#"<div class="question-bubble"><p>"{}"</p></div>"#,
            escape(question)
        ));
    }

    html.push_str(r#"<div class="cards-grid">"#);
    for card in &reading.cards {
        html.push_str(&render_card(card));
    }
    html.push_str("</div>");

    if let Some(summary) = reading.visible_summary() {
        html.push_str(&render_summary(summary, reading.question.is_none()));
    }

    html
}

/// Reading that came back without cards
#[must_use]
pub fn render_empty() -> String {
    format!(r#"<p class="no-cards">{}</p>"#, text::NO_CARDS)
}

/// Inline prompt shown when the question box is empty
#[must_use]
pub fn render_question_prompt() -> String {
    format!(r#"<p class="question-prompt">{}</p>"#, text::TYPE_QUESTION)
}

// ============================================================================
// Search
// ============================================================================

/// Search region before anything was typed
#[must_use]
pub fn render_search_prompt() -> String {
    format!(
        r#"<div class="search-prompt"><p>{}</p>{}</div>"#,
        text::SEARCH_PROMPT,
        suggestion_chips(SEARCH_SUGGESTIONS.len())
    )
}

/// Search region after the search was cleared
#[must_use]
pub fn render_search_cleared() -> String {
    format!(
        r#"<div class="search-prompt"><p>{}</p></div>"#,
        text::SEARCH_PROMPT
    )
}

/// Search region while a search is in flight
#[must_use]
pub fn render_searching(query: &str) -> String {
    format!(
        r#"<div class="searching"><div class="spinner"></div><p>{}</p><p class="search-echo">Buscando por "{}"...</p></div>"#,
        text::SEARCHING,
        escape(query)
    )
}

fn render_no_results(query: &str) -> String {
    format!(
        r#"<div class="search-empty"><div class="search-empty-icon">😕</div><p>Nenhuma carta encontrada para <span class="search-term">"{}"</span></p><p class="search-hint">{}</p>{}<button class="clear-search"{}>{}</button></div>"#,
        escape(query),
        text::SEARCH_HINT,
        suggestion_chips(EMPTY_RESULT_SUGGESTIONS),
        action_attr(&Action::ClearSearch),
        text::CLEAR
    )
}

/// Search results, or the empty state with suggestions
#[must_use]
pub fn render_search(search: &SearchView) -> String {
    if search.rows.is_empty() {
        return render_no_results(&search.query);
    }

    let unit = if search.total == 1 { "carta" } else { "cartas" };
    let mut html = format!(
        r#"<div class="search-results"><div class="search-header"><h3>{}</h3><span class="search-total">{} {unit}</span><button class="clear-search"{}>{}</button></div><p class="search-echo">Buscando por: "{}"</p><div class="search-list">"#,
        text::SEARCH_RESULTS,
        search.total,
        action_attr(&Action::ClearSearch),
        text::CLEAR,
        escape(&search.query)
    );

    for row in &search.rows {
        let card = &row.card;
        let link = card
            .id
            .as_ref()
            .map(|id| action_attr(&Action::ShowCard { id: id.clone() }))
            .unwrap_or_default();

        html.push_str(&format!(
            r#"<div class="search-result-item"{link}><span class="result-icon">{}</span><h4>{}</h4><span class="result-type">{}</span><p class="result-preview">{}</p><span class="tag-upright">{}</span><span class="tag-reversed">{}</span></div>"#,
            card.listing_icon(),
            escape(&card.name),
            card.arcana.label(),
            escape(&row.preview),
            text::UPRIGHT_MEANING,
            text::REVERSED_MEANING,
        ));
    }
    html.push_str("</div>");

    if search.is_truncated() {
        html.push_str(&format!(
            r#"<p class="search-truncated">Mostrando {} de {} resultados. {}</p>"#,
            search.rows.len(),
            search.total,
            text::REFINE_HINT
        ));
    }

    html.push_str("</div>");
    html
}

// ============================================================================
// Card Detail
// ============================================================================

/// Full card page
#[must_use]
pub fn render_detail(detail: &CardDetailView) -> String {
    let card = &detail.card;

    let mut html = format!(
        r#"<button class="back"{}>{}</button><h2 class="detail-title"><span>{}</span> {}</h2><p class="detail-type">{}</p><div class="card detail"><div class="card-content">"#,
        action_attr(&Action::LoadSpread(SpreadKind::Daily)),
        text::BACK,
        card.listing_icon(),
        escape(&card.name),
        card.arcana.label(),
    );

    if let Some(ref description) = card.description {
        html.push_str(&format!(
            r#"<div class="description"><h4>{}</h4><p>{}</p></div>"#,
            text::DESCRIPTION,
            escape(description)
        ));
    }

    html.push_str(&format!(
        r#"<div class="meanings"><div class="meaning-upright"><h4>{}</h4><p>{}</p></div><div class="meaning-reversed"><h4>{}</h4><p>{}</p></div></div>"#,
        text::UPRIGHT_MEANING,
        escape(&detail.upright),
        text::REVERSED_MEANING,
        escape(&detail.reversed),
    ));

    if let Some(ref suit) = card.suit {
        html.push_str(&suit_badge(suit));
    }

    html.push_str("</div></div>");
    html
}

// ============================================================================
// Errors
// ============================================================================

/// Uniform error view; the button re-dispatches `retry`
#[must_use]
pub fn render_error(retry: &Action) -> String {
    format!(
        r#"<div class="error-message"><p>{}</p><button class="retry"{}>{}</button></div>"#,
        text::API_ERROR,
        action_attr(retry),
        text::TRY_AGAIN
    )
}
