//! View Model Mapper
//!
//! Turns raw backend JSON into the normalized view models the renderer
//! consumes. Mapping is pure and total: every JSON value maps to *some* view,
//! and missing text is replaced by documented placeholders rather than
//! dropped.
//!
//! # Accepted Shapes
//!
//! | Shape | Example |
//! |---|---|
//! | bare card | `{"name": "The Sun", ...}` |
//! | card list | `[{...}, {...}]` |
//! | spread | `{"cards": [...], "summary": "...", "spread_type": "three"}` |
//! | search result | `{"query": "amor", "total": 7, "results": [...]}` |
//!
//! Anything else is wrapped as a one-element card list.

use serde_json::Value;

use crate::content::{self, text, Arcana, Narrative, Orientation, Suit, MAJOR_ICON};
use crate::model::{string_field, RawCard, SpreadKind};

/// Default character budget of a search preview
pub const DEFAULT_PREVIEW_CHARS: usize = 120;

/// Marker appended to a truncated preview
pub const ELLIPSIS: &str = "...";

/// Name shown for a card the backend sent without one
pub const UNNAMED_CARD: &str = "Carta sem nome";

// ============================================================================
// Raw Shapes
// ============================================================================

/// Classified backend response
#[derive(Clone, Debug, PartialEq)]
pub enum RawShape {
    /// A single card object
    Card(Value),
    /// A bare array of cards
    List(Vec<Value>),
    /// A spread or interpretation
    Spread {
        /// Drawn cards, in slot order
        cards: Vec<Value>,
        /// Backend-supplied summary
        summary: Option<String>,
        /// Spread tag
        spread_type: Option<String>,
        /// Echoed question (interpretations only)
        question: Option<String>,
    },
    /// A search result set
    Search {
        /// Echoed query
        query: Option<String>,
        /// Total number of matches (may exceed `results.len()`)
        total: Option<usize>,
        /// Returned matches, in relevance order
        results: Vec<Value>,
    },
    /// Not an object or array; kept so it can be wrapped
    Unknown(Value),
}

impl RawShape {
    /// Classify a response body
    #[must_use]
    pub fn classify(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::List(items),
            Value::Object(map) => Self::from_object(Value::Object(map)),
            other => Self::Unknown(other),
        }
    }

    fn from_object(value: Value) -> Self {
        if value.get("results").is_some() {
            return Self::Search {
                query: string_field(&value, "query"),
                total: count_field(&value, "total"),
                results: into_sequence(value.get("results").cloned()),
            };
        }

        // `cards: null` falls through to a bare card
        if value.get("cards").is_some_and(|cards| !cards.is_null()) {
            return Self::Spread {
                summary: string_field(&value, "summary"),
                spread_type: string_field(&value, "spread_type"),
                question: string_field(&value, "question"),
                cards: into_sequence(value.get("cards").cloned()),
            };
        }

        Self::Card(value)
    }

    /// The card sequence carried by this shape, in order
    #[must_use]
    pub fn into_cards(self) -> Vec<Value> {
        match self {
            Self::Card(value) | Self::Unknown(value) => vec![value],
            Self::List(cards) | Self::Spread { cards, .. } => cards,
            Self::Search { results, .. } => results,
        }
    }
}

/// Arrays stay arrays, `null` is empty, any other value is a one-element list
fn into_sequence(value: Option<Value>) -> Vec<Value> {
    match value {
        Some(Value::Array(items)) => items,
        None | Some(Value::Null) => Vec::new(),
        Some(other) => vec![other],
    }
}

fn count_field(value: &Value, key: &str) -> Option<usize> {
    match value.get(key)? {
        Value::Number(n) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

// ============================================================================
// View Models
// ============================================================================

/// A card with its display fields resolved
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardView {
    /// Lookup key for the card-detail endpoint
    pub id: Option<String>,
    /// Display name
    pub name: String,
    /// Untranslated name (falls back to `name`)
    pub original_name: String,
    /// Major or minor
    pub arcana: Arcana,
    /// Suit, if any
    pub suit: Option<Suit>,
    /// Orientation as drawn, when the backend sent one
    pub drawn: Option<Orientation>,
    /// Resolved spread slot label
    pub slot: Option<String>,
    /// Upright meaning as sent
    pub meaning_upright: Option<String>,
    /// Reversed meaning as sent
    pub meaning_reversed: Option<String>,
    /// Long description
    pub description: Option<String>,
    /// Advice annotation
    pub advice: Option<String>,
    /// Context annotation
    pub context: Option<String>,
    /// Role annotation
    pub role: Option<String>,
}

impl CardView {
    /// Resolve a raw card
    #[must_use]
    pub fn from_raw(raw: RawCard) -> Self {
        let name = raw.name.unwrap_or_else(|| UNNAMED_CARD.to_string());
        let original_name = raw.original_name.unwrap_or_else(|| name.clone());

        Self {
            id: raw.name_short,
            arcana: Arcana::parse(raw.arcana.as_deref()),
            suit: raw.suit.as_deref().map(Suit::parse),
            drawn: raw.position.as_deref().and_then(Orientation::parse),
            slot: raw.position_name.as_deref().map(content::slot_label),
            meaning_upright: raw.meaning_upright,
            meaning_reversed: raw.meaning_reversed,
            description: raw.description,
            advice: raw.advice,
            context: raw.context,
            role: raw.role,
            name,
            original_name,
        }
    }

    /// Resolve a card from any JSON value
    #[must_use]
    pub fn from_value(value: &Value) -> Self {
        Self::from_raw(RawCard::from_value(value))
    }

    /// Orientation used for display; undrawn cards read upright
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.drawn.unwrap_or_default()
    }

    /// Meaning for the given orientation, or the placeholder
    #[must_use]
    pub fn meaning_for(&self, orientation: Orientation) -> &str {
        let meaning = match orientation {
            Orientation::Upright => self.meaning_upright.as_deref(),
            Orientation::Reversed => self.meaning_reversed.as_deref(),
        };
        meaning.unwrap_or(text::MEANING_UNAVAILABLE)
    }

    /// Icon shown next to the name: a star for trumps, the suit icon otherwise
    #[must_use]
    pub fn type_icon(&self) -> &'static str {
        match (self.arcana, &self.suit) {
            (Arcana::Major, _) => MAJOR_ICON,
            (Arcana::Minor, Some(suit)) => suit.icon(),
            (Arcana::Minor, None) => "",
        }
    }

    /// Icon used in catalog listings, where suitless cards get a star
    #[must_use]
    pub fn listing_icon(&self) -> &'static str {
        self.suit.as_ref().map_or(MAJOR_ICON, Suit::icon)
    }

    /// Truncated meaning for a search row
    #[must_use]
    pub fn preview(&self, budget: usize) -> String {
        let meaning = self
            .meaning_upright
            .as_deref()
            .or(self.meaning_reversed.as_deref())
            .unwrap_or(text::MEANING_PENDING);
        truncate_chars(meaning, budget)
    }
}

/// Cut `text` to `budget` characters, appending [`ELLIPSIS`] when cut
#[must_use]
pub fn truncate_chars(text: &str, budget: usize) -> String {
    match text.char_indices().nth(budget) {
        Some((byte_idx, _)) => format!("{}{ELLIPSIS}", &text[..byte_idx]),
        None => text.to_string(),
    }
}

/// A card placed in a reading
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadingCard {
    /// The card
    pub card: CardView,
    /// Resolved orientation (never absent inside a reading)
    pub orientation: Orientation,
    /// Meaning for `orientation`, placeholder when missing
    pub meaning: String,
    /// Card-of-the-day message, daily readings only
    pub daily_message: Option<String>,
}

impl ReadingCard {
    fn new(card: CardView, daily: bool) -> Self {
        let orientation = card.orientation();
        let meaning = card.meaning_for(orientation).to_string();
        let daily_message = daily.then(|| {
            content::daily_message(&card.original_name, &card.name, card.arcana, card.suit.as_ref())
        });

        Self {
            card,
            orientation,
            meaning,
            daily_message,
        }
    }
}

/// Summary block of a reading
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Summary {
    /// Text the backend supplied
    Supplied(String),
    /// Narrative computed from the drawn orientations
    Computed(Narrative),
}

impl Summary {
    /// Body text of the block
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Supplied(text) => text,
            Self::Computed(narrative) => narrative.text(),
        }
    }
}

/// A spread, a daily card, or an answered question
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadingView {
    /// Heading
    pub title: String,
    /// Echoed question, for interpretations
    pub question: Option<String>,
    /// Cards in slot order
    pub cards: Vec<ReadingCard>,
    /// Supplied or computed summary
    pub summary: Option<Summary>,
    /// Spread tag from the backend
    pub spread_type: Option<String>,
}

impl ReadingView {
    /// Summary to display; single-card readings never show one
    #[must_use]
    pub fn visible_summary(&self) -> Option<&Summary> {
        if self.cards.len() > 1 {
            self.summary.as_ref()
        } else {
            None
        }
    }
}

/// One row of a search result list
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchRow {
    /// The matching card
    pub card: CardView,
    /// Truncated meaning
    pub preview: String,
}

/// A search result set
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchView {
    /// The query as the backend echoed it
    pub query: String,
    /// Returned matches in relevance order
    pub rows: Vec<SearchRow>,
    /// Total number of matches
    pub total: usize,
}

impl SearchView {
    /// Whether the backend returned fewer rows than it matched
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        self.total > self.rows.len()
    }
}

/// Full card-detail page
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CardDetailView {
    /// The card
    pub card: CardView,
    /// Upright meaning, placeholder when missing
    pub upright: String,
    /// Reversed meaning, placeholder when missing
    pub reversed: String,
}

/// Anything the renderer can draw
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewModel {
    /// A reading (spread, daily card, question)
    Reading(ReadingView),
    /// Search results
    Search(SearchView),
    /// One card in detail
    Detail(CardDetailView),
}

/// What the caller asked for, which decides how a shape is read
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewContext {
    /// A spread or daily card
    Reading {
        /// Heading
        title: String,
        /// Whether cards get a daily message
        daily: bool,
    },
    /// An answered question
    Question {
        /// The question as typed, used when the backend does not echo it
        question: String,
    },
    /// A search
    Search {
        /// The query as typed, used when the backend does not echo it
        query: String,
    },
    /// A card-detail page
    Detail,
}

impl ViewContext {
    /// Context for loading a spread
    #[must_use]
    pub fn spread(kind: SpreadKind) -> Self {
        Self::Reading {
            title: kind.title().to_string(),
            daily: kind.is_daily(),
        }
    }
}

// ============================================================================
// Mapper
// ============================================================================

/// Maps raw responses to view models
#[derive(Clone, Copy, Debug)]
pub struct ViewModelMapper {
    preview_chars: usize,
}

impl Default for ViewModelMapper {
    fn default() -> Self {
        Self::new(DEFAULT_PREVIEW_CHARS)
    }
}

impl ViewModelMapper {
    /// Create a mapper with the given search preview budget
    #[must_use]
    pub fn new(preview_chars: usize) -> Self {
        Self { preview_chars }
    }

    /// Search preview budget in characters
    #[must_use]
    pub fn preview_chars(&self) -> usize {
        self.preview_chars
    }

    /// Map a raw response in the given context
    #[must_use]
    pub fn to_view_model(&self, raw: Value, context: &ViewContext) -> ViewModel {
        let shape = RawShape::classify(raw);

        match context {
            ViewContext::Reading { title, daily } => {
                ViewModel::Reading(reading_view(shape, title.clone(), None, *daily))
            }
            ViewContext::Question { question } => ViewModel::Reading(reading_view(
                shape,
                text::YOUR_QUESTION.to_string(),
                Some(question.clone()),
                false,
            )),
            ViewContext::Search { query } => {
                ViewModel::Search(self.search_view(shape, query))
            }
            ViewContext::Detail => ViewModel::Detail(detail_view(shape)),
        }
    }

    fn search_view(&self, shape: RawShape, typed_query: &str) -> SearchView {
        let (query, total, results) = match shape {
            RawShape::Search {
                query,
                total,
                results,
            } => (query, total, results),
            other => (None, None, other.into_cards()),
        };

        let rows: Vec<SearchRow> = results
            .iter()
            .map(CardView::from_value)
            .map(|card| SearchRow {
                preview: card.preview(self.preview_chars),
                card,
            })
            .collect();

        SearchView {
            query: query.unwrap_or_else(|| typed_query.to_string()),
            total: total.unwrap_or(rows.len()),
            rows,
        }
    }
}

fn reading_view(
    shape: RawShape,
    title: String,
    typed_question: Option<String>,
    daily: bool,
) -> ReadingView {
    let (cards, supplied, spread_type, echoed) = match shape {
        RawShape::Spread {
            cards,
            summary,
            spread_type,
            question,
        } => (cards, summary, spread_type, question),
        other => (other.into_cards(), None, None, None),
    };

    let cards: Vec<ReadingCard> = cards
        .iter()
        .map(|value| ReadingCard::new(CardView::from_value(value), daily))
        .collect();

    let summary = match supplied {
        Some(text) => Some(Summary::Supplied(text)),
        None if cards.len() > 1 => Some(Summary::Computed(Narrative::from_orientations(
            cards.iter().filter_map(|c| c.card.drawn),
        ))),
        None => None,
    };

    ReadingView {
        title,
        question: echoed.or(typed_question),
        cards,
        summary,
        spread_type,
    }
}

fn detail_view(shape: RawShape) -> CardDetailView {
    let card = shape
        .into_cards()
        .first()
        .map(CardView::from_value)
        .unwrap_or_else(|| CardView::from_raw(RawCard::default()));

    CardDetailView {
        upright: card
            .meaning_upright
            .clone()
            .unwrap_or_else(|| text::NOT_AVAILABLE.to_string()),
        reversed: card
            .meaning_reversed
            .clone()
            .unwrap_or_else(|| text::NOT_AVAILABLE.to_string()),
        card,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn card(name: &str, position: &str) -> Value {
        json!({
            "name": name,
            "name_short": name.to_lowercase(),
            "type": "minor",
            "suit": "cups",
            "meaning_upright": format!("{name} up"),
            "meaning_reversed": format!("{name} down"),
            "position": position,
        })
    }

    fn reading(value: Value) -> ReadingView {
        let context = ViewContext::spread(SpreadKind::Three);
        match ViewModelMapper::default().to_view_model(value, &context) {
            ViewModel::Reading(view) => view,
            other => panic!("expected reading, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_shapes() {
        assert!(matches!(RawShape::classify(json!([1, 2])), RawShape::List(v) if v.len() == 2));
        assert!(matches!(
            RawShape::classify(json!({"results": [], "total": 0, "query": "x"})),
            RawShape::Search { total: Some(0), .. }
        ));
        assert!(matches!(
            RawShape::classify(json!({"cards": [{}], "summary": "s"})),
            RawShape::Spread { summary: Some(_), .. }
        ));
        assert!(matches!(RawShape::classify(json!({"name": "x"})), RawShape::Card(_)));
        assert!(matches!(RawShape::classify(json!("text")), RawShape::Unknown(_)));
    }

    #[test]
    fn test_null_cards_field_reads_as_single_card() {
        let shape = RawShape::classify(json!({"cards": null, "name": "The Sun"}));
        assert!(matches!(shape, RawShape::Card(_)));
    }

    #[test]
    fn test_upright_card_shows_upright_meaning() {
        let view = reading(json!([card("Ace", "upright")]));
        assert_eq!(view.cards[0].meaning, "Ace up");
        assert_eq!(view.cards[0].orientation, Orientation::Upright);
    }

    #[test]
    fn test_reversed_card_shows_reversed_meaning() {
        let view = reading(json!([card("Ace", "reversed")]));
        assert_eq!(view.cards[0].meaning, "Ace down");
    }

    #[test]
    fn test_missing_meaning_uses_placeholder() {
        let view = reading(json!([
            {"name": "Ace", "position": "upright", "meaning_reversed": "down"}
        ]));
        assert_eq!(view.cards[0].meaning, text::MEANING_UNAVAILABLE);
    }

    #[test]
    fn test_missing_position_reads_upright() {
        let view = reading(json!({"name": "Ace", "meaning_upright": "up"}));
        assert_eq!(view.cards.len(), 1);
        assert_eq!(view.cards[0].orientation, Orientation::Upright);
        assert_eq!(view.cards[0].card.drawn, None);
        assert_eq!(view.cards[0].meaning, "up");
    }

    #[test]
    fn test_supplied_summary_wins() {
        let view = reading(json!({
            "cards": [card("A", "reversed"), card("B", "reversed")],
            "summary": "Tudo bem",
            "spread_type": "three",
        }));
        assert_eq!(view.summary, Some(Summary::Supplied("Tudo bem".to_string())));
        assert_eq!(view.spread_type.as_deref(), Some("three"));
    }

    #[test]
    fn test_computed_interpretation_needs_two_cards() {
        let single = reading(json!({"cards": [card("A", "upright")]}));
        assert_eq!(single.summary, None);

        let pair = reading(json!({"cards": [card("A", "upright"), card("B", "reversed")]}));
        assert_eq!(pair.summary, Some(Summary::Computed(Narrative::Balanced)));
    }

    #[test]
    fn test_undrawn_cards_do_not_vote() {
        let view = reading(json!({"cards": [{"name": "A"}, card("B", "reversed")]}));
        assert_eq!(view.cards[0].orientation, Orientation::Upright);
        assert_eq!(view.summary, Some(Summary::Computed(Narrative::Introspective)));
    }

    #[test]
    fn test_single_card_hides_supplied_summary() {
        let view = reading(json!({"cards": [card("A", "upright")], "summary": "s"}));
        assert!(view.summary.is_some());
        assert_eq!(view.visible_summary(), None);
    }

    #[test]
    fn test_card_order_preserved() {
        let names = ["Z", "A", "M"];
        let cards: Vec<Value> = names.iter().map(|n| card(n, "upright")).collect();
        let view = reading(json!({ "cards": cards }));
        let got: Vec<&str> = view.cards.iter().map(|c| c.card.name.as_str()).collect();
        assert_eq!(got, names);
    }

    #[test]
    fn test_unknown_shape_wraps_as_single_card() {
        let view = reading(json!(17));
        assert_eq!(view.cards.len(), 1);
        assert_eq!(view.cards[0].card.name, UNNAMED_CARD);
        assert_eq!(view.cards[0].meaning, text::MEANING_UNAVAILABLE);
    }

    #[test]
    fn test_daily_context_adds_message() {
        let context = ViewContext::spread(SpreadKind::Daily);
        let value = json!({"name": "O Sol", "original_name": "The Sun", "type": "major"});
        let ViewModel::Reading(view) = ViewModelMapper::default().to_view_model(value, &context)
        else {
            panic!("expected reading");
        };
        let message = view.cards[0].daily_message.as_deref().unwrap_or_default();
        assert!(message.starts_with("Alegria e sucesso!"));
    }

    #[test]
    fn test_question_context_echoes_question() {
        let context = ViewContext::Question {
            question: "typed".to_string(),
        };
        let value = json!({"question": "echoed", "cards": [card("A", "upright")]});
        let ViewModel::Reading(view) = ViewModelMapper::default().to_view_model(value, &context)
        else {
            panic!("expected reading");
        };
        assert_eq!(view.question.as_deref(), Some("echoed"));
        assert_eq!(view.title, text::YOUR_QUESTION);
    }

    #[test]
    fn test_search_total_and_preview() {
        let long = "x".repeat(130);
        let value = json!({
            "query": "amor",
            "total": 7,
            "results": [
                {"name": "A", "meaning_upright": long},
                {"name": "B", "meaning_reversed": "only reversed"},
                {"name": "C"},
            ],
        });
        let context = ViewContext::Search {
            query: "amor".to_string(),
        };
        let ViewModel::Search(view) = ViewModelMapper::default().to_view_model(value, &context)
        else {
            panic!("expected search");
        };

        assert_eq!(view.total, 7);
        assert!(view.is_truncated());
        assert_eq!(view.rows[0].preview.chars().count(), 120 + ELLIPSIS.len());
        assert!(view.rows[0].preview.ends_with(ELLIPSIS));
        assert_eq!(view.rows[1].preview, "only reversed");
        assert_eq!(view.rows[2].preview, text::MEANING_PENDING);
    }

    #[test]
    fn test_search_without_total_uses_row_count() {
        let context = ViewContext::Search {
            query: "sol".to_string(),
        };
        let ViewModel::Search(view) =
            ViewModelMapper::default().to_view_model(json!([{"name": "A"}]), &context)
        else {
            panic!("expected search");
        };
        assert_eq!(view.query, "sol");
        assert_eq!(view.total, 1);
        assert!(!view.is_truncated());
    }

    #[test]
    fn test_truncate_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("ção", 2), "ça...");
        assert_eq!(truncate_chars("ção", 3), "ção");
        assert_eq!(truncate_chars("", 0), "");
    }

    #[test]
    fn test_detail_placeholders() {
        let value = json!({"name": "Death", "meaning_upright": "fim"});
        let ViewModel::Detail(view) =
            ViewModelMapper::default().to_view_model(value, &ViewContext::Detail)
        else {
            panic!("expected detail");
        };
        assert_eq!(view.upright, "fim");
        assert_eq!(view.reversed, text::NOT_AVAILABLE);
    }

    #[test]
    fn test_detail_of_empty_list_is_unnamed() {
        let ViewModel::Detail(view) =
            ViewModelMapper::default().to_view_model(json!([]), &ViewContext::Detail)
        else {
            panic!("expected detail");
        };
        assert_eq!(view.card.name, UNNAMED_CARD);
    }
}
