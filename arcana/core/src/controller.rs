//! Controller Actions
//!
//! User actions composed from the coordinator, the mapper and the renderer.
//!
//! Every action follows the same path: validate input locally, issue one
//! coordinated call, then either stay silent (superseded), show the error view
//! with a retry of the same action (failed), or map, render and replace the
//! target region (success).

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::backend::{ApiRequest, ApiTransport};
use crate::coordinator::{FailureReason, Outcome, RequestCoordinator};
use crate::error::InputError;
use crate::mapper::{ViewContext, ViewModelMapper};
use crate::model::SpreadKind;
use crate::render;

// ============================================================================
// Actions
// ============================================================================

/// Something the user asked for
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "args", rename_all = "snake_case")]
pub enum Action {
    /// Draw a spread (or the card of the day)
    LoadSpread(SpreadKind),
    /// Ask a question and draw cards for it
    Ask {
        /// Question as typed
        question: String,
    },
    /// Search card meanings
    Search {
        /// Query as typed
        query: String,
    },
    /// Open one card in detail
    ShowCard {
        /// Card identifier (`name_short`)
        id: String,
    },
    /// Reset the search box and results
    ClearSearch,
    /// Check backend health
    Status,
}

/// How an action ended
#[derive(Debug)]
pub enum ActionOutcome {
    /// Markup was written to the surface
    Rendered,
    /// Finished without drawing anything
    Completed,
    /// Input was rejected before any network call
    Rejected(InputError),
    /// A newer action superseded this one; nothing was written
    Superseded,
    /// The call failed; the error view was written
    Failed(FailureReason),
}

// ============================================================================
// Surface
// ============================================================================

/// Part of the display an action writes into
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    /// Readings, card details and their errors
    Main,
    /// Search prompt, results and search errors
    SearchResults,
}

/// Input box a surface may be asked to clear
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputField {
    /// The question box
    Question,
    /// The search box
    Search,
}

/// The display the controller writes markup into
#[async_trait]
pub trait Surface: Send + Sync {
    /// Replace the content of a region
    async fn replace(&self, region: Region, markup: String) -> anyhow::Result<()>;

    /// Clear an input box
    async fn clear_input(&self, field: InputField) -> anyhow::Result<()>;
}

// ============================================================================
// Controller
// ============================================================================

/// Runs actions against a backend and a surface
pub struct Controller<T, S> {
    coordinator: RequestCoordinator<T>,
    mapper: ViewModelMapper,
    surface: S,
    /// Bumped whenever an action takes over the search region
    search_owner: AtomicU64,
}

impl<T: ApiTransport, S: Surface> Controller<T, S> {
    /// Create a controller
    pub fn new(transport: T, surface: S, mapper: ViewModelMapper) -> Self {
        Self {
            coordinator: RequestCoordinator::new(transport),
            mapper,
            surface,
            search_owner: AtomicU64::new(0),
        }
    }

    /// The request coordinator (for the loading indicator)
    pub fn coordinator(&self) -> &RequestCoordinator<T> {
        &self.coordinator
    }

    /// The surface
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Run any action; this is what a retry affordance calls
    pub async fn dispatch(&self, action: &Action) -> ActionOutcome {
        match action {
            Action::LoadSpread(kind) => self.load_spread(*kind).await,
            Action::Ask { question } => self.ask(question).await,
            Action::Search { query } => self.search(query).await,
            Action::ShowCard { id } => self.show_card(id).await,
            Action::ClearSearch => self.clear_search().await,
            Action::Status => self.check_status().await,
        }
    }

    /// Draw a spread into the main region
    pub async fn load_spread(&self, kind: SpreadKind) -> ActionOutcome {
        info!(spread = %kind, "Loading spread");
        self.run(
            Action::LoadSpread(kind),
            ApiRequest::spread(kind),
            Region::Main,
            ViewContext::spread(kind),
        )
        .await
    }

    /// Ask a question; the question box is cleared once the answer is shown
    pub async fn ask(&self, question: &str) -> ActionOutcome {
        let question = question.trim();
        if question.is_empty() {
            self.write(Region::Main, render::render_question_prompt())
                .await;
            return ActionOutcome::Rejected(InputError::EmptyQuestion);
        }

        info!(question, "Asking question");
        let outcome = self
            .run(
                Action::Ask {
                    question: question.to_string(),
                },
                ApiRequest::interpret(question),
                Region::Main,
                ViewContext::Question {
                    question: question.to_string(),
                },
            )
            .await;

        if matches!(outcome, ActionOutcome::Rendered) {
            if let Err(e) = self.surface.clear_input(InputField::Question).await {
                warn!(error = %e, "Failed to clear question input");
            }
        }
        outcome
    }

    /// Search card meanings into the search region
    pub async fn search(&self, query: &str) -> ActionOutcome {
        let query = query.trim();
        if query.is_empty() {
            self.write(Region::SearchResults, render::render_search_prompt())
                .await;
            return ActionOutcome::Rejected(InputError::EmptyQuery);
        }

        info!(query, "Searching cards");
        let owner = self.claim_search_region();
        self.write(Region::SearchResults, render::render_searching(query))
            .await;
        let outcome = self
            .run(
                Action::Search {
                    query: query.to_string(),
                },
                ApiRequest::search(query),
                Region::SearchResults,
                ViewContext::Search {
                    query: query.to_string(),
                },
            )
            .await;

        // superseded from the main region: take the placeholder down again
        if matches!(outcome, ActionOutcome::Superseded)
            && self.search_owner.load(Ordering::SeqCst) == owner
        {
            debug!(query, "Restoring search region after superseded search");
            self.write(Region::SearchResults, render::render_search_cleared())
                .await;
        }
        outcome
    }

    /// Open one card in the main region
    pub async fn show_card(&self, id: &str) -> ActionOutcome {
        let id = id.trim();
        if id.is_empty() {
            warn!("Card lookup without an identifier");
            return ActionOutcome::Rejected(InputError::EmptyCardId);
        }

        info!(card = id, "Showing card details");
        self.run(
            Action::ShowCard { id: id.to_string() },
            ApiRequest::card(id),
            Region::Main,
            ViewContext::Detail,
        )
        .await
    }

    /// Reset the search box and region; no network call
    pub async fn clear_search(&self) -> ActionOutcome {
        self.claim_search_region();
        if let Err(e) = self.surface.clear_input(InputField::Search).await {
            warn!(error = %e, "Failed to clear search input");
        }
        self.write(Region::SearchResults, render::render_search_cleared())
            .await;
        ActionOutcome::Rendered
    }

    /// Log the backend's health payload
    pub async fn check_status(&self) -> ActionOutcome {
        match self.coordinator.execute(ApiRequest::status()).await {
            Outcome::Success(payload) => {
                info!(status = %payload, "API status");
                ActionOutcome::Completed
            }
            Outcome::Cancelled => ActionOutcome::Superseded,
            Outcome::Failed(reason) => self.fail(&Action::Status, Region::Main, reason).await,
        }
    }

    fn claim_search_region(&self) -> u64 {
        self.search_owner.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn run(
        &self,
        action: Action,
        request: ApiRequest,
        region: Region,
        context: ViewContext,
    ) -> ActionOutcome {
        match self.coordinator.execute(request).await {
            Outcome::Success(body) => {
                self.show(region, body, &context).await;
                ActionOutcome::Rendered
            }
            Outcome::Cancelled => {
                debug!(?action, "Action superseded");
                ActionOutcome::Superseded
            }
            Outcome::Failed(reason) => self.fail(&action, region, reason).await,
        }
    }

    async fn show(&self, region: Region, body: Value, context: &ViewContext) {
        let view = self.mapper.to_view_model(body, context);
        self.write(region, render::render(&view)).await;
    }

    async fn fail(&self, action: &Action, region: Region, reason: FailureReason) -> ActionOutcome {
        warn!(?action, reason = %reason, "Action failed");
        self.write(region, render::render_error(action)).await;
        ActionOutcome::Failed(reason)
    }

    async fn write(&self, region: Region, markup: String) {
        if let Err(e) = self.surface.replace(region, markup).await {
            warn!(?region, error = %e, "Failed to update surface");
        }
    }
}
