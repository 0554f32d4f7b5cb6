//! Search/detail state machine.
//!
//! The controller owns the filter selections and the result cache. It is
//! driven by [`Msg`] values (user input and network resolutions) and answers
//! each with at most one [`Command`] for the runtime to execute. It never
//! performs I/O itself.
//!
//! Every command carries a sequence number. Resolutions whose number is not
//! the latest one issued for their kind are dropped, so a slow response can
//! never overwrite the results of a newer request.

mod input;

pub use input::{Key, Target, UiEvent};

use crate::cache::ResultCache;
use crate::error::MealError;
use crate::filter::{self, FilterState, Mood, TimeBucket};
use crate::model::{MealDetail, MealSummary};
use log::{debug, error, info};

pub const WELCOME_MESSAGE: &str = "Type an ingredient (e.g., \"chicken\") and press Search.";
pub const BLANK_QUERY_MESSAGE: &str = "Type an ingredient and press Search.";
pub const SEARCHING_MESSAGE: &str = "Searching...";
pub const NO_RESULTS_MESSAGE: &str = "No recipes found. Try a different ingredient.";
pub const SEARCH_FAILED_MESSAGE: &str = "Network or API error. Try again.";
pub const DETAIL_NOT_FOUND_MESSAGE: &str = "Details not available.";
pub const DETAIL_FAILED_MESSAGE: &str = "Failed to load meal details.";

/// Observable state of the widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Searching,
    ListShown,
    EmptyShown,
    DetailLoading,
    DetailShown,
    DetailError,
}

/// What the result list area currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPane {
    Message(String),
    Cards(Vec<MealSummary>),
}

/// What the detail panel currently shows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DetailPane {
    #[default]
    Closed,
    Loading,
    Shown(MealDetail),
    Error(String),
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub phase: Phase,
    pub query: String,
    pub filters: FilterState,
    pub list: ListPane,
    pub detail: DetailPane,
}

/// Inputs to the state machine
#[derive(Debug)]
pub enum Msg {
    /// Ingredient field contents changed
    QueryEdited(String),
    /// Search button or Enter in the ingredient field
    SubmitSearch,
    TimeSelected(TimeBucket),
    MoodToggled { mood: Mood, checked: bool },
    /// A result card was activated
    OpenDetail(String),
    CloseDetail,
    SearchResolved {
        seq: u64,
        term: String,
        result: Result<Vec<MealSummary>, MealError>,
    },
    LookupResolved {
        seq: u64,
        id: String,
        result: Result<Option<MealDetail>, MealError>,
    },
}

/// Side effects requested by the controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Search { seq: u64, term: String },
    Lookup { seq: u64, id: String },
}

#[derive(Debug)]
pub struct Controller {
    query: String,
    filters: FilterState,
    cache: ResultCache,
    list_phase: Phase,
    list: ListPane,
    detail: DetailPane,
    search_seq: u64,
    lookup_seq: u64,
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

impl Controller {
    pub fn new() -> Self {
        Controller {
            query: String::new(),
            filters: FilterState::default(),
            cache: ResultCache::new(),
            list_phase: Phase::Idle,
            list: ListPane::Message(WELCOME_MESSAGE.to_string()),
            detail: DetailPane::Closed,
            search_seq: 0,
            lookup_seq: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        match self.detail {
            DetailPane::Closed => self.list_phase,
            DetailPane::Loading => Phase::DetailLoading,
            DetailPane::Shown(_) => Phase::DetailShown,
            DetailPane::Error(_) => Phase::DetailError,
        }
    }

    /// Phase of the list area alone, ignoring an open detail panel
    pub fn list_phase(&self) -> Phase {
        self.list_phase
    }

    pub fn cache(&self) -> &ResultCache {
        &self.cache
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn list(&self) -> &ListPane {
        &self.list
    }

    pub fn detail(&self) -> &DetailPane {
        &self.detail
    }

    pub fn screen(&self) -> Screen {
        Screen {
            phase: self.phase(),
            query: self.query.clone(),
            filters: self.filters.clone(),
            list: self.list.clone(),
            detail: self.detail.clone(),
        }
    }

    /// Apply one message and return the command it requires, if any
    pub fn update(&mut self, msg: Msg) -> Option<Command> {
        match msg {
            Msg::QueryEdited(query) => {
                self.query = query;
                None
            }
            Msg::SubmitSearch => self.submit_search(),
            Msg::TimeSelected(bucket) => {
                self.filters.time_bucket = bucket;
                self.refilter();
                None
            }
            Msg::MoodToggled { mood, checked } => {
                if self.filters.set_mood(mood, checked) {
                    self.refilter();
                }
                None
            }
            Msg::OpenDetail(id) => self.open_detail(id),
            Msg::CloseDetail => {
                self.detail = DetailPane::Closed;
                None
            }
            Msg::SearchResolved { seq, term, result } => {
                self.finish_search(seq, term, result);
                None
            }
            Msg::LookupResolved { seq, id, result } => {
                self.finish_lookup(seq, id, result);
                None
            }
        }
    }

    fn submit_search(&mut self) -> Option<Command> {
        let term = self.query.trim();
        if term.is_empty() {
            self.list_phase = Phase::Idle;
            self.list = ListPane::Message(BLANK_QUERY_MESSAGE.to_string());
            return None;
        }

        let term = term.to_string();
        self.search_seq += 1;
        self.list_phase = Phase::Searching;
        self.list = ListPane::Message(SEARCHING_MESSAGE.to_string());
        info!("Searching for '{}' (request {})", term, self.search_seq);

        Some(Command::Search {
            seq: self.search_seq,
            term,
        })
    }

    fn finish_search(
        &mut self,
        seq: u64,
        term: String,
        result: Result<Vec<MealSummary>, MealError>,
    ) {
        if seq != self.search_seq {
            debug!(
                "Dropping stale search response {} for '{}' (latest is {})",
                seq, term, self.search_seq
            );
            return;
        }

        match result {
            Ok(meals) => {
                debug!("Caching {} results for '{}'", meals.len(), term);
                self.cache.replace(term, meals);
                self.render_list();
            }
            Err(MealError::Validation(_)) => {
                self.list_phase = Phase::Idle;
                self.list = ListPane::Message(BLANK_QUERY_MESSAGE.to_string());
            }
            Err(e) => {
                error!("Search for '{}' failed: {}", term, e);
                self.list_phase = Phase::EmptyShown;
                self.list = ListPane::Message(SEARCH_FAILED_MESSAGE.to_string());
            }
        }
    }

    fn open_detail(&mut self, id: String) -> Option<Command> {
        let id = id.trim().to_string();
        if id.is_empty() {
            return None;
        }

        self.lookup_seq += 1;
        self.detail = DetailPane::Loading;
        Some(Command::Lookup {
            seq: self.lookup_seq,
            id,
        })
    }

    fn finish_lookup(
        &mut self,
        seq: u64,
        id: String,
        result: Result<Option<MealDetail>, MealError>,
    ) {
        if seq != self.lookup_seq || self.detail != DetailPane::Loading {
            debug!("Dropping stale lookup response {} for meal {}", seq, id);
            return;
        }

        self.detail = match result {
            Ok(Some(detail)) => DetailPane::Shown(detail),
            Ok(None) => DetailPane::Error(DETAIL_NOT_FOUND_MESSAGE.to_string()),
            Err(e) => {
                error!("Lookup for meal {} failed: {}", id, e);
                DetailPane::Error(DETAIL_FAILED_MESSAGE.to_string())
            }
        };
    }

    /// Re-derive the list after a filter change; never fetches
    fn refilter(&mut self) {
        // Nothing to re-derive until a search has completed, and an in-flight
        // search will render with the new filters when it lands.
        if self.list_phase == Phase::Searching || self.cache.term().is_none() {
            return;
        }
        self.render_list();
    }

    fn render_list(&mut self) {
        let visible = filter::apply(self.cache.meals(), &self.filters);
        if visible.is_empty() {
            self.list_phase = Phase::EmptyShown;
            self.list = ListPane::Message(NO_RESULTS_MESSAGE.to_string());
        } else {
            self.list_phase = Phase::ListShown;
            self.list = ListPane::Cards(visible);
        }
    }
}
