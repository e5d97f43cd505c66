//! Debounced search bar state.
//!
//! Keystrokes go through [`SearchDebouncer::on_input`]. The text is recorded at once,
//! and a search is dispatched only after the input has been quiet for the configured
//! period. Every new keystroke aborts the pending timer.
//!
//! Dispatched requests run as detached tasks and are never cancelled. Instead each
//! dispatch carries a sequence number and a response is applied only if no newer
//! dispatch (or collapse, or empty input) happened while it was in flight.

use crate::api::SearchApi;
use crate::app::actions::NavAction;
use crate::app::navigation;
use crate::domain::{merge_results, SearchResult};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::Instrument;

/// Quiet period used when none is configured.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Point-in-time view of the search bar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSnapshot {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub expanded: bool,
    pub focused: bool,
    pub loading: bool,
}

#[derive(Debug, Default)]
struct SearchState {
    query: String,
    results: Vec<SearchResult>,
    expanded: bool,
    focused: bool,
    loading: bool,
    /// Sequence number of the newest dispatch (or invalidation).
    latest_issued: u64,
    /// Bumped on every keystroke; a timer only fires for its own generation.
    input_generation: u64,
}

struct Shared {
    api: Arc<dyn SearchApi>,
    state: Mutex<SearchState>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, SearchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Claims the next sequence number and marks a request in flight.
    fn reserve(state: &mut SearchState) -> u64 {
        state.latest_issued += 1;
        state.loading = true;
        state.latest_issued
    }

    /// Reserves a sequence number only if no keystroke arrived since `generation`.
    ///
    /// The check and the reservation share one critical section, so a collapse or
    /// blank input can only run before (and cancel) or after (and invalidate) it.
    fn reserve_if_current(&self, generation: u64) -> Option<u64> {
        let mut state = self.lock();
        if state.input_generation != generation {
            return None;
        }
        Some(Self::reserve(&mut state))
    }

    async fn dispatch(&self, query: String) {
        let seq = Self::reserve(&mut self.lock());
        self.dispatch_with_seq(seq, query).await;
    }

    async fn dispatch_with_seq(&self, seq: u64, query: String) {
        let outcome = self
            .api
            .search(&query)
            .instrument(tracing::debug_span!("search_dispatch", seq, query = %query))
            .await;

        let mut state = self.lock();
        if state.latest_issued != seq {
            tracing::debug!(seq, latest = state.latest_issued, "discarding stale search response");
            return;
        }
        state.loading = false;

        match outcome {
            Ok(response) => {
                state.results = merge_results(response);
                tracing::debug!(seq, count = state.results.len(), "search results applied");
            }
            Err(e) => {
                tracing::warn!(error = %e, query = %query, "search failed");
            }
        }
    }

    /// Makes any in-flight response stale.
    fn invalidate(state: &mut SearchState) {
        state.latest_issued += 1;
        state.loading = false;
    }
}

/// Search bar controller.
pub struct SearchDebouncer {
    shared: Arc<Shared>,
    quiet: Duration,
    pending: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for SearchDebouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchDebouncer")
            .field("quiet", &self.quiet)
            .field("pending", &self.pending_dispatch())
            .finish_non_exhaustive()
    }
}

impl SearchDebouncer {
    pub fn new(api: Arc<dyn SearchApi>, quiet: Duration) -> Self {
        Self {
            shared: Arc::new(Shared {
                api,
                state: Mutex::new(SearchState::default()),
            }),
            quiet,
            pending: None,
        }
    }

    /// Records a keystroke and (re)schedules the search.
    ///
    /// Blank text clears the results immediately and schedules nothing. Must be
    /// called from within a tokio runtime for a search to be scheduled.
    pub fn on_input(&mut self, text: &str) {
        self.cancel_pending();

        let generation = {
            let mut state = self.shared.lock();
            state.query = text.to_string();
            state.input_generation += 1;

            if text.trim().is_empty() {
                state.results.clear();
                Shared::invalidate(&mut state);
                tracing::debug!("blank query, results cleared");
                return;
            }
            state.input_generation
        };

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::error!("no tokio runtime available, search not scheduled");
            return;
        };

        let deadline = Instant::now() + self.quiet;
        let shared = Arc::clone(&self.shared);
        let query = text.to_string();

        self.pending = Some(runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            // Input arriving on the same tick as the deadline wins.
            tokio::task::yield_now().await;

            let Some(seq) = shared.reserve_if_current(generation) else {
                tracing::debug!(generation, "superseded search timer");
                return;
            };

            // Detached so that later input cancels scheduling, not the request.
            tokio::spawn(async move { shared.dispatch_with_seq(seq, query).await });
        }));
    }

    /// Runs a search now and applies its results unless a newer one supersedes it.
    pub async fn dispatch(&self, query: &str) {
        self.shared.dispatch(query.to_string()).await;
    }

    /// Whether a search is scheduled but not yet dispatched.
    #[must_use]
    pub fn pending_dispatch(&self) -> bool {
        self.pending.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Closes the search bar: cancels the timer, clears query and results, drops focus.
    pub fn collapse(&mut self) {
        self.cancel_pending();

        let mut state = self.shared.lock();
        state.input_generation += 1;
        state.query.clear();
        state.results.clear();
        state.focused = false;
        state.expanded = false;
        Shared::invalidate(&mut state);
        tracing::debug!("search collapsed");
    }

    /// Opens the search bar and focuses the input.
    pub fn expand(&mut self) {
        let mut state = self.shared.lock();
        state.expanded = true;
        state.focused = true;
    }

    /// Search button press.
    pub fn toggle(&mut self) {
        let expanded = self.shared.lock().expanded;
        if expanded {
            self.collapse();
        } else {
            self.expand();
        }
    }

    /// Navigation for the result at `index`, if there is one.
    #[must_use]
    pub fn select(&self, index: usize) -> Option<NavAction> {
        let state = self.shared.lock();
        let Some(result) = state.results.get(index) else {
            tracing::debug!(index, count = state.results.len(), "no search result at index");
            return None;
        };
        Some(NavAction::Push(navigation::route_for_result(result)))
    }

    #[must_use]
    pub fn snapshot(&self) -> SearchSnapshot {
        let state = self.shared.lock();
        SearchSnapshot {
            query: state.query.clone(),
            results: state.results.clone(),
            expanded: state.expanded,
            focused: state.focused,
            loading: state.loading,
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::routes::{RecipeTarget, Route};
    use crate::domain::{Recipe, SearchKind, SearchResponse, UserProfile};
    use crate::test_support::ScriptedSearch;

    fn recipe(id: i64, title: &str) -> Recipe {
        Recipe {
            id: Some(id),
            title: title.to_string(),
            ..Recipe::default()
        }
    }

    fn debouncer(api: &Arc<ScriptedSearch>) -> SearchDebouncer {
        SearchDebouncer::new(api.clone(), DEFAULT_QUIET_PERIOD)
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_input_collapses_into_one_dispatch() {
        let api = Arc::new(ScriptedSearch::new());
        let mut search = debouncer(&api);
        let start = Instant::now();

        search.on_input("a");
        tokio::time::sleep(ms(100)).await;
        search.on_input("ab");
        tokio::time::sleep(ms(500)).await;
        search.on_input("abc");
        tokio::time::sleep(ms(700)).await;

        let calls = api.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "abc");
        assert_eq!(calls[0].1 - start, ms(1100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_quiet_period_is_configurable() {
        let api = Arc::new(ScriptedSearch::new());
        let mut search = SearchDebouncer::new(api.clone(), ms(50));
        let start = Instant::now();

        search.on_input("pho");
        assert!(search.pending_dispatch());
        tokio::time::sleep(ms(100)).await;

        assert_eq!(api.calls().len(), 1);
        assert_eq!(api.calls()[0].1 - start, ms(50));
        assert!(!search.pending_dispatch());
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_input_clears_synchronously() {
        let api = Arc::new(ScriptedSearch::new());
        api.respond(
            "soup",
            SearchResponse {
                recipes: vec![recipe(1, "Miso soup")],
                users: vec![],
            },
        );
        let mut search = debouncer(&api);

        search.on_input("soup");
        tokio::time::sleep(ms(600)).await;
        assert_eq!(search.snapshot().results.len(), 1);

        search.on_input("   ");
        let snapshot = search.snapshot();
        assert!(snapshot.results.is_empty());
        assert_eq!(snapshot.query, "   ");
        assert!(!search.pending_dispatch());

        tokio::time::sleep(ms(1000)).await;
        assert_eq!(api.calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_results_keep_recipes_then_users() {
        let api = Arc::new(ScriptedSearch::new());
        api.respond(
            "pasta",
            SearchResponse {
                recipes: vec![recipe(1, "Carbonara"), recipe(2, "Pesto")],
                users: vec![UserProfile::new(9, "pastafan")],
            },
        );
        let search = debouncer(&api);

        search.dispatch("pasta").await;

        let results = search.snapshot().results;
        let keys: Vec<_> = results.iter().map(SearchResult::key).collect();
        assert_eq!(
            keys,
            vec![
                (SearchKind::Recipe, 1),
                (SearchKind::Recipe, 2),
                (SearchKind::User, 9)
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_is_discarded() {
        let api = Arc::new(ScriptedSearch::new());
        api.respond_after(
            "slow",
            ms(1000),
            SearchResponse {
                recipes: vec![recipe(1, "Slow roast")],
                users: vec![],
            },
        );
        api.respond_after(
            "fast",
            ms(10),
            SearchResponse {
                recipes: vec![recipe(2, "Fast noodles")],
                users: vec![],
            },
        );
        let mut search = debouncer(&api);

        search.on_input("slow");
        tokio::time::sleep(ms(600)).await;
        assert!(search.snapshot().loading);

        search.on_input("fast");
        tokio::time::sleep(ms(2000)).await;

        let snapshot = search.snapshot();
        assert_eq!(snapshot.results.len(), 1);
        assert_eq!(snapshot.results[0].display_name(), "Fast noodles");
        assert!(!snapshot.loading);
        // The slow request ran to completion; it was only ignored.
        assert_eq!(api.completed(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_search_keeps_previous_results() {
        let api = Arc::new(ScriptedSearch::new());
        api.respond(
            "tofu",
            SearchResponse {
                recipes: vec![recipe(3, "Mapo tofu")],
                users: vec![],
            },
        );
        let search = debouncer(&api);

        search.dispatch("tofu").await;
        search.dispatch("broken").await;

        let snapshot = search.snapshot();
        assert_eq!(snapshot.results.len(), 1);
        assert!(!snapshot.loading);
    }

    #[tokio::test(start_paused = true)]
    async fn test_collapse_cancels_and_clears() {
        let api = Arc::new(ScriptedSearch::new());
        api.respond_after(
            "curry",
            ms(300),
            SearchResponse {
                recipes: vec![recipe(4, "Curry")],
                users: vec![],
            },
        );
        let mut search = debouncer(&api);
        search.toggle();
        assert!(search.snapshot().expanded);
        assert!(search.snapshot().focused);

        search.on_input("curry");
        tokio::time::sleep(ms(600)).await;
        search.toggle();

        let snapshot = search.snapshot();
        assert_eq!(snapshot, SearchSnapshot::default());

        tokio::time::sleep(ms(1000)).await;
        assert!(search.snapshot().results.is_empty());

        search.on_input("curry");
        search.collapse();
        tokio::time::sleep(ms(1000)).await;
        assert_eq!(api.calls().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_aborts_pending_timer() {
        let api = Arc::new(ScriptedSearch::new());
        let mut search = debouncer(&api);

        search.on_input("ramen");
        drop(search);
        tokio::time::sleep(ms(1000)).await;

        assert!(api.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_select_pushes_result_route() {
        let api = Arc::new(ScriptedSearch::new());
        api.respond(
            "eve",
            SearchResponse {
                recipes: vec![recipe(7, "Eve's pie")],
                users: vec![UserProfile::new(4, "eve")],
            },
        );
        let search = debouncer(&api);
        search.dispatch("eve").await;

        assert_eq!(
            search.select(0),
            Some(NavAction::Push(Route::RecipeDetails(RecipeTarget::Existing(7))))
        );
        assert_eq!(
            search.select(1),
            Some(NavAction::Push(Route::Dashboard {
                user_id: 4,
                username: "eve".to_string()
            }))
        );
        assert_eq!(search.select(2), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reserved_dispatch_cannot_land_after_collapse() {
        let api = Arc::new(ScriptedSearch::new());
        api.respond_after(
            "stew",
            ms(100),
            SearchResponse {
                recipes: vec![recipe(5, "Beef stew")],
                users: vec![],
            },
        );
        let mut search = debouncer(&api);
        let generation = {
            let mut state = search.shared.lock();
            state.input_generation += 1;
            state.input_generation
        };

        let seq = search.shared.reserve_if_current(generation).unwrap();
        search.collapse();
        assert_eq!(search.shared.reserve_if_current(generation), None);
        search
            .shared
            .dispatch_with_seq(seq, "stew".to_string())
            .await;

        assert_eq!(api.completed(), 1);
        assert_eq!(search.snapshot(), SearchSnapshot::default());
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_input_invalidates_reserved_dispatch() {
        let api = Arc::new(ScriptedSearch::new());
        api.respond(
            "stew",
            SearchResponse {
                recipes: vec![recipe(5, "Beef stew")],
                users: vec![],
            },
        );
        let mut search = debouncer(&api);
        search.on_input("stew");
        let generation = search.shared.lock().input_generation;

        let seq = search.shared.reserve_if_current(generation).unwrap();
        search.on_input("");
        search
            .shared
            .dispatch_with_seq(seq, "stew".to_string())
            .await;

        let snapshot = search.snapshot();
        assert!(snapshot.results.is_empty());
        assert!(!snapshot.loading);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_collapse_racing_timer_leaves_no_results() {
        let api = Arc::new(ScriptedSearch::new());
        api.respond(
            "udon",
            SearchResponse {
                recipes: vec![recipe(6, "Kitsune udon")],
                users: vec![],
            },
        );
        let mut search = SearchDebouncer::new(api.clone(), Duration::ZERO);

        for _ in 0..200 {
            search.on_input("udon");
            tokio::task::yield_now().await;
            search.collapse();
            tokio::time::sleep(ms(1)).await;
            assert!(search.snapshot().results.is_empty());
        }
    }

    #[test]
    fn test_input_outside_runtime_schedules_nothing() {
        let api = Arc::new(ScriptedSearch::new());
        let mut search = debouncer(&api);

        search.on_input("soup");

        assert_eq!(search.snapshot().query, "soup");
        assert!(!search.pending_dispatch());
    }
}
