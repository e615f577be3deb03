/// Page view controllers: loading-state lifecycle around each fetch
use crate::clients::LaunchApi;
use crate::domain::{LaunchDetail, LaunchSummary};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info};

/// How a search settled. Errors and empty results render differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Error,
    Empty,
    Found(Vec<LaunchSummary>),
}

impl From<Option<Vec<LaunchSummary>>> for SearchOutcome {
    fn from(results: Option<Vec<LaunchSummary>>) -> Self {
        match results {
            None => SearchOutcome::Error,
            Some(results) if results.is_empty() => SearchOutcome::Empty,
            Some(results) => SearchOutcome::Found(results),
        }
    }
}

/// How a detail lookup settled. A failed fetch and an unknown id are
/// deliberately the same state here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailOutcome {
    NotFound,
    Found(Box<LaunchDetail>),
}

impl From<Option<LaunchDetail>> for DetailOutcome {
    fn from(launch: Option<LaunchDetail>) -> Self {
        match launch {
            Some(launch) => DetailOutcome::Found(Box::new(launch)),
            None => DetailOutcome::NotFound,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    Idle,
    Loading { query: String },
    Settled { query: String, outcome: SearchOutcome },
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Loading { .. })
    }

    /// Query to pre-fill the search form with
    pub fn query(&self) -> Option<&str> {
        match self {
            SearchState::Idle => None,
            SearchState::Loading { query } | SearchState::Settled { query, .. } => Some(query),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailState {
    Idle,
    Loading { id: String },
    Settled { id: String, outcome: DetailOutcome },
}

#[cfg(test)]
impl DetailState {
    pub fn is_loading(&self) -> bool {
        matches!(self, DetailState::Loading { .. })
    }
}

/// Published view state plus the generation of the fetch that owns it.
///
/// Every fetch takes a new generation when it starts; a resolution is only
/// applied while its generation is still the current one.
struct Lifecycle<S> {
    state: watch::Sender<S>,
    generation: AtomicU64,
}

impl<S> Lifecycle<S> {
    fn new(initial: S) -> Self {
        let (state, _) = watch::channel(initial);
        Self {
            state,
            generation: AtomicU64::new(0),
        }
    }

    fn begin(&self, loading: S) -> u64 {
        let mut generation = 0;
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = loading;
        });
        generation
    }

    fn settle(&self, generation: u64, settled: S) -> bool {
        self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *state = settled;
            true
        })
    }

    #[cfg(test)]
    fn detach(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    #[cfg(test)]
    fn subscribe(&self) -> watch::Receiver<S> {
        self.state.subscribe()
    }
}

/// Drives the search view.
pub struct SearchController<A: LaunchApi + ?Sized> {
    api: Arc<A>,
    lifecycle: Lifecycle<SearchState>,
}

impl<A: LaunchApi + ?Sized> SearchController<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            lifecycle: Lifecycle::new(SearchState::Idle),
        }
    }

    /// Run a search and settle the view with its outcome.
    ///
    /// Blank queries are ignored. Returns whether the outcome was applied;
    /// it is not when a newer search started or the view was detached while
    /// this one was in flight.
    pub async fn search(&self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return false;
        }

        let generation = self.lifecycle.begin(SearchState::Loading {
            query: query.to_string(),
        });
        info!("searching launches for {:?}", query);

        let outcome = SearchOutcome::from(self.api.search_launches(query).await);

        let applied = self.lifecycle.settle(
            generation,
            SearchState::Settled {
                query: query.to_string(),
                outcome,
            },
        );
        if !applied {
            debug!("discarding stale search result for {:?}", query);
        }
        applied
    }

    /// Drop any in-flight resolution; the view is going away.
    #[cfg(test)]
    pub fn detach(&self) {
        self.lifecycle.detach();
    }

    pub fn snapshot(&self) -> SearchState {
        self.lifecycle.state.borrow().clone()
    }

    #[cfg(test)]
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.lifecycle.subscribe()
    }
}

/// Drives the detail view.
pub struct DetailController<A: LaunchApi + ?Sized> {
    api: Arc<A>,
    lifecycle: Lifecycle<DetailState>,
}

impl<A: LaunchApi + ?Sized> DetailController<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            api,
            lifecycle: Lifecycle::new(DetailState::Idle),
        }
    }

    /// Load one launch and settle the view, see [`SearchController::search`].
    pub async fn load(&self, id: &str) -> bool {
        let id = id.trim();
        if id.is_empty() {
            return false;
        }

        let generation = self.lifecycle.begin(DetailState::Loading { id: id.to_string() });
        info!("loading launch {:?}", id);

        let outcome = DetailOutcome::from(self.api.get_launch(id).await);

        let applied = self.lifecycle.settle(
            generation,
            DetailState::Settled {
                id: id.to_string(),
                outcome,
            },
        );
        if !applied {
            debug!("discarding stale launch {:?}", id);
        }
        applied
    }

    #[cfg(test)]
    pub fn detach(&self) {
        self.lifecycle.detach();
    }

    pub fn snapshot(&self) -> DetailState {
        self.lifecycle.state.borrow().clone()
    }

    #[cfg(test)]
    pub fn subscribe(&self) -> watch::Receiver<DetailState> {
        self.lifecycle.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Described;
    use crate::errors::{ApiError, ApiResult};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    /// Holds every lookup until its key is released.
    #[derive(Default)]
    struct GatedApi {
        gates: std::sync::Mutex<HashMap<String, Arc<Notify>>>,
        searches: HashMap<String, ApiResult<Vec<LaunchSummary>>>,
        launches: HashMap<String, LaunchDetail>,
        calls: AtomicUsize,
    }

    impl GatedApi {
        fn gate(&self, key: &str) -> Arc<Notify> {
            self.gates
                .lock()
                .unwrap()
                .entry(key.to_string())
                .or_default()
                .clone()
        }

        fn release(&self, key: &str) {
            self.gate(key).notify_one();
        }
    }

    #[async_trait]
    impl LaunchApi for GatedApi {
        async fn try_search_launches(&self, query: &str) -> ApiResult<Vec<LaunchSummary>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.gate(query).notified().await;
            match self.searches.get(query) {
                Some(Ok(results)) => Ok(results.clone()),
                _ => Err(ApiError::UpstreamStatus(500)),
            }
        }

        async fn try_get_launch(&self, id: &str) -> ApiResult<LaunchDetail> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.gate(id).notified().await;
            self.launches
                .get(id)
                .cloned()
                .ok_or_else(|| ApiError::NotFound(id.to_string()))
        }
    }

    fn summary(id: &str) -> LaunchSummary {
        LaunchSummary {
            id: id.to_string(),
            name: format!("Launch {id}"),
            status: "Go".to_string(),
            mission: "Test".to_string(),
        }
    }

    #[test]
    fn test_search_outcome_distinguishes_error_from_empty() {
        assert_eq!(SearchOutcome::from(None), SearchOutcome::Error);
        assert_eq!(SearchOutcome::from(Some(vec![])), SearchOutcome::Empty);
        assert_eq!(
            SearchOutcome::from(Some(vec![summary("a")])),
            SearchOutcome::Found(vec![summary("a")])
        );
    }

    #[tokio::test]
    async fn test_search_is_loading_until_fetch_resolves() {
        let mut api = GatedApi::default();
        api.searches.insert("moon".into(), Ok(vec![summary("a")]));
        let api = Arc::new(api);
        let controller = Arc::new(SearchController::new(api.clone()));
        let mut rx = controller.subscribe();

        let task = tokio::spawn({
            let controller = controller.clone();
            async move { controller.search("  moon ").await }
        });

        rx.changed().await.unwrap();
        assert_eq!(
            *rx.borrow_and_update(),
            SearchState::Loading {
                query: "moon".into()
            }
        );

        api.release("moon");
        assert!(task.await.unwrap());

        assert!(rx.has_changed().unwrap());
        assert_eq!(
            *rx.borrow_and_update(),
            SearchState::Settled {
                query: "moon".into(),
                outcome: SearchOutcome::Found(vec![summary("a")]),
            }
        );
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_search_failure_settles_as_error() {
        let api = Arc::new(GatedApi::default());
        api.release("xyz");
        let controller = SearchController::new(api);
        assert!(controller.search("xyz").await);
        assert_eq!(
            controller.snapshot(),
            SearchState::Settled {
                query: "xyz".into(),
                outcome: SearchOutcome::Error,
            }
        );
        assert!(!controller.snapshot().is_loading());
    }

    #[tokio::test]
    async fn test_blank_search_does_nothing() {
        let api = Arc::new(GatedApi::default());
        let controller = SearchController::new(api.clone());
        assert!(!controller.search("   ").await);
        assert_eq!(controller.snapshot(), SearchState::Idle);
        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_overlapping_searches_keep_latest() {
        let mut api = GatedApi::default();
        api.searches.insert("first".into(), Ok(vec![summary("1")]));
        api.searches.insert("second".into(), Ok(vec![]));
        let api = Arc::new(api);
        let controller = Arc::new(SearchController::new(api.clone()));
        let mut rx = controller.subscribe();

        let first = tokio::spawn({
            let controller = controller.clone();
            async move { controller.search("first").await }
        });
        rx.changed().await.unwrap();
        let second = tokio::spawn({
            let controller = controller.clone();
            async move { controller.search("second").await }
        });
        rx.changed().await.unwrap();

        api.release("second");
        assert!(second.await.unwrap());
        api.release("first");
        assert!(!first.await.unwrap());

        assert_eq!(
            controller.snapshot(),
            SearchState::Settled {
                query: "second".into(),
                outcome: SearchOutcome::Empty,
            }
        );
    }

    #[tokio::test]
    async fn test_detail_loading_cleared_once_on_failure() {
        let api = Arc::new(GatedApi::default());
        let controller = Arc::new(DetailController::new(api.clone()));
        let mut rx = controller.subscribe();

        let task = tokio::spawn({
            let controller = controller.clone();
            async move { controller.load("missing").await }
        });

        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_loading());

        api.release("missing");
        assert!(task.await.unwrap());

        assert!(rx.has_changed().unwrap());
        assert_eq!(
            *rx.borrow_and_update(),
            DetailState::Settled {
                id: "missing".into(),
                outcome: DetailOutcome::NotFound,
            }
        );
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_detail_found() {
        let mut api = GatedApi::default();
        let launch = LaunchDetail {
            name: "Ariane 6".into(),
            status: Some(Described {
                name: Some("Success".into()),
                description: None,
            }),
            ..Default::default()
        };
        api.launches.insert("a6".into(), launch.clone());
        let api = Arc::new(api);
        api.release("a6");

        let controller = DetailController::new(api);
        assert!(controller.load("a6").await);
        assert_eq!(
            controller.snapshot(),
            DetailState::Settled {
                id: "a6".into(),
                outcome: DetailOutcome::Found(Box::new(launch)),
            }
        );
    }

    #[tokio::test]
    async fn test_detached_view_ignores_late_resolution() {
        let api = Arc::new(GatedApi::default());
        let controller = Arc::new(DetailController::new(api.clone()));
        let mut rx = controller.subscribe();

        let task = tokio::spawn({
            let controller = controller.clone();
            async move { controller.load("slow").await }
        });
        rx.changed().await.unwrap();

        controller.detach();
        api.release("slow");
        assert!(!task.await.unwrap());
        assert!(controller.snapshot().is_loading());
    }
}
