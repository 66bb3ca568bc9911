//! A filter results page: form controller, in-flight requests and the view.
//!
//! Responses can arrive out of order. Each request is tagged with the query it
//! was issued for; a response is only applied if its tag is the newest one and
//! the query still matches what the URL says. Older responses are dropped, the
//! request itself is never cancelled.

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::filters::{FilterFormController, Navigation};
use crate::http::HttpClient;
use crate::types::RecipesResult;
use crate::view::ResultView;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestTag {
    pub seq: u64,
    pub query: String,
}

#[derive(Debug, Default)]
pub struct RequestTracker {
    latest: Option<u64>,
    next_seq: u64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag a new request, superseding every earlier one.
    pub fn begin(&mut self, query: &str) -> RequestTag {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.latest = Some(seq);
        RequestTag {
            seq,
            query: query.to_string(),
        }
    }

    pub fn accepts(&self, tag: &RequestTag, current_query: &str) -> bool {
        self.latest == Some(tag.seq) && tag.query == current_query
    }

    /// Forget all in-flight requests, e.g. when the page goes away.
    pub fn abandon(&mut self) {
        self.latest = None;
    }
}

pub struct FilterPage {
    controller: FilterFormController,
    tracker: RequestTracker,
    view: ResultView,
}

impl FilterPage {
    pub fn mount(query: &str) -> Self {
        Self {
            controller: FilterFormController::mount(query),
            tracker: RequestTracker::new(),
            view: ResultView::Loading,
        }
    }

    pub fn controller(&self) -> &FilterFormController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut FilterFormController {
        &mut self.controller
    }

    pub fn view(&self) -> &ResultView {
        &self.view
    }

    /// Start a fetch for the applied filters. The view shows loading until
    /// the matching response is applied.
    pub fn begin_load(&mut self) -> RequestTag {
        self.view = ResultView::Loading;
        self.tracker.begin(&self.controller.applied_query())
    }

    /// Apply a response if it's still wanted. Returns whether it was applied.
    pub fn finish_load(&mut self, tag: &RequestTag, result: Result<RecipesResult, ApiError>) -> bool {
        if !self.tracker.accepts(tag, &self.controller.applied_query()) {
            tracing::debug!(seq = tag.seq, query = %tag.query, "dropping stale response");
            return false;
        }
        self.view = ResultView::from_result(result);
        true
    }

    /// Complete a navigation produced by the controller and start loading.
    pub fn navigate(&mut self, navigation: &Navigation) -> RequestTag {
        self.controller.navigation_completed(&navigation.query);
        self.begin_load()
    }

    /// Fetch and apply results for the applied filters.
    pub async fn load<C: HttpClient>(&mut self, api: &ApiClient<C>) -> &ResultView {
        let tag = self.begin_load();
        let result = api.filter_query(&tag.query).await;
        self.finish_load(&tag, result);
        &self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::FilterField;
    use crate::types::Recipe;

    fn one_recipe() -> RecipesResult {
        RecipesResult {
            recipes: vec![Recipe {
                id: 1,
                name: "Risotto".to_string(),
                description: String::new(),
                time: 40,
                cuisine: "Italian".to_string(),
                difficulty: "medium".to_string(),
                image_url: None,
                tools: vec![],
                ingredients: vec!["rice".to_string()],
                taste: vec![],
            }],
        }
    }

    #[test]
    fn test_tracker_only_accepts_newest() {
        let mut tracker = RequestTracker::new();
        let first = tracker.begin("time=30");
        let second = tracker.begin("time=30");
        assert!(!tracker.accepts(&first, "time=30"));
        assert!(tracker.accepts(&second, "time=30"));
        assert!(!tracker.accepts(&second, "time=45"));

        tracker.abandon();
        assert!(!tracker.accepts(&second, "time=30"));
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut page = FilterPage::mount("time=30&cuisine=Italian");
        let stale = page.begin_load();

        let nav = page
            .controller_mut()
            .remove_applied_filter(FilterField::Cuisine);
        let fresh = page.navigate(&nav);
        assert_eq!(fresh.query, "time=30");

        // Slow response for the old URL arrives after the new request went out
        assert!(!page.finish_load(&stale, Ok(one_recipe())));
        assert_eq!(page.view(), &ResultView::Loading);

        assert!(page.finish_load(&fresh, Ok(RecipesResult::default())));
        assert_eq!(page.view(), &ResultView::Empty);
    }

    #[test]
    fn test_response_applied_when_current() {
        let mut page = FilterPage::mount("");
        let tag = page.begin_load();
        assert!(page.finish_load(&tag, Ok(one_recipe())));
        assert!(matches!(page.view(), ResultView::Recipes(r) if r.recipes.len() == 1));
    }
}
