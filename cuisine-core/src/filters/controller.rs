//! Filter form state machine.
//!
//! Two [`FilterState`]s live side by side for the lifetime of a filter page:
//! the *applied* one, always rebuilt from the URL, and the *staged* one that
//! form edits mutate. Nothing is fetched until the staged state is submitted
//! and the resulting navigation completes.
//!
//! ```text
//! Idle --edit--> Editing --submit--> Submitting --navigation--> Idle
//!   \______________clear_all______________> ClearingAll --navigation--> Idle
//! ```
//!
//! Removing an applied pill or ingredient tag skips `Editing` entirely: it is
//! computed from the applied state and navigates straight away.

use super::codec;
use super::ingredients::suggest;
use super::{non_blank, FilterField, FilterState, IngredientList, FILTER_ROUTE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Editing,
    Submitting,
    ClearingAll,
}

/// A navigation the page should perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub route: String,
    /// Encoded query string, without the leading `?`
    pub query: String,
}

impl Navigation {
    pub fn to_filter_route(query: String) -> Self {
        Self {
            route: FILTER_ROUTE.to_string(),
            query,
        }
    }

    pub fn to_url(&self) -> String {
        if self.query.is_empty() {
            self.route.clone()
        } else {
            format!("{}?{}", self.route, self.query)
        }
    }
}

#[derive(Debug, Clone)]
pub struct FilterFormController {
    applied: FilterState,
    staged: FilterState,
    phase: FormPhase,
    /// Ingredient count as of the last navigation.
    last_applied_ingredient_count: usize,
    /// Set when the widget shrank the ingredient list on the user's behalf.
    /// While set, the widget is not refilled from the applied state.
    user_initiated_removal: bool,
}

impl FilterFormController {
    /// Build the controller for a freshly loaded page.
    pub fn mount(query: &str) -> Self {
        let applied = codec::decode(query);
        Self {
            staged: applied.clone(),
            last_applied_ingredient_count: applied.ingredients.len(),
            applied,
            phase: FormPhase::Idle,
            user_initiated_removal: false,
        }
    }

    pub fn applied(&self) -> &FilterState {
        &self.applied
    }

    pub fn staged(&self) -> &FilterState {
        &self.staged
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Whether the form holds edits that haven't been submitted.
    pub fn is_dirty(&self) -> bool {
        self.staged != self.applied
    }

    /// The ingredient tags the widget is currently showing.
    pub fn displayed_ingredients(&self) -> &IngredientList {
        &self.staged.ingredients
    }

    /// The query string the current URL carries.
    pub fn applied_query(&self) -> String {
        codec::encode(&self.applied)
    }

    pub fn set_time(&mut self, minutes: Option<u32>) {
        self.staged.time = minutes;
        self.mark_editing();
    }

    pub fn set_cuisine(&mut self, cuisine: Option<&str>) {
        self.staged.cuisine = cuisine.and_then(non_blank);
        self.mark_editing();
    }

    pub fn set_taste(&mut self, taste: Option<&str>) {
        self.staged.taste = taste.and_then(non_blank);
        self.mark_editing();
    }

    /// Add a tag from the widget (catalog pick or free text).
    pub fn add_ingredient(&mut self, candidate: &str) -> bool {
        let mut next = self.staged.ingredients.clone();
        if !next.add(candidate) {
            return false;
        }
        self.on_widget_change(next);
        true
    }

    pub fn remove_ingredient(&mut self, name: &str) -> bool {
        let mut next = self.staged.ingredients.clone();
        if !next.remove(name) {
            return false;
        }
        self.on_widget_change(next);
        true
    }

    pub fn remove_ingredient_at(&mut self, index: usize) -> Option<String> {
        let mut next = self.staged.ingredients.clone();
        let removed = next.remove_at(index)?;
        self.on_widget_change(next);
        Some(removed)
    }

    /// The widget reports its full list after a user interaction.
    pub fn on_widget_change(&mut self, ingredients: IngredientList) {
        if ingredients.len() < self.last_applied_ingredient_count {
            self.user_initiated_removal = true;
        }
        self.staged.ingredients = ingredients;
        self.mark_editing();
    }

    /// An external refresh of the widget from the applied state (a re-render
    /// carrying the URL's ingredients). Only fills an empty widget, and never
    /// while a user removal is pending. Returns whether the widget changed.
    pub fn resync_widget_from_applied(&mut self) -> bool {
        if self.user_initiated_removal {
            tracing::debug!("skipping ingredient resync after user removal");
            return false;
        }
        if !self.staged.ingredients.is_empty() || self.applied.ingredients.is_empty() {
            return false;
        }
        self.staged.ingredients = self.applied.ingredients.clone();
        true
    }

    /// Autocomplete entries for the widget's text box.
    pub fn suggestions(&self, input: &str) -> Vec<&'static str> {
        suggest(input, &self.staged.ingredients)
    }

    /// Submit the staged filters.
    pub fn submit(&mut self) -> Navigation {
        self.phase = FormPhase::Submitting;
        Navigation::to_filter_route(codec::encode(&self.staged))
    }

    /// Drop every filter, staged and applied alike.
    pub fn clear_all(&mut self) -> Navigation {
        self.staged = FilterState::default();
        self.phase = FormPhase::ClearingAll;
        Navigation::to_filter_route(String::new())
    }

    /// Remove one applied pill. Staged edits are left alone.
    pub fn remove_applied_filter(&mut self, field: FilterField) -> Navigation {
        self.phase = FormPhase::Submitting;
        Navigation::to_filter_route(codec::remove_field(&self.applied_query(), field))
    }

    /// Remove one applied ingredient tag. Staged edits are left alone.
    pub fn remove_applied_ingredient(&mut self, name: &str) -> Navigation {
        self.phase = FormPhase::Submitting;
        Navigation::to_filter_route(codec::remove_ingredient(&self.applied_query(), name))
    }

    /// The URL changed; rebuild applied state from it and reset the form.
    pub fn navigation_completed(&mut self, query: &str) {
        self.applied = codec::decode(query);
        self.staged = self.applied.clone();
        self.last_applied_ingredient_count = self.applied.ingredients.len();
        self.user_initiated_removal = false;
        self.phase = FormPhase::Idle;
    }

    fn mark_editing(&mut self) {
        if matches!(self.phase, FormPhase::Idle | FormPhase::Editing) {
            self.phase = FormPhase::Editing;
        }
    }
}
