//! Session event layer / Camada de eventos
//!
//! Ties the shared state, the API client and the matcher together. Each
//! method corresponds to one discrete UI event; callers drive them from a
//! single event loop turn at a time. Fetch failures are logged and
//! swallowed here: the dependent views simply stay empty and the next
//! selection retries.

use std::sync::Arc;

use anyhow::{Context, Result};

use crate::client::ApiClient;
use crate::fetch::{ensure_institution_courses, ensure_institution_photos};
use crate::search::{match_results, SearchResult};
use crate::state::AppState;

pub struct Session {
    state: Arc<AppState>,
    client: ApiClient,
}

impl Session {
    pub fn new(state: Arc<AppState>, client: ApiClient) -> Self {
        Self { state, client }
    }

    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Startup load of the institution and city lists. These are loaded
    /// exactly once; everything else arrives on demand.
    pub async fn bootstrap(&self) -> Result<()> {
        let institutions = self
            .client
            .fetch_institutions()
            .await
            .context("loading institutions")?;
        let cities = self.client.fetch_cities().await.context("loading cities")?;

        tracing::info!(
            institutions = institutions.len(),
            cities = cities.len(),
            "initial data loaded"
        );

        self.state.load_institutions(institutions);
        self.state.load_cities(cities);
        Ok(())
    }

    /// Keystroke event: rebuild the result list for the current query.
    pub fn update_search(&self, query: &str) -> Vec<SearchResult> {
        let results = match_results(
            query,
            &self.state.institutions(),
            &self.state.cities(),
            &self.state.photos(),
        );

        tracing::debug!(query, hits = results.len(), "search updated");
        self.state.set_search_results(results.clone());
        results
    }

    /// Click on a search result: record the selection, open the info panel
    /// and fire both lazy fetches. Fetch errors are logged and swallowed.
    pub async fn open_result(&self, institution_id: i64) {
        if self.state.select_institution_by_id(institution_id).is_none() {
            tracing::warn!(institution_id, "selection of unknown institution ignored");
            return;
        }
        self.state.open_institution_info();

        if let Err(e) = ensure_institution_photos(&self.state, &self.client, institution_id).await
        {
            tracing::error!(institution_id, error = %e, "photo fetch failed");
        }
        if let Err(e) = ensure_institution_courses(&self.state, &self.client, institution_id).await
        {
            tracing::error!(institution_id, error = %e, "courses data fetch failed");
        }
    }

    /// Click on a course row in the info panel.
    pub fn select_course(&self, course_id: i64) {
        let course = self
            .state
            .selected_institution()
            .map(|i| self.state.institution_courses(i.id))
            .unwrap_or_default()
            .into_iter()
            .find(|c| c.id == course_id);
        self.state.select_course(course);
    }

    pub fn close_institution_info(&self) {
        self.state.select_course(None);
        self.state.close_institution_info();
    }
}
