//! On-demand fetchers / Busca sob demanda
//!
//! Each fetch runs at most once per institution per session. The pending
//! marker is taken synchronously before the request goes out, so two rapid
//! selections of the same institution cannot issue overlapping requests.
//! A failed fetch clears the pending marker and leaves the id unfetched,
//! making a later selection retry.

use anyhow::Result;

use crate::client::ApiClient;
use crate::state::AppState;

/// Fetch courses and course offerings of an institution, once.
pub async fn ensure_institution_courses(
    state: &AppState,
    client: &ApiClient,
    institution_id: i64,
) -> Result<()> {
    if !state.begin_courses_fetch(institution_id) {
        tracing::debug!(institution_id, "courses data already fetched or in flight");
        return Ok(());
    }

    match client.fetch_institution_courses_data(institution_id).await {
        Ok(data) => {
            state.add_courses(data.courses);
            state.add_course_offerings(data.course_offerings);
            state.finish_courses_fetch(institution_id, true);
            Ok(())
        }
        Err(e) => {
            state.finish_courses_fetch(institution_id, false);
            Err(e.into())
        }
    }
}

/// Fetch photos of an institution, once.
///
/// Guarded by the same marker protocol as the course fetch; repeated opens
/// of the same search result do not append duplicate photos.
pub async fn ensure_institution_photos(
    state: &AppState,
    client: &ApiClient,
    institution_id: i64,
) -> Result<()> {
    if !state.begin_photos_fetch(institution_id) {
        tracing::debug!(institution_id, "photos already fetched or in flight");
        return Ok(());
    }

    match client.fetch_institution_photos(institution_id).await {
        Ok(photos) => {
            state.add_photos(photos);
            state.finish_photos_fetch(institution_id, true);
            Ok(())
        }
        Err(e) => {
            state.finish_photos_fetch(institution_id, false);
            Err(e.into())
        }
    }
}
