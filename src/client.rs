//! HTTP client for the upstream FATEC data API / Cliente da API remota
//!
//! All endpoints are plain GETs returning JSON envelopes; see
//! [`crate::models`] for the wire shapes.

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::AppConfig;
use crate::models::{
    CitiesResponse, City, Institution, InstitutionCoursesData, InstitutionsResponse, Photo,
    PhotosResponse,
};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {path} failed with status {status}")]
    Status { status: u16, path: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Typed client over the REST API / Cliente tipado
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.api_base(),
            client,
        })
    }

    /// Build a client against an explicit base URL (tests point this at a
    /// local fake upstream).
    pub fn with_base_url(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    async fn request_get<T>(&self, path: &str) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);

        tracing::debug!(%url, "GET");
        let resp = self.client.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                path: path.to_string(),
            });
        }

        Ok(resp.json::<T>().await?)
    }

    /// Full institution list, loaded once at startup
    pub async fn fetch_institutions(&self) -> Result<Vec<Institution>, ApiError> {
        let resp: InstitutionsResponse = self.request_get("/institutions").await?;
        Ok(resp.institutions)
    }

    /// Full city list, loaded once at startup
    pub async fn fetch_cities(&self) -> Result<Vec<City>, ApiError> {
        let resp: CitiesResponse = self.request_get("/cities").await?;
        Ok(resp.cities)
    }

    /// Courses and course offerings of one institution
    pub async fn fetch_institution_courses_data(
        &self,
        institution_id: i64,
    ) -> Result<InstitutionCoursesData, ApiError> {
        self.request_get(&format!("/institution-courses-data/{}", institution_id))
            .await
    }

    /// Photos of one institution
    pub async fn fetch_institution_photos(
        &self,
        institution_id: i64,
    ) -> Result<Vec<Photo>, ApiError> {
        let resp: PhotosResponse = self
            .request_get(&format!("/photos/institution/{}", institution_id))
            .await?;
        Ok(resp.photos)
    }
}
