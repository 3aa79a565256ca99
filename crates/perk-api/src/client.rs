//! HTTP client for the offers service.
//!
//! Protected calls check the stored token before spending a round trip and
//! route both that pre-flight failure and any 401 response through the
//! session manager's [`LogoutHandle`] — the client itself never touches
//! session state directly.

use std::sync::Arc;
use std::time::Duration;

use perk_auth::{AuthError, Credentials, LoginService, LogoutHandle, TokenStore, expiry};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::models::{
    Bank, City, Country, CreateOfferRequest, District, HotelOffer, LoginResponse,
    PaginatedResponse, Province, RegisterRequest,
};
use crate::params::SearchParams;

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    store: Arc<dyn TokenStore>,
    logout: LogoutHandle,
}

impl ApiClient {
    /// Build a client for the service at `base_url` (no trailing slash
    /// needed). Starts with a disconnected logout handle; wire one in with
    /// [`Self::with_logout_handle`] before making protected calls.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Transport` if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        store: Arc<dyn TokenStore>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            http,
            base_url,
            store,
            logout: LogoutHandle::disconnected(),
        })
    }

    #[must_use]
    pub fn with_logout_handle(mut self, handle: LogoutHandle) -> Self {
        self.logout = handle;
        self
    }

    // --- Public endpoints ---

    /// Authenticate. Returns the raw login payload; session bookkeeping is
    /// the manager's job, not this client's.
    ///
    /// # Errors
    ///
    /// `ApiError::Rejected` on bad credentials, `ApiError::Transport` on
    /// network failure.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let body = serde_json::json!({
            "email": credentials.email,
            "password": credentials.password,
        });
        let response = self
            .send(self.http.post(self.url("/auth/login")).json(&body), false)
            .await?;
        Self::parse_json(response).await
    }

    /// Create an account. The service logs the new user straight in.
    ///
    /// # Errors
    ///
    /// `ApiError::Rejected` on validation failure.
    pub async fn register(&self, request: &RegisterRequest) -> Result<LoginResponse, ApiError> {
        let response = self
            .send(
                self.http.post(self.url("/auth/register")).json(request),
                false,
            )
            .await?;
        Self::parse_json(response).await
    }

    /// All banks with active promotions.
    ///
    /// # Errors
    ///
    /// `ApiError` on any non-2xx response or network failure.
    pub async fn banks(&self) -> Result<Vec<Bank>, ApiError> {
        let response = self.send(self.http.get(self.url("/banks")), false).await?;
        Self::parse_json(response).await
    }

    /// One page of offers.
    ///
    /// # Errors
    ///
    /// `ApiError` on any non-2xx response or network failure.
    pub async fn offers(
        &self,
        page: u32,
        size: u32,
    ) -> Result<PaginatedResponse<HotelOffer>, ApiError> {
        let request = self
            .http
            .get(self.url("/offers"))
            .query(&[("page", page), ("size", size)]);
        let response = self.send(request, false).await?;
        Self::parse_json(response).await
    }

    /// Filtered offer search.
    ///
    /// # Errors
    ///
    /// `ApiError` on any non-2xx response or network failure.
    pub async fn search_offers(
        &self,
        params: &SearchParams,
    ) -> Result<PaginatedResponse<HotelOffer>, ApiError> {
        let request = self
            .http
            .get(self.url("/offers/search"))
            .query(&params.to_query_pairs());
        let response = self.send(request, false).await?;
        Self::parse_json(response).await
    }

    /// A single offer by id.
    ///
    /// # Errors
    ///
    /// `ApiError::Rejected` with status 404 when the offer does not exist.
    pub async fn offer(&self, id: i64) -> Result<HotelOffer, ApiError> {
        let response = self
            .send(self.http.get(self.url(&format!("/offers/{id}"))), false)
            .await?;
        Self::parse_json(response).await
    }

    // --- Location hierarchy (public) ---
    //
    // Countries contain provinces, provinces contain districts, districts
    // contain cities; the scoped variants drive cascading filter dropdowns.

    /// All countries.
    ///
    /// # Errors
    ///
    /// `ApiError` on any non-2xx response or network failure.
    pub async fn countries(&self) -> Result<Vec<Country>, ApiError> {
        self.get_json("/locations/countries").await
    }

    /// All provinces.
    ///
    /// # Errors
    ///
    /// `ApiError` on any non-2xx response or network failure.
    pub async fn provinces(&self) -> Result<Vec<Province>, ApiError> {
        self.get_json("/locations/provinces").await
    }

    /// Provinces of one country.
    ///
    /// # Errors
    ///
    /// `ApiError` on any non-2xx response or network failure.
    pub async fn provinces_by_country(&self, country_id: i64) -> Result<Vec<Province>, ApiError> {
        self.get_json(&format!("/locations/provinces/country/{country_id}"))
            .await
    }

    /// All districts.
    ///
    /// # Errors
    ///
    /// `ApiError` on any non-2xx response or network failure.
    pub async fn districts(&self) -> Result<Vec<District>, ApiError> {
        self.get_json("/locations/districts").await
    }

    /// Districts of one province.
    ///
    /// # Errors
    ///
    /// `ApiError` on any non-2xx response or network failure.
    pub async fn districts_by_province(
        &self,
        province_id: i64,
    ) -> Result<Vec<District>, ApiError> {
        self.get_json(&format!("/locations/districts/province/{province_id}"))
            .await
    }

    /// All cities.
    ///
    /// # Errors
    ///
    /// `ApiError` on any non-2xx response or network failure.
    pub async fn cities(&self) -> Result<Vec<City>, ApiError> {
        self.get_json("/locations/cities").await
    }

    /// Cities of one district.
    ///
    /// # Errors
    ///
    /// `ApiError` on any non-2xx response or network failure.
    pub async fn cities_by_district(&self, district_id: i64) -> Result<Vec<City>, ApiError> {
        self.get_json(&format!("/locations/cities/district/{district_id}"))
            .await
    }

    // --- Protected endpoints (bearer token required) ---

    /// Create an offer.
    ///
    /// # Errors
    ///
    /// `ApiError::SessionExpired` when no usable token is stored or the
    /// service answers 401 (the logout path has been signalled);
    /// `ApiError::Rejected` on validation failure.
    pub async fn create_offer(&self, request: &CreateOfferRequest) -> Result<HotelOffer, ApiError> {
        let response = self
            .send(self.http.post(self.url("/offers")).json(request), true)
            .await?;
        Self::parse_json(response).await
    }

    /// Replace an offer.
    ///
    /// # Errors
    ///
    /// See [`Self::create_offer`].
    pub async fn update_offer(
        &self,
        id: i64,
        request: &CreateOfferRequest,
    ) -> Result<HotelOffer, ApiError> {
        let response = self
            .send(
                self.http.put(self.url(&format!("/offers/{id}"))).json(request),
                true,
            )
            .await?;
        Self::parse_json(response).await
    }

    /// Delete an offer. The service answers 204 with no body.
    ///
    /// # Errors
    ///
    /// See [`Self::create_offer`].
    pub async fn delete_offer(&self, id: i64) -> Result<(), ApiError> {
        self.send(self.http.delete(self.url(&format!("/offers/{id}"))), true)
            .await?;
        Ok(())
    }

    // --- Plumbing ---

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.send(self.http.get(self.url(path)), false).await?;
        Self::parse_json(response).await
    }

    async fn send(
        &self,
        request: reqwest::RequestBuilder,
        requires_auth: bool,
    ) -> Result<reqwest::Response, ApiError> {
        let request = if requires_auth {
            request.bearer_auth(self.preflight_token()?)
        } else {
            request
        };

        let response = request.send().await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            self.logout.signal_unauthorized();
            return Err(ApiError::SessionExpired);
        }
        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(format_error_body(status, &body))
    }

    /// Check the stored token before spending a network round trip. A stale
    /// or missing token triggers the logout path exactly like a 401 would.
    fn preflight_token(&self) -> Result<String, ApiError> {
        let token = self.store.load();
        if expiry::is_expired(token.as_deref()) {
            tracing::debug!("stored token missing or expired before protected call");
            self.logout.signal_unauthorized();
            return Err(ApiError::SessionExpired);
        }
        // The expiry check guarantees presence
        Ok(token.unwrap_or_default())
    }

    async fn parse_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|error| ApiError::Decode(error.to_string()))
    }
}

impl LoginService for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<String, AuthError> {
        // Resolves to the inherent method, not this impl
        self.login(credentials)
            .await
            .map(|response| response.token)
            .map_err(|error| match error {
                ApiError::Rejected { message, .. } => AuthError::LoginFailed(message),
                other => AuthError::LoginFailed(other.to_string()),
            })
    }
}

/// Shape a non-2xx body into something readable. The service emits either
/// `{"error": "..."}` or a bean-validation map of `{field: message}`; the
/// latter still uses pre-migration field names, hence the renames.
fn format_error_body(status: u16, body: &str) -> ApiError {
    let message = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::Object(map)) => {
            if let Some(error) = map.get("error").and_then(serde_json::Value::as_str) {
                error.to_string()
            } else {
                let formatted: Vec<String> = map
                    .iter()
                    .map(|(field, message)| {
                        let text = message
                            .as_str()
                            .map_or_else(|| message.to_string(), str::to_string);
                        format!("{}: {text}", rename_legacy_field(field))
                    })
                    .collect();
                if formatted.is_empty() {
                    body.to_string()
                } else {
                    formatted.join(", ")
                }
            }
        }
        _ => body.to_string(),
    };

    let message = if message.trim().is_empty() {
        format!("request rejected with status {status}")
    } else {
        message
    };
    ApiError::Rejected { status, message }
}

fn rename_legacy_field(field: &str) -> &str {
    match field {
        "bankId" => "bankIds",
        "cardType" => "cardTypes",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn message_of(error: ApiError) -> String {
        match error {
            ApiError::Rejected { message, .. } => message,
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn plain_error_object_is_unwrapped() {
        let error = format_error_body(400, r#"{"error":"offer not found"}"#);
        assert_eq!(message_of(error), "offer not found");
    }

    #[test]
    fn validation_map_is_formatted_with_renamed_fields() {
        let error = format_error_body(
            400,
            r#"{"bankId":"must not be empty","cardType":"invalid value"}"#,
        );
        let message = message_of(error);
        assert!(message.contains("bankIds: must not be empty"));
        assert!(message.contains("cardTypes: invalid value"));
    }

    #[test]
    fn non_json_body_passes_through() {
        let error = format_error_body(500, "Internal Server Error");
        assert_eq!(message_of(error), "Internal Server Error");
    }

    #[test]
    fn empty_body_falls_back_to_status() {
        let error = format_error_body(503, "");
        assert_eq!(message_of(error), "request rejected with status 503");
    }
}
