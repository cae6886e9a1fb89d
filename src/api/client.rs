//! reqwest-backed implementation of the rental API

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use super::queries::{self, AvailabilityEnvelope, PropertyEnvelope};
use super::{ApiError, RentalApi};
use crate::config::ApiConfig;
use crate::models::Property;
use crate::pricing::AvailabilityRecord;

/// HTTP client for the remote rental API
#[derive(Clone)]
pub struct HttpRentalApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpRentalApi {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("aparte-booking/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        resource: &str,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!("GET {} {:?}", url, query);

        let mut request = self.client.get(&url).query(query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound {
                resource: resource.to_string(),
            });
        }
        if !status.is_success() {
            error!("Remote API returned {} for {}", status, url);
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
            });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl RentalApi for HttpRentalApi {
    async fn get_property(&self, property_id: u64) -> Result<Property, ApiError> {
        let envelope: PropertyEnvelope = self
            .get_json(
                &queries::property_path(property_id),
                &[],
                &format!("property {}", property_id),
            )
            .await?;

        Ok(envelope.data.parse()?)
    }

    async fn get_unit_availability(
        &self,
        property_id: u64,
        unit_id: u64,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Vec<AvailabilityRecord>, ApiError> {
        let (path, query) = queries::availability_request(property_id, unit_id, check_in, check_out);
        let envelope: AvailabilityEnvelope = self
            .get_json(&path, &query, &format!("unit {} availability", unit_id))
            .await?;

        Ok(queries::parse_availability(&envelope.data))
    }
}
