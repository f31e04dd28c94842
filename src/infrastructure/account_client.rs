use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};

use super::http::{build_http_client, parse_base_url, unavailable};
use crate::domain::errors::LookupError;
use crate::domain::order::Account;
use crate::domain::ports::AccountLookup;

/// JSON/HTTP client for the account registry.
///
/// `GET {base}/accounts/{id}` returns `{id, name}`; 404 means the account
/// does not exist.
#[derive(Debug, Clone)]
pub struct HttpAccountClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpAccountClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LookupError> {
        Ok(Self {
            http: build_http_client(timeout)?,
            base_url: parse_base_url(base_url)?,
        })
    }

    fn account_url(&self, id: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("accounts").push(id);
        }
        url
    }
}

#[async_trait]
impl AccountLookup for HttpAccountClient {
    async fn get_account_by_id(&self, id: &str) -> Result<Account, LookupError> {
        let response = self
            .http
            .get(self.account_url(id))
            .send()
            .await
            .map_err(unavailable)?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound);
        }

        response
            .error_for_status()
            .map_err(unavailable)?
            .json::<Account>()
            .await
            .map_err(unavailable)
    }
}
