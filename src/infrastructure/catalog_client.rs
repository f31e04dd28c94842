use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;

use super::http::{build_http_client, parse_base_url, unavailable};
use crate::domain::errors::LookupError;
use crate::domain::order::{Product, ProductQuery};
use crate::domain::ports::CatalogLookup;

/// JSON/HTTP client for the product catalog.
///
/// `GET {base}/products?ids=a&ids=b` resolves an id set; `?query=..&skip=..&take=..`
/// runs a search. Both return `[{id, name, description, price}]`.
#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpCatalogClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, LookupError> {
        Ok(Self {
            http: build_http_client(timeout)?,
            base_url: parse_base_url(base_url)?,
        })
    }

    fn products_url(&self) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("products");
        }
        url
    }
}

fn query_params(query: &ProductQuery) -> Vec<(&'static str, String)> {
    // One pair per id: ids are opaque and may contain any character.
    if !query.ids.is_empty() {
        return query.ids.iter().map(|id| ("ids", id.clone())).collect();
    }
    let mut params = vec![
        ("skip", query.skip.to_string()),
        ("take", query.take.to_string()),
    ];
    if let Some(q) = &query.query {
        params.insert(0, ("query", q.clone()));
    }
    params
}

#[async_trait]
impl CatalogLookup for HttpCatalogClient {
    async fn get_products(&self, query: &ProductQuery) -> Result<Vec<Product>, LookupError> {
        if query.is_unbounded() {
            return Err(LookupError::InvalidQuery(
                "either product ids or a search query is required".to_string(),
            ));
        }

        self.http
            .get(self.products_url())
            .query(&query_params(query))
            .send()
            .await
            .map_err(unavailable)?
            .error_for_status()
            .map_err(unavailable)?
            .json::<Vec<Product>>()
            .await
            .map_err(unavailable)
    }
}
