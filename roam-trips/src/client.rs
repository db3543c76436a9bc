//! Upstream planner client: the scraped consumer GraphQL API.
//!
//! The endpoints are undocumented and sit behind a consumer travel site, so
//! every call ships injected session headers; nothing session-shaped is
//! baked into the code. There are no retries and no special timeouts: a
//! failed call is terminal for the current request.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, COOKIE, HeaderMap, HeaderValue, REFERER, USER_AGENT};
use serde::{Deserialize, Serialize};
use serde_json::json;

use roam_ingest::types::RawTrip;

use crate::request::CreateTripRequest;

/// Pre-registered query ids the consumer site ships with its frontend.
/// They change when the site redeploys; scraping breaks loudly when they do.
const LOCATION_LOOKUP_QUERY: &str = "c2e5695e939386e4f8b0d62b";
const TRIP_CREATE_QUERY: &str = "84f3ac9f2ebb7bfc2e44d0f3";
const TRIP_FETCH_QUERY: &str = "0031f4a26524a16dc2d8adf4";

/// Injected upstream session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Site base, e.g. "https://www.example-travel.com".
    pub base_url: String,
    /// Full cookie header value for a logged-in consumer session.
    pub session_cookie: String,
    #[serde(default)]
    pub csrf_token: Option<String>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/125.0 Safari/537.36"
        .to_string()
}

/// One location-typeahead hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationHit {
    pub location_id: i64,
    pub name: String,
}

/// What the trip pipeline needs from the upstream. Kept behind a trait so
/// the pipeline never touches session mechanics and tests can script the
/// whole exchange.
#[async_trait]
pub trait TripSource: Send + Sync {
    /// Resolve free-text destination to an upstream location.
    async fn lookup_location(&self, query: &str) -> Result<Option<LocationHit>>;

    /// Ask the upstream to generate a trip; Some(id) when it worked.
    async fn create_trip(
        &self,
        location: &LocationHit,
        request: &CreateTripRequest,
    ) -> Result<Option<i64>>;

    /// Fetch the generated trip structure.
    async fn fetch_trip(&self, trip_id: i64) -> Result<RawTrip>;
}

/// reqwest-backed client speaking the site's batched GraphQL envelope.
pub struct PlannerClient {
    config: UpstreamConfig,
    http: reqwest::Client,
}

impl PlannerClient {
    pub fn new(config: UpstreamConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    fn headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            COOKIE,
            HeaderValue::from_str(&self.config.session_cookie).context("session cookie header")?,
        );
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&self.config.user_agent).context("user agent header")?,
        );
        headers.insert(
            REFERER,
            HeaderValue::from_str(&self.config.base_url).context("referer header")?,
        );
        if let Some(token) = &self.config.csrf_token {
            headers.insert(
                "x-requested-by",
                HeaderValue::from_str(token).context("csrf header")?,
            );
        }
        Ok(headers)
    }

    /// POST one pre-registered query and decode the `data` payload.
    ///
    /// The site batches: the body is an array of envelopes and the reply is
    /// an array of results, even for a single query.
    async fn graphql<T>(&self, query_id: &str, variables: serde_json::Value) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        #[derive(Serialize)]
        struct Envelope<'a> {
            id: &'a str,
            variables: serde_json::Value,
        }

        #[derive(Deserialize)]
        struct Reply<T> {
            data: T,
        }

        let url = format!(
            "{}/data/graphql/ids",
            self.config.base_url.trim_end_matches('/')
        );
        let body = [Envelope {
            id: query_id,
            variables,
        }];

        let resp = self
            .http
            .post(&url)
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await
            .context("upstream graphql request")?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            bail!("upstream error: {status} {txt}");
        }

        let mut replies: Vec<Reply<T>> = resp.json().await.context("parse upstream reply")?;
        if replies.is_empty() {
            bail!("upstream returned an empty batch reply");
        }
        Ok(replies.remove(0).data)
    }
}

#[async_trait]
impl TripSource for PlannerClient {
    async fn lookup_location(&self, query: &str) -> Result<Option<LocationHit>> {
        #[derive(Deserialize)]
        struct LookupData {
            #[serde(default)]
            results: Vec<LocationHit>,
        }

        let data: LookupData = self
            .graphql(LOCATION_LOOKUP_QUERY, json!({ "query": query, "limit": 1 }))
            .await?;
        Ok(data.results.into_iter().next())
    }

    async fn create_trip(
        &self,
        location: &LocationHit,
        request: &CreateTripRequest,
    ) -> Result<Option<i64>> {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct CreateData {
            trip_id: Option<i64>,
        }

        let variables = json!({
            "locationId": location.location_id,
            "numberOfDays": request.number_of_days,
            "interests": request.interests,
            "travelingWith": request.traveling_with,
            "includeChildren": request.include_children,
            "includePets": request.include_pets,
            "currency": request.currency,
            "startDate": request.date_range.start,
        });

        let data: CreateData = self.graphql(TRIP_CREATE_QUERY, variables).await?;
        Ok(data.trip_id)
    }

    async fn fetch_trip(&self, trip_id: i64) -> Result<RawTrip> {
        #[derive(Deserialize)]
        struct FetchData {
            trip: Option<RawTrip>,
        }

        let data: FetchData = self
            .graphql(TRIP_FETCH_QUERY, json!({ "tripId": trip_id }))
            .await?;
        data.trip
            .with_context(|| format!("trip {trip_id} missing from upstream reply"))
    }
}
