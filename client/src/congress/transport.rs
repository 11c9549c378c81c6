//! Transport for Sunlight API calls.
//!
//! The transport owns URL construction, the API key, and the HTTP call. It
//! hands back the decoded JSON document or `None`. Network failures, non-2xx
//! statuses, and undecodable bodies all collapse to `None`; the one service
//! reply that is surfaced as an error is the "multiple legislators" body,
//! which becomes [`CongressApiError::AmbiguousResult`].

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use super::error::CongressApiError;
use crate::config::ApiConfig;

/// Flat query parameters for a single API call.
pub type Params = BTreeMap<String, String>;

/// Body the service sends when a unique lookup matched several legislators.
pub const MULTIPLE_LEGISLATORS_RETURNED: &str = "Multiple Legislators Returned";

/// Sunlight API methods used by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ApiMethod {
    LegislatorsGet,
    LegislatorsGetList,
    LegislatorsSearch,
    LegislatorsAllForZip,
    CommitteesGet,
    CommitteesGetList,
    CommitteesAllForLegislator,
    DistrictsFromLatLong,
    DistrictsFromZip,
}

impl ApiMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LegislatorsGet => "legislators.get",
            Self::LegislatorsGetList => "legislators.getList",
            Self::LegislatorsSearch => "legislators.search",
            Self::LegislatorsAllForZip => "legislators.allForZip",
            Self::CommitteesGet => "committees.get",
            Self::CommitteesGetList => "committees.getList",
            Self::CommitteesAllForLegislator => "committees.allForLegislator",
            Self::DistrictsFromLatLong => "districts.getDistrictFromLatLong",
            Self::DistrictsFromZip => "districts.getDistrictsFromZip",
        }
    }
}

/// Trait for fetching decoded API documents.
///
/// Use [`HttpTransport`] for real HTTP calls, or
/// [`mock::MockTransport`] in tests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Call `method` with `params`, returning the decoded document or
    /// `None` when the service had nothing usable.
    async fn fetch_json(
        &self,
        method: ApiMethod,
        params: &Params,
    ) -> Result<Option<Value>, CongressApiError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn fetch_json(
        &self,
        method: ApiMethod,
        params: &Params,
    ) -> Result<Option<Value>, CongressApiError> {
        (**self).fetch_json(method, params).await
    }
}

/// HTTP-based implementation of [`Transport`].
///
/// Requests go to `GET {base_url}{method}.json?apikey=...&<params>`.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpTransport {
    /// Create a new transport with the given base URL and API key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, api_key)
    }

    /// Create a transport with a custom `reqwest::Client` (for testing with custom config).
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            client,
            base_url,
            api_key: api_key.into(),
        }
    }

    /// Build a transport from validated configuration, applying its timeout.
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn from_config(config: &ApiConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self::with_client(client, &config.base_url, &config.key))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch_json(
        &self,
        method: ApiMethod,
        params: &Params,
    ) -> Result<Option<Value>, CongressApiError> {
        let url = format!("{}{}.json", self.base_url, method.as_str());
        tracing::debug!(method = method.as_str(), ?params, "sending sunlight request");

        let response = match self
            .client
            .get(&url)
            .query(&[("apikey", self.api_key.as_str())])
            .query(params)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                let timeout = e.is_timeout();
                // The URL carries the API key.
                let e = e.without_url();
                tracing::warn!(
                    method = method.as_str(),
                    timeout,
                    error = %e,
                    "sunlight request failed"
                );
                return Ok(None);
            }
        };

        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            if message.trim() == MULTIPLE_LEGISLATORS_RETURNED {
                return Err(CongressApiError::AmbiguousResult(format!(
                    "{} matched more than one legislator",
                    method.as_str()
                )));
            }
            tracing::warn!(
                method = method.as_str(),
                status = status.as_u16(),
                "sunlight returned an error status"
            );
            return Ok(None);
        }

        match response.json::<Value>().await {
            Ok(Value::Null) => Ok(None),
            Ok(document) => Ok(Some(document)),
            Err(e) => {
                let e = e.without_url();
                tracing::warn!(
                    method = method.as_str(),
                    error = %e,
                    "undecodable sunlight body"
                );
                Ok(None)
            }
        }
    }
}

#[cfg(any(test, feature = "test-utils"))]
#[allow(
    clippy::unwrap_used,
    clippy::missing_panics_doc,
    clippy::missing_const_for_fn,
    clippy::must_use_candidate
)]
pub mod mock {
    //! Mock implementation for unit testing.

    use super::{ApiMethod, CongressApiError, Params, Transport};
    use async_trait::async_trait;
    use serde_json::Value;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;

    /// Mock implementation of [`Transport`] for unit tests.
    ///
    /// Queue replies per method with `push_*` and verify calls with
    /// `calls()` / `calls_for()`. A method with an empty queue answers
    /// `Ok(None)`.
    pub struct MockTransport {
        replies: Mutex<HashMap<ApiMethod, VecDeque<Result<Option<Value>, CongressApiError>>>>,
        calls: Mutex<Vec<(ApiMethod, Params)>>,
    }

    impl MockTransport {
        pub fn new() -> Self {
            Self {
                replies: Mutex::new(HashMap::new()),
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Queue a raw reply for the next call to `method`.
        pub fn push_reply(&self, method: ApiMethod, reply: Result<Option<Value>, CongressApiError>) {
            self.replies
                .lock()
                .unwrap()
                .entry(method)
                .or_default()
                .push_back(reply);
        }

        /// Queue a decoded document for the next call to `method`.
        pub fn push_json(&self, method: ApiMethod, document: Value) {
            self.push_reply(method, Ok(Some(document)));
        }

        /// Queue an absent reply for the next call to `method`.
        pub fn push_none(&self, method: ApiMethod) {
            self.push_reply(method, Ok(None));
        }

        /// All calls made so far, in order.
        pub fn calls(&self) -> Vec<(ApiMethod, Params)> {
            self.calls.lock().unwrap().clone()
        }

        /// Parameters of every call made to `method`, in order.
        pub fn calls_for(&self, method: ApiMethod) -> Vec<Params> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|(m, _)| *m == method)
                .map(|(_, params)| params.clone())
                .collect()
        }
    }

    impl Default for MockTransport {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl Transport for MockTransport {
        async fn fetch_json(
            &self,
            method: ApiMethod,
            params: &Params,
        ) -> Result<Option<Value>, CongressApiError> {
            self.calls.lock().unwrap().push((method, params.clone()));

            self.replies
                .lock()
                .unwrap()
                .get_mut(&method)
                .and_then(VecDeque::pop_front)
                .unwrap_or(Ok(None))
        }
    }
}
