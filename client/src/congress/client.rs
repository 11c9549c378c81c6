//! Legislator and committee lookups against the Sunlight API.
//!
//! Every operation follows the same contract: `Ok(None)` when the service
//! has nothing for the request, `Err` only for a payload the hydrator
//! cannot accept or a unique lookup that matched several records.
//!
//! # Example
//!
//! ```ignore
//! use sunlight_congress::congress::{CongressClient, HttpTransport, LocationCriteria};
//!
//! let client = CongressClient::new(HttpTransport::new("http://services.sunlightlabs.com/api/", "my-api-key"));
//! if let Some(delegation) = client.legislators_for_location(&LocationCriteria::zip("30339")).await? {
//!     println!("{:?}", delegation.senior_senator);
//! }
//! ```

use std::sync::Arc;

use serde_json::Value;

use super::error::CongressApiError;
use super::hydrate::{hydrate_district, hydrate_wrapped_list, Hydrate};
use super::location::{Geocoder, LocationCriteria, LocationStrategy};
use super::transport::{ApiMethod, HttpTransport, Params, Transport};
use super::types::{Chamber, Committee, Delegation, District, Legislator, ScoredCandidate};
use crate::config::ApiConfig;

const SENIOR_SEAT: &str = "Senior Seat";
const JUNIOR_SEAT: &str = "Junior Seat";

/// Entry point for all lookups.
///
/// Cheap to clone; clones share the transport and geocoder.
#[derive(Clone)]
pub struct CongressClient {
    transport: Arc<dyn Transport>,
    geocoder: Option<Arc<dyn Geocoder>>,
}

impl CongressClient {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
            geocoder: None,
        }
    }

    /// Build a client over HTTP from validated configuration.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &ApiConfig) -> Result<Self, reqwest::Error> {
        HttpTransport::from_config(config).map(Self::new)
    }

    /// Enable address lookups in [`Self::legislators_for_location`].
    #[must_use]
    pub fn with_geocoder(mut self, geocoder: impl Geocoder + 'static) -> Self {
        self.geocoder = Some(Arc::new(geocoder));
        self
    }

    // --- Legislators ---

    /// Look up the single legislator matching `params` (`legislators.get`).
    ///
    /// # Errors
    /// `AmbiguousResult` if the service reports several matches,
    /// `MalformedPayload` if the reply cannot be hydrated.
    pub async fn find_legislator(
        &self,
        params: Params,
    ) -> Result<Option<Legislator>, CongressApiError> {
        self.fetch(ApiMethod::LegislatorsGet, &params, "legislator")
            .await?
            .map(|raw| Legislator::hydrate(&raw))
            .transpose()
    }

    /// Look up a legislator by Bioguide ID.
    ///
    /// # Errors
    /// See [`Self::find_legislator`].
    pub async fn get_legislator(
        &self,
        bioguide_id: &str,
    ) -> Result<Option<Legislator>, CongressApiError> {
        self.find_legislator(params([("bioguide_id", bioguide_id)]))
            .await
    }

    /// All legislators matching `params` (`legislators.getList`).
    ///
    /// # Errors
    /// `MalformedPayload` if the reply cannot be hydrated.
    pub async fn legislators_where(
        &self,
        params: Params,
    ) -> Result<Option<Vec<Legislator>>, CongressApiError> {
        self.fetch_list(ApiMethod::LegislatorsGetList, &params, "legislators")
            .await
    }

    /// Legislators whose districts overlap a zip code (`legislators.allForZip`).
    ///
    /// # Errors
    /// `MalformedPayload` if the reply cannot be hydrated.
    pub async fn legislators_for_zip(
        &self,
        zip: &str,
    ) -> Result<Option<Vec<Legislator>>, CongressApiError> {
        self.fetch_list(
            ApiMethod::LegislatorsAllForZip,
            &params([("zip", zip)]),
            "legislators",
        )
        .await
    }

    /// The senior senator, junior senator, and representative for a district.
    ///
    /// Issues one query per seat. A seat the service has no record for is
    /// left empty without affecting the others.
    ///
    /// # Errors
    /// `MalformedPayload` if any reply cannot be hydrated.
    pub async fn legislators_in_district(
        &self,
        district: &District,
    ) -> Result<Delegation, CongressApiError> {
        let senior_senator = self.first_in_seat(&district.state, SENIOR_SEAT).await?;
        let junior_senator = self.first_in_seat(&district.state, JUNIOR_SEAT).await?;
        let representative = self
            .first_in_seat(&district.state, &district.number)
            .await?;

        Ok(Delegation {
            senior_senator,
            junior_senator,
            representative,
        })
    }

    /// The delegation for an address, coordinate pair, or zip code.
    ///
    /// Returns `None` without touching the network when no criterion is
    /// usable, and `None` when the location cannot be placed in a district.
    /// Address lookups need a geocoder (see [`Self::with_geocoder`]).
    ///
    /// # Errors
    /// `MalformedPayload` if any reply cannot be hydrated.
    pub async fn legislators_for_location(
        &self,
        criteria: &LocationCriteria,
    ) -> Result<Option<Delegation>, CongressApiError> {
        let Some(strategy) = criteria.strategy() else {
            tracing::debug!("no usable location criteria");
            return Ok(None);
        };
        tracing::debug!(?strategy, "resolving location");

        let district = match strategy {
            LocationStrategy::Address(address) => {
                let Some(geocoder) = &self.geocoder else {
                    tracing::warn!("address lookup requested but no geocoder is configured");
                    return Ok(None);
                };
                match geocoder.geocode(address).await {
                    Some((latitude, longitude)) => {
                        self.district_for_point(latitude, longitude).await?
                    }
                    None => None,
                }
            }
            LocationStrategy::Point {
                latitude,
                longitude,
            } => self.district_for_point(latitude, longitude).await?,
            LocationStrategy::Zip(zip) => self.district_for_zip(zip).await?,
        };

        let Some(district) = district else {
            tracing::debug!("location did not resolve to a district");
            return Ok(None);
        };
        self.legislators_in_district(&district).await.map(Some)
    }

    /// Fuzzy name search (`legislators.search`).
    ///
    /// Keeps candidates scoring at least `min_score` (pass `0.0` to keep
    /// everything) ordered by descending score; equal scores keep the
    /// service's order. Returns `None` when nothing is kept.
    ///
    /// # Errors
    /// `MalformedPayload` if a result lacks a numeric score or cannot be
    /// hydrated.
    pub async fn search_legislators_by_name(
        &self,
        name: &str,
        min_score: f64,
    ) -> Result<Option<Vec<ScoredCandidate>>, CongressApiError> {
        let params = params([("name", name.to_string()), ("threshold", min_score.to_string())]);
        let Some(results) = self
            .fetch(ApiMethod::LegislatorsSearch, &params, "results")
            .await?
        else {
            return Ok(None);
        };

        let entries = results.as_array().ok_or_else(|| {
            CongressApiError::malformed("legislators.search: expected list of results")
        })?;
        let candidates = entries
            .iter()
            .map(scored_candidate)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rank_candidates(candidates, min_score))
    }

    /// Replace `legislator.committees` with a fresh fetch.
    ///
    /// A legislator without a Bioguide ID gets `None` without a request.
    ///
    /// # Errors
    /// `MalformedPayload` if the reply cannot be hydrated.
    pub async fn load_committees(&self, legislator: &mut Legislator) -> Result<(), CongressApiError> {
        legislator.committees = match legislator.bioguide_id.as_deref() {
            Some(bioguide_id) => self.committees_for_legislator(bioguide_id).await?,
            None => None,
        };
        Ok(())
    }

    // --- Committees ---

    /// Look up a committee with its subcommittees and members (`committees.get`).
    ///
    /// # Errors
    /// `MalformedPayload` if the reply cannot be hydrated.
    pub async fn get_committee(&self, id: &str) -> Result<Option<Committee>, CongressApiError> {
        self.fetch(ApiMethod::CommitteesGet, &params([("id", id)]), "committee")
            .await?
            .map(|raw| Committee::hydrate(&raw))
            .transpose()
    }

    /// All committees in a chamber (`committees.getList`).
    ///
    /// # Errors
    /// `MalformedPayload` if the reply cannot be hydrated.
    pub async fn committees_for_chamber(
        &self,
        chamber: Chamber,
    ) -> Result<Option<Vec<Committee>>, CongressApiError> {
        self.fetch_list(
            ApiMethod::CommitteesGetList,
            &params([("chamber", chamber.as_str())]),
            "committees",
        )
        .await
    }

    /// Committees a legislator sits on (`committees.allForLegislator`).
    ///
    /// # Errors
    /// `MalformedPayload` if the reply cannot be hydrated.
    pub async fn committees_for_legislator(
        &self,
        bioguide_id: &str,
    ) -> Result<Option<Vec<Committee>>, CongressApiError> {
        self.fetch_list(
            ApiMethod::CommitteesAllForLegislator,
            &params([("bioguide_id", bioguide_id)]),
            "committees",
        )
        .await
    }

    /// Overwrite `committee.members` with the member list from a fresh fetch.
    ///
    /// A committee without an id gets `None` without a request.
    ///
    /// # Errors
    /// `MalformedPayload` if the reply cannot be hydrated.
    pub async fn load_members(&self, committee: &mut Committee) -> Result<(), CongressApiError> {
        committee.members = match committee.id.as_deref() {
            Some(id) => self
                .get_committee(id)
                .await?
                .and_then(|fresh| fresh.members),
            None => None,
        };
        Ok(())
    }

    // --- Districts ---

    /// The congressional district containing a point.
    ///
    /// # Errors
    /// `MalformedPayload` if the reply cannot be hydrated.
    pub async fn district_for_point(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Option<District>, CongressApiError> {
        let params = params([
            ("latitude", latitude.to_string()),
            ("longitude", longitude.to_string()),
        ]);
        self.first_district(ApiMethod::DistrictsFromLatLong, &params)
            .await
    }

    /// The first congressional district overlapping a zip code.
    ///
    /// # Errors
    /// `MalformedPayload` if the reply cannot be hydrated.
    pub async fn district_for_zip(&self, zip: &str) -> Result<Option<District>, CongressApiError> {
        self.first_district(ApiMethod::DistrictsFromZip, &params([("zip", zip)]))
            .await
    }

    // --- Plumbing ---

    /// Fetch a document and return `response.<key>`.
    async fn fetch(
        &self,
        method: ApiMethod,
        params: &Params,
        key: &str,
    ) -> Result<Option<Value>, CongressApiError> {
        let Some(mut document) = self.transport.fetch_json(method, params).await? else {
            return Ok(None);
        };
        document
            .get_mut("response")
            .and_then(|response| response.get_mut(key))
            .map(|value| Some(value.take()).filter(|value| !value.is_null()))
            .ok_or_else(|| {
                CongressApiError::malformed(format!(
                    "{}: expected response.{key}",
                    method.as_str()
                ))
            })
    }

    async fn fetch_list<T: Hydrate>(
        &self,
        method: ApiMethod,
        params: &Params,
        key: &str,
    ) -> Result<Option<Vec<T>>, CongressApiError> {
        self.fetch(method, params, key)
            .await?
            .map(|list| hydrate_wrapped_list(&list))
            .transpose()
    }

    async fn first_in_seat(
        &self,
        state: &str,
        district: &str,
    ) -> Result<Option<Legislator>, CongressApiError> {
        let seat = self
            .legislators_where(params([("state", state), ("district", district)]))
            .await?
            .and_then(|list| list.into_iter().next());
        if seat.is_none() {
            tracing::debug!(state, district, "no legislator for seat");
        }
        Ok(seat)
    }

    async fn first_district(
        &self,
        method: ApiMethod,
        params: &Params,
    ) -> Result<Option<District>, CongressApiError> {
        let Some(districts) = self.fetch(method, params, "districts").await? else {
            return Ok(None);
        };
        let entries = districts.as_array().ok_or_else(|| {
            CongressApiError::malformed(format!("{}: expected list of districts", method.as_str()))
        })?;
        entries
            .first()
            .map(|entry| {
                entry
                    .get("district")
                    .ok_or_else(|| CongressApiError::malformed("expected entry wrapped in 'district'"))
                    .and_then(hydrate_district)
            })
            .transpose()
    }
}

fn params<K, V, const N: usize>(pairs: [(K, V); N]) -> Params
where
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Parse `{"result": {"score": "0.91", "legislator": {...}}}`.
fn scored_candidate(entry: &Value) -> Result<ScoredCandidate, CongressApiError> {
    let result = entry
        .get("result")
        .ok_or_else(|| CongressApiError::malformed("expected search entry wrapped in 'result'"))?;

    let score = match result.get("score") {
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(Value::Number(n)) => n.as_f64(),
        _ => None,
    }
    .filter(|score| score.is_finite())
    .ok_or_else(|| {
        CongressApiError::malformed(format!(
            "search result has no numeric score: {}",
            result.get("score").unwrap_or(&Value::Null)
        ))
    })?;

    let legislator = result
        .get("legislator")
        .ok_or_else(|| CongressApiError::malformed("search result has no legislator"))
        .and_then(Legislator::hydrate)?;

    Ok(ScoredCandidate { score, legislator })
}

/// Drop candidates below `min_score` and order the rest by descending score.
///
/// The sort is stable, so equal scores keep their incoming order.
pub(crate) fn rank_candidates(
    mut candidates: Vec<ScoredCandidate>,
    min_score: f64,
) -> Option<Vec<ScoredCandidate>> {
    candidates.retain(|candidate| candidate.score >= min_score);
    candidates.sort_by(|a, b| b.score.total_cmp(&a.score));
    (!candidates.is_empty()).then_some(candidates)
}
