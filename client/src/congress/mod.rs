//! Sunlight Congress API client module.
//!
//! Fetches legislators, committees, and districts and hydrates them into
//! typed records.
//!
//! # Architecture
//!
//! - [`Transport`] - Trait for fetching decoded API documents
//! - [`HttpTransport`] - Real HTTP implementation using reqwest
//! - [`hydrate()`] - Builds [`Legislator`] and [`Committee`] records from JSON
//! - [`CongressClient`] - Lookups, location resolution, and name search
//! - [`transport::mock::MockTransport`] - Mock for unit tests (behind `test-utils` feature)
//!
//! # Testing Patterns
//!
//! ## Unit Tests (Mock Implementation)
//!
//! ```ignore
//! use sunlight_congress::congress::{ApiMethod, CongressClient};
//! use sunlight_congress::congress::transport::mock::MockTransport;
//!
//! let mock = MockTransport::new();
//! mock.push_json(ApiMethod::CommitteesGet, json!({"response": {"committee": {...}}}));
//!
//! let client = CongressClient::new(mock);
//! let committee = client.get_committee("JSPR").await?;
//! ```
//!
//! ## Integration Tests (HTTP Stubbing)
//!
//! Use `MockHttpServer` to test `HttpTransport` against stubbed HTTP:
//!
//! ```ignore
//! let server = MockHttpServer::start().await;
//!
//! server
//!     .expect_get("/committees.get.json")
//!     .with_query("apikey", "test-key")
//!     .respond_with_json(json!({"response": {"committee": {...}}}))
//!     .mount()
//!     .await;
//!
//! let client = CongressClient::new(HttpTransport::new(server.url(), "test-key"));
//! ```

mod client;
mod error;
mod hydrate;
pub mod location;
pub mod transport;
mod types;

pub use client::CongressClient;
pub use error::CongressApiError;
pub use hydrate::{hydrate, Record, RecordKind};
pub use location::{Geocoder, LocationCriteria, LocationStrategy};
pub use transport::{ApiMethod, HttpTransport, Params, Transport, MULTIPLE_LEGISLATORS_RETURNED};
pub use types::{
    Chamber, Committee, Delegation, District, Legislator, ScoredCandidate, UnknownChamber,
};
