//! Common test utilities for integration tests.
//!
//! - [`http_mock::MockHttpServer`] - Stubbed Sunlight API for exercising `HttpTransport`

#![allow(dead_code)]

pub mod http_mock;
