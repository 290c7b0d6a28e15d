//! Common test utilities for API integration tests
//!
//! This module provides shared test infrastructure for integration tests:
//! an application wired to mock upstreams, and request helpers.

#![allow(unused_imports)]

pub mod helpers;

pub use helpers::*;
