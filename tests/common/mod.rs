//! Common test utilities for huecraft.
//!
//! This module provides shared utilities for testing the huecraft engine and
//! server. Not every test binary uses every helper.
#![allow(dead_code)]

pub mod assertions;
pub mod http_client;
pub mod server;
