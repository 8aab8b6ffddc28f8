//! # IO Module
//!
//! The outward-facing surface of the backend. Currently only the REST API.

pub mod rest;
