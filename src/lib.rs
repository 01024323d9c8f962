//! CEP Lookup API Library
//!
//! This library provides the core functionality for the CEP lookup screen:
//! formatting and validating Brazilian postal codes as they are typed,
//! querying the ViaCEP address service, and exposing the screen state over
//! HTTP for a rendering client.
//!
//! # Modules
//!
//! - `cep`: Input normalization and validation.
//! - `config`: Configuration management.
//! - `errors`: Error handling types and user-facing messages.
//! - `form`: Screen state, search orchestration and reset.
//! - `handlers`: HTTP request handlers and router.
//! - `models`: ViaCEP payload and address models.
//! - `presentation`: Screen view with placeholder fallback.
//! - `services`: ViaCEP client.

pub mod cep;
pub mod config;
pub mod errors;
pub mod form;
pub mod handlers;
pub mod models;
pub mod presentation;
pub mod services;
