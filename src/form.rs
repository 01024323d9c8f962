//! CEP search screen state
//!
//! `CepForm` owns the four pieces of screen state: the input text, the loading
//! flag, the error message and the lookup result. The only ways to change them
//! are `set_input`, the search methods and `clear`, which keeps the result and
//! the error mutually exclusive.
//!
//! Lifecycle of a search:
//!
//! ```text
//! Idle -> Loading -> Result | Error
//! ```
//!
//! The next search overwrites whatever the previous one left behind.

use crate::cep::{format_cep, is_valid_cep, strip_formatting};
use crate::errors::LookupError;
use crate::models::Address;
use crate::services::CepLookup;

/// Coarse view of the screen, derived from the state record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Loading,
    Result,
    Error,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CepForm {
    input: String,
    loading: bool,
    error: String,
    result: Option<Address>,
}

impl CepForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current field value, always in canonical formatting.
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Error message, empty when there is none.
    pub fn error(&self) -> &str {
        &self.error
    }

    pub fn result(&self) -> Option<&Address> {
        self.result.as_ref()
    }

    pub fn status(&self) -> FormStatus {
        if self.loading {
            FormStatus::Loading
        } else if !self.error.is_empty() {
            FormStatus::Error
        } else if self.result.is_some() {
            FormStatus::Result
        } else {
            FormStatus::Idle
        }
    }

    /// Replaces the field value with the normalized form of `text`.
    pub fn set_input(&mut self, text: &str) {
        self.input = format_cep(text);
    }

    /// Runs a complete search: validate, dispatch, record the outcome.
    ///
    /// Borrowing `self` mutably for the whole call means a second search
    /// cannot start while one is in flight.
    pub async fn search<L: CepLookup>(&mut self, lookup: &L) {
        let Some(cep) = self.begin_search() else {
            return;
        };

        let outcome = lookup.lookup(&cep).await;
        self.finish_search(outcome);
    }

    /// First half of a search.
    ///
    /// Clears the previous result and error, then validates the input. On
    /// invalid input the error is set and `None` is returned; otherwise the
    /// loading flag is raised and the bare 8-digit code to dispatch is
    /// returned.
    pub fn begin_search(&mut self) -> Option<String> {
        self.error.clear();
        self.result = None;

        if !is_valid_cep(&self.input) {
            tracing::debug!("Rejected CEP input '{}'", self.input);
            self.error = LookupError::InvalidCep.user_message().to_string();
            return None;
        }

        let cep = strip_formatting(&self.input);
        self.loading = true;
        Some(cep)
    }

    /// Second half of a search: records the outcome and drops the loading flag.
    pub fn finish_search(&mut self, outcome: Result<Address, LookupError>) {
        match outcome {
            Ok(address) => {
                self.result = Some(address);
                self.error.clear();
            }
            Err(err) => {
                if let LookupError::Transport(ref detail) = err {
                    tracing::error!("Erro ao buscar CEP: {}", detail);
                }
                self.result = None;
                self.error = err.user_message().to_string();
            }
        }
        self.loading = false;
    }

    /// Resets the field, the result and the error.
    pub fn clear(&mut self) {
        self.input.clear();
        self.result = None;
        self.error.clear();
    }
}
