//! The oracle boundary.
//!
//! An oracle receives free-text instructions and answers with raw text that
//! is expected to parse as JSON. Nothing about the answer is trusted until it
//! has been reconciled (see [`crate::consensus`]) and parsed (see
//! [`crate::response`]).

use std::time::Duration;

use showdown_types::{ResponseFormat, Result};

/// One judgment request as handed to an [`Oracle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleRequest {
    /// Natural-language instructions, including the hands and the rubric.
    pub prompt: String,
    pub response_format: ResponseFormat,
    /// Caller-supplied budget for the whole reconciliation.
    pub timeout: Duration,
}

/// A non-deterministic judgment source.
pub trait Oracle {
    /// Submit `request` and return the raw answer text.
    ///
    /// Implementations should honour `request.timeout`. The returned text
    /// may be empty or malformed; callers validate it.
    fn query(&self, request: &OracleRequest) -> Result<String>;
}

impl<O: Oracle + ?Sized> Oracle for &O {
    fn query(&self, request: &OracleRequest) -> Result<String> {
        (**self).query(request)
    }
}

impl<O: Oracle + ?Sized> Oracle for Box<O> {
    fn query(&self, request: &OracleRequest) -> Result<String> {
        (**self).query(request)
    }
}
