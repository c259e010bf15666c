// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

use thiserror::Error;

/// Errors produced while converting dates, validating a schedule, or
/// acquiring a recording reference.
///
/// An empty station/source selection is not an error; see
/// [`ZapOutcome::NothingToFlag`](crate::ZapOutcome::NothingToFlag).
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum Error {
    /// A numeric field is outside the range a conversion accepts.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A date string does not follow the `YYYYyDDDdHHhMMmSSs` layout.
    #[error("cannot parse date '{input}': {reason}")]
    Parse { input: String, reason: String },

    /// Entry `index` starts before the entry preceding it.
    #[error("schedule entry {index} starts before its predecessor")]
    OutOfOrder { index: usize },

    /// The SIGPROC `header` utility could not provide `field`.
    #[error("header field '{field}': {reason}")]
    Header { field: String, reason: String },
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub(crate) fn parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Parse {
            input: input.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn header(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Header {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
