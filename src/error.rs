// Copyright (c) 2025 the streamzip authors
// MIT License (see the LICENSE file)

use std::sync::Arc;

use thiserror::Error;

pub type Result<V> = std::result::Result<V, ZipError>;

/// An error produced while encoding a ZIP archive.
///
/// The enum is cloneable so that a single failure can terminate both the
/// byte stream and the deferred entries value with the same error.
#[derive(Debug, Clone, Error)]
#[non_exhaustive]
pub enum ZipError {
    /// Archive production was cancelled, either through an [`AbortToken`]
    /// or by the consumer going away.
    ///
    /// [`AbortToken`]: crate::AbortToken
    #[error("archive production was aborted")]
    Aborted(Option<String>),

    /// An input item was unusable as supplied.
    #[error("malformed input: {0}")]
    MalformedInput(&'static str),

    /// An entry's byte source failed mid-drain.
    #[error("a byte source returned an error")]
    SourceFailure(#[source] Arc<std::io::Error>),

    /// The caller's item iterator failed.
    #[error("the item iterator returned an error")]
    IteratorFailure(#[source] Arc<std::io::Error>),
}

impl ZipError {
    /// The reason supplied to the abort token, if this error is an abort
    /// and a reason was given.
    pub fn abort_reason(&self) -> Option<&str> {
        match self {
            ZipError::Aborted(reason) => reason.as_deref(),
            _ => None,
        }
    }

    pub(crate) fn source_failure(err: std::io::Error) -> Self {
        ZipError::SourceFailure(Arc::new(err))
    }

    pub(crate) fn iterator_failure(err: std::io::Error) -> Self {
        ZipError::IteratorFailure(Arc::new(err))
    }
}
