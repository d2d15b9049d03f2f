// Copyright (c) 2025 the streamzip authors
// MIT License (see the LICENSE file)

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// A cloneable cancellation token observed by the archive producer.
///
/// The producer checks the token at every entry boundary and at every data
/// pump iteration; once aborted, the stream terminates with
/// [`ZipError::Aborted`] carrying the reason (if any) and no further bytes
/// are produced.
///
/// [`ZipError::Aborted`]: crate::error::ZipError::Aborted
#[derive(Debug, Clone, Default)]
pub struct AbortToken {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    aborted: AtomicBool,
    reason: Mutex<Option<String>>,
}

impl AbortToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aborts the archive without a reason.
    pub fn abort(&self) {
        self.inner.aborted.store(true, Ordering::Release);
    }

    /// Aborts the archive, recording a reason for the consumer to inspect.
    pub fn abort_with(&self, reason: impl Into<String>) {
        // Reason first, so a racing reader of an aborted token sees it.
        *self.inner.reason.lock().unwrap_or_else(PoisonError::into_inner) = Some(reason.into());
        self.inner.aborted.store(true, Ordering::Release);
    }

    pub fn is_aborted(&self) -> bool {
        self.inner.aborted.load(Ordering::Acquire)
    }

    /// Returns the abort reason, if the token was aborted with one.
    pub fn reason(&self) -> Option<String> {
        self.inner.reason.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}
