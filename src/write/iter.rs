// Copyright (c) 2025 the streamzip authors
// MIT License (see the LICENSE file)

use bytes::Bytes;
use futures_lite::{future, StreamExt};

use crate::entry::builder::ZipItem;
use crate::error::Result;
use crate::write::{items_from_iter, ItemsFromIter, ZipOptions, ZipStream};

/// Returns a blocking iterator over the archive's byte chunks.
///
/// This is the synchronous facade over [`make_zip`]: each `next()` drives
/// the producer just far enough to yield one chunk. Combined with
/// [`ZipOptions::resume`] it continues a paused archive from plain
/// iterator input.
///
/// [`make_zip`]: crate::make_zip
/// [`ZipOptions::resume`]: crate::ZipOptions::resume
pub fn make_zip_iter<I>(items: I, options: ZipOptions) -> ZipStreamIter<ItemsFromIter<I::IntoIter>>
where
    I: IntoIterator<Item = ZipItem>,
{
    ZipStreamIter { inner: crate::write::make_zip(items_from_iter(items), options) }
}

/// A blocking [`Iterator`] facade over a [`ZipStream`].
pub struct ZipStreamIter<S> {
    inner: ZipStream<S>,
}

impl<S> ZipStreamIter<S>
where
    S: futures_lite::Stream<Item = std::io::Result<ZipItem>> + Unpin,
{
    /// The exact archive length in bytes, when the supplied metadata made
    /// it computable up front.
    pub fn total_size(&self) -> Option<u64> {
        self.inner.total_size()
    }
}

impl<S> Iterator for ZipStreamIter<S>
where
    S: futures_lite::Stream<Item = std::io::Result<ZipItem>> + Unpin,
{
    type Item = Result<Bytes>;

    fn next(&mut self) -> Option<Self::Item> {
        future::block_on(self.inner.next())
    }
}
