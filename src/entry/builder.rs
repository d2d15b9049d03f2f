// Copyright (c) 2025 the streamzip authors
// MIT License (see the LICENSE file)

use std::io;
use std::pin::Pin;

use bytes::Bytes;
use chrono::NaiveDateTime;
use futures_lite::Stream;

use crate::string::ZipString;

/// A lazy byte producer backing one file entry.
pub type ByteStream = Pin<Box<dyn Stream<Item = io::Result<Bytes>> + Send + 'static>>;

/// The payload of a file entry: either bytes already in memory or a lazy
/// byte stream drained while the archive is produced.
pub enum ZipData {
    Bytes(Bytes),
    Stream(ByteStream),
}

impl ZipData {
    /// Wraps a pull stream of byte chunks as an entry payload.
    pub fn from_stream<S>(stream: S) -> Self
    where
        S: Stream<Item = io::Result<Bytes>> + Send + 'static,
    {
        ZipData::Stream(Box::pin(stream))
    }

    /// The payload length, when it is knowable without draining.
    pub(crate) fn known_len(&self) -> Option<u64> {
        match self {
            ZipData::Bytes(bytes) => Some(bytes.len() as u64),
            ZipData::Stream(_) => None,
        }
    }
}

impl From<Bytes> for ZipData {
    fn from(value: Bytes) -> Self {
        ZipData::Bytes(value)
    }
}

impl From<Vec<u8>> for ZipData {
    fn from(value: Vec<u8>) -> Self {
        ZipData::Bytes(Bytes::from(value))
    }
}

impl From<&[u8]> for ZipData {
    fn from(value: &[u8]) -> Self {
        ZipData::Bytes(Bytes::copy_from_slice(value))
    }
}

impl From<String> for ZipData {
    fn from(value: String) -> Self {
        ZipData::Bytes(Bytes::from(value.into_bytes()))
    }
}

impl From<&str> for ZipData {
    fn from(value: &str) -> Self {
        ZipData::Bytes(Bytes::copy_from_slice(value.as_bytes()))
    }
}

/// One input item for an archive: a file with its payload, or a folder.
///
/// Optional metadata is set builder-style:
///
/// ```
/// # use streamzip::ZipItem;
/// let item = ZipItem::file("report.txt", "the report").mode(0o600);
/// let dir = ZipItem::folder("archive");
/// ```
pub struct ZipItem {
    pub(crate) name: ZipString,
    pub(crate) data: Option<ZipData>,
    pub(crate) size: Option<u64>,
    pub(crate) last_modified: Option<NaiveDateTime>,
    pub(crate) mode: Option<u16>,
    pub(crate) extra_flags: u16,
    pub(crate) first_part_size: Option<u64>,
    pub(crate) last_part_size: Option<u64>,
}

impl ZipItem {
    /// Constructs a file item from a name and a payload.
    pub fn file(name: impl Into<ZipString>, data: impl Into<ZipData>) -> Self {
        Self::new(name.into(), Some(data.into()))
    }

    /// Constructs a folder item. A trailing `/` is appended to the stored
    /// name if not already present.
    pub fn folder(name: impl Into<ZipString>) -> Self {
        Self::new(name.into(), None)
    }

    fn new(name: ZipString, data: Option<ZipData>) -> Self {
        Self {
            name,
            data,
            size: None,
            last_modified: None,
            mode: None,
            extra_flags: 0,
            first_part_size: None,
            last_part_size: None,
        }
    }

    /// Declares the payload size in bytes.
    ///
    /// Required for exact size prediction when the payload is a stream; the
    /// entry fails with a malformed-input error if the drained byte count
    /// disagrees with a declared size.
    pub fn size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the entry's modification date & time (local wall clock).
    ///
    /// Defaults to the current local time.
    pub fn last_modified(mut self, date: NaiveDateTime) -> Self {
        self.last_modified = Some(date);
        self
    }

    /// Sets the entry's POSIX permission bits.
    ///
    /// Defaults to `0o664` for files and `0o775` for folders.
    pub fn mode(mut self, mode: u16) -> Self {
        self.mode = Some(mode);
        self
    }

    /// ORs extra bits into the entry's general purpose flag word.
    pub fn extra_flags(mut self, flags: u16) -> Self {
        self.extra_flags = flags;
        self
    }

    /// Requests that the payload be re-chunked into parts of exactly this
    /// many bytes, with one smaller final part.
    pub fn first_part_size(mut self, size: u64) -> Self {
        self.first_part_size = Some(size);
        self
    }

    /// Declares the exact byte length of the final payload part. Draining a
    /// payload that cannot end on a part of this length fails the entry.
    pub fn last_part_size(mut self, size: u64) -> Self {
        self.last_part_size = Some(size);
        self
    }
}
