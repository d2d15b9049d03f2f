// Copyright (c) 2025 the streamzip authors
// MIT License (see the LICENSE file)

//! A streaming ZIP archive encoder.
//!
//! ## Features
//! - Produces a valid ZIP (with zip64 where required) as a lazy, pull-driven
//!   sequence of byte chunks; nothing is buffered beyond the entry in flight.
//! - Entries are stored uncompressed with trailing data descriptors, so no
//!   input needs to be measured or hashed before streaming begins.
//! - Exact archive size prediction from declared entry sizes, byte-agreed
//!   with the encoder.
//! - Cancellation via an abort token, and pause/resume through central
//!   directory snapshots.
//!
//! See [`make_zip`] for the entry point and a usage example.

pub mod error;
pub mod predict;
pub mod write;

pub(crate) mod entry;
pub(crate) mod spec;

mod abort;
mod string;


pub use crate::abort::AbortToken;
pub use crate::entry::builder::{ByteStream, ZipData, ZipItem};
pub use crate::entry::EntryMeta;
pub use crate::error::{Result, ZipError};
pub use crate::predict::predict_length;
pub use crate::spec::crc::crc32;
pub use crate::spec::date::{ZipDateTime, ZipDateTimeBuilder};
pub use crate::string::{StringEncoding, ZipString};
pub use crate::write::{
    items_from_iter, make_zip, make_zip_iter, make_zip_with_entries, EntriesPromise, EntryRecord, ResumeState,
    ZipOptions, ZipStream, ZipStreamIter,
};
