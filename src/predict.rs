// Copyright (c) 2025 the streamzip authors
// MIT License (see the LICENSE file)

//! Exact archive length prediction.
//!
//! The predictor walks the declared item metadata with a virtual offset,
//! applying the same zip64 trigger helpers the assembler uses, and sums
//! every record the encoder will emit. The result is byte-exact: streaming
//! the same items produces exactly this many bytes.

use crate::entry::EntryMeta;
use crate::spec::consts::{
    CDH_LENGTH, DATA_DESCRIPTOR_LENGTH, DATA_DESCRIPTOR_LENGTH_ZIP64, EOCDR_LENGTH, LFH_LENGTH, ZIP64_EOCDL_LENGTH,
    ZIP64_EOCDR_LENGTH, ZIP64_EXTRA_FIELD_LENGTH,
};
use crate::write::assemble::{archive_needs_zip64, entry_needs_zip64};

/// Computes the total archive byte length from declared per-item sizes.
///
/// Returns `None` ("unknown") as soon as any file item lacks a declared
/// size; a known result is never an approximation.
///
/// ```
/// # use streamzip::{predict_length, EntryMeta};
/// let metas = [EntryMeta::file("hello.txt", 13), EntryMeta::folder("assets")];
/// assert_eq!(predict_length(&metas), Some(13 + 30 + 16 + 46 + 2 * 9 + 30 + 46 + 2 * 7 + 22));
/// ```
pub fn predict_length<'a, I>(metadata: I) -> Option<u64>
where
    I: IntoIterator<Item = &'a EntryMeta>,
{
    let mut offset: u64 = 0;
    let mut central_size: u64 = 0;
    let mut num_entries: u64 = 0;
    let mut needs_zip64 = false;

    for meta in metadata {
        let name_len = meta.encoded_name_len();
        let size = meta.size()?;

        let zip64 = entry_needs_zip64(size, size, offset);
        offset += LFH_LENGTH as u64 + name_len + size;
        if meta.is_file() {
            offset += if zip64 { DATA_DESCRIPTOR_LENGTH_ZIP64 } else { DATA_DESCRIPTOR_LENGTH } as u64;
        }
        central_size += CDH_LENGTH as u64 + name_len + if zip64 { ZIP64_EXTRA_FIELD_LENGTH as u64 } else { 0 };

        needs_zip64 |= zip64;
        num_entries += 1;
    }

    needs_zip64 |= archive_needs_zip64(offset, central_size, num_entries);

    let mut total = offset + central_size + EOCDR_LENGTH as u64;
    if needs_zip64 {
        total += (ZIP64_EOCDR_LENGTH + ZIP64_EOCDL_LENGTH) as u64;
    }
    Some(total)
}
