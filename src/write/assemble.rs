// Copyright (c) 2025 the streamzip authors
// MIT License (see the LICENSE file)

//! Pure record assembly: each function turns a normalized [`Entry`] (or the
//! finalization counters) into the exact bytes of one archive region.
//!
//! The size predictor walks the same decision helpers, so any change to a
//! length or a zip64 trigger here must keep the two in lockstep.

use bytes::{Bytes, BytesMut};

use crate::entry::Entry;
use crate::spec::consts::{
    CDH_SIGNATURE, DATA_DESCRIPTOR_SIGNATURE, EOCDR_SIGNATURE, EXTERNAL_ATTR_DIRECTORY, LFH_LENGTH, LFH_SIGNATURE,
    NON_ZIP64_MAX_NUM_FILES, NON_ZIP64_MAX_SIZE, VERSION_MADE_BY, VERSION_NEEDED_TO_EXTRACT, ZIP64_EOCDL_SIGNATURE,
    ZIP64_EOCDR_SIGNATURE, ZIP64_EOCDR_SIZE_OF_RECORD, ZIP64_EXTRA_FIELD_LENGTH,
};
use crate::spec::header::{
    CentralDirectoryHeader, DataDescriptor, EndOfCentralDirectoryHeader, LocalFileHeader,
    Zip64EndOfCentralDirectoryLocator, Zip64EndOfCentralDirectoryRecord, Zip64ExtraField,
};

/// Whether an entry requires the zip64 extensions: any of its sizes or its
/// local header offset no longer fits a 32-bit field.
pub(crate) fn entry_needs_zip64(uncompressed_size: u64, compressed_size: u64, lh_offset: u64) -> bool {
    uncompressed_size > NON_ZIP64_MAX_SIZE as u64
        || compressed_size > NON_ZIP64_MAX_SIZE as u64
        || lh_offset > NON_ZIP64_MAX_SIZE as u64
}

/// Whether the archive-wide zip64 terminator records are required by the
/// central directory's own position, size, or entry count.
pub(crate) fn archive_needs_zip64(cd_offset: u64, cd_size: u64, num_entries: u64) -> bool {
    cd_offset > NON_ZIP64_MAX_SIZE as u64
        || cd_size > NON_ZIP64_MAX_SIZE as u64
        || num_entries > NON_ZIP64_MAX_NUM_FILES as u64
}

fn clamp_u32(value: u64) -> u32 {
    if value > NON_ZIP64_MAX_SIZE as u64 {
        NON_ZIP64_MAX_SIZE
    } else {
        value as u32
    }
}

fn clamp_u16(value: u64) -> u16 {
    if value > NON_ZIP64_MAX_NUM_FILES as u64 {
        NON_ZIP64_MAX_NUM_FILES
    } else {
        value as u16
    }
}

/// The local file header followed by the encoded name.
///
/// Sizes and CRC are zero here; flag bit 3 promises them in the trailing
/// data descriptor. The extra field length is always zero in the local
/// header, so the header's size is knowable before the payload is drained.
pub(crate) fn local_file_header(entry: &Entry) -> Bytes {
    let header = LocalFileHeader {
        version: VERSION_NEEDED_TO_EXTRACT,
        flags: entry.flags,
        compression: 0,
        mod_time: entry.date.time,
        mod_date: entry.date.date,
        crc: 0,
        compressed_size: 0,
        uncompressed_size: 0,
        file_name_length: entry.name_len(),
        extra_field_length: 0,
    };

    let mut buffer = BytesMut::with_capacity(LFH_LENGTH + entry.name.len());
    buffer.extend_from_slice(&LFH_SIGNATURE.to_le_bytes());
    buffer.extend_from_slice(&header.as_slice());
    buffer.extend_from_slice(entry.name.as_bytes());
    buffer.freeze()
}

/// The data descriptor trailing a file entry's payload. Size fields widen
/// to 64 bits exactly when the entry triggered zip64.
pub(crate) fn data_descriptor(entry: &Entry, zip64: bool) -> Bytes {
    let descriptor = DataDescriptor {
        crc: entry.crc,
        compressed_size: entry.uncompressed_size,
        uncompressed_size: entry.uncompressed_size,
    };

    let mut buffer = BytesMut::with_capacity(28);
    buffer.extend_from_slice(&DATA_DESCRIPTOR_SIGNATURE.to_le_bytes());
    if zip64 {
        buffer.extend_from_slice(&descriptor.as_slice_zip64());
    } else {
        buffer.extend_from_slice(&descriptor.as_slice());
    }
    buffer.freeze()
}

/// The entry's central directory record: header, name, and (when the entry
/// triggered zip64) the extended information extra field.
///
/// Each 32-bit field is clamped to its sentinel independently; the extra
/// field carries all three true 64-bit values whenever it is present.
pub(crate) fn central_directory_header(entry: &Entry, zip64: bool) -> Vec<u8> {
    let header = CentralDirectoryHeader {
        v_made_by: VERSION_MADE_BY,
        v_needed: VERSION_NEEDED_TO_EXTRACT,
        flags: entry.flags,
        compression: 0,
        mod_time: entry.date.time,
        mod_date: entry.date.date,
        crc: entry.crc,
        compressed_size: clamp_u32(entry.uncompressed_size),
        uncompressed_size: clamp_u32(entry.uncompressed_size),
        file_name_length: entry.name_len(),
        extra_field_length: if zip64 { ZIP64_EXTRA_FIELD_LENGTH as u16 } else { 0 },
        file_comment_length: 0,
        disk_start: 0,
        inter_attr: 0,
        exter_attr: ((entry.mode as u32) << 16) | if entry.is_file { 0 } else { EXTERNAL_ATTR_DIRECTORY },
        lh_offset: clamp_u32(entry.header_offset),
    };

    let mut buffer = Vec::with_capacity(46 + entry.name.len() + if zip64 { ZIP64_EXTRA_FIELD_LENGTH } else { 0 });
    buffer.extend_from_slice(&CDH_SIGNATURE.to_le_bytes());
    buffer.extend_from_slice(&header.as_slice());
    buffer.extend_from_slice(entry.name.as_bytes());
    if zip64 {
        let extra = Zip64ExtraField {
            uncompressed_size: entry.uncompressed_size,
            compressed_size: entry.uncompressed_size,
            lh_offset: entry.header_offset,
        };
        buffer.extend_from_slice(&extra.as_slice());
    }
    buffer
}

/// The archive terminator: the zip64 end-of-central-directory record and
/// locator when required, then the classic end-of-central-directory record
/// with per-field sentinels.
pub(crate) fn finalization(cd_offset: u64, cd_size: u64, num_entries: u64, zip64: bool) -> Bytes {
    let mut buffer = BytesMut::new();

    if zip64 {
        let record = Zip64EndOfCentralDirectoryRecord {
            size_of_zip64_end_of_cd_record: ZIP64_EOCDR_SIZE_OF_RECORD,
            version_made_by: VERSION_MADE_BY,
            version_needed_to_extract: VERSION_NEEDED_TO_EXTRACT,
            disk_number: 0,
            disk_number_start_of_cd: 0,
            num_entries_in_directory_on_disk: num_entries,
            num_entries_in_directory: num_entries,
            directory_size: cd_size,
            offset_of_start_of_directory: cd_offset,
        };
        buffer.extend_from_slice(&ZIP64_EOCDR_SIGNATURE.to_le_bytes());
        buffer.extend_from_slice(&record.as_slice());

        let locator = Zip64EndOfCentralDirectoryLocator {
            number_of_disk_with_start_of_zip64_end_of_central_directory: 0,
            relative_offset: cd_offset + cd_size,
            total_number_of_disks: 1,
        };
        buffer.extend_from_slice(&ZIP64_EOCDL_SIGNATURE.to_le_bytes());
        buffer.extend_from_slice(&locator.as_slice());
    }

    let header = EndOfCentralDirectoryHeader {
        disk_num: 0,
        start_cent_dir_disk: 0,
        num_of_entries_disk: clamp_u16(num_entries),
        num_of_entries: clamp_u16(num_entries),
        size_cent_dir: clamp_u32(cd_size),
        cent_dir_offset: clamp_u32(cd_offset),
        file_comm_length: 0,
    };
    buffer.extend_from_slice(&EOCDR_SIGNATURE.to_le_bytes());
    buffer.extend_from_slice(&header.as_slice());

    buffer.freeze()
}
