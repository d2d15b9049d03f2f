// Copyright (c) 2025 the streamzip authors
// MIT License (see the LICENSE file)

use crate::spec::consts::{FLAG_DATA_DESCRIPTOR, FLAG_UTF8};

/// The general purpose bit flag word shared by the local and central headers.
///
/// Bit 3 announces that sizes and CRC live in a trailing data descriptor;
/// bit 11 marks the file name as UTF-8 text. Any caller-supplied extra flag
/// bits are ORed in unchanged.
#[derive(Copy, Clone, Debug, Default)]
pub struct GeneralPurposeFlag {
    pub data_descriptor: bool,
    pub filename_unicode: bool,
    pub extra: u16,
}

impl GeneralPurposeFlag {
    pub fn as_u16(&self) -> u16 {
        let data_descriptor = if self.data_descriptor { FLAG_DATA_DESCRIPTOR } else { 0 };
        let filename_unicode = if self.filename_unicode { FLAG_UTF8 } else { 0 };

        data_descriptor | filename_unicode | self.extra
    }
}

pub struct LocalFileHeader {
    pub version: u16,
    pub flags: u16,
    pub compression: u16,
    pub mod_time: u16,
    pub mod_date: u16,
    pub crc: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub file_name_length: u16,
    pub extra_field_length: u16,
}

/// A data descriptor holds the true sizes; whether they render as 32-bit or
/// 64-bit fields depends on the owning entry's zip64 state.
pub struct DataDescriptor {
    pub crc: u32,
    pub compressed_size: u64,
    pub uncompressed_size: u64,
}

pub struct CentralDirectoryHeader {
    pub v_made_by: u16,
    pub v_needed: u16,
    pub flags: u16,
    pub compression: u16,
    pub mod_time: u16,
    pub mod_date: u16,
    pub crc: u32,
    pub compressed_size: u32,
    pub uncompressed_size: u32,
    pub file_name_length: u16,
    pub extra_field_length: u16,
    pub file_comment_length: u16,
    pub disk_start: u16,
    pub inter_attr: u16,
    pub exter_attr: u32,
    pub lh_offset: u32,
}

/// The zip64 extended information extra field.
///
/// All three 64-bit values are emitted together whenever the field is
/// present, even if only one of them overflowed its 32-bit header field.
pub struct Zip64ExtraField {
    pub uncompressed_size: u64,
    pub compressed_size: u64,
    pub lh_offset: u64,
}

pub struct EndOfCentralDirectoryHeader {
    pub disk_num: u16,
    pub start_cent_dir_disk: u16,
    pub num_of_entries_disk: u16,
    pub num_of_entries: u16,
    pub size_cent_dir: u32,
    pub cent_dir_offset: u32,
    pub file_comm_length: u16,
}

pub struct Zip64EndOfCentralDirectoryRecord {
    pub size_of_zip64_end_of_cd_record: u64,
    pub version_made_by: u16,
    pub version_needed_to_extract: u16,
    pub disk_number: u32,
    pub disk_number_start_of_cd: u32,
    pub num_entries_in_directory_on_disk: u64,
    pub num_entries_in_directory: u64,
    pub directory_size: u64,
    pub offset_of_start_of_directory: u64,
}

pub struct Zip64EndOfCentralDirectoryLocator {
    pub number_of_disk_with_start_of_zip64_end_of_central_directory: u32,
    pub relative_offset: u64,
    pub total_number_of_disks: u32,
}
