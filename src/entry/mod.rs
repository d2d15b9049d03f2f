// Copyright (c) 2025 the streamzip authors
// MIT License (see the LICENSE file)

pub mod builder;

use chrono::Local;

use crate::entry::builder::{ZipData, ZipItem};
use crate::error::{Result, ZipError};
use crate::spec::consts::{DEFAULT_FILE_MODE, DEFAULT_FOLDER_MODE};
use crate::spec::date::ZipDateTime;
use crate::spec::header::GeneralPurposeFlag;
use crate::string::ZipString;

/// The metadata the size predictor needs about one item: its (encoded)
/// name, whether it is a file, and the declared payload size.
#[derive(Debug, Clone)]
pub struct EntryMeta {
    name: ZipString,
    is_file: bool,
    size: Option<u64>,
}

impl EntryMeta {
    /// Describes a file item with a declared payload size.
    pub fn file(name: impl Into<ZipString>, size: u64) -> Self {
        Self { name: name.into(), is_file: true, size: Some(size) }
    }

    /// Describes a file item whose payload size is unknown. Prediction over
    /// a list containing such an item returns "unknown".
    pub fn file_unsized(name: impl Into<ZipString>) -> Self {
        Self { name: name.into(), is_file: true, size: None }
    }

    /// Describes a folder item.
    pub fn folder(name: impl Into<ZipString>) -> Self {
        Self { name: name.into(), is_file: false, size: Some(0) }
    }

    pub fn is_file(&self) -> bool {
        self.is_file
    }

    /// The declared payload size; folders are always zero.
    pub fn size(&self) -> Option<u64> {
        if self.is_file {
            self.size
        } else {
            Some(0)
        }
    }

    /// The length of the name as it will be encoded in the archive,
    /// including the trailing slash a folder name gains.
    pub fn encoded_name_len(&self) -> u64 {
        let mut len = self.name.len() as u64;
        if !self.is_file && !self.name.ends_with(b'/') {
            len += 1;
        }
        len
    }
}

impl From<&ZipItem> for EntryMeta {
    fn from(item: &ZipItem) -> Self {
        let size = match &item.data {
            Some(data) => item.size.or_else(|| data.known_len()),
            None => Some(0),
        };

        Self { name: item.name.clone(), is_file: item.data.is_some(), size }
    }
}

/// A normalized entry, ready for record assembly.
///
/// Produced from one [`ZipItem`] as the orchestrator reaches it; the CRC
/// and size fields are filled once the payload has been fully drained.
pub(crate) struct Entry {
    pub name: ZipString,
    pub is_file: bool,
    pub date: ZipDateTime,
    pub mode: u16,
    pub flags: u16,
    pub declared_size: Option<u64>,
    pub first_part_size: Option<u64>,
    pub last_part_size: Option<u64>,
    pub data: Option<ZipData>,

    // Filled in during streaming.
    pub header_offset: u64,
    pub crc: u32,
    pub uncompressed_size: u64,
}

impl Entry {
    /// Normalizes one input item, applying name conventions, flag bits,
    /// and metadata defaults.
    pub fn normalize(item: ZipItem, buffers_are_utf8: bool) -> Result<Entry> {
        let is_file = item.data.is_some();

        let mut name = item.name;
        if name.is_empty() {
            return Err(ZipError::MalformedInput("every entry must have a non-empty name"));
        }
        if !is_file && !name.ends_with(b'/') {
            name.push_byte(b'/');
        }
        if name.len() > u16::MAX as usize {
            return Err(ZipError::MalformedInput("entry name exceeds the 16-bit length field"));
        }

        if item.first_part_size == Some(0) {
            return Err(ZipError::MalformedInput("firstPartSize must be positive"));
        }

        let flags = GeneralPurposeFlag {
            data_descriptor: true,
            filename_unicode: name.is_utf8() || buffers_are_utf8,
            extra: item.extra_flags,
        }
        .as_u16();

        let date = item.last_modified.unwrap_or_else(|| Local::now().naive_local()).into();
        let mode = item.mode.unwrap_or(if is_file { DEFAULT_FILE_MODE } else { DEFAULT_FOLDER_MODE });
        let declared_size = match &item.data {
            Some(data) => item.size.or_else(|| data.known_len()),
            None => None,
        };

        Ok(Entry {
            name,
            is_file,
            date,
            mode,
            flags,
            declared_size,
            first_part_size: item.first_part_size,
            last_part_size: item.last_part_size,
            data: item.data,
            header_offset: 0,
            crc: 0,
            uncompressed_size: 0,
        })
    }

    pub fn name_len(&self) -> u16 {
        // Bounded by the normalization check above.
        self.name.len() as u16
    }
}
