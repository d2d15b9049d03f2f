// Copyright (c) 2025 the streamzip authors
// MIT License (see the LICENSE file)

// Local file header constants
pub const LFH_SIGNATURE: u32 = 0x4034b50;
/// The full length of the local file header, including the signature and
/// excluding the file name that follows it.
pub const LFH_LENGTH: usize = 30;

// Data descriptor constants
pub const DATA_DESCRIPTOR_SIGNATURE: u32 = 0x8074b50;
pub const DATA_DESCRIPTOR_LENGTH: usize = 16;
pub const DATA_DESCRIPTOR_LENGTH_ZIP64: usize = 24;

// Central directory header constants
pub const CDH_SIGNATURE: u32 = 0x2014b50;
pub const CDH_LENGTH: usize = 46;

/// The zip64 extended information extra field: tag, a 16-bit data size of
/// 24, then uncompressed size, compressed size, and local header offset as
/// 64-bit values. All three are emitted together whenever the field is
/// present.
pub const ZIP64_EXTRA_FIELD_TAG: u16 = 0x0001;
pub const ZIP64_EXTRA_FIELD_DATA_LENGTH: u16 = 24;
pub const ZIP64_EXTRA_FIELD_LENGTH: usize = 28;

// End of central directory record constants
pub const EOCDR_SIGNATURE: u32 = 0x6054b50;
pub const EOCDR_LENGTH: usize = 22;

// Zip64 end of central directory record & locator constants
pub const ZIP64_EOCDR_SIGNATURE: u32 = 0x6064b50;
pub const ZIP64_EOCDR_LENGTH: usize = 56;
/// The size-of-record field of the zip64 EOCDR, which by definition
/// excludes the signature and the field itself.
pub const ZIP64_EOCDR_SIZE_OF_RECORD: u64 = 44;
pub const ZIP64_EOCDL_SIGNATURE: u32 = 0x7064b50;
pub const ZIP64_EOCDL_LENGTH: usize = 20;

/// The contents of a 32-bit header field when one must reference the zip64 version instead.
pub const NON_ZIP64_MAX_SIZE: u32 = 0xFFFFFFFF;
/// The contents of a 16-bit entry count when one must reference the zip64 version instead.
pub const NON_ZIP64_MAX_NUM_FILES: u16 = 0xFFFF;

/// Version 4.5, the version that introduced the zip64 extensions. Emitted
/// unconditionally since any streamed entry may turn out to need them.
pub const VERSION_NEEDED_TO_EXTRACT: u16 = 0x2D;
/// Version 4.5 attributed to a UNIX host.
pub const VERSION_MADE_BY: u16 = 0x32D;

/// The MS-DOS directory bit in the external file attributes.
pub const EXTERNAL_ATTR_DIRECTORY: u32 = 0x10;

pub const DEFAULT_FILE_MODE: u16 = 0o664;
pub const DEFAULT_FOLDER_MODE: u16 = 0o775;

// General purpose bit flags
pub const FLAG_DATA_DESCRIPTOR: u16 = 0x8;
pub const FLAG_UTF8: u16 = 0x800;
