// Copyright (c) 2025 the streamzip authors
// MIT License (see the LICENSE file)

use chrono::NaiveDate;

use crate::entry::Entry;
use crate::spec::consts::{EOCDR_SIGNATURE, ZIP64_EOCDL_SIGNATURE, ZIP64_EOCDR_SIGNATURE};
use crate::write::assemble::{
    archive_needs_zip64, central_directory_header, data_descriptor, entry_needs_zip64, finalization,
    local_file_header,
};
use crate::{ZipItem, ZipString};

fn normalize(item: ZipItem) -> Entry {
    Entry::normalize(item, false).unwrap()
}

fn appnote_entry(extra_flags: u16) -> Entry {
    let date = NaiveDate::from_ymd_opt(2019, 4, 26).unwrap().and_hms_opt(2, 0, 0).unwrap();
    normalize(
        ZipItem::file(ZipString::from(&b"APPNOTE.TXT"[..]), "").last_modified(date).extra_flags(extra_flags),
    )
}

#[test]
fn local_file_header_layout_test() {
    let header = local_file_header(&appnote_entry(0));

    #[rustfmt::skip]
    let expected: &[u8] = &[
        0x50, 0x4b, 0x03, 0x04, // signature
        0x2d, 0x00,             // version needed: 4.5
        0x08, 0x00,             // flags: data descriptor only (raw name)
        0x00, 0x00,             // method: store
        0x00, 0x10,             // mod time 02:00:00
        0x9a, 0x4e,             // mod date 2019-04-26
        0x00, 0x00, 0x00, 0x00, // crc, deferred to the descriptor
        0x00, 0x00, 0x00, 0x00, // compressed size, deferred
        0x00, 0x00, 0x00, 0x00, // uncompressed size, deferred
        0x0b, 0x00,             // name length
        0x00, 0x00,             // extra field length
    ];
    assert_eq!(&header[..30], expected);
    assert_eq!(&header[30..], b"APPNOTE.TXT");
}

#[test]
fn local_file_header_extra_flags_test() {
    let header = local_file_header(&appnote_entry(0x808));
    assert_eq!(&header[6..8], &[0x08, 0x08]);
}

#[test]
fn data_descriptor_layout_test() {
    let mut entry = normalize(ZipItem::file("f", ""));
    entry.crc = 0x11223344;
    entry.uncompressed_size = 13;

    let descriptor = data_descriptor(&entry, false);
    assert_eq!(descriptor.len(), 16);
    assert_eq!(&descriptor[..4], &[0x50, 0x4b, 0x07, 0x08]);
    assert_eq!(&descriptor[4..8], &0x11223344u32.to_le_bytes());
    assert_eq!(&descriptor[8..12], &13u32.to_le_bytes());
    assert_eq!(&descriptor[12..16], &13u32.to_le_bytes());

    let descriptor = data_descriptor(&entry, true);
    assert_eq!(descriptor.len(), 24);
    assert_eq!(&descriptor[8..16], &13u64.to_le_bytes());
    assert_eq!(&descriptor[16..24], &13u64.to_le_bytes());
}

#[test]
fn central_header_layout_test() {
    let date = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap().and_hms_opt(12, 30, 0).unwrap();
    let mut entry = normalize(ZipItem::file("hello.txt", "").last_modified(date));
    entry.crc = 0xCAFEBABE;
    entry.uncompressed_size = 13;
    entry.header_offset = 68;

    let record = central_directory_header(&entry, false);
    assert_eq!(record.len(), 46 + 9);
    assert_eq!(&record[..4], &[0x50, 0x4b, 0x01, 0x02]);
    assert_eq!(&record[4..6], &[0x2d, 0x03]); // made by: UNIX, 4.5
    assert_eq!(&record[6..8], &[0x2d, 0x00]); // needed: 4.5
    assert_eq!(&record[8..10], &[0x08, 0x08]); // descriptor + UTF-8 name
    assert_eq!(&record[16..20], &0xCAFEBABEu32.to_le_bytes());
    assert_eq!(&record[20..24], &13u32.to_le_bytes());
    assert_eq!(&record[24..28], &13u32.to_le_bytes());
    assert_eq!(&record[28..30], &9u16.to_le_bytes());
    assert_eq!(&record[30..32], &0u16.to_le_bytes()); // no extra field
    assert_eq!(&record[38..42], &((0o664u32 << 16).to_le_bytes()));
    assert_eq!(&record[42..46], &68u32.to_le_bytes());
    assert_eq!(&record[46..], b"hello.txt");
}

#[test]
fn central_header_zip64_extra_field_test() {
    let mut entry = normalize(ZipItem::file("big", ""));
    entry.crc = 0x01020304;
    entry.uncompressed_size = 0x1_0000_0000;
    entry.header_offset = 42;

    let record = central_directory_header(&entry, true);
    assert_eq!(record.len(), 46 + 3 + 28);

    // Overflowed size fields carry the sentinel, the offset stays real.
    assert_eq!(&record[20..24], &[0xff; 4]);
    assert_eq!(&record[24..28], &[0xff; 4]);
    assert_eq!(&record[30..32], &28u16.to_le_bytes());
    assert_eq!(&record[42..46], &42u32.to_le_bytes());

    // The extra field always carries all three 64-bit values.
    let extra = &record[46 + 3..];
    assert_eq!(&extra[..2], &1u16.to_le_bytes());
    assert_eq!(&extra[2..4], &24u16.to_le_bytes());
    assert_eq!(&extra[4..12], &0x1_0000_0000u64.to_le_bytes());
    assert_eq!(&extra[12..20], &0x1_0000_0000u64.to_le_bytes());
    assert_eq!(&extra[20..28], &42u64.to_le_bytes());
}

#[test]
fn zip64_trigger_rules_test() {
    let max = u32::MAX as u64;

    assert!(!entry_needs_zip64(max, max, max));
    assert!(entry_needs_zip64(max + 1, 0, 0));
    assert!(entry_needs_zip64(0, max + 1, 0));
    assert!(entry_needs_zip64(0, 0, max + 1));

    assert!(!archive_needs_zip64(max, max, 0xFFFF));
    assert!(archive_needs_zip64(max + 1, 0, 0));
    assert!(archive_needs_zip64(0, max + 1, 0));
    assert!(archive_needs_zip64(0, 0, 0x1_0000));
}

#[test]
fn finalization_classic_test() {
    let block = finalization(1234, 96, 2, false);

    assert_eq!(block.len(), 22);
    assert_eq!(&block[..4], &EOCDR_SIGNATURE.to_le_bytes());
    assert_eq!(&block[8..10], &2u16.to_le_bytes()); // entries on this disk
    assert_eq!(&block[10..12], &2u16.to_le_bytes()); // entries total
    assert_eq!(&block[12..16], &96u32.to_le_bytes());
    assert_eq!(&block[16..20], &1234u32.to_le_bytes());
    assert_eq!(&block[20..22], &0u16.to_le_bytes()); // no comment
}

#[test]
fn finalization_zip64_test() {
    let cd_offset = 0x1_2345_6789u64;
    let cd_size = 5000u64;
    let block = finalization(cd_offset, cd_size, 0x1_0000, true);

    assert_eq!(block.len(), 56 + 20 + 22);
    assert_eq!(&block[..4], &ZIP64_EOCDR_SIGNATURE.to_le_bytes());
    assert_eq!(&block[4..12], &44u64.to_le_bytes()); // size of record
    assert_eq!(&block[24..32], &0x1_0000u64.to_le_bytes()); // entries on disk
    assert_eq!(&block[32..40], &0x1_0000u64.to_le_bytes()); // entries total
    assert_eq!(&block[40..48], &cd_size.to_le_bytes());
    assert_eq!(&block[48..56], &cd_offset.to_le_bytes());

    let locator = &block[56..76];
    assert_eq!(&locator[..4], &ZIP64_EOCDL_SIGNATURE.to_le_bytes());
    assert_eq!(&locator[4..8], &0u32.to_le_bytes());
    assert_eq!(&locator[8..16], &(cd_offset + cd_size).to_le_bytes());
    assert_eq!(&locator[16..20], &1u32.to_le_bytes());

    let eocd = &block[76..];
    assert_eq!(&eocd[..4], &EOCDR_SIGNATURE.to_le_bytes());
    // Entry count and offset overflow their classic fields.
    assert_eq!(&eocd[8..10], &[0xff, 0xff]);
    assert_eq!(&eocd[10..12], &[0xff, 0xff]);
    assert_eq!(&eocd[12..16], &5000u32.to_le_bytes());
    assert_eq!(&eocd[16..20], &[0xff; 4]);
}
