// Copyright (c) 2025 the streamzip authors
// MIT License (see the LICENSE file)

use futures_lite::stream;

use crate::tests::init_logger;
use crate::tests::write::collect_archive;
use crate::write::make_zip;
use crate::{items_from_iter, predict_length, EntryMeta, ZipData, ZipItem, ZipOptions, ZipString};

async fn actual_length(items: Vec<ZipItem>) -> u64 {
    collect_archive(make_zip(items_from_iter(items), ZipOptions::new())).await.unwrap().len() as u64
}

#[tokio::test]
async fn prediction_matches_output_test() {
    init_logger();

    let lists: Vec<fn() -> Vec<ZipItem>> = vec![
        Vec::new,
        || vec![ZipItem::file("empty.bin", "")],
        || vec![ZipItem::file("hello.txt", "Hello, World!")],
        || {
            vec![
                ZipItem::file("hello.txt", "Hello, World!"),
                ZipItem::folder("café"),
                ZipItem::file("café/menü.txt", "Zwölf Boxkämpfer"),
                ZipItem::file(ZipString::from(&b"raw\xFFname"[..]), vec![1u8, 2, 3]),
            ]
        },
        || vec![ZipItem::folder("only/"), ZipItem::folder("only/nested")],
    ];

    for build in lists {
        let metadata: Vec<EntryMeta> = build().iter().map(EntryMeta::from).collect();
        let predicted = predict_length(&metadata).expect("all sizes are known");
        assert_eq!(predicted, actual_length(build()).await);
    }
}

#[tokio::test]
async fn prediction_matches_stream_with_declared_size_test() {
    init_logger();

    let build = || {
        let source =
            ZipData::from_stream(stream::iter(vec![Ok(bytes::Bytes::from_static(b"str")), Ok(bytes::Bytes::from_static(b"eamed"))]));
        vec![ZipItem::file("s.bin", source).size(8)]
    };

    let metadata: Vec<EntryMeta> = build().iter().map(EntryMeta::from).collect();
    let predicted = predict_length(&metadata).expect("size was declared");
    assert_eq!(predicted, actual_length(build()).await);
}

#[test]
fn prediction_unknown_without_declared_size_test() {
    let source = ZipData::from_stream(stream::iter(vec![Ok(bytes::Bytes::from_static(b"x"))]));
    let item = ZipItem::file("s.bin", source);
    let metadata = vec![EntryMeta::from(&item), EntryMeta::file("k.txt", 3)];

    assert_eq!(predict_length(&metadata), None);
    assert_eq!(predict_length(&[EntryMeta::file_unsized("u")]), None);
}

#[test]
fn prediction_size_boundary_test() {
    let classic = predict_length(&[EntryMeta::file("a", u32::MAX as u64)]).unwrap();
    let zip64 = predict_length(&[EntryMeta::file("a", u32::MAX as u64 + 1)]).unwrap();

    // One more payload byte, a wider descriptor, the extended information
    // field, and the zip64 terminator records.
    assert_eq!(zip64 - classic, 1 + 8 + 28 + 56 + 20);
}

#[test]
fn prediction_offset_boundary_test() {
    let max = u32::MAX as u64;
    let metas = [EntryMeta::file("a", max), EntryMeta::file("b", 0)];
    let predicted = predict_length(&metas).unwrap();

    // The second entry starts past the 32-bit boundary, so it alone
    // carries zip64 records.
    let first = 30 + 1 + max + 16;
    let second = 30 + 1 + 0 + 24;
    let central = (46 + 1) + (46 + 1 + 28);
    assert_eq!(predicted, first + second + central + 22 + 56 + 20);
}

#[test]
fn prediction_entry_count_boundary_test() {
    let at_limit: Vec<EntryMeta> = (0..u16::MAX as u32).map(|_| EntryMeta::file("x", 0)).collect();
    let over_limit: Vec<EntryMeta> = (0..=u16::MAX as u32).map(|_| EntryMeta::file("x", 0)).collect();

    let at_limit = predict_length(&at_limit).unwrap();
    let over_limit = predict_length(&over_limit).unwrap();

    // One more classic entry plus the zip64 terminator records.
    assert_eq!(over_limit - at_limit, (30 + 1 + 16 + 46 + 1) + 56 + 20);
}

#[test]
fn folder_names_gain_slash_in_prediction_test() {
    let with_slash = predict_length(&[EntryMeta::folder("dir/")]).unwrap();
    let without_slash = predict_length(&[EntryMeta::folder("dir")]).unwrap();
    assert_eq!(with_slash, without_slash);
}
