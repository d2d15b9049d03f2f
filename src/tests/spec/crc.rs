// Copyright (c) 2025 the streamzip authors
// MIT License (see the LICENSE file)

use crate::spec::crc::{crc32, CRC_TABLE};

#[test]
fn crc_known_value_test() {
    assert_eq!(crc32(b"Hello world!", 0), 0x1b851995);
}

#[test]
fn crc_empty_input_test() {
    assert_eq!(crc32(&[], 0), 0);
    // An empty fold is the identity on any running value.
    assert_eq!(crc32(&[], 0xDEADBEEF), 0xDEADBEEF);
}

#[test]
fn crc_table_canonical_test() {
    assert_eq!(CRC_TABLE[0], 0);
    assert_eq!(CRC_TABLE[1], 0x77073096);
    assert_eq!(CRC_TABLE[8], 0x0EDB8832);
    assert_eq!(CRC_TABLE[255], 0x2D02EF8D);
}

#[test]
fn crc_chunked_equals_single_shot_test() {
    let data = pseudo_random_bytes(64 * 1024);

    let single = crc32(&data, 0);
    for split in [1, 7, 1024, 65535] {
        let mut chained = 0;
        for chunk in data.chunks(split) {
            chained = crc32(chunk, chained);
        }
        assert_eq!(chained, single, "chunk size {split}");
    }
}

#[test]
fn crc_matches_reference_implementation_test() {
    let data = pseudo_random_bytes(4096);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&data);
    assert_eq!(crc32(&data, 0), hasher.finalize());
}

fn pseudo_random_bytes(len: usize) -> Vec<u8> {
    let mut state = 0x9E3779B9u32;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect()
}
