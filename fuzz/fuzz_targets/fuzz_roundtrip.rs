#![no_main]

use libfuzzer_sys::fuzz_target;
use ringwidth::{Record, RwlReader, RwlWriter, WriteOptions};

fuzz_target!(|data: &[u8]| {
    // Bytes are interpreted as (year: i16, count: u8, widths: u16 * count) groups
    let mut records = Vec::new();
    let mut rest = data;
    while rest.len() >= 3 {
        let first_year = i32::from(i16::from_le_bytes([rest[0], rest[1]])).clamp(-999, 9000);
        let count = usize::from(rest[2]).max(1);
        rest = &rest[3..];
        let take = (count * 2).min(rest.len() - rest.len() % 2);
        if take == 0 {
            break;
        }
        let widths = rest[..take]
            .chunks(2)
            .map(|c| f64::from(u16::from_le_bytes([c[0], c[1]]) % 10_000) / 1000.0)
            .collect();
        rest = &rest[take..];
        records.push(Record::new(format!("F{:04}", records.len()), first_year, widths));
    }

    let writer = RwlWriter::new(WriteOptions::new().with_sort(false));
    let bytes = writer.encode(&records).expect("generated records are always encodable");
    let decoded = RwlReader::default().decode(&bytes, "fuzz").expect("written data must read back");
    assert_eq!(decoded, records, "roundtrip mismatch");
});
