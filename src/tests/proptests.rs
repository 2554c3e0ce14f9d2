use crate::precision::{self, SentinelSign};
use crate::{ReadOptions, Record, RwlReader, RwlWriter, WriteOptions};
use proptest::prelude::*;

prop_compose! {
    /// A record whose widths are exact at the given precision
    fn arb_record(digits: u8)(
        name in "[A-Z][A-Z0-9]{0,7}",
        first_year in -900i32..2500,
        raw in prop::collection::vec(0i64..10i64.pow(u32::from(digits)), 1..60),
    ) -> Record {
        let scale = 10f64.powi(i32::from(digits) - 1);
        Record::new(name, first_year, raw.iter().map(|&r| r as f64 / scale).collect())
    }
}

fn arb_records(digits: u8) -> impl Strategy<Value = Vec<Record>> {
    prop::collection::vec(arb_record(digits), 0..12)
}

proptest! {
    /// Property: reading what was written gives back the same records
    #[test]
    fn prop_roundtrip(records in arb_records(4)) {
        let writer = RwlWriter::new(WriteOptions::new().with_sort(false));
        let bytes = writer.encode(&records).unwrap();
        let decoded = RwlReader::default().decode(&bytes, "prop").unwrap();
        prop_assert_eq!(decoded, records);
    }

    /// Property: round trip holds at every precision that fits the columns
    #[test]
    fn prop_roundtrip_digits((digits, records) in (1u8..=4).prop_flat_map(|d| (Just(d), arb_records(d)))) {
        let bytes = RwlWriter::new(WriteOptions::new().with_digits(digits).with_sort(false))
            .encode(&records)
            .unwrap();
        let decoded = RwlReader::default().decode(&bytes, "prop").unwrap();
        prop_assert_eq!(decoded, records);
    }

    /// Property: positive terminators round trip through name look-ahead
    #[test]
    fn prop_roundtrip_positive_sentinel(records in arb_records(4)) {
        // Without a negative sentinel, neighbouring series need distinct names
        let mut records = records;
        records.dedup_by(|a, b| a.name == b.name);
        let bytes = RwlWriter::new(WriteOptions::new().with_sentinel(SentinelSign::Positive).with_sort(false))
            .encode(&records)
            .unwrap();
        let decoded = RwlReader::default().decode(&bytes, "prop").unwrap();
        prop_assert_eq!(decoded, records);
    }

    /// Property: continuation lines start on a decade and no line holds more than ten values
    #[test]
    fn prop_decade_alignment(records in arb_records(4)) {
        let bytes = RwlWriter::new(WriteOptions::default()).encode(&records).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut open: Option<String> = None;
        for line in text.split_terminator("\r\n") {
            let fields: Vec<&str> = line.split_whitespace().collect();
            let year: i32 = fields[1].parse().unwrap();
            let values = fields.len() - 2;
            prop_assert!((1..=10).contains(&values));
            if let Some(name) = &open {
                prop_assert_eq!(name.as_str(), fields[0]);
                prop_assert_eq!(year.rem_euclid(10), 0);
            }
            open = (fields[fields.len() - 1] != "-9999").then(|| fields[0].to_owned());
        }
        prop_assert!(open.is_none());
    }

    /// Property: encode then decode is within half a unit of the last digit
    #[test]
    fn prop_precision_law(value in 0.0f64..50.0, digits in 1u8..=6) {
        let raw = precision::encode(value, digits).unwrap();
        let terminator = precision::terminator(digits, SentinelSign::Negative).unwrap();
        let (widths, used) = precision::decode(&[raw, terminator], None).unwrap();
        prop_assert_eq!(used, digits);
        let tolerance = 0.5 / 10f64.powi(i32::from(digits) - 1) + 1e-9;
        prop_assert!((widths[0] - value).abs() <= tolerance);
    }

    /// Property: the column repair never changes how a well-formed line is read
    #[test]
    fn prop_repair_matches_spaced(name in "[A-Z]{8}", year in 1000i32..9999, raw in prop::collection::vec(0i64..9999, 1..9)) {
        let values: String = raw.iter().map(|v| format!("{v:>6}")).collect();
        let fused = format!("{name}{year}{values} -9999\r\n");
        let spaced = format!("{name} {year}{values} -9999\r\n");
        let reader = RwlReader::default();
        prop_assert_eq!(
            reader.decode(fused.as_bytes(), "fused").unwrap(),
            reader.decode(spaced.as_bytes(), "spaced").unwrap()
        );
    }

    /// Property: arbitrary text never panics the reader
    #[test]
    fn prop_decode_never_panics(text in "[A-Z0-9 \\-\r\n]{0,400}", legacy in any::<bool>()) {
        let options = ReadOptions::new().with_legacy_markers(legacy);
        let _ = RwlReader::new(options).decode(text.as_bytes(), "noise");
    }
}
