//! TRC extraction from embedded ICC profiles
//!
//! Builds profiles byte by byte and checks both the low-level lookup and
//! the text a report ends up showing.

use kaashif_core::icc::tags::UnreadableReason;
use kaashif_core::icc::{IccError, IccProfile, TagSignature};
use kaashif_core::{Classifier, CurveTag, MetadataValue, decode_curve, locate_tag};
use kaashif_tests::profiles::curv_header;
use kaashif_tests::{PLACEHOLDER, ProfileBuilder, curv_gamma, curv_table, legacy_lut};

fn classify_trc(key: &str, icc: &[u8]) -> String {
    Classifier::with_defaults()
        .unwrap()
        .classify(key, &MetadataValue::text(PLACEHOLDER), Some(icc))
}

#[test]
fn gamma_roundtrip_through_profile() {
    let icc = ProfileBuilder::new()
        .tag(b"desc", b"desc\0\0\0\0".to_vec())
        .tag(b"rTRC", curv_gamma(614))
        .build();

    let profile = IccProfile::parse(&icc).unwrap();
    let payload = profile.tag_data(TagSignature::RED_TRC).unwrap();
    assert_eq!(decode_curve(payload), CurveTag::Gamma(2.3984375));

    assert_eq!(classify_trc("RedTRC", &icc), "Gamma: 2.3984375");
}

#[test]
fn short_table_renders_without_ellipsis() {
    let icc = ProfileBuilder::new()
        .tag(b"gTRC", curv_table(&[0, 32768, 65535]))
        .build();

    let payload = IccProfile::parse(&icc)
        .unwrap()
        .tag_data(TagSignature::GREEN_TRC)
        .unwrap();
    let curve = decode_curve(payload);
    assert_eq!(curve.as_lut().unwrap().entries(), &[0, 32768, 65535]);

    assert_eq!(
        classify_trc("GreenTRC", &icc),
        "LUT: [0, 32768, 65535] (total 3)"
    );
}

#[test]
fn long_table_renders_first_sixteen() {
    let values: Vec<u16> = (0..20).map(|i| i * 1000).collect();
    let icc = ProfileBuilder::new().tag(b"bTRC", curv_table(&values)).build();

    let text = classify_trc("BlueTRC", &icc);
    assert_eq!(
        text,
        "LUT: [0, 1000, 2000, 3000, 4000, 5000, 6000, 7000, 8000, 9000, 10000, \
         11000, 12000, 13000, 14000, 15000, ...] (total 20)"
    );
}

#[test]
fn exactly_sixteen_entries_has_no_ellipsis() {
    let values: Vec<u16> = (0..16).collect();
    let icc = ProfileBuilder::new().tag(b"rTRC", curv_table(&values)).build();
    let text = classify_trc("RedTRC", &icc);
    assert!(text.ends_with("15] (total 16)"), "{text}");
}

#[test]
fn legacy_table_in_profile() {
    let icc = ProfileBuilder::new().tag(b"rTRC", legacy_lut()).build();

    let payload = IccProfile::parse(&icc)
        .unwrap()
        .tag_data(TagSignature::RED_TRC)
        .unwrap();
    let curve = decode_curve(payload);
    let lut = curve.as_lut().unwrap();
    assert_eq!(lut.len(), 32);
    assert!(lut.entries().iter().all(|&v| v <= 255));

    assert_eq!(
        classify_trc("RedTRC", &icc),
        "LUT: [0, 8, 16, 24, 32, 40, 48, 56, 64, 72, 80, 88, 96, 104, 112, 120, ...] (total 32)"
    );
}

#[test]
fn declared_table_larger_than_payload() {
    let mut payload = curv_header(4096);
    payload.extend_from_slice(&[0x12, 0x34, 0xAB, 0xCD]);
    let icc = ProfileBuilder::new().tag(b"rTRC", payload).build();

    assert_eq!(
        classify_trc("RedTRC", &icc),
        "LUT: [4660, 43981] (total 2)"
    );
}

#[test]
fn truncated_gamma_and_unknown_types() {
    let mut truncated = curv_header(1);
    truncated.push(0x02);
    let icc = ProfileBuilder::new()
        .tag(b"rTRC", truncated)
        .tag(b"gTRC", b"para\0\0\0\0\0\0\0\0\0\x02\x33\x33".to_vec())
        .tag(b"bTRC", curv_gamma(0))
        .build();

    assert_eq!(classify_trc("RedTRC", &icc), "[TRC: gamma, unreadable]");
    assert_eq!(classify_trc("GreenTRC", &icc), "[TRC: unknown or not curveType]");
    assert_eq!(classify_trc("BlueTRC", &icc), "[TRC: gamma, unreadable]");

    let blue = IccProfile::parse(&icc)
        .unwrap()
        .tag_data(TagSignature::BLUE_TRC)
        .map(decode_curve)
        .unwrap();
    assert_eq!(blue, CurveTag::Unreadable(UnreadableReason::GammaValueZero));
}

#[test]
fn too_small_for_every_signature() {
    let sigs = [
        TagSignature::RED_TRC,
        TagSignature::GREEN_TRC,
        TagSignature::BLUE_TRC,
        TagSignature::GRAY_TRC,
        TagSignature::from_bytes(*b"desc"),
    ];
    for len in [0usize, 4, 127, 128, 131] {
        let icc = vec![0xAAu8; len];
        for sig in sigs {
            assert!(matches!(
                locate_tag(&icc, sig),
                Err(IccError::TooSmall { actual, .. }) if actual == len
            ));
        }
        assert_eq!(classify_trc("RedTRC", &icc), "[TRC: ICC extraction error]");
    }
}

#[test]
fn header_only_profile_has_no_tags() {
    let icc = ProfileBuilder::new().build();
    assert_eq!(icc.len(), 132);
    assert!(matches!(
        locate_tag(&icc, TagSignature::RED_TRC),
        Err(IccError::TagNotFound(_))
    ));
    assert_eq!(classify_trc("RedTRC", &icc), "[TRC: ICC tag not found]");
}

#[test]
fn out_of_bounds_tag_is_not_found() {
    let icc = ProfileBuilder::new()
        .tag(b"gTRC", curv_gamma(563))
        .raw_entry(b"rTRC", 150, 10_000)
        .build();

    assert!(matches!(
        locate_tag(&icc, TagSignature::RED_TRC),
        Err(IccError::TagOutOfBounds { size: 10_000, .. })
    ));
    assert_eq!(classify_trc("RedTRC", &icc), "[TRC: ICC tag not found]");
    // Other tags are unaffected
    assert_eq!(classify_trc("GreenTRC", &icc), "Gamma: 2.19921875");
}

#[test]
fn first_duplicate_wins() {
    let icc = ProfileBuilder::new()
        .tag(b"rTRC", curv_gamma(512))
        .tag(b"rTRC", curv_gamma(256))
        .build();
    assert_eq!(classify_trc("RedTRC", &icc), "Gamma: 2");
}

#[test]
fn truncated_tag_table() {
    // Declares 3 entries but the data ends inside the second one
    let icc = ProfileBuilder::new()
        .raw_entry(b"rTRC", 0, 32)
        .raw_entry(b"gTRC", 0, 32)
        .raw_entry(b"bTRC", 0, 32)
        .truncate(132 + 12 + 6)
        .build();

    let profile = IccProfile::parse(&icc).unwrap();
    assert_eq!(profile.declared_tag_count(), 3);
    assert_eq!(profile.entries().len(), 1);

    // rTRC points at the first 32 bytes of the header: zeros but for the size
    // field (written before truncation), so it decodes as a legacy table
    let red = classify_trc("RedTRC", &icc);
    assert!(red.starts_with("LUT: [0, 0, 0, 168, 0,"), "{red}");
    assert!(red.ends_with("(total 32)"), "{red}");

    // gTRC keeps its signature but loses offset and size; bTRC is gone entirely
    assert!(matches!(
        profile.locate(TagSignature::GREEN_TRC),
        Err(IccError::TruncatedEntry { offset: 144, .. })
    ));
    assert_eq!(classify_trc("GreenTRC", &icc), "[TRC: ICC extraction error]");
    assert_eq!(classify_trc("BlueTRC", &icc), "[TRC: ICC tag not found]");
}
