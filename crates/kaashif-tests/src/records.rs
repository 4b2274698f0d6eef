//! Metadata records shaped like reader output

use kaashif_core::MetadataRecord;

/// What the reader writes in place of unextracted binary fields
pub const PLACEHOLDER: &str = "(Binary data 2060 bytes, use -b option to extract)";

/// Record as a JSON-speaking metadata reader returns it for a typical JPEG
///
/// Field order matches the reader: file info, then camera EXIF, then the
/// ICC profile fields, then embedded blobs.
pub fn reader_record() -> MetadataRecord {
    let json = serde_json::json!({
        "SourceFile": "uploads/3f2a9c",
        "FileSize": "2.1 MB",
        "ImageWidth": 4000,
        "ImageHeight": 3000,
        "Make": "Canon",
        "Model": "Canon EOS 80D",
        "Orientation": 6,
        "FNumber": 2.8,
        "ISO": 200,
        "Flash": false,
        "DateTimeOriginal": {
            "year": 2024,
            "month": 5,
            "day": 17,
            "rawValue": "2024:05:17 10:21:33"
        },
        "ProfileDescription": "sRGB IEC61966-2.1",
        "RedTRC": PLACEHOLDER,
        "GreenTRC": PLACEHOLDER,
        "BlueTRC": PLACEHOLDER,
        "XMP": {
            "type": "Buffer",
            "data": "<?xml version=\"1.0\"?><x:xmpmeta/>".as_bytes()
        },
        "ThumbnailImage": {
            "type": "Buffer",
            "data": [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10]
        }
    });

    // Going through JSON gives the same values a reader response would
    serde_json::from_value(json).expect("fixture record is a JSON object")
}
