//! Timetable decoding from HEIC container metadata.
//!
//! Apple's dynamic wallpapers embed a base64-encoded binary plist in the
//! primary image's XMP packet, under the `apple_desktop:h24` attribute
//! (hour-indexed) or `apple_desktop:solar` (sun-position-indexed). The
//! decoded plist holds one entry per frame:
//!
//! - h24: `ti` array of `{ t: <fraction of day>, i: <frame index> }`
//! - solar: `si` array of `{ a: <altitude>, z: <azimuth>, i: <frame index> }`
//!
//! Solar azimuth is mapped onto an hour of day (15 degrees per hour,
//! 180 degrees at noon), which needs no geolocation.

use std::io::Cursor;
use std::sync::OnceLock;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use regex::bytes::Regex;
use thiserror::Error;

/// Hours in a day; timetable hours are normalized into `[0, HOURS)`.
pub const HOURS: u32 = 24;

/// One timetable entry: at `hour`, show frame `index`.
///
/// Ordering is by hour first, matching the order frames are linked in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TimeSlot {
    /// Hour of day in `[0, 24)`.
    pub hour: u32,
    /// Frame index within the container.
    pub index: usize,
}

/// Errors that can occur while decoding a timetable.
#[derive(Debug, Error)]
pub enum TimetableError {
    /// No metadata block carries an `apple_desktop` timetable attribute.
    #[error("no apple_desktop:h24 or apple_desktop:solar attribute in container metadata")]
    MissingAttribute,
    /// The attribute payload is not valid base64.
    #[error("invalid base64 timetable payload: {0}")]
    Base64(#[from] base64::DecodeError),
    /// The decoded payload is not a valid plist.
    #[error("invalid timetable plist: {0}")]
    Plist(#[from] plist::Error),
    /// The plist lacks the expected entry array.
    #[error("timetable plist has no `{0}` entry array")]
    MissingEntries(&'static str),
    /// An entry lacks its time or index field.
    #[error("malformed timetable entry at position {0}")]
    MalformedEntry(usize),
    /// The timetable holds no entries.
    #[error("timetable is empty")]
    Empty,
}

fn h24_attr() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"apple_desktop:h24="([^"]*)""#).expect("valid regex"))
}

fn solar_attr() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"apple_desktop:solar="([^"]*)""#).expect("valid regex"))
}

/// Decodes a timetable from the container's metadata blocks.
///
/// Scans the blocks for an h24 attribute first, then falls back to solar.
///
/// # Errors
///
/// Returns an error when no block carries a timetable attribute or the
/// payload cannot be decoded.
pub fn from_metadata(blocks: &[Vec<u8>]) -> Result<Vec<TimeSlot>, TimetableError> {
    for block in blocks {
        if let Some(payload) = capture(h24_attr(), block) {
            return decode_h24(&BASE64.decode(payload)?);
        }
    }

    for block in blocks {
        if let Some(payload) = capture(solar_attr(), block) {
            return decode_solar(&BASE64.decode(payload)?);
        }
    }

    Err(TimetableError::MissingAttribute)
}

fn capture<'a>(re: &Regex, data: &'a [u8]) -> Option<&'a [u8]> {
    re.captures(data).and_then(|c| c.get(1)).map(|m| m.as_bytes())
}

/// Decodes an h24 plist payload into sorted time slots.
///
/// # Errors
///
/// Returns an error for malformed plists or an empty entry array.
pub fn decode_h24(plist_data: &[u8]) -> Result<Vec<TimeSlot>, TimetableError> {
    decode_entries(plist_data, "ti", "t", hour_from_fraction)
}

/// Decodes a solar plist payload into sorted time slots.
///
/// # Errors
///
/// Returns an error for malformed plists or an empty entry array.
pub fn decode_solar(plist_data: &[u8]) -> Result<Vec<TimeSlot>, TimetableError> {
    decode_entries(plist_data, "si", "z", hour_from_azimuth)
}

fn decode_entries(
    plist_data: &[u8],
    array_key: &'static str,
    time_key: &str,
    to_hour: fn(f64) -> u32,
) -> Result<Vec<TimeSlot>, TimetableError> {
    let value = plist::Value::from_reader(Cursor::new(plist_data))?;

    let entries = value
        .as_dictionary()
        .and_then(|dict| dict.get(array_key))
        .and_then(plist::Value::as_array)
        .ok_or(TimetableError::MissingEntries(array_key))?;

    let mut slots = Vec::with_capacity(entries.len());

    for (position, entry) in entries.iter().enumerate() {
        let dict = entry
            .as_dictionary()
            .ok_or(TimetableError::MalformedEntry(position))?;

        let time = dict
            .get(time_key)
            .and_then(as_f64)
            .ok_or(TimetableError::MalformedEntry(position))?;
        let index = dict
            .get("i")
            .and_then(plist::Value::as_signed_integer)
            .and_then(|i| usize::try_from(i).ok())
            .ok_or(TimetableError::MalformedEntry(position))?;

        slots.push(TimeSlot {
            hour: to_hour(time),
            index,
        });
    }

    if slots.is_empty() {
        return Err(TimetableError::Empty);
    }

    slots.sort_unstable();
    Ok(slots)
}

/// Reads a plist number as f64, accepting both reals and integers.
#[allow(clippy::cast_precision_loss)]
fn as_f64(value: &plist::Value) -> Option<f64> {
    value
        .as_real()
        .or_else(|| value.as_signed_integer().map(|i| i as f64))
}

/// Converts a fraction of the day (`0.5` = noon) into an hour in `[0, 24)`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn hour_from_fraction(t: f64) -> u32 {
    ((t * f64::from(HOURS)).round() as i64).rem_euclid(i64::from(HOURS)) as u32
}

/// Converts a solar azimuth in degrees into an hour in `[0, 24)`.
///
/// The sun moves 15 degrees per hour and sits at 180 degrees around noon.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn hour_from_azimuth(z: f64) -> u32 {
    ((z / 15.0).round() as i64).rem_euclid(i64::from(HOURS)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a binary h24 plist from `(t, i)` pairs.
    fn h24_plist(entries: &[(f64, i64)]) -> Vec<u8> {
        build_plist("ti", "t", entries)
    }

    /// Builds a binary solar plist from `(z, i)` pairs.
    fn solar_plist(entries: &[(f64, i64)]) -> Vec<u8> {
        build_plist("si", "z", entries)
    }

    fn build_plist(array_key: &str, time_key: &str, entries: &[(f64, i64)]) -> Vec<u8> {
        let items: Vec<plist::Value> = entries
            .iter()
            .map(|&(time, index)| {
                let mut dict = plist::Dictionary::new();
                dict.insert(time_key.to_string(), plist::Value::Real(time));
                dict.insert("i".to_string(), plist::Value::Integer(index.into()));
                plist::Value::Dictionary(dict)
            })
            .collect();

        let mut root = plist::Dictionary::new();
        root.insert(array_key.to_string(), plist::Value::Array(items));

        let mut cursor = Cursor::new(Vec::new());
        plist::Value::Dictionary(root)
            .to_writer_binary(&mut cursor)
            .unwrap();
        cursor.into_inner()
    }

    /// Wraps a binary plist in a synthetic XMP packet.
    fn xmp_packet(attr: &str, plist_data: &[u8]) -> Vec<u8> {
        format!(
            r#"<x:xmpmeta xmlns:x="adobe:ns:meta/"><rdf:Description {attr}="{}"/></x:xmpmeta>"#,
            BASE64.encode(plist_data)
        )
        .into_bytes()
    }

    #[test]
    fn test_h24_round_trip_is_sorted() {
        let plist_data = h24_plist(&[(0.75, 2), (0.25, 1), (0.0, 0)]);
        let blocks = vec![xmp_packet("apple_desktop:h24", &plist_data)];

        let slots = from_metadata(&blocks).unwrap();
        assert_eq!(
            slots,
            vec![
                TimeSlot { hour: 0, index: 0 },
                TimeSlot { hour: 6, index: 1 },
                TimeSlot { hour: 18, index: 2 },
            ]
        );
    }

    #[test]
    fn test_h24_xml_plist_payload() {
        // plistutil-style XML payloads decode the same way as binary ones
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
            <!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN"
              "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
            <plist version="1.0">
            <dict>
              <key>ti</key>
              <array>
                <dict><key>t</key><real>0.5</real><key>i</key><integer>3</integer></dict>
              </array>
            </dict>
            </plist>"#;

        let blocks = vec![xmp_packet("apple_desktop:h24", xml.as_bytes())];
        let slots = from_metadata(&blocks).unwrap();
        assert_eq!(slots, vec![TimeSlot { hour: 12, index: 3 }]);
    }

    #[test]
    fn test_solar_fallback_maps_azimuth_to_hour() {
        let plist_data = solar_plist(&[(180.0, 1), (90.0, 0), (270.0, 2)]);
        let blocks = vec![xmp_packet("apple_desktop:solar", &plist_data)];

        let slots = from_metadata(&blocks).unwrap();
        assert_eq!(
            slots,
            vec![
                TimeSlot { hour: 6, index: 0 },
                TimeSlot { hour: 12, index: 1 },
                TimeSlot { hour: 18, index: 2 },
            ]
        );
    }

    #[test]
    fn test_h24_takes_precedence_over_solar() {
        let h24 = xmp_packet("apple_desktop:h24", &h24_plist(&[(0.0, 0)]));
        let solar = xmp_packet("apple_desktop:solar", &solar_plist(&[(180.0, 5)]));

        let slots = from_metadata(&[solar, h24]).unwrap();
        assert_eq!(slots, vec![TimeSlot { hour: 0, index: 0 }]);
    }

    #[test]
    fn test_hour_wraps_at_24() {
        // t = 1.0 rounds to hour 24, which must normalize to 0
        let plist_data = h24_plist(&[(1.0, 0), (0.5, 1)]);
        let blocks = vec![xmp_packet("apple_desktop:h24", &plist_data)];

        let slots = from_metadata(&blocks).unwrap();
        assert_eq!(
            slots,
            vec![
                TimeSlot { hour: 0, index: 0 },
                TimeSlot { hour: 12, index: 1 },
            ]
        );
    }

    #[test]
    fn test_integer_time_values_are_accepted() {
        let mut dict = plist::Dictionary::new();
        dict.insert("t".to_string(), plist::Value::Integer(0i64.into()));
        dict.insert("i".to_string(), plist::Value::Integer(0i64.into()));
        let mut root = plist::Dictionary::new();
        root.insert(
            "ti".to_string(),
            plist::Value::Array(vec![plist::Value::Dictionary(dict)]),
        );

        let mut cursor = Cursor::new(Vec::new());
        plist::Value::Dictionary(root)
            .to_writer_binary(&mut cursor)
            .unwrap();

        let slots = decode_h24(&cursor.into_inner()).unwrap();
        assert_eq!(slots, vec![TimeSlot { hour: 0, index: 0 }]);
    }

    #[test]
    fn test_missing_attribute() {
        let blocks = vec![b"<x:xmpmeta>no timetable here</x:xmpmeta>".to_vec()];
        let err = from_metadata(&blocks).unwrap_err();
        assert!(matches!(err, TimetableError::MissingAttribute));
    }

    #[test]
    fn test_invalid_base64_payload() {
        let blocks = vec![br#"<m apple_desktop:h24="!!not-base64!!"/>"#.to_vec()];
        let err = from_metadata(&blocks).unwrap_err();
        assert!(matches!(err, TimetableError::Base64(_)));
    }

    #[test]
    fn test_empty_entry_array() {
        let mut root = plist::Dictionary::new();
        root.insert("ti".to_string(), plist::Value::Array(Vec::new()));

        let mut cursor = Cursor::new(Vec::new());
        plist::Value::Dictionary(root)
            .to_writer_binary(&mut cursor)
            .unwrap();

        let err = decode_h24(&cursor.into_inner()).unwrap_err();
        assert!(matches!(err, TimetableError::Empty));
    }

    #[test]
    fn test_missing_entry_array() {
        let mut root = plist::Dictionary::new();
        root.insert("ap".to_string(), plist::Value::Dictionary(plist::Dictionary::new()));

        let mut cursor = Cursor::new(Vec::new());
        plist::Value::Dictionary(root)
            .to_writer_binary(&mut cursor)
            .unwrap();

        let err = decode_h24(&cursor.into_inner()).unwrap_err();
        assert!(matches!(err, TimetableError::MissingEntries("ti")));
    }

    #[test]
    fn test_slot_ordering_is_by_hour_then_index() {
        let mut slots = vec![
            TimeSlot { hour: 9, index: 2 },
            TimeSlot { hour: 9, index: 1 },
            TimeSlot { hour: 3, index: 5 },
        ];
        slots.sort_unstable();

        assert_eq!(
            slots,
            vec![
                TimeSlot { hour: 3, index: 5 },
                TimeSlot { hour: 9, index: 1 },
                TimeSlot { hour: 9, index: 2 },
            ]
        );
    }
}
