//! Extractor for Steam's binary `shortcuts.vdf` container
//!
//! The container is a binary key-value tree: every field is a type byte
//! (`0x00` object, `0x01` string, `0x02` int32), a NUL-terminated key and a
//! value, and `0x08` closes an object. Only a handful of fields per shortcut
//! matter here, so instead of walking the whole tree the reader scans for the
//! fixed signature of one shortcut entry:
//!
//! - `00 02 "appid" 00` followed by a 4-byte little-endian value
//! - `01 "appname" 00` followed by a NUL-terminated string
//! - `01 "exe" 00` followed by a NUL-terminated string
//! - any optional fields (start dir, icon, launch options, flags)
//! - `00 "tags" 00`, an optional string run, then `08 08`
//!
//! Key names are compared case-insensitively since Steam has written both
//! `appname` and `AppName` over time. Anything that does not fit the
//! signature is skipped, never reported as an error.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, warn};

use super::{ParseError, ParseOutcome, ShortcutRecord};
use crate::error::Result;

const APPID_KEY: &[u8] = b"\x00\x02appid\x00";
const APPNAME_KEY: &[u8] = b"\x01appname\x00";
/// Terminator of the name value plus the `exe` key
const EXE_KEY: &[u8] = b"\x00\x01exe\x00";
/// Terminator of the exe value plus the type byte of the next string field
const NEXT_STRING_FIELD: &[u8] = b"\x00\x01";
const TAGS_KEY: &[u8] = b"\x00tags\x00";

const TYPE_STRING: u8 = 0x01;
const END_OBJECT: u8 = 0x08;

/// Reader for Steam `shortcuts.vdf` files
pub struct ShortcutReader;

impl ShortcutReader {
    /// Read shortcut records from a `shortcuts.vdf` file
    ///
    /// Returns an empty vector if the file doesn't exist.
    /// Returns an error only when an existing file cannot be read.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Vec<ShortcutRecord>> {
        Ok(Self::read_outcome(path)?.records)
    }

    /// Like [`ShortcutReader::read`], but also returns dropped candidates
    pub fn read_outcome<P: AsRef<Path>>(path: P) -> Result<ParseOutcome> {
        let path = path.as_ref();

        let data = match fs::read(path) {
            Ok(data) => data,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No shortcuts file at {}", path.display());
                return Ok(ParseOutcome::default());
            }
            Err(e) => return Err(e.into()),
        };

        let outcome = Self::parse(&data);
        debug!(
            "Parsed {} shortcut(s) from {} ({} dropped)",
            outcome.records.len(),
            path.display(),
            outcome.errors.len()
        );
        Ok(outcome)
    }

    /// Extract shortcut records from raw container bytes
    ///
    /// Records come back in file order. Entries that match structurally but
    /// whose name or exe is not valid UTF-8 are dropped and listed in
    /// [`ParseOutcome::errors`].
    pub fn parse(data: &[u8]) -> ParseOutcome {
        let mut outcome = ParseOutcome::default();
        let mut pos = 0;

        while pos < data.len() {
            let Some(entry) = Self::match_entry(data, pos) else {
                pos += 1;
                continue;
            };

            match entry.decode() {
                Ok(record) => outcome.records.push(record),
                Err(message) => {
                    warn!("Skipping shortcut entry at byte {}: {}", pos, message);
                    outcome.errors.push(ParseError::new(pos, message));
                }
            }

            pos = entry.end;
        }

        outcome
    }

    /// Try to match one shortcut entry starting exactly at `start`
    ///
    /// Values are matched shortest-first: the name ends at the first
    /// terminator followed by the `exe` key, the exe at the first terminator
    /// followed by another string field, and the entry at the first `tags`
    /// object that closes with `08 08`.
    fn match_entry(data: &[u8], start: usize) -> Option<RawEntry<'_>> {
        if !starts_with_ci(data, start, APPID_KEY) {
            return None;
        }

        let id_start = start + APPID_KEY.len();
        let id_bytes: [u8; 4] = data.get(id_start..id_start + 4)?.try_into().ok()?;
        let app_id = u32::from_le_bytes(id_bytes);

        let appname_pos = id_start + 4;
        if !starts_with_ci(data, appname_pos, APPNAME_KEY) {
            return None;
        }
        let name_start = appname_pos + APPNAME_KEY.len();

        for name_end in value_ends(data, name_start, EXE_KEY) {
            let exe_start = name_end + EXE_KEY.len();

            if let Some(exe_end) = value_ends(data, exe_start, NEXT_STRING_FIELD).next() {
                // The optional-field region holds at least one byte before `tags`.
                let tags_from = exe_end + NEXT_STRING_FIELD.len() + 1;

                // Later candidates only search further into the data, so a
                // miss here is a miss for the whole entry.
                let end = find_entry_end(data, tags_from)?;

                return Some(RawEntry {
                    app_id,
                    name: &data[name_start..name_end],
                    exe: &data[exe_start..exe_end],
                    end,
                });
            }
        }

        None
    }
}

/// Byte ranges of one structurally matched entry
struct RawEntry<'a> {
    app_id: u32,
    name: &'a [u8],
    exe: &'a [u8],
    /// Offset just past the closing `08 08`
    end: usize,
}

impl RawEntry<'_> {
    fn decode(&self) -> std::result::Result<ShortcutRecord, String> {
        let name = std::str::from_utf8(self.name)
            .map_err(|e| format!("appname is not valid UTF-8: {}", e))?;
        let exe = std::str::from_utf8(self.exe)
            .map_err(|e| format!("exe is not valid UTF-8: {}", e))?;

        Ok(ShortcutRecord::new(name, exe, self.app_id))
    }
}

fn starts_with_ci(data: &[u8], at: usize, literal: &[u8]) -> bool {
    data.get(at..at + literal.len())
        .is_some_and(|window| window.eq_ignore_ascii_case(literal))
}

/// Candidate end offsets for a non-empty string value starting at `start`
///
/// A value never contains `0x08`, and must be followed by `next`.
fn value_ends<'a>(
    data: &'a [u8],
    start: usize,
    next: &'static [u8],
) -> impl Iterator<Item = usize> + 'a {
    let limit = data
        .get(start..)
        .and_then(|rest| rest.iter().position(|&b| b == END_OBJECT))
        .map_or(data.len(), |offset| start + offset);

    (start + 1..=limit).filter(move |&end| starts_with_ci(data, end, next))
}

/// Find the first `tags` key at or after `from` whose value closes the entry
fn find_entry_end(data: &[u8], from: usize) -> Option<usize> {
    (from..data.len())
        .filter(|&pos| starts_with_ci(data, pos, TAGS_KEY))
        .find_map(|pos| tags_tail_end(data, pos + TAGS_KEY.len()))
}

/// Match the tags value and the closing `08 08` starting at `at`
///
/// The value is either a string-typed run without `0x08` (the tag entries)
/// or nothing at all.
fn tags_tail_end(data: &[u8], at: usize) -> Option<usize> {
    match *data.get(at)? {
        TYPE_STRING => {
            let run_start = at + 1;
            let run_len = data.get(run_start..)?.iter().position(|&b| b == END_OBJECT)?;
            let close = run_start + run_len;
            (run_len > 0 && data.get(close + 1) == Some(&END_OBJECT)).then_some(close + 2)
        }
        END_OBJECT => (data.get(at + 1) == Some(&END_OBJECT)).then_some(at + 2),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds containers shaped like the ones Steam writes
    struct VdfBuilder {
        data: Vec<u8>,
        count: usize,
        lowercase_keys: bool,
    }

    impl VdfBuilder {
        fn new() -> Self {
            Self {
                data: b"\x00shortcuts\x00".to_vec(),
                count: 0,
                lowercase_keys: false,
            }
        }

        fn lowercase_keys(mut self) -> Self {
            self.lowercase_keys = true;
            self
        }

        fn entry(self, app_id: u32, name: &str, exe: &str, tags: &[&str]) -> Self {
            self.raw_entry(app_id, name.as_bytes(), exe.as_bytes(), tags)
        }

        fn raw_entry(mut self, app_id: u32, name: &[u8], exe: &[u8], tags: &[&str]) -> Self {
            let (appname_key, exe_key) = if self.lowercase_keys {
                ("appname", "exe")
            } else {
                ("AppName", "Exe")
            };

            self.data.push(0x00);
            self.data.extend_from_slice(self.count.to_string().as_bytes());
            self.data.push(0x00);

            int_field(&mut self.data, "appid", &app_id.to_le_bytes());
            string_field(&mut self.data, appname_key, name);
            string_field(&mut self.data, exe_key, exe);
            string_field(&mut self.data, "StartDir", b"\"/home/deck/Games\"");
            string_field(&mut self.data, "icon", b"");
            string_field(&mut self.data, "ShortcutPath", b"");
            string_field(&mut self.data, "LaunchOptions", b"--fullscreen");
            int_field(&mut self.data, "IsHidden", &0u32.to_le_bytes());
            int_field(&mut self.data, "AllowOverlay", &1u32.to_le_bytes());
            int_field(&mut self.data, "LastPlayTime", &1_700_000_000u32.to_le_bytes());

            self.data.push(0x00);
            self.data.extend_from_slice(b"tags\x00");
            for (i, tag) in tags.iter().enumerate() {
                string_field(&mut self.data, &i.to_string(), tag.as_bytes());
            }
            self.data.extend_from_slice(&[END_OBJECT, END_OBJECT]);

            self.count += 1;
            self
        }

        fn finish(mut self) -> Vec<u8> {
            self.data.extend_from_slice(&[END_OBJECT, END_OBJECT]);
            self.data
        }
    }

    fn string_field(buf: &mut Vec<u8>, key: &str, value: &[u8]) {
        buf.push(TYPE_STRING);
        buf.extend_from_slice(key.as_bytes());
        buf.push(0x00);
        buf.extend_from_slice(value);
        buf.push(0x00);
    }

    fn int_field(buf: &mut Vec<u8>, key: &str, value: &[u8; 4]) {
        buf.push(0x02);
        buf.extend_from_slice(key.as_bytes());
        buf.push(0x00);
        buf.extend_from_slice(value);
    }

    #[test]
    fn test_parse_empty_input() {
        let outcome = ShortcutReader::parse(&[]);
        assert!(outcome.records.is_empty());
        assert!(!outcome.has_errors());
    }

    #[test]
    fn test_parse_container_without_shortcuts() {
        let data = VdfBuilder::new().finish();
        assert!(ShortcutReader::parse(&data).records.is_empty());
    }

    #[test]
    fn test_parse_single_entry() {
        let data = VdfBuilder::new()
            .lowercase_keys()
            .entry(305620, "Hollow Knight", "/usr/bin/hollow-knight", &[])
            .finish();

        let outcome = ShortcutReader::parse(&data);
        assert_eq!(
            outcome.records,
            vec![ShortcutRecord::new(
                "Hollow Knight",
                "/usr/bin/hollow-knight",
                305620
            )]
        );
        assert!(!outcome.has_errors());
    }

    #[test]
    fn test_app_id_is_little_endian() {
        let mut data = b"\x00\x02appid\x00".to_vec();
        data.extend_from_slice(&[0xD4, 0xA9, 0x04, 0x00]);
        data.extend_from_slice(b"\x01appname\x00Hollow Knight\x00");
        data.extend_from_slice(b"\x01exe\x00/usr/bin/hollow-knight\x00");
        data.extend_from_slice(b"\x01StartDir\x00\x00\x00tags\x00\x08\x08");

        let records = ShortcutReader::parse(&data).records;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].app_id, 305620);
    }

    #[test]
    fn test_parse_two_entries_in_order() {
        let data = VdfBuilder::new()
            .entry(305620, "Hollow Knight", "/usr/bin/hollow-knight", &["favorite"])
            .entry(504230, "Celeste", "\"/opt/celeste/Celeste\"", &[])
            .finish();

        let records = ShortcutReader::parse(&data).records;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Hollow Knight");
        assert_eq!(records[0].app_id, 305620);
        assert_eq!(records[1].name, "Celeste");
        assert_eq!(records[1].exe, "\"/opt/celeste/Celeste\"");
        assert_eq!(records[1].app_id, 504230);
    }

    #[test]
    fn test_parse_many_entries() {
        let mut builder = VdfBuilder::new();
        for i in 0..25u32 {
            builder = builder.entry(
                3_000_000_000 + i,
                &format!("Game {}", i),
                &format!("/games/{}/run.sh", i),
                &["Installed", "Emulator"],
            );
        }

        let records = ShortcutReader::parse(&builder.finish()).records;
        assert_eq!(records.len(), 25);
        for (i, record) in records.iter().enumerate() {
            assert_eq!(record.name, format!("Game {}", i));
            assert_eq!(record.app_id, 3_000_000_000 + i as u32);
        }
    }

    #[test]
    fn test_parse_unicode_name() {
        let data = VdfBuilder::new()
            .entry(7, "Ōkami HD 大神", "C:\\Games\\okami.exe", &[])
            .finish();

        let records = ShortcutReader::parse(&data).records;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Ōkami HD 大神");
        assert_eq!(records[0].exe, "C:\\Games\\okami.exe");
    }

    #[test]
    fn test_app_id_bytes_may_contain_markers() {
        // 0x08 and 0x00 in the 4-byte value must not confuse the matcher
        let app_id = u32::from_le_bytes([0x08, 0x00, 0x08, 0x01]);
        let data = VdfBuilder::new().entry(app_id, "Odd", "/odd", &[]).finish();

        let records = ShortcutReader::parse(&data).records;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].app_id, app_id);
    }

    #[test]
    fn test_invalid_utf8_name_drops_only_that_entry() {
        let data = VdfBuilder::new()
            .entry(1, "Hollow Knight", "/usr/bin/hollow-knight", &[])
            .raw_entry(2, &[0x48, 0xFF, 0xFE, 0x49], b"/usr/bin/broken", &[])
            .entry(3, "Celeste", "/usr/bin/celeste", &[])
            .finish();

        let outcome = ShortcutReader::parse(&data);
        let names: Vec<_> = outcome.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Hollow Knight", "Celeste"]);
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].message.contains("appname"));
    }

    #[test]
    fn test_invalid_utf8_exe_drops_entry() {
        let data = VdfBuilder::new()
            .raw_entry(9, b"Fine Name", &[0xC3, 0x28], &[])
            .finish();

        let outcome = ShortcutReader::parse(&data);
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].message.contains("exe"));
    }

    #[test]
    fn test_truncated_tail_is_ignored() {
        let data = VdfBuilder::new()
            .entry(1, "Hollow Knight", "/usr/bin/hollow-knight", &[])
            .entry(2, "Celeste", "/usr/bin/celeste", &[])
            .finish();

        // Cut inside the second entry's optional fields
        let cut = data.len() - 40;
        let records = ShortcutReader::parse(&data[..cut]).records;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "Hollow Knight");
    }

    #[test]
    fn test_truncated_inside_app_id() {
        let data = b"\x00\x02appid\x00\x94\xAA";
        assert!(ShortcutReader::parse(data).records.is_empty());
    }

    #[test]
    fn test_reordered_fields_yield_no_records() {
        let mut data = b"\x00shortcuts\x00\x000\x00".to_vec();
        int_field(&mut data, "appid", &305620u32.to_le_bytes());
        string_field(&mut data, "Exe", b"/usr/bin/hollow-knight");
        string_field(&mut data, "AppName", b"Hollow Knight");
        string_field(&mut data, "StartDir", b"");
        data.extend_from_slice(b"\x00tags\x00\x08\x08\x08\x08");

        let outcome = ShortcutReader::parse(&data);
        assert!(outcome.records.is_empty());
        assert!(!outcome.has_errors());
    }

    #[test]
    fn test_garbage_input_yields_no_records() {
        let data: Vec<u8> = (0..4096u32).map(|i| (i.wrapping_mul(31) % 251) as u8).collect();
        assert!(ShortcutReader::parse(&data).records.is_empty());
    }

    #[test]
    fn test_value_cannot_span_object_end() {
        // The name run hits 0x08 before any exe key, so nothing matches
        let mut data = b"\x00\x02appid\x00\x01\x00\x00\x00".to_vec();
        data.extend_from_slice(b"\x01appname\x00Bro\x08ken\x00\x01exe\x00/bin/x\x00");
        data.extend_from_slice(b"\x01StartDir\x00\x00\x00tags\x00\x08\x08");

        assert!(ShortcutReader::parse(&data).records.is_empty());
    }

    #[test]
    fn test_read_missing_file_is_empty() {
        let temp = tempfile::TempDir::new().unwrap();
        let records = ShortcutReader::read(temp.path().join("shortcuts.vdf")).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_read_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("shortcuts.vdf");
        let data = VdfBuilder::new()
            .entry(305620, "Hollow Knight", "/usr/bin/hollow-knight", &[])
            .finish();
        std::fs::write(&path, data).unwrap();

        let records = ShortcutReader::read(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].grid_id(), (305620u64 << 32) | 0x0200_0000);
    }

    #[test]
    fn test_read_directory_is_an_error() {
        let temp = tempfile::TempDir::new().unwrap();
        assert!(ShortcutReader::read(temp.path()).is_err());
    }
}
