// -*- mode: rust; bidi-display-reordering: nil -*-

//! # Ja16 - a fixed-width 16-bit character set for mixed Japanese/Latin text.
//!
//! This crate maps a curated subset of Unicode onto the 65536 values of a
//! `u16`: ASCII letters and digits, halfwidth kana, Greek lowercase, a slice
//! of Latin-1, the Japanese punctuation and kana blocks, fullwidth forms and
//! the CJK ideographs. Every character costs exactly one code, so string
//! length and storage size are the same number.
//!
//! It also provides a _visual form_: each code written as two characters from
//! a 256-character "safe alphabet" that contains no quotes, brackets, or
//! regex or shell metacharacters. Ja16 text in visual form can be pasted into
//! identifiers, file names and URLs without escaping.
//!
//! ## Usage Summary
//!
//! The free functions use a process-wide default table, built on first use:
//!
//! ```
//! let codes = ja16::encode("こんにちは")?;
//! assert_eq!(ja16::decode(&codes)?, "こんにちは");
//!
//! let visual = ja16::visualize(&codes)?;
//! assert_eq!(visual.chars().count(), 2 * codes.len());
//! assert_eq!(ja16::devisualize(&visual)?, codes);
//! # Ok::<(), ja16::Error>(())
//! ```
//!
//! For a different variant of the table, build one from a [`TableConfig`] and
//! call the same operations as methods on it:
//!
//! ```
//! use ja16::{MappingTable, TableConfig};
//!
//! let table = MappingTable::build(TableConfig::full())?;
//! assert_eq!(table.len(), 0x1_0000);
//! assert_eq!(table.decode(&[0x025F])?, "一");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Code Layout
//!
//! Codes are handed out in one pass with no gaps, so the regions below are
//! defined entirely by their order and sizes:
//!
//!   | codes         | contents                                                |
//!   |---------------|---------------------------------------------------------|
//!   | 0x0000-0x003F | `0-9`, `A-Z`, `a-z`, then `-_` or `_-`                  |
//!   | 0x0040-0x007E | halfwidth kana U+FF61-U+FF9F                            |
//!   | 0x007F-0x0097 | Greek lowercase U+03B1-U+03C9                           |
//!   | 0x0098-0x00FF | U+00A1 onward with metacharacters removed               |
//!   | 0x0100-0x0102 | tab, line feed, space                                   |
//!   | 0x0103-0x0142 | CJK symbols and punctuation U+3000-U+303F               |
//!   | 0x0143-       | hiragana and katakana, then fullwidth forms U+FF01-FF5E |
//!   | 0x025F/0x0260 | first ideograph, U+4E00                                 |
//!
//! The first 256 codes double as the safe alphabet.
//!
//! Two generations of the layout exist. The default ([`TableConfig::default`])
//! uses `-_`, lays the kana out as one run, and stops after the BMP
//! ideographs, leaving everything from 0x7020 up undefined. The gap-free
//! generation ([`TableConfig::full`]) uses `_-`, drops U+30A0 between the
//! syllabaries, and continues into CJK Extension B until 0xFFFF. The BMP only
//! has 63488 scalar values, so a table defining all 65536 codes has to reach
//! outside it; the default table never does, and rejects every non-BMP
//! character.
//!
//! ## Errors
//!
//! Every operation fails on the first bad element and returns no partial
//! output. See [`Error`].

use std::sync::OnceLock;

use tracing::info;

pub mod config;
pub mod error;
pub mod table;
pub mod transcode;
pub mod visual;

pub use config::{Coverage, KanaLayout, Separators, TableConfig};
pub use error::{BuildError, Error, Result};
pub use table::{CodeRange, MappingTable, TableBuilder, METACHARACTERS};
pub use transcode::{DecodeJa16Iter, EncodeJa16};
pub use visual::SafeAlphabet;

static TABLE: OnceLock<std::result::Result<MappingTable, BuildError>> = OnceLock::new();

/// The process-wide table for [`TableConfig::default`].
///
/// Built by whichever thread gets here first; everyone else waits for it and
/// then shares the same immutable table.
pub fn table() -> Result<&'static MappingTable> {
    TABLE
        .get_or_init(|| {
            let table = MappingTable::build(TableConfig::default());
            if let Ok(table) = &table {
                info!(defined = table.len(), "built default ja16 table");
            }
            table
        })
        .as_ref()
        .map_err(|e| Error::Table(e.clone()))
}

pub fn encode(text: &str) -> Result<Vec<u16>> {
    table()?.encode(text)
}

pub fn decode(codes: &[u16]) -> Result<String> {
    table()?.decode(codes)
}

pub fn visualize(codes: &[u16]) -> Result<String> {
    Ok(table()?.visualize(codes))
}

pub fn devisualize(text: &str) -> Result<Vec<u16>> {
    table()?.devisualize(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_characters() {
        let expect = [
            (0x0000, "0"),
            (0x003E, "-"),
            (0x003F, "_"),
            (0x0100, "\t"),
            (0x0101, "\n"),
            (0x0102, " "),
            (0x0143, "ぁ"),
            (0x0260, "一"),
        ];
        for (code, s) in expect {
            assert_eq!(decode(&[code]).unwrap(), s, "0x{:04X}", code);
            assert_eq!(encode(s).unwrap(), vec![code]);
        }
    }

    #[test]
    fn reserved_codes_are_invalid() {
        for code in [0x7020, 0xEF00, 0xFFFF] {
            assert_eq!(decode(&[code]), Err(Error::InvalidCode { code, index: 0 }));
        }
    }

    #[test]
    fn error_cases() {
        assert!(matches!(encode("🚀"), Err(Error::UnsupportedCharacter { code_point: 0x1F680, .. })));
        assert_eq!(devisualize("ABC"), Err(Error::MalformedLength { len: 3 }));
        assert!(matches!(devisualize("A!"), Err(Error::OutOfSafeRange { character: '!', .. })));
    }

    #[test]
    fn error_messages_name_the_offender() {
        let e = encode("a🚀").unwrap_err();
        assert_eq!(e.to_string(), "character '🚀' (U+1F680) at index 1 has no Ja16 code");
        let e = decode(&[0xFFFF]).unwrap_err();
        assert_eq!(e.to_string(), "invalid Ja16 code 0xFFFF at index 0");
    }

    #[test]
    fn default_table_is_shared() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| table().unwrap() as *const MappingTable as usize))
            .collect();
        let addrs: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(addrs.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(table().unwrap().config(), &TableConfig::default());
    }

    #[test]
    fn visualize_is_total() {
        let all: Vec<u16> = (0..=0xFFFF).collect();
        let visual = visualize(&all).unwrap();
        assert_eq!(visual.chars().count(), 2 * all.len());
        assert!(!visual.chars().any(table::is_metacharacter));
        assert_eq!(devisualize(&visual).unwrap(), all);
    }
}
