// -*- mode: rust; bidi-display-reordering: nil -*-

//! The visual form: every code written as two characters of the safe
//! alphabet, high byte first.
//!
//! The safe alphabet is simply the characters at codes 0x00-0xFF, so the
//! visual form of a code in that range ends in the character the code itself
//! decodes to. None of the 256 characters is a quote, bracket, or regex or
//! shell metacharacter, which makes the output usable in identifiers, file
//! names and URL path segments.

use std::collections::HashMap;

use crate::error::{BuildError, Error, Result};
use crate::table::{is_metacharacter, MappingTable};

/// The 256 characters used to spell bytes.
#[derive(Debug, Clone)]
pub struct SafeAlphabet {
    chars: [char; 256],
    bytes: HashMap<char, u8>,
}

impl SafeAlphabet {
    pub(crate) fn from_codes(codes: &[Option<char>]) -> std::result::Result<Self, BuildError> {
        let filled = codes.iter().flatten().count();
        if filled != 256 || codes.len() != 256 {
            return Err(BuildError::IncompleteAlphabet { filled });
        }
        let mut chars = ['\0'; 256];
        let mut bytes = HashMap::with_capacity(256);
        for (byte, c) in codes.iter().flatten().copied().enumerate() {
            if is_metacharacter(c) {
                return Err(BuildError::UnsafeAlphabet {
                    code: byte as u8,
                    character: c,
                });
            }
            chars[byte] = c;
            bytes.insert(c, byte as u8);
        }
        Ok(SafeAlphabet { chars, bytes })
    }

    pub fn char_for(&self, byte: u8) -> char {
        self.chars[byte as usize]
    }

    pub fn byte_for(&self, c: char) -> Option<u8> {
        self.bytes.get(&c).copied()
    }

    pub fn contains(&self, c: char) -> bool {
        self.bytes.contains_key(&c)
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.chars.iter().copied()
    }
}

impl MappingTable {
    /// Spells each code as two safe-alphabet characters. Every 16-bit value
    /// has a visual form, defined in this table or not.
    pub fn visualize(&self, codes: &[u16]) -> String {
        let alphabet = self.alphabet();
        let mut out = String::with_capacity(codes.len() * 4);
        for &code in codes {
            out.push(alphabet.char_for((code >> 8) as u8));
            out.push(alphabet.char_for((code & 0xFF) as u8));
        }
        out
    }

    /// Reverses [`visualize`](Self::visualize).
    pub fn devisualize(&self, text: &str) -> Result<Vec<u16>> {
        let len = text.chars().count();
        if len % 2 != 0 {
            return Err(Error::MalformedLength { len });
        }
        let alphabet = self.alphabet();
        let byte_at = |(index, c): (usize, char)| {
            alphabet
                .byte_for(c)
                .map(u16::from)
                .ok_or_else(|| Error::out_of_safe_range(c, index))
        };

        let mut out = Vec::with_capacity(len / 2);
        let mut chars = text.chars().enumerate();
        while let (Some(high), Some(low)) = (chars.next(), chars.next()) {
            out.push((byte_at(high)? << 8) | byte_at(low)?);
        }
        Ok(out)
    }

    /// Encodes text and spells the codes in the safe alphabet.
    pub fn visualize_text(&self, text: &str) -> Result<String> {
        Ok(self.visualize(&self.encode(text)?))
    }

    /// Reverses [`visualize_text`](Self::visualize_text).
    pub fn devisualize_text(&self, text: &str) -> Result<String> {
        self.decode(&self.devisualize(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableConfig;
    use crate::table::METACHARACTERS;
    use rand::Rng;

    fn table() -> MappingTable {
        MappingTable::build(TableConfig::default()).unwrap()
    }

    #[test]
    fn alphabet_is_the_first_256_codes() {
        let table = table();
        let alphabet = table.alphabet();
        assert_eq!(alphabet.iter().count(), 256);
        for byte in 0..=255u8 {
            let c = alphabet.char_for(byte);
            assert_eq!(table.char_for(u16::from(byte)), Some(c));
            assert_eq!(alphabet.byte_for(c), Some(byte));
        }
    }

    #[test]
    fn alphabet_has_no_metacharacters() {
        for config in [TableConfig::default(), TableConfig::full()] {
            let table = MappingTable::build(config).unwrap();
            for m in METACHARACTERS.chars() {
                assert!(!table.alphabet().contains(m), "{:?} in safe alphabet", m);
            }
        }
    }

    #[test]
    fn every_code_round_trips() {
        let table = table();
        for code in 0..=0xFFFFu16 {
            let visual = table.visualize(&[code]);
            assert_eq!(visual.chars().count(), 2);
            assert!(!visual.chars().any(is_metacharacter));
            assert_eq!(table.devisualize(&visual).unwrap(), vec![code]);
        }
    }

    #[test]
    fn random_sequences_round_trip() {
        let table = table();
        let mut rng = rand::thread_rng();
        for _ in 0..200 {
            let len = rng.gen_range(0..64);
            let codes: Vec<u16> = (0..len).map(|_| rng.gen()).collect();
            let visual = table.visualize(&codes);
            assert_eq!(visual.chars().count(), 2 * codes.len());
            assert_eq!(table.devisualize(&visual).unwrap(), codes);
        }
    }

    #[test]
    fn high_byte_first() {
        let table = table();
        // 0x0100 is tab: high byte 0x01 -> '1', low byte 0x00 -> '0'.
        assert_eq!(table.visualize(&[0x0100]), "10");
        assert_eq!(table.visualize(&[0x0000, 0x000A]), "000A");
        assert_eq!(table.visualize(&[]), "");
    }

    #[test]
    fn odd_length_is_malformed() {
        assert_eq!(table().devisualize("ABC"), Err(Error::MalformedLength { len: 3 }));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // Two halfwidth kana are six UTF-8 bytes but one code.
        assert_eq!(table().devisualize("｡｡"), Ok(vec![0x4040]));
    }

    #[test]
    fn unsafe_character_is_rejected() {
        assert_eq!(
            table().devisualize("A!"),
            Err(Error::OutOfSafeRange {
                character: '!',
                code_point: 0x21,
                index: 1
            })
        );
        // Defined, but above 0xFF.
        assert_eq!(
            table().devisualize("あ0"),
            Err(Error::OutOfSafeRange {
                character: 'あ',
                code_point: 0x3042,
                index: 0
            })
        );
    }

    #[test]
    fn text_round_trips_through_visual_form() {
        let table = table();
        for s in [
            "こんにちは、世界！2025年。- _",
            "TAB\tとLF\nのテスト。",
            "漢字テスト：文字情報基盤、JIS第4水準。",
        ] {
            let visual = table.visualize_text(s).unwrap();
            assert!(!visual.chars().any(is_metacharacter));
            assert_eq!(table.devisualize_text(&visual).unwrap(), s);
        }
    }

    #[test]
    fn undefined_codes_fail_on_the_way_back_to_text() {
        let table = table();
        let visual = table.visualize(&[0xFFFF]);
        assert_eq!(
            table.devisualize_text(&visual),
            Err(Error::InvalidCode { code: 0xFFFF, index: 0 })
        );
    }
}
