// -*- mode: rust; bidi-display-reordering: nil -*-

//! The explicit choices a [`MappingTable`](crate::MappingTable) is built from.
//!
//! Two generations of the encoding exist and they disagree on three points:
//! the order of the two separators ending the base set, whether hiragana and
//! katakana are laid out as one interval or two, and whether the code space
//! is completely filled. None of these is guessed; [`TableConfig::default`]
//! and [`TableConfig::full`] name the two generations.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Code at which the reserved region of a partial table begins.
pub const DEFAULT_RESERVED_FROM: u16 = 0xEF00;

/// Order of the two separators at codes 0x3E and 0x3F.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "kebab-case"))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Separators {
    /// `-` then `_` (Base64URL alphabet order).
    #[default]
    HyphenUnderscore,
    /// `_` then `-` (code point order).
    UnderscoreHyphen,
}

impl Separators {
    pub fn chars(self) -> [char; 2] {
        match self {
            | Separators::HyphenUnderscore => ['-', '_'],
            | Separators::UnderscoreHyphen => ['_', '-'],
        }
    }
}

/// Layout of the kana following the Japanese punctuation block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "kebab-case"))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum KanaLayout {
    /// U+3041-U+30FF as one run, including the combining marks and U+30A0
    /// between the two syllabaries.
    #[default]
    Contiguous,
    /// U+3041-U+309F then U+30A1-U+30FF; U+30A0 is left out.
    Split,
}

/// How much of the 16-bit code space is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(rename_all = "kebab-case"))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub enum Coverage {
    /// Every code from 0x0000 to 0xFFFF decodes. The final ideograph block
    /// lies outside the Basic Multilingual Plane.
    Full,
    /// Ideographs stop before `reserved_from`; everything above the last
    /// assigned code stays undefined.
    Partial { reserved_from: u16 },
}

impl Default for Coverage {
    fn default() -> Self {
        Coverage::Partial {
            reserved_from: DEFAULT_RESERVED_FROM,
        }
    }
}

impl Coverage {
    /// Exclusive upper bound on the codes this coverage may assign.
    pub(crate) fn code_limit(self) -> u32 {
        match self {
            | Coverage::Full => 0x1_0000,
            | Coverage::Partial { reserved_from } => u32::from(reserved_from),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
pub struct TableConfig {
    pub separators: Separators,
    pub kana: KanaLayout,
    pub coverage: Coverage,
}

impl TableConfig {
    /// The gap-free generation: `_-` separators, split kana, every code
    /// defined.
    pub fn full() -> Self {
        TableConfig {
            separators: Separators::UnderscoreHyphen,
            kana: KanaLayout::Split,
            coverage: Coverage::Full,
        }
    }

    pub fn with_separators(mut self, separators: Separators) -> Self {
        self.separators = separators;
        self
    }

    pub fn with_kana(mut self, kana: KanaLayout) -> Self {
        self.kana = kana;
        self
    }

    pub fn with_coverage(mut self, coverage: Coverage) -> Self {
        self.coverage = coverage;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets() {
        let partial = TableConfig::default();
        assert_eq!(partial.separators.chars(), ['-', '_']);
        assert_eq!(partial.kana, KanaLayout::Contiguous);
        assert_eq!(partial.coverage.code_limit(), 0xEF00);

        let full = TableConfig::full();
        assert_eq!(full.separators.chars(), ['_', '-']);
        assert_eq!(full.kana, KanaLayout::Split);
        assert_eq!(full.coverage.code_limit(), 0x1_0000);
    }

    #[test]
    fn setters_override_one_field() {
        let config = TableConfig::full().with_separators(Separators::HyphenUnderscore);
        assert_eq!(config.separators, Separators::HyphenUnderscore);
        assert_eq!(config.kana, KanaLayout::Split);
        assert_eq!(config.coverage, Coverage::Full);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_partial_config() {
        let config: TableConfig = serde_json::from_str(
            r#"{"separators":"underscore-hyphen","coverage":{"partial":{"reserved_from":4096}}}"#,
        )
        .unwrap();
        assert_eq!(config.separators, Separators::UnderscoreHyphen);
        assert_eq!(config.kana, KanaLayout::Contiguous);
        assert_eq!(config.coverage, Coverage::Partial { reserved_from: 0x1000 });
    }
}
