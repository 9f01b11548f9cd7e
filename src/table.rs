// -*- mode: rust; bidi-display-reordering: nil -*-

//! Construction of the code table.
//!
//! A table is described as an ordered list of [`CodeRange`]s. The
//! [`TableBuilder`] walks them with a single cursor, handing out consecutive
//! codes starting at 0x0000, and refuses anything that would make the mapping
//! ambiguous. [`MappingTable::build`] lays out the fixed regions:
//!
//!   | codes          | contents                                           |
//!   |----------------|----------------------------------------------------|
//!   | 0x0000-0x003F  | `0-9`, `A-Z`, `a-z`, two separators                |
//!   | 0x0040-0x007E  | halfwidth kana U+FF61-U+FF9F                       |
//!   | 0x007F-0x0097  | Greek lowercase U+03B1-U+03C9                      |
//!   | 0x0098-0x00FF  | U+00A1 onward, metacharacters removed              |
//!   | 0x0100-0x0102  | tab, line feed, space                              |
//!   | 0x0103-        | U+3000-U+303F, kana, fullwidth forms U+FF01-U+FF5E |
//!   | then           | ideographs, up to the reservation boundary         |

use std::collections::HashMap;
use std::fmt;
use std::ops::RangeInclusive;

use tracing::debug;

use crate::config::{Coverage, KanaLayout, TableConfig};
use crate::error::BuildError;
use crate::visual::SafeAlphabet;

/// Number of codes in the 16-bit code space.
pub const CODE_SPACE: u32 = 0x1_0000;

/// Characters that never appear in the safe alphabet: backslash, quotes,
/// backtick, and the bracket, regex and shell punctuation.
pub const METACHARACTERS: &str = "\\\"'`$()[]{}*?+|^.:;=!<>@#%~,/";

pub fn is_metacharacter(c: char) -> bool {
    METACHARACTERS.contains(c)
}

// Unified ideographs, Extension A, compatibility ideographs.
const IDEOGRAPH_BLOCKS: [RangeInclusive<u32>; 3] = [
    0x4E00..=0x9FFF,
    0x3400..=0x4DBF,
    0xF900..=0xFAFF,
];

// Only a full table reaches this far: the BMP alone is too small.
const IDEOGRAPH_EXTENSION_B: RangeInclusive<u32> = 0x2_0000..=0x2_A6DF;

#[derive(Debug, Clone)]
enum Source {
    Chars(Vec<char>),
    Interval(RangeInclusive<u32>),
}

impl Source {
    fn chars(&self) -> impl Iterator<Item = char> + '_ {
        let (list, interval) = match self {
            | Source::Chars(list) => (Some(list.iter().copied()), None),
            | Source::Interval(range) => (None, Some(range.clone().filter_map(char::from_u32))),
        };
        list.into_iter().flatten().chain(interval.into_iter().flatten())
    }
}

/// One step of a table layout.
#[derive(Debug, Clone)]
pub struct CodeRange {
    name: &'static str,
    source: Source,
    start: Option<u32>,
    limit: Option<u32>,
    exclude: Option<fn(char) -> bool>,
    dedup: bool,
}

impl CodeRange {
    /// An explicit character sequence, assigned in the given order.
    pub fn chars<I: IntoIterator<Item = char>>(name: &'static str, chars: I) -> Self {
        Self::new(name, Source::Chars(chars.into_iter().collect()))
    }

    /// Every scalar value in an interval of code points, in ascending order.
    pub fn interval(name: &'static str, code_points: RangeInclusive<u32>) -> Self {
        Self::new(name, Source::Interval(code_points))
    }

    fn new(name: &'static str, source: Source) -> Self {
        CodeRange {
            name,
            source,
            start: None,
            limit: None,
            exclude: None,
            dedup: false,
        }
    }

    /// Require the range to begin exactly at `code`.
    pub fn starting_at(mut self, code: u32) -> Self {
        self.start = Some(code);
        self
    }

    /// Stop assigning once the cursor reaches `code` (exclusive).
    pub fn up_to(mut self, code: u32) -> Self {
        self.limit = Some(code);
        self
    }

    /// Skip characters matching `predicate` without consuming a code.
    pub fn excluding(mut self, predicate: fn(char) -> bool) -> Self {
        self.exclude = Some(predicate);
        self
    }

    /// Skip characters an earlier range already assigned.
    pub fn deduplicated(mut self) -> Self {
        self.dedup = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Assigns codes to ranges in order.
#[derive(Debug)]
pub struct TableBuilder {
    next: u32,
    decode: Box<[Option<char>]>,
    encode: HashMap<char, u16>,
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TableBuilder {
    pub fn new() -> Self {
        TableBuilder {
            next: 0,
            decode: vec![None; CODE_SPACE as usize].into_boxed_slice(),
            encode: HashMap::new(),
        }
    }

    /// The next code to be handed out.
    pub fn cursor(&self) -> u32 {
        self.next
    }

    /// Assigns codes to `range`, returning how many it received.
    pub fn push(&mut self, range: &CodeRange) -> Result<usize, BuildError> {
        if let Some(expected) = range.start {
            if self.next != expected {
                return Err(BuildError::Misaligned {
                    region: range.name,
                    expected,
                    actual: self.next,
                });
            }
        }
        let limit = match range.limit {
            | Some(limit) if limit < self.next => {
                return Err(BuildError::CapacityExceeded { region: range.name });
            }
            | Some(limit) => limit.min(CODE_SPACE),
            | None => CODE_SPACE,
        };

        let first = self.next;
        for c in range.source.chars() {
            if range.exclude.map_or(false, |excluded| excluded(c)) {
                continue;
            }
            let existing = self.encode.get(&c).copied();
            if existing.is_some() && range.dedup {
                continue;
            }
            if self.next >= limit {
                // An explicit bound is a capacity cap; running off the end of
                // the code space is not.
                if range.limit.is_some() {
                    break;
                }
                return Err(BuildError::CapacityExceeded { region: range.name });
            }
            if let Some(existing) = existing {
                return Err(BuildError::DuplicateScalar {
                    code_point: c as u32,
                    existing,
                    code: self.next as u16,
                });
            }
            self.assign(c);
        }

        let count = (self.next - first) as usize;
        debug!(region = range.name, first, count, "assigned ja16 region");
        Ok(count)
    }

    fn assign(&mut self, c: char) {
        let code = self.next as u16;
        self.decode[code as usize] = Some(c);
        self.encode.insert(c, code);
        self.next += 1;
    }

    /// Checks the finished layout and freezes it.
    pub fn finish(self, config: TableConfig) -> Result<MappingTable, BuildError> {
        let alphabet = SafeAlphabet::from_codes(&self.decode[..256])?;
        if config.coverage == Coverage::Full && self.next < CODE_SPACE {
            return Err(BuildError::IncompleteCoverage { next: self.next });
        }
        Ok(MappingTable {
            config,
            defined: self.next,
            decode: self.decode,
            encode: self.encode,
            alphabet,
        })
    }
}

/// The ranges making up a table, in assignment order.
pub fn layout(config: &TableConfig) -> Vec<CodeRange> {
    let base = ('0'..='9')
        .chain('A'..='Z')
        .chain('a'..='z')
        .chain(config.separators.chars());

    let mut ranges = vec![
        CodeRange::chars("base", base).starting_at(0),
        CodeRange::interval("halfwidth kana", 0xFF61..=0xFF9F),
        CodeRange::interval("greek", 0x03B1..=0x03C9).up_to(0x100),
        // Latin-1 runs out before the alphabet is full, so this continues
        // into Latin Extended-A.
        CodeRange::interval("latin", 0x00A1..=0x017F)
            .excluding(is_metacharacter)
            .up_to(0x100),
        CodeRange::chars("whitespace", ['\t', '\n', ' ']).starting_at(0x100),
        CodeRange::interval("cjk punctuation", 0x3000..=0x303F).starting_at(0x103),
    ];
    match config.kana {
        | KanaLayout::Contiguous => {
            ranges.push(CodeRange::interval("kana", 0x3041..=0x30FF));
        }
        | KanaLayout::Split => {
            ranges.push(CodeRange::interval("hiragana", 0x3041..=0x309F));
            ranges.push(CodeRange::interval("katakana", 0x30A1..=0x30FF));
        }
    }
    ranges.push(CodeRange::interval("fullwidth forms", 0xFF01..=0xFF5E));

    let limit = config.coverage.code_limit();
    let extension = match config.coverage {
        | Coverage::Full => Some(IDEOGRAPH_EXTENSION_B),
        | Coverage::Partial { .. } => None,
    };
    for block in IDEOGRAPH_BLOCKS.into_iter().chain(extension) {
        ranges.push(CodeRange::interval("ideographs", block).deduplicated().up_to(limit));
    }
    ranges
}

/// The bijection between Ja16 codes and Unicode scalar values.
///
/// Immutable once built, so a table can be shared freely between threads.
pub struct MappingTable {
    config: TableConfig,
    defined: u32,
    decode: Box<[Option<char>]>,
    encode: HashMap<char, u16>,
    alphabet: SafeAlphabet,
}

impl fmt::Debug for MappingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappingTable")
            .field("config", &self.config)
            .field("defined", &self.defined)
            .finish_non_exhaustive()
    }
}

impl MappingTable {
    pub fn build(config: TableConfig) -> Result<Self, BuildError> {
        let mut builder = TableBuilder::new();
        for range in layout(&config) {
            builder.push(&range)?;
        }
        builder.finish(config)
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn alphabet(&self) -> &SafeAlphabet {
        &self.alphabet
    }

    /// Number of defined codes; they are always 0 through `len() - 1`.
    pub fn len(&self) -> usize {
        self.defined as usize
    }

    pub fn is_empty(&self) -> bool {
        self.defined == 0
    }

    pub fn char_for(&self, code: u16) -> Option<char> {
        self.decode[code as usize]
    }

    pub fn code_for(&self, c: char) -> Option<u16> {
        self.encode.get(&c).copied()
    }

    /// Every defined `(code, char)` pair in code order.
    pub fn entries(&self) -> impl Iterator<Item = (u16, char)> + '_ {
        self.decode
            .iter()
            .enumerate()
            .filter_map(|(code, c)| c.map(|c| (code as u16, c)))
    }
}
