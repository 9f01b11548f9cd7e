// -*- mode: rust; bidi-display-reordering: nil -*-

//! Error types for table construction and for the four conversions.

use thiserror::Error;

/// Failure of one of the conversions.
///
/// Every variant carries the offending value; the character variants also
/// carry its numeric code point and the position in the input at which it was
/// found. Conversions stop at the first error and return no partial output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The character has no Ja16 code. This always includes characters
    /// outside the Basic Multilingual Plane in the default table.
    #[error("character {character:?} (U+{code_point:04X}) at index {index} has no Ja16 code")]
    UnsupportedCharacter {
        character: char,
        code_point: u32,
        index: usize,
    },

    /// The code falls in a reserved (undefined) part of the code space.
    #[error("invalid Ja16 code 0x{code:04X} at index {index}")]
    InvalidCode { code: u16, index: usize },

    /// Visualized text must hold two characters per code.
    #[error("visualized text has odd length {len}, expected a multiple of 2")]
    MalformedLength { len: usize },

    /// The character is not one of the 256 safe-alphabet characters.
    #[error("character {character:?} (U+{code_point:04X}) at index {index} is outside the safe alphabet")]
    OutOfSafeRange {
        character: char,
        code_point: u32,
        index: usize,
    },

    /// The process-wide default table could not be built.
    #[error("ja16 table unavailable: {0}")]
    Table(#[from] BuildError),
}

impl Error {
    pub(crate) fn unsupported(character: char, index: usize) -> Self {
        Error::UnsupportedCharacter {
            character,
            code_point: character as u32,
            index,
        }
    }

    pub(crate) fn out_of_safe_range(character: char, index: usize) -> Self {
        Error::OutOfSafeRange {
            character,
            code_point: character as u32,
            index,
        }
    }
}

/// Internal consistency violation while building a table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A scalar value was offered twice by ranges that do not deduplicate.
    #[error("U+{code_point:04X} assigned to 0x{existing:04X} and again to 0x{code:04X}")]
    DuplicateScalar {
        code_point: u32,
        existing: u16,
        code: u16,
    },

    /// A region ran past the end of the code space.
    #[error("region {region} ran out of codes after 0xFFFF")]
    CapacityExceeded { region: &'static str },

    /// A region did not begin at its fixed code.
    #[error("region {region} must start at 0x{expected:04X}, cursor is at 0x{actual:04X}")]
    Misaligned {
        region: &'static str,
        expected: u32,
        actual: u32,
    },

    /// A safe-alphabet slot holds a syntactically significant character.
    #[error("safe alphabet slot 0x{code:02X} holds metacharacter {character:?}")]
    UnsafeAlphabet { code: u8, character: char },

    /// Fewer than 256 safe-alphabet slots were filled.
    #[error("safe alphabet has {filled} of 256 characters")]
    IncompleteAlphabet { filled: usize },

    /// A full-coverage table left codes undefined.
    #[error("full coverage table stops at 0x{next:04X}")]
    IncompleteCoverage { next: u32 },
}

pub type Result<T> = std::result::Result<T, Error>;
