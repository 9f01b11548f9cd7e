// -*- mode: rust; bidi-display-reordering: nil -*-

//! Text to codes and back.

use std::iter::Enumerate;

use crate::error::{Error, Result};
use crate::table::MappingTable;

impl MappingTable {
    /// Encodes `text` one scalar value at a time. The output has exactly as
    /// many codes as `text` has chars.
    pub fn encode(&self, text: &str) -> Result<Vec<u16>> {
        text.chars().encode_ja16_with(self)
    }

    /// Decodes `codes`, failing on the first undefined one.
    pub fn decode(&self, codes: &[u16]) -> Result<String> {
        let mut out = String::with_capacity(codes.len() * 3);
        for c in self.decode_iter(codes.iter().copied()) {
            out.push(c?);
        }
        Ok(out)
    }

    pub fn decode_iter<I>(&self, codes: I) -> DecodeJa16Iter<'_, I::IntoIter>
    where
        I: IntoIterator<Item = u16>,
    {
        DecodeJa16Iter {
            table: self,
            codes: codes.into_iter().enumerate(),
        }
    }
}

pub trait EncodeJa16: Sized + Iterator<Item = char> {
    /// Encodes with the default table.
    fn encode_ja16(self) -> Result<Vec<u16>> {
        self.encode_ja16_with(crate::table()?)
    }

    fn encode_ja16_with(self, table: &MappingTable) -> Result<Vec<u16>>;
}

impl<T> EncodeJa16 for T
where
    T: Sized,
    T: Iterator<Item = char>,
{
    fn encode_ja16_with(self, table: &MappingTable) -> Result<Vec<u16>> {
        let mut out = Vec::with_capacity(self.size_hint().0);
        for (index, c) in self.enumerate() {
            match table.code_for(c) {
                | None => return Err(Error::unsupported(c, index)),
                | Some(code) => out.push(code),
            }
        }
        Ok(out)
    }
}

/// Lazily decodes a stream of codes.
pub struct DecodeJa16Iter<'a, I> {
    table: &'a MappingTable,
    codes: Enumerate<I>,
}

impl<'a, I> Iterator for DecodeJa16Iter<'a, I>
where
    I: Iterator<Item = u16>,
{
    type Item = Result<char>;

    fn next(&mut self) -> Option<Result<char>> {
        let (index, code) = self.codes.next()?;
        Some(
            self.table
                .char_for(code)
                .ok_or(Error::InvalidCode { code, index }),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.codes.size_hint()
    }
}
