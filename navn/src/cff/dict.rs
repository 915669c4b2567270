//! Editing DICT data.
//!
//! Values are read with the DICT parser from `read-fonts`. That parser turns
//! operands into numbers (real numbers become `Fixed`), so a DICT could not
//! be written back from what it returns. Instead each entry keeps the bytes
//! it was read from, and only the entries that are set are encoded again.

use write_fonts::read::tables::postscript::dict::{self, Entry};

use super::CffError;

/// Escape byte introducing a two byte operator.
const ESCAPE: u8 = 12;

/// A DICT operator. Two byte operators are stored as `0x0C00 | b1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct Operator(u16);

impl Operator {
    pub const NOTICE: Operator = Operator(1);
    pub const FULL_NAME: Operator = Operator(2);
    pub const FAMILY_NAME: Operator = Operator(3);
    pub const WEIGHT: Operator = Operator(4);
    pub const CHARSET: Operator = Operator(15);
    pub const ENCODING: Operator = Operator(16);
    pub const CHAR_STRINGS: Operator = Operator(17);
    pub const PRIVATE: Operator = Operator(18);
    pub const COPYRIGHT: Operator = Operator::escaped(0);
    pub const ROS: Operator = Operator::escaped(30);
    pub const FD_ARRAY: Operator = Operator::escaped(36);
    pub const FD_SELECT: Operator = Operator::escaped(37);

    const fn escaped(b1: u8) -> Operator {
        Operator(((ESCAPE as u16) << 8) | b1 as u16)
    }

    /// Operators whose operands are offsets into the table.
    ///
    /// These are always written in the five byte form, so the size of a
    /// DICT does not depend on where the data it points to ends up.
    fn takes_offsets(self) -> bool {
        matches!(
            self,
            Operator::CHARSET
                | Operator::ENCODING
                | Operator::CHAR_STRINGS
                | Operator::PRIVATE
                | Operator::FD_ARRAY
                | Operator::FD_SELECT
        )
    }

    fn compile(self, out: &mut Vec<u8>) {
        if self.0 > 0xFF {
            out.extend(self.0.to_be_bytes());
        } else {
            out.push(self.0 as u8);
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct RawEntry {
    /// Encoded operands.
    operands: Vec<u8>,
    operator: Operator,
}

/// The entries of a DICT, in their original order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Dict {
    entries: Vec<RawEntry>,
}

impl Dict {
    pub fn parse(data: &[u8]) -> Result<Dict, CffError> {
        dict::entries(data, None).try_for_each(|entry| entry.map(drop))?;

        let mut entries = Vec::new();
        let mut operands_start = 0;
        let mut pos = 0;
        while let Some(&b0) = data.get(pos) {
            let operator = match b0 {
                ESCAPE => {
                    let b1 = *data.get(pos + 1).ok_or(CffError::Truncated)?;
                    Some((Operator::escaped(b1), 2))
                }
                0..=21 => Some((Operator(b0 as u16), 1)),
                _ => None,
            };
            match operator {
                Some((operator, len)) => {
                    entries.push(RawEntry {
                        operands: data[operands_start..pos].to_vec(),
                        operator,
                    });
                    pos += len;
                    operands_start = pos;
                }
                None => pos += operand_len(&data[pos..])?,
            }
        }
        if operands_start != data.len() {
            return Err(CffError::Truncated);
        }
        Ok(Dict { entries })
    }

    /// The decoded entries.
    pub fn entries(&self) -> Result<Vec<Entry>, CffError> {
        let data = self.compile();
        Ok(dict::entries(&data, None).collect::<Result<_, _>>()?)
    }

    /// Replaces the operands of `operator`, appending a new entry if it is
    /// not present.
    pub fn set(&mut self, operator: Operator, operands: &[i32]) {
        let mut encoded = Vec::new();
        for value in operands {
            if operator.takes_offsets() {
                push_long(*value, &mut encoded);
            } else {
                push_int(*value, &mut encoded);
            }
        }
        match self
            .entries
            .iter_mut()
            .find(|entry| entry.operator == operator)
        {
            Some(entry) => entry.operands = encoded,
            None => self.entries.push(RawEntry {
                operands: encoded,
                operator,
            }),
        }
    }

    pub fn compile(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for entry in &self.entries {
            out.extend_from_slice(&entry.operands);
            entry.operator.compile(&mut out);
        }
        out
    }
}

/// The encoded size of the operand at the start of `data`.
fn operand_len(data: &[u8]) -> Result<usize, CffError> {
    let len = match data.first() {
        Some(28) => 3,
        Some(29) => 5,
        // a real number ends with the first 0xF nibble
        Some(30) => {
            data.iter()
                .skip(1)
                .position(|byte| byte & 0x0F == 0x0F || byte >> 4 == 0x0F)
                .ok_or(CffError::Truncated)?
                + 2
        }
        Some(32..=246) => 1,
        Some(247..=254) => 2,
        _ => return Err(CffError::Truncated),
    };
    if len > data.len() {
        return Err(CffError::Truncated);
    }
    Ok(len)
}

fn push_int(value: i32, out: &mut Vec<u8>) {
    match value {
        -107..=107 => out.push((value + 139) as u8),
        108..=1131 => {
            let value = value - 108;
            out.extend([(value >> 8) as u8 + 247, value as u8]);
        }
        -1131..=-108 => {
            let value = -value - 108;
            out.extend([(value >> 8) as u8 + 251, value as u8]);
        }
        -32768..=32767 => {
            out.push(28);
            out.extend((value as i16).to_be_bytes());
        }
        _ => push_long(value, out),
    }
}

fn push_long(value: i32, out: &mut Vec<u8>) {
    out.push(29);
    out.extend(value.to_be_bytes());
}
