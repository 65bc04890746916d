use crate::assembler::disasm::Disassembled;
use crate::spec::types::hw::Byte;
use itertools::Itertools;
use std::fmt::Display;
use strum_macros::{EnumIter, EnumString};

/// How a binary image is laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum ImageFormat {
    /// One byte per line, as two lowercase hex digits.
    Hex,
    Raw,
}

impl Default for ImageFormat {
    fn default() -> Self {
        ImageFormat::Hex
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The 1-based line number, and the line.
    MalformedHexLine(usize, String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MalformedHexLine(line, content) => {
                write!(f, "Line {} is not a hex byte: '{}'", line, content)
            }
        }
    }
}

impl std::error::Error for Error {}

pub fn render(bytes: &[Byte], format: ImageFormat) -> Vec<u8> {
    match format {
        ImageFormat::Raw => bytes.to_vec(),
        ImageFormat::Hex => bytes
            .iter()
            .map(|b| format!("{:02x}\n", b))
            .collect::<String>()
            .into_bytes(),
    }
}

/// The inverse of `render`. Blank lines in a hex image are ignored.
pub fn parse(data: &[u8], format: ImageFormat) -> Result<Vec<Byte>, Error> {
    match format {
        ImageFormat::Raw => Ok(data.to_vec()),
        ImageFormat::Hex => String::from_utf8_lossy(data)
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty())
            .map(|(num, line)| {
                Byte::from_str_radix(line, 16)
                    .map_err(|_| Error::MalformedHexLine(num, line.to_owned()))
            })
            .collect(),
    }
}

/// Renders one line per instruction: offset, raw bytes, then assembler text.
pub fn listing(image: &[Byte], insts: &[Disassembled]) -> String {
    insts
        .iter()
        .map(|inst| {
            let raw = image
                .get(inst.offset..inst.offset + inst.len)
                .unwrap_or(&[])
                .iter()
                .map(|b| format!("{:02x}", b))
                .join(" ");
            format!("{:04x}  {:<8}  {}\n", inst.offset, raw, inst)
        })
        .collect()
}
