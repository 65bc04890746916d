use super::tokenize::Line;
use super::types::Located;
use crate::assembler::model::{Expression, Operand};
use crate::spec::{
    isa::{self, Isa},
    types::hw::Byte,
};
use std::convert::TryFrom;
use std::fmt::Display;

const ACCUMULATOR_TOKEN: &str = "A";
const REGISTER_PREFIX: char = 'R';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    InvalidOperand(String, &'static str),
    UnknownInstruction(isa::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidOperand(tk, msg) => write!(f, "Invalid operand '{}': {}", tk, msg),
            Error::UnknownInstruction(err) => write!(f, "{}", err),
        }
    }
}

impl From<isa::Error> for Error {
    fn from(err: isa::Error) -> Self {
        Error::UnknownInstruction(err)
    }
}

fn parse_hex_byte(raw: &str) -> Result<Byte, &'static str> {
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw),
    };
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(digits);

    if digits.is_empty() {
        return Err("expected hexadecimal digits");
    }
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err("not a hexadecimal number");
    }

    if negative {
        return Err("value is not an 8-bit integer");
    }

    // Anything which does not fit in a `u64` is out of range anyway.
    let val = u64::from_str_radix(digits, 16).map_err(|_| "value is not an 8-bit integer")?;

    Byte::try_from(val).map_err(|_| "value is not an 8-bit integer")
}

impl Operand {
    /// Parses a single operand token: `A` for the accumulator, `R<hex>` for a
    /// register, and bare hexadecimal for a literal.
    pub fn parse(raw: &str) -> Result<Self, Error> {
        if raw == ACCUMULATOR_TOKEN {
            return Ok(Operand::ACC);
        }

        let invalid = |msg| Error::InvalidOperand(raw.to_owned(), msg);
        match raw.strip_prefix(REGISTER_PREFIX) {
            Some(idx) => parse_hex_byte(idx).map(Operand::reg).map_err(invalid),
            None => parse_hex_byte(raw).map(Operand::lit).map_err(invalid),
        }
    }
}

impl<'a> Expression<'a> {
    /// Resolves one tokenized line against `isa`. Operands are parsed before
    /// the mnemonic is looked up, so a bad operand is reported even on an
    /// unknown instruction. Registers are then checked against the room the
    /// resolved variant's payload has for them.
    pub fn resolve(isa: &'a Isa, line: &Line) -> Result<Self, Located<Error>> {
        let operands = line
            .operands
            .iter()
            .map(|tk| tk.transfer(*tk.get()).map_result(Operand::parse))
            .map(|res| res.map(Located::value))
            .collect::<Result<Vec<_>, _>>()?;

        let idef = isa
            .lookup(line.mnemonic.get(), operands.len())
            .map_err(|err| line.mnemonic.transfer(Error::from(err)))?;

        if let Some(position) = idef.layout.misfit_register(&operands) {
            let tk = &line.operands[position];
            return Err(tk.transfer(Error::InvalidOperand(
                (*tk.get()).to_owned(),
                "register index does not fit its field",
            )));
        }

        Ok(Expression::new(idef, operands))
    }
}
