use super::fit;
use crate::assembler::model::{Expression, Operand};
use crate::spec::types::{
    hw::{self, Byte, FORM_LIT, FORM_REG, FORM_UNARY},
    schema::{Layout, OperandKind, OperandKinds},
};
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    ArityMismatch {
        name: String,
        expected: usize,
        actual: usize,
    },
    OperandKindMismatch {
        name: String,
        position: usize,
        provided: OperandKind,
        accepted: OperandKinds,
    },
    RegisterOutOfRange {
        name: String,
        position: usize,
        value: Byte,
        max: Byte,
    },
    /// The operands suit the `InstDef`, but its layout has no encoding for them.
    Unencodable(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::ArityMismatch {
                name,
                expected,
                actual,
            } => write!(
                f,
                "Instruction '{}' takes {} operand(s), but {} were given",
                name, expected, actual
            ),
            Error::OperandKindMismatch {
                name,
                position,
                provided,
                accepted,
            } => write!(
                f,
                "Operand {} of '{}' type mismatch, present type: {}, acceptable type(s): {}",
                position + 1,
                name,
                provided,
                accepted
            ),
            Error::RegisterOutOfRange {
                name,
                position,
                value,
                max,
            } => write!(
                f,
                "Operand {} of '{}' names register {:#04X}, but at most {:#04X} fits",
                position + 1,
                name,
                value,
                max
            ),
            Error::Unencodable(expr) => write!(f, "No encoding exists for '{}'", expr),
        }
    }
}

impl Layout {
    /// The position of the first register in `ops` which is too wide for its field.
    pub fn misfit_register(self, ops: &[Operand]) -> Option<usize> {
        ops.iter()
            .position(|op| op.kind == OperandKind::Register && op.value > self.max_register())
    }

    /// The payload for `ops`, or `None` if this layout defines no encoding
    /// for that combination of operand kinds.
    pub fn encode(self, ops: &[Operand]) -> Option<Vec<Byte>> {
        use OperandKind::*;

        match (self, ops) {
            (Layout::Bare, []) => Some(vec![]),

            (Layout::Immediate, [lit]) => Some(vec![lit.value]),

            (Layout::MoveUnary, [dst]) => Some(vec![FORM_UNARY.wrapping_add(dst.value)]),

            (Layout::Move, [dst, src]) => match src.kind {
                Accumulator => Some(vec![dst.value]),
                Register => Some(vec![hw::pack_regs(FORM_REG, src.value, dst.value)]),
                Literal => Some(vec![FORM_LIT.wrapping_add(dst.value), src.value]),
            },

            (Layout::Arith, [dst, src]) => match (dst.kind, src.kind) {
                (Accumulator, Register) => Some(vec![src.value]),
                (Register, Register) => Some(vec![hw::pack_regs(FORM_REG, dst.value, src.value)]),
                (Register, Literal) => Some(vec![FORM_LIT.wrapping_add(dst.value), src.value]),
                // RUSTFIX the accumulator/literal form has no form bits of its own, so it
                // currently reads back as the accumulator/register one.
                (Accumulator, Literal) => {
                    log::warn!(
                        "accumulator/literal operands encode identically to accumulator/register"
                    );
                    Some(vec![src.value])
                }
                _ => None,
            },

            (Layout::Jump, [target]) | (Layout::Pop, [target]) => match target.kind {
                Accumulator => Some(vec![0x00]),
                Register => Some(vec![FORM_LIT.wrapping_add(target.value)]),
                Literal => None,
            },

            (Layout::JumpIfZero, [cond, target]) => match cond.kind {
                Accumulator => Some(vec![target.value]),
                Register => Some(vec![hw::pack_regs(FORM_LIT, cond.value, target.value)]),
                Literal => None,
            },

            (Layout::Port, [lo, hi]) => Some(vec![hw::pack_regs(0, hi.value, lo.value)]),

            (Layout::Push, [src]) => Some(vec![src.value]),

            _ => None,
        }
    }
}

/// Checks that `expr` has as many operands as its `InstDef` takes, that
/// each one is of a kind accepted at its position, and that its registers
/// fit the payload.
pub fn check(expr: &Expression) -> Result<(), Error> {
    let idef = expr.idef;
    if expr.operands.len() != idef.arity() {
        return Err(Error::ArityMismatch {
            name: idef.name.clone(),
            expected: idef.arity(),
            actual: expr.operands.len(),
        });
    }

    for (position, (op, accepted)) in expr.operands.iter().zip(idef.args.iter()).enumerate() {
        if !accepted.admits(op.kind) {
            return Err(Error::OperandKindMismatch {
                name: idef.name.clone(),
                position,
                provided: op.kind,
                accepted: *accepted,
            });
        }
    }

    if let Some(position) = idef.layout.misfit_register(&expr.operands) {
        return Err(Error::RegisterOutOfRange {
            name: idef.name.clone(),
            position,
            value: expr.operands[position].value,
            max: idef.layout.max_register(),
        });
    }

    Ok(())
}

/// The complete encoding of `expr`: its opcode followed by its payload.
pub fn encode(expr: &Expression) -> Result<Vec<Byte>, Error> {
    check(expr)?;

    let payload = expr
        .idef
        .layout
        .encode(&expr.operands)
        .ok_or_else(|| Error::Unencodable(expr.to_string()))?;

    let mut bytes = vec![expr.idef.opcode];
    bytes.extend(payload);
    Ok(bytes)
}

/// Accumulates the encodings of successive `Expression`s.
#[derive(Debug, Default)]
pub struct Emitter {
    bytes: Vec<Byte>,
}

impl Emitter {
    pub fn new() -> Self {
        Emitter { bytes: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn bytes(&self) -> &[Byte] {
        &self.bytes
    }

    /// Encodes `expr` and appends it, returning the number of bytes appended.
    /// Nothing is appended if `expr` fails to encode.
    pub fn emit(&mut self, expr: &Expression) -> Result<usize, Error> {
        let encoded = encode(expr)?;
        log::debug!("{:#06X}: {} => {:02X?}", self.bytes.len(), expr, encoded);
        self.bytes.extend_from_slice(&encoded);
        Ok(encoded.len())
    }

    pub fn finish(self, binary_size: Option<usize>) -> Result<Vec<Byte>, fit::Error> {
        fit::fit(self.bytes, binary_size)
    }
}
