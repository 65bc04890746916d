use super::model::{Expression, Operand};
use crate::spec::{
    isa::Isa,
    types::{
        hw::{self, Byte, FORM_ACC, FORM_LIT, FORM_REG, FORM_UNARY},
        schema::Layout,
    },
};
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    InvalidOpcode(usize, Byte),
    MalformedPayload(usize, String),
    UnexpectedEndOfStream(usize),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidOpcode(offset, raw) => {
                write!(f, "Invalid opcode {:#04X} at offset {:#06X}", raw, offset)
            }
            Error::MalformedPayload(offset, name) => write!(
                f,
                "Payload of '{}' at offset {:#06X} matches none of its forms",
                name, offset
            ),
            Error::UnexpectedEndOfStream(offset) => write!(
                f,
                "Unexpectedly encountered end of stream decoding the instruction at offset {:#06X}",
                offset
            ),
        }
    }
}

impl std::error::Error for Error {}

impl Layout {
    /// How many payload bytes follow the opcode, given the first of them.
    fn payload_len(self, first: Byte) -> usize {
        match self {
            Layout::Bare => 0,
            Layout::Move | Layout::Arith if hw::form_of(first) == FORM_LIT => 2,
            _ => 1,
        }
    }

    /// Recovers the operands `encode` was given, where the payload allows it.
    /// Registers too wide to have been encoded by this layout are refused.
    pub fn decode(self, payload: &[Byte]) -> Option<Vec<Operand>> {
        self.decode_fields(payload)
            .filter(|ops| self.misfit_register(ops).is_none())
    }

    fn decode_fields(self, payload: &[Byte]) -> Option<Vec<Operand>> {
        let reg = Operand::reg;
        let lit = Operand::lit;
        let acc = Operand::ACC;

        match (self, payload) {
            (Layout::Bare, []) => Some(vec![]),

            (Layout::Immediate, [b]) => Some(vec![lit(*b)]),

            (Layout::MoveUnary, [b]) if hw::form_of(*b) == FORM_UNARY => {
                Some(vec![reg(hw::form_body(*b))])
            }

            (Layout::Move, [b]) => match hw::form_of(*b) {
                FORM_ACC => Some(vec![reg(*b), acc]),
                FORM_REG => {
                    let (src, dst) = hw::unpack_regs(*b);
                    Some(vec![reg(dst), reg(src)])
                }
                _ => None,
            },
            (Layout::Move, [b, val]) if hw::form_of(*b) == FORM_LIT => {
                Some(vec![reg(hw::form_body(*b)), lit(*val)])
            }

            (Layout::Arith, [b]) => match hw::form_of(*b) {
                FORM_ACC => Some(vec![acc, reg(*b)]),
                FORM_REG => {
                    let (dst, src) = hw::unpack_regs(*b);
                    Some(vec![reg(dst), reg(src)])
                }
                _ => None,
            },
            (Layout::Arith, [b, val]) if hw::form_of(*b) == FORM_LIT => {
                Some(vec![reg(hw::form_body(*b)), lit(*val)])
            }

            (Layout::Jump, [0]) | (Layout::Pop, [0]) => Some(vec![acc]),
            (Layout::Jump, [b]) | (Layout::Pop, [b]) if hw::form_of(*b) == FORM_LIT => {
                Some(vec![reg(hw::form_body(*b))])
            }

            (Layout::JumpIfZero, [b]) if hw::form_of(*b) == FORM_LIT => {
                let (cond, target) = hw::unpack_regs(*b);
                Some(vec![reg(cond), reg(target)])
            }
            (Layout::JumpIfZero, [b]) => Some(vec![acc, reg(*b)]),

            (Layout::Port, [b]) => Some(vec![
                reg(*b & hw::REG_FIELD_MASK),
                reg(*b >> hw::REG_FIELD_WIDTH),
            ]),

            // `PUSH A` and `PUSH R0` share an encoding.
            (Layout::Push, [0]) => Some(vec![acc]),
            (Layout::Push, [b]) => Some(vec![reg(*b)]),

            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disassembled<'a> {
    pub offset: usize,
    pub expr: Expression<'a>,
    pub len: usize,
}

impl<'a> Display for Disassembled<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.expr)
    }
}

/// Decodes the single instruction starting at `offset`. Variants sharing an
/// opcode are tried in registration order, and the first whose layout
/// accepts the payload wins.
pub fn disassemble_one<'a>(
    isa: &'a Isa,
    bytes: &[Byte],
    offset: usize,
) -> Result<Disassembled<'a>, Error> {
    let opcode = *bytes
        .get(offset)
        .ok_or(Error::UnexpectedEndOfStream(offset))?;
    let mut candidates = isa.with_opcode(opcode).peekable();
    let first_name = candidates
        .peek()
        .map(|idef| idef.name.clone())
        .ok_or(Error::InvalidOpcode(offset, opcode))?;

    let start = offset + 1;
    for idef in candidates {
        let needed = match idef.layout {
            Layout::Bare => 0,
            layout => {
                let first = *bytes
                    .get(start)
                    .ok_or(Error::UnexpectedEndOfStream(offset))?;
                layout.payload_len(first)
            }
        };

        let payload = bytes
            .get(start..start + needed)
            .ok_or(Error::UnexpectedEndOfStream(offset))?;

        if let Some(operands) = idef.layout.decode(payload) {
            return Ok(Disassembled {
                offset,
                expr: Expression::new(idef, operands),
                len: 1 + needed,
            });
        }
    }

    Err(Error::MalformedPayload(offset, first_name))
}

pub fn disassemble<'a>(isa: &'a Isa, bytes: &[Byte]) -> Result<Vec<Disassembled<'a>>, Error> {
    let mut insts = Vec::new();
    let mut offset = 0;
    while offset < bytes.len() {
        let inst = disassemble_one(isa, bytes, offset)?;
        offset += inst.len;
        insts.push(inst);
    }
    Ok(insts)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::assembler::{self, phases::generate};

    fn roundtrip(src: &str) {
        let isa = Isa::get();
        let bytes = assembler::assemble(src).unwrap();
        let insts = disassemble(isa, &bytes).unwrap();
        assert_eq!(insts.len(), 1, "{}", src);
        assert_eq!(insts[0].to_string(), src);
        assert_eq!(generate::encode(&insts[0].expr).unwrap(), bytes);
    }

    #[test]
    fn decodes_every_form() {
        for src in &[
            "NOP",
            "LDA 0x42",
            "MV R3",
            "MV R5, A",
            "MV R1, R2",
            "MV R4, 0xAB",
            "ADD A, R5",
            "ADD R3, R2",
            "ADD R2, 0x10",
            "SUB A, R7",
            "SUB R0, R1",
            "SUB R6, 0xFF",
            "INC",
            "DEC",
            "JMP A",
            "JMP R6",
            "JFZ A, R4",
            "JFZ R2, R4",
            "IN R1, R2",
            "OUT R7, R0",
            "PUSH A",
            "PUSH R3",
            "POP A",
            "POP R3",
            "HLT",
        ] {
            roundtrip(src);
        }
    }

    #[test]
    fn decodes_stream() {
        let isa = Isa::get();
        let insts = disassemble(isa, &[0x12, 0xC1, 0x09, 0x85, 0xFF, 0x00, 0x00]).unwrap();
        let offsets = insts.iter().map(|i| i.offset).collect::<Vec<_>>();
        assert_eq!(offsets, vec![0, 3, 4, 5, 6]);
        assert_eq!(insts[0].to_string(), "MV R1, 0x09");
        assert_eq!(insts[3].to_string(), "NOP");
    }

    #[test]
    fn push_r0_reads_back_as_accumulator() {
        let insts = disassemble(Isa::get(), &[0x09, 0x00]).unwrap();
        assert_eq!(insts[0].to_string(), "PUSH A");
    }

    #[test]
    fn invalid_opcode() {
        assert_eq!(
            disassemble(Isa::get(), &[0xFF, 0x42]),
            Err(Error::InvalidOpcode(1, 0x42))
        );
    }

    #[test]
    fn truncated() {
        assert_eq!(
            disassemble(Isa::get(), &[0x01]),
            Err(Error::UnexpectedEndOfStream(0))
        );
        assert_eq!(
            disassemble(Isa::get(), &[0x00, 0x12, 0xC1]),
            Err(Error::UnexpectedEndOfStream(1))
        );
    }

    #[test]
    fn malformed() {
        // 0b01 is not a form of the two-operand ADD.
        assert_eq!(
            disassemble(Isa::get(), &[0x13, 0x41]),
            Err(Error::MalformedPayload(0, "ADD".to_owned()))
        );
        assert_eq!(
            disassemble(Isa::get(), &[0x07, 0x81]),
            Err(Error::MalformedPayload(0, "JMP".to_owned()))
        );
    }

    #[test]
    fn wide_registers_are_malformed() {
        // Would read as `MV R3F, A`.
        assert_eq!(
            disassemble(Isa::get(), &[0x12, 0x3F]),
            Err(Error::MalformedPayload(0, "MV".to_owned()))
        );
        assert_eq!(
            disassemble(Isa::get(), &[0x0A, 0xC8]),
            Err(Error::MalformedPayload(0, "POP".to_owned()))
        );
        assert_eq!(
            disassemble(Isa::get(), &[0x09, 0x42]).unwrap()[0].to_string(),
            "PUSH R42"
        );
    }
}
