use crate::spec::types::{
    hw::Byte,
    schema::{InstDef, OperandKind},
};
use derive_more::Constructor;
use itertools::Itertools;
use std::fmt::Display;

/*
    The assembler works on two small structures:

        1.  `Operand`s: a single parsed operand token, with exactly one `OperandKind`
            and a byte-sized value (always 0 for the accumulator).

        2.  `Expression`s: a resolved `InstDef` together with the operands it was
            written with. An `Expression` borrows its `InstDef` from the `Isa` which
            owns it, and lives only as long as it takes to encode one source line.

    Whether the operands of an `Expression` actually suit its `InstDef` is only
    decided when it is encoded (see `phases::generate`), so an `Expression` may
    be built directly against any `InstDef`.
*/

#[derive(Debug, Clone, Copy, PartialEq, Eq, Constructor)]
pub struct Operand {
    pub kind: OperandKind,
    pub value: Byte,
}

#[derive(Debug, Clone, PartialEq, Eq, Constructor)]
pub struct Expression<'a> {
    pub idef: &'a InstDef,
    pub operands: Vec<Operand>,
}

impl Operand {
    pub const ACC: Operand = Operand {
        kind: OperandKind::Accumulator,
        value: 0,
    };

    pub fn reg(idx: Byte) -> Self {
        Operand::new(OperandKind::Register, idx)
    }

    pub fn lit(val: Byte) -> Self {
        Operand::new(OperandKind::Literal, val)
    }
}

impl Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            OperandKind::Accumulator => write!(f, "A"),
            OperandKind::Register => write!(f, "R{:X}", self.value),
            OperandKind::Literal => write!(f, "{:#04X}", self.value),
        }
    }
}

impl<'a> Display for Expression<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.idef.name)?;
        if !self.operands.is_empty() {
            write!(f, " {}", self.operands.iter().join(", "))?;
        }
        Ok(())
    }
}
