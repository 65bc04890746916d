use super::hw::{self, Byte};
use bitflags::bitflags;
use derive_more::Display;
use itertools::Itertools;
use std::fmt;
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// The kind of a single, concrete operand. An operand always has exactly one
/// kind; sets of acceptable kinds are expressed with `OperandKinds`.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum OperandKind {
    #[display(fmt = "accumulator")]
    Accumulator,
    #[display(fmt = "register")]
    Register,
    #[display(fmt = "literal")]
    Literal,
}

bitflags! {
    #[derive(Default)]
    pub struct OperandKinds: u8 {
        const ACCUMULATOR = 1 << 0;
        const REGISTER    = 1 << 1;
        const LITERAL     = 1 << 2;
    }
}

impl From<OperandKind> for OperandKinds {
    fn from(kind: OperandKind) -> Self {
        match kind {
            OperandKind::Accumulator => OperandKinds::ACCUMULATOR,
            OperandKind::Register => OperandKinds::REGISTER,
            OperandKind::Literal => OperandKinds::LITERAL,
        }
    }
}

impl OperandKinds {
    pub fn admits(self, kind: OperandKind) -> bool {
        self.contains(kind.into())
    }

    pub fn kinds(self) -> impl Iterator<Item = OperandKind> {
        OperandKind::iter().filter(move |kind| self.admits(*kind))
    }
}

impl fmt::Display for OperandKinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "<none>");
        }
        write!(f, "{}", self.kinds().join("|"))
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum InstKind {
    Nop,
    LoadAccumulator,
    Move,
    Add,
    Subtract,
    Increment,
    Decrement,
    Jump,
    JumpIfZero,
    Input,
    Output,
    Push,
    Pop,
    Halt,
}

/*
    How an instruction lays out its payload (the bytes following the opcode).
    Register indices are packed with `hw::pack_regs`, and the leading two bits
    of the first payload byte (the "form", see `hw::FORM_*`) tell the operand
    shapes apart when one mnemonic accepts several. Every layout but `Push`
    therefore only carries registers which fit a 3-bit field.

        Bare        no payload
        Immediate   [lit]
        MoveUnary   [UNARY + dst]
        Move        src=A: [dst]
                    src=R: [REG + src*8 + dst]
                    src=lit: [LIT + dst, lit]
        Arith       dst=A,src=R: [src]
                    dst=R,src=R: [REG + dst*8 + src]
                    dst=R,src=lit: [LIT + dst, lit]
                    dst=A,src=lit: [lit] (no form of its own)
        Jump        A: [0x00]    R: [LIT + r]
        JumpIfZero  cond=A: [r]    cond=R: [LIT + cond*8 + r]
        Port        [op0 + op1*8]
        Push        [op0]
        Pop         A: [0x00]    R: [LIT + r]
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Bare,
    Immediate,
    MoveUnary,
    Move,
    Arith,
    Jump,
    JumpIfZero,
    Port,
    Push,
    Pop,
}

/// A single instruction variant. Variants sharing a mnemonic are told apart
/// by their arity, which is always the length of `args`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstDef {
    pub kind: InstKind,
    pub name: String,
    pub opcode: Byte,
    pub args: Vec<OperandKinds>,
    pub layout: Layout,
}

impl InstDef {
    pub fn new(
        kind: InstKind,
        name: &str,
        opcode: Byte,
        args: Vec<OperandKinds>,
        layout: Layout,
    ) -> Self {
        assert!(!name.is_empty());
        // A position which accepts nothing could never be satisfied.
        assert!(args.iter().all(|kinds| !kinds.is_empty()));
        assert!(layout.arity_supported(args.len()));

        InstDef {
            kind,
            name: name.to_owned(),
            opcode,
            args,
            layout,
        }
    }

    pub fn with_0(kind: InstKind, name: &str, opcode: Byte) -> Self {
        InstDef::new(kind, name, opcode, vec![], Layout::Bare)
    }

    pub fn with_1(
        kind: InstKind,
        name: &str,
        opcode: Byte,
        arg1: OperandKinds,
        layout: Layout,
    ) -> Self {
        InstDef::new(kind, name, opcode, vec![arg1], layout)
    }

    pub fn with_2(
        kind: InstKind,
        name: &str,
        opcode: Byte,
        arg1: OperandKinds,
        arg2: OperandKinds,
        layout: Layout,
    ) -> Self {
        InstDef::new(kind, name, opcode, vec![arg1, arg2], layout)
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }
}

impl Layout {
    /// The largest register index the payload has room for.
    pub fn max_register(self) -> Byte {
        match self {
            Layout::Push => hw::BYTE_MAX,
            _ => hw::REG_FIELD_MASK,
        }
    }

    pub fn arity_supported(self, arity: usize) -> bool {
        match self {
            Layout::Bare => arity == 0,
            Layout::Immediate | Layout::MoveUnary | Layout::Jump | Layout::Push | Layout::Pop => {
                arity == 1
            }
            Layout::Move | Layout::Arith | Layout::JumpIfZero | Layout::Port => arity == 2,
        }
    }
}

impl fmt::Display for InstDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.args.is_empty() {
            write!(f, " {}", self.args.iter().join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn kinds_membership() {
        let src = OperandKinds::REGISTER | OperandKinds::LITERAL;
        assert!(src.admits(OperandKind::Register));
        assert!(src.admits(OperandKind::Literal));
        assert!(!src.admits(OperandKind::Accumulator));
        assert!(OperandKinds::all().kinds().eq(OperandKind::iter()));
    }

    #[test]
    fn kinds_display() {
        assert_eq!(
            (OperandKinds::ACCUMULATOR | OperandKinds::LITERAL).to_string(),
            "accumulator|literal"
        );
        assert_eq!(OperandKinds::empty().to_string(), "<none>");
    }

    #[test]
    fn def_display_lists_constraints() {
        let def = InstDef::with_2(
            InstKind::Input,
            "IN",
            0x05,
            OperandKinds::REGISTER,
            OperandKinds::REGISTER,
            Layout::Port,
        );
        assert_eq!(def.arity(), 2);
        assert_eq!(def.to_string(), "IN register, register");
    }

    #[test]
    fn register_room() {
        assert_eq!(Layout::Move.max_register(), 7);
        assert_eq!(Layout::Port.max_register(), 7);
        assert_eq!(Layout::Push.max_register(), 0xFF);
    }

    #[test]
    #[should_panic]
    fn def_rejects_layout_arity_disagreement() {
        InstDef::with_1(
            InstKind::Input,
            "IN",
            0x05,
            OperandKinds::REGISTER,
            Layout::Port,
        );
    }
}
