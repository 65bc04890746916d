use super::defs;
use super::types::{
    hw::Byte,
    schema::{InstDef, InstKind},
};
use once_cell::sync::Lazy;
use std::fmt::Display;

static STORAGE: Lazy<Isa> = Lazy::new(Isa::new);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    UnknownInstruction(String, usize),
    UnknownKind(InstKind),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::UnknownInstruction(name, arity) => write!(
                f,
                "No such instruction: '{}' taking {} operand(s)",
                name, arity
            ),
            Error::UnknownKind(kind) => write!(f, "No instruction of kind {} registered", kind),
        }
    }
}

impl std::error::Error for Error {}

/// The instruction set: every registered `InstDef`, in registration order.
/// Immutable once built.
#[derive(Debug)]
pub struct Isa {
    insts: Vec<InstDef>,
}

impl Isa {
    pub fn new() -> Self {
        let mut builder = Builder::new();
        defs::inst::register(&mut builder);
        builder.build()
    }

    /// The process-wide standard instruction set.
    pub fn get() -> &'static Isa {
        Lazy::force(&STORAGE)
    }

    pub fn inst_defs(&self) -> impl Iterator<Item = &InstDef> {
        self.insts.iter()
    }

    /// Finds the first variant registered under exactly `name` which takes
    /// `arity` operands. Never falls back to a variant of a different arity.
    pub fn lookup(&self, name: &str, arity: usize) -> Result<&InstDef, Error> {
        self.insts
            .iter()
            .find(|idef| idef.arity() == arity && idef.name == name)
            .ok_or_else(|| Error::UnknownInstruction(name.to_owned(), arity))
    }

    pub fn lookup_kind(&self, kind: InstKind) -> Result<&InstDef, Error> {
        self.insts
            .iter()
            .find(|idef| idef.kind == kind)
            .ok_or(Error::UnknownKind(kind))
    }

    pub fn with_opcode(&self, opcode: Byte) -> impl Iterator<Item = &InstDef> {
        self.insts.iter().filter(move |idef| idef.opcode == opcode)
    }
}

impl Default for Isa {
    fn default() -> Self {
        Isa::new()
    }
}

pub struct Builder {
    isa: Isa,
}

impl Builder {
    pub fn new() -> Self {
        Builder {
            isa: Isa { insts: Vec::new() },
        }
    }

    pub fn build(self) -> Isa {
        self.isa
    }

    /// Appends `i`. Duplicate (name, arity) pairs are accepted, but only
    /// the first one registered is ever found by `Isa::lookup`.
    pub fn register(&mut self, i: InstDef) {
        log::trace!("registering {} ({:#04X})", i, i.opcode);
        self.isa.insts.push(i);
    }
}

impl Default for Builder {
    fn default() -> Self {
        Builder::new()
    }
}
