pub mod disasm;
pub mod model;
pub mod phases;

pub use phases::types::Error;

use crate::spec::{isa::Isa, types::hw::Byte};
use model::Expression;
use phases::{
    generate,
    tokenize::Line,
    types::Located,
    Emitter,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    /// Pad the output with zeros up to this many bytes, failing if it is
    /// already longer. `None` and `Some(0)` leave the output as is.
    pub binary_size: Option<usize>,
}

impl Config {
    pub fn with_binary_size(binary_size: usize) -> Self {
        Config {
            binary_size: Some(binary_size),
        }
    }
}

/// Point generation errors at the operand they are about, if there is one.
fn locate_generate_error(line: &Line, err: generate::Error) -> Located<generate::Error> {
    let loc = match &err {
        generate::Error::OperandKindMismatch { position, .. }
        | generate::Error::RegisterOutOfRange { position, .. } => line
            .operands
            .get(*position)
            .and_then(|tk| tk.loc())
            .or_else(|| line.mnemonic.loc()),
        generate::Error::ArityMismatch { .. } | generate::Error::Unencodable(_) => {
            line.mnemonic.loc()
        }
    };

    match loc {
        Some(loc) => Located::with_loc(loc, err),
        None => Located::from(err),
    }
}

fn assemble_line(isa: &Isa, emitter: &mut Emitter, line: &Line) -> Result<(), Error> {
    let expr = Expression::resolve(isa, line)?;
    emitter
        .emit(&expr)
        .map_err(|err| locate_generate_error(line, err))?;
    Ok(())
}

/// Assembles `source` against `isa`, one line at a time and in order,
/// stopping at the first error.
pub fn assemble_with(isa: &Isa, source: &str, config: Config) -> Result<Vec<Byte>, Error> {
    let mut emitter = Emitter::new();
    let mut statements = 0;
    for line in phases::tokenize(source) {
        assemble_line(isa, &mut emitter, &line)?;
        statements += 1;
    }

    log::info!(
        "assembled {} statement(s) into {} byte(s)",
        statements,
        emitter.len()
    );

    Ok(emitter.finish(config.binary_size)?)
}

/// Assembles `source` against the standard instruction set, without padding.
pub fn assemble(source: &str) -> Result<Vec<Byte>, Error> {
    assemble_with(Isa::get(), source, Config::default())
}
