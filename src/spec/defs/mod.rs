pub mod inst;
pub mod opcode;
