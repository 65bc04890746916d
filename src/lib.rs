pub mod assets;

pub mod spec;

pub mod assembler;

pub mod frontend;

pub mod cli;
