pub mod assemble;
pub mod image;
