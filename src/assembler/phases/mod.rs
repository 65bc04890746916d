pub mod types;

pub mod fit;
pub mod generate;
pub mod parse;
pub mod tokenize;

pub use fit::fit;
pub use generate::Emitter;
pub use tokenize::tokenize;
