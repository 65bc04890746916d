use std::path::PathBuf;

/// Extensions accepted for assembler source files.
pub const SOURCE_EXTS: &[&str] = &["z", "zasm"];
pub const GOLDEN_EXT: &str = "hex";
pub const DEFAULT_OUTPUT_NAME: &str = "output.bin";

pub fn default_suite_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("asm")
}
