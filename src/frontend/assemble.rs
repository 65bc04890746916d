use crate::assembler::{self, Config};
use crate::assets;
use crate::spec::{isa::Isa, types::hw::Byte};
use itertools::Itertools;
use std::fmt::Display;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum Error {
    MissingSource(PathBuf),
    BadExtension(PathBuf),
    Io(PathBuf, std::io::Error),
    Assembly(assembler::Error),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MissingSource(path) => write!(f, "No such source file: '{}'", path.display()),
            Error::BadExtension(path) => write!(
                f,
                "Source file '{}' must have one of the extensions: {}",
                path.display(),
                assets::SOURCE_EXTS
                    .iter()
                    .map(|ext| format!(".{}", ext))
                    .join(", ")
            ),
            Error::Io(path, err) => write!(f, "Could not read '{}': {}", path.display(), err),
            Error::Assembly(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for Error {}

impl From<assembler::Error> for Error {
    fn from(err: assembler::Error) -> Self {
        Error::Assembly(err)
    }
}

pub fn has_source_ext(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| assets::SOURCE_EXTS.contains(&ext))
}

pub fn check_source_path(path: &Path) -> Result<(), Error> {
    if !path.is_file() {
        return Err(Error::MissingSource(path.to_owned()));
    }

    if !has_source_ext(path) {
        return Err(Error::BadExtension(path.to_owned()));
    }

    Ok(())
}

/// `output.bin`, alongside the source file.
pub fn default_output_path(src: &Path) -> PathBuf {
    src.parent()
        .unwrap_or_else(|| Path::new(""))
        .join(assets::DEFAULT_OUTPUT_NAME)
}

pub fn assemble_path(path: &Path, config: Config) -> Result<Vec<Byte>, Error> {
    check_source_path(path)?;
    let prog_src = std::fs::read_to_string(path).map_err(|err| Error::Io(path.to_owned(), err))?;
    log::debug!("assembling '{}'", path.display());
    Ok(assembler::assemble_with(Isa::get(), &prog_src, config)?)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;

    fn scratch_file(name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("zasm-frontend-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn source_extensions() {
        assert!(has_source_ext(Path::new("prog.zasm")));
        assert!(has_source_ext(Path::new("dir/prog.z")));
        assert!(!has_source_ext(Path::new("prog.asm")));
        assert!(!has_source_ext(Path::new("prog")));
        assert!(!has_source_ext(Path::new("prog.zasm.bak")));
    }

    #[test]
    fn default_output_next_to_source() {
        assert_eq!(
            default_output_path(Path::new("progs/blink.zasm")),
            PathBuf::from("progs/output.bin")
        );
        assert_eq!(
            default_output_path(Path::new("blink.zasm")),
            PathBuf::from("output.bin")
        );
    }

    #[test]
    fn assembles_file() {
        let path = scratch_file("ok.zasm", "MV R1, 0x09\nHLT\n");
        assert_eq!(
            assemble_path(&path, Config::with_binary_size(6)).unwrap(),
            vec![0x12, 0xC1, 0x09, 0xFF, 0x00, 0x00]
        );
    }

    #[test]
    fn rejects_bad_paths() {
        let path = scratch_file("prog.txt", "HLT\n");
        assert!(matches!(
            assemble_path(&path, Config::default()),
            Err(Error::BadExtension(_))
        ));
        assert!(matches!(
            assemble_path(Path::new("definitely/missing.zasm"), Config::default()),
            Err(Error::MissingSource(_))
        ));
    }

    #[test]
    fn surfaces_assembly_errors() {
        let path = scratch_file("bad.zasm", "HLT\nFOO R1\n");
        assert!(matches!(
            assemble_path(&path, Config::default()),
            Err(Error::Assembly(assembler::Error::Parse(_)))
        ));
    }
}
