use crate::assembler::Config;
use crate::assets;
use crate::frontend::{
    assemble,
    image::{self, ImageFormat},
};
use crate::spec::types::hw::Byte;
use ansi_term::Color::{Green, Red};
use anyhow::Context;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// A source program and the golden image it must assemble to.
struct Unit {
    name: OsString,
    src: PathBuf,
    golden: PathBuf,
}

enum Outcome {
    Pass(usize),
    AssemblyError(String),
    MissingGolden(String),
    /// First differing offset, then the assembled and expected lengths.
    Mismatch(usize, usize, usize),
}

impl Unit {
    fn run(&self) -> Outcome {
        let actual = match assemble::assemble_path(&self.src, Config::default()) {
            Ok(bytes) => bytes,
            Err(err) => return Outcome::AssemblyError(err.to_string()),
        };

        let expected = match std::fs::read(&self.golden)
            .map_err(|err| err.to_string())
            .and_then(|data| image::parse(&data, ImageFormat::Hex).map_err(|err| err.to_string()))
        {
            Ok(bytes) => bytes,
            Err(err) => return Outcome::MissingGolden(err),
        };

        match first_difference(&actual, &expected) {
            None => Outcome::Pass(actual.len()),
            Some(offset) => Outcome::Mismatch(offset, actual.len(), expected.len()),
        }
    }
}

fn first_difference(a: &[Byte], b: &[Byte]) -> Option<usize> {
    a.iter()
        .zip(b.iter())
        .position(|(x, y)| x != y)
        .or_else(|| if a.len() != b.len() { Some(a.len().min(b.len())) } else { None })
}

fn find_units(suite_dir: &Path) -> anyhow::Result<Vec<Unit>> {
    let mut units = Vec::new();
    let entries = suite_dir
        .read_dir()
        .with_context(|| format!("could not list suite directory '{}'", suite_dir.display()))?;

    for entry in entries {
        let path = entry?.path();
        if !path.is_file() || !assemble::has_source_ext(&path) {
            continue;
        }

        if let Some(name) = path.file_stem() {
            units.push(Unit {
                name: name.to_owned(),
                golden: path.with_extension(assets::GOLDEN_EXT),
                src: path.clone(),
            });
        }
    }

    units.sort_unstable_by(|unit1, unit2| unit1.name.cmp(&unit2.name));
    Ok(units)
}

/// Assembles every source file in `suite_dir` and compares it with the
/// `.hex` image beside it, printing one line per unit. Returns whether all
/// of them passed.
pub fn run_suite(suite_dir: &Path, only_this: Option<&OsStr>) -> anyhow::Result<bool> {
    let mut units = find_units(suite_dir)?;
    if let Some(only_this) = only_this {
        units.retain(|unit| unit.name.as_os_str() == only_this);
        if units.is_empty() {
            anyhow::bail!(
                "no unit named '{}' in '{}'",
                only_this.to_string_lossy(),
                suite_dir.display()
            );
        }
    }

    Ok(run_units(&suite_dir.display().to_string(), &units))
}

fn run_units(name: &str, units: &[Unit]) -> bool {
    let name_pad = units.iter().map(|unit| unit.name.len()).max().unwrap_or(0);

    println!("Running suite: '{}' ({} units)", name, units.len());
    println!("{:-<line_len$}", "", line_len = name_pad + 45);

    let passes = units
        .iter()
        .enumerate()
        .filter(|(num, unit)| run_unit(unit, num + 1, name_pad))
        .count();
    let success = passes == units.len();

    println!("{:-<line_len$}", "", line_len = name_pad + 45);
    println!(
        "Suite Result: {}, {}/{} passes",
        if success {
            Green.bold().paint("SUCCESS")
        } else {
            Red.bold().paint("FAILED")
        },
        passes,
        units.len()
    );

    success
}

fn run_unit(unit: &Unit, num: usize, name_pad: usize) -> bool {
    let (success, msg) = match unit.run() {
        Outcome::Pass(len) => (true, format!("{} {: >5} byte(s)", Green.bold().paint("PASS"), len)),
        Outcome::AssemblyError(err) => (
            false,
            format!(
                "{}:\n\t{}",
                Red.bold().paint("FAIL: ASSEMBLY ERROR"),
                err.replace("\n", "\n\t")
            ),
        ),
        Outcome::MissingGolden(err) => (
            false,
            format!("{}: {}", Red.bold().paint("FAIL: NO GOLDEN IMAGE"), err),
        ),
        Outcome::Mismatch(offset, actual, expected) => (
            false,
            format!(
                "{} at offset {:#06X} ({} byte(s), expected {})",
                Red.bold().paint("FAIL: MISMATCH"),
                offset,
                actual,
                expected
            ),
        ),
    };

    println!(
        "  {: >3}. {: <name_pad$}  {}",
        num,
        unit.name.to_string_lossy(),
        msg,
        name_pad = name_pad
    );
    success
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn differences() {
        assert_eq!(first_difference(&[1, 2, 3], &[1, 2, 3]), None);
        assert_eq!(first_difference(&[1, 2, 3], &[1, 9, 3]), Some(1));
        assert_eq!(first_difference(&[1, 2], &[1, 2, 0]), Some(2));
        assert_eq!(first_difference(&[], &[]), None);
    }
}
