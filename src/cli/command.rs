use super::suite;
use crate::assembler::{disasm, Config};
use crate::assets;
use crate::frontend::{
    assemble,
    image::{self, ImageFormat},
};
use crate::spec::isa::Isa;
use ansi_term::Color::Red;
use anyhow::{bail, Context};
use std::ffi::OsString;
use std::path::PathBuf;
use structopt::StructOpt;

pub fn terminal_init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    #[cfg(windows)]
    {
        if ansi_term::enable_ansi_support().is_err() {
            log::warn!("could not enable terminal ANSI support");
        }
    }
}

#[derive(StructOpt, Debug)]
#[structopt(name = "zasm")]
pub enum CommandRoot {
    /// Assemble a source file into a binary image
    Asm(SubcommandAsm),
    /// List the instructions in a binary image
    Disasm(SubcommandDisasm),
    /// Check every program in a directory against its golden image
    Suite(SubcommandSuite),
}

#[derive(StructOpt, Debug)]
pub struct SubcommandAsm {
    #[structopt(name = "in.zasm", parse(from_os_str))]
    in_src: PathBuf,

    /// Defaults to `output.bin` next to the source file
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// Zero-pad the image to exactly this many bytes (0 leaves it unpadded)
    #[structopt(short = "s", long)]
    binary_size: Option<usize>,

    /// `hex` or `raw`
    #[structopt(short, long, default_value = "hex")]
    format: ImageFormat,
}

#[derive(StructOpt, Debug)]
pub struct SubcommandDisasm {
    #[structopt(name = "in.bin", parse(from_os_str))]
    in_bin: PathBuf,

    /// `hex` or `raw`
    #[structopt(short, long, default_value = "hex")]
    format: ImageFormat,
}

#[derive(StructOpt, Debug)]
pub struct SubcommandSuite {
    #[structopt(name = "suite_name", parse(from_os_str))]
    suite_name: OsString,

    #[structopt(name = "suite/root/dir", parse(from_os_str))]
    suite_root_dir: Option<PathBuf>,

    #[structopt(long, parse(from_os_str))]
    only: Option<OsString>,
}

pub fn root(cmd: CommandRoot) -> ! {
    let result = match cmd {
        CommandRoot::Asm(scmd) => asm(scmd),
        CommandRoot::Disasm(scmd) => disasm(scmd),
        CommandRoot::Suite(scmd) => suite(scmd),
    };

    if let Err(err) = result {
        eprintln!("{} {:#}", Red.bold().paint("error:"), err);
        std::process::exit(1);
    }

    std::process::exit(0);
}

pub fn asm(cmd: SubcommandAsm) -> anyhow::Result<()> {
    let SubcommandAsm {
        in_src,
        output,
        binary_size,
        format,
    } = cmd;

    let out_bin = assemble::assemble_path(&in_src, Config { binary_size })
        .with_context(|| format!("failed to assemble '{}'", in_src.display()))?;

    let out_name = output.unwrap_or_else(|| assemble::default_output_path(&in_src));
    std::fs::write(&out_name, image::render(&out_bin, format))
        .with_context(|| format!("failed to write '{}'", out_name.display()))?;

    log::info!("wrote {} byte(s) to '{}'", out_bin.len(), out_name.display());
    Ok(())
}

pub fn disasm(cmd: SubcommandDisasm) -> anyhow::Result<()> {
    let data = std::fs::read(&cmd.in_bin)
        .with_context(|| format!("failed to read '{}'", cmd.in_bin.display()))?;
    let bytes = image::parse(&data, cmd.format)
        .with_context(|| format!("'{}' is not a {:?} image", cmd.in_bin.display(), cmd.format))?;
    let insts = disasm::disassemble(Isa::get(), &bytes)
        .with_context(|| format!("failed to disassemble '{}'", cmd.in_bin.display()))?;

    print!("{}", image::listing(&bytes, &insts));
    Ok(())
}

pub fn suite(cmd: SubcommandSuite) -> anyhow::Result<()> {
    let SubcommandSuite {
        suite_name,
        suite_root_dir,
        only,
    } = cmd;

    let root = suite_root_dir.unwrap_or_else(assets::default_suite_dir);
    if !suite::run_suite(&root.join(&suite_name), only.as_deref())? {
        bail!("suite '{}' failed", suite_name.to_string_lossy());
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("zasm-cli-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn asm_cmd(in_src: &Path, output: Option<PathBuf>, format: ImageFormat) -> SubcommandAsm {
        SubcommandAsm {
            in_src: in_src.to_owned(),
            output,
            binary_size: Some(4),
            format,
        }
    }

    #[test]
    fn asm_writes_image_next_to_source() {
        let dir = scratch_dir("ok");
        let src = dir.join("prog.zasm");
        fs::write(&src, "MV R1, R2\nHLT\n").unwrap();

        asm(asm_cmd(&src, None, ImageFormat::Hex)).unwrap();
        assert_eq!(fs::read(dir.join("output.bin")).unwrap(), b"12\n91\nff\n00\n".to_vec());

        let raw = dir.join("prog.raw");
        asm(asm_cmd(&src, Some(raw.clone()), ImageFormat::Raw)).unwrap();
        assert_eq!(fs::read(raw).unwrap(), vec![0x12, 0x91, 0xFF, 0x00]);
    }

    #[test]
    fn asm_writes_nothing_on_failure() {
        let dir = scratch_dir("bad");
        let src = dir.join("prog.zasm");
        fs::write(&src, "HLT\nMV R1, R8\n").unwrap();

        assert!(asm(asm_cmd(&src, None, ImageFormat::Hex)).is_err());
        assert!(!dir.join("output.bin").exists());

        // Too large for the requested binary size.
        fs::write(&src, "MV R1, 0x09\nMV R2, 0x0A\n").unwrap();
        assert!(asm(asm_cmd(&src, None, ImageFormat::Hex)).is_err());
        assert!(!dir.join("output.bin").exists());
    }

    #[test]
    fn asm_rejects_foreign_extension() {
        let dir = scratch_dir("ext");
        let src = dir.join("prog.asm");
        fs::write(&src, "HLT\n").unwrap();

        let err = asm(asm_cmd(&src, None, ImageFormat::Hex)).unwrap_err();
        assert!(format!("{:#}", err).contains("must have one of the extensions: .z, .zasm"));
        assert!(!dir.join("output.bin").exists());
    }
}
