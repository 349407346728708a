//! conver CLI: convert Word documents from the command line.

// CLI-specific lint allowances (CLI binary, not library)
#![allow(missing_docs)]
#![allow(clippy::print_stdout)] // CLI must print to stdout
#![allow(clippy::print_stderr)] // CLI must print to stderr
#![allow(clippy::exit)] // CLI uses exit codes

use clap::{ArgGroup, Parser};
use conver::driver::Driver;
use conver::{
    convert_batch_with_driver, convert_with_driver, ConversionRequest, ConvertError,
    DocumentFormat,
};
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
// One flag per target format, matching the historical CLI surface.
#[allow(clippy::struct_excessive_bools)]
#[command(name = "conver", version, about = "Convert Word documents.")]
#[command(group(
    ArgGroup::new("target").args(["pdf", "docx", "doc", "rtf", "odt", "txt", "html"])
))]
struct Cli {
    /// Input document(s).
    #[arg(value_name = "INPUT", required = true)]
    inputs: Vec<PathBuf>,

    /// Output file or directory (for multiple inputs).
    #[arg(short = 'o', long, conflicts_with = "target")]
    output: Option<PathBuf>,

    /// Convert to PDF (default).
    #[arg(short = 'p', long)]
    pdf: bool,

    /// Convert to DOCX.
    #[arg(short = 'd', long)]
    docx: bool,

    /// Convert to DOC.
    #[arg(long)]
    doc: bool,

    /// Convert to RTF.
    #[arg(short = 'r', long)]
    rtf: bool,

    /// Convert to ODT.
    #[arg(long)]
    odt: bool,

    /// Convert to TXT.
    #[arg(short = 't', long)]
    txt: bool,

    /// Convert to HTML.
    #[arg(long)]
    html: bool,

    /// Keep the word-processing application open after conversion.
    #[arg(short = 'k', long)]
    keep_open: bool,
}

impl Cli {
    fn target(&self) -> DocumentFormat {
        if self.docx {
            DocumentFormat::Docx
        } else if self.doc {
            DocumentFormat::Doc
        } else if self.rtf {
            DocumentFormat::Rtf
        } else if self.odt {
            DocumentFormat::Odt
        } else if self.txt {
            DocumentFormat::Txt
        } else if self.html {
            DocumentFormat::Html
        } else {
            DocumentFormat::Pdf
        }
    }
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    match run(&cli) {
        Ok(outputs) => {
            for path in outputs {
                println!("{}", path.display());
            }
        }
        Err(err) => {
            let code = exit_code(&err);
            eprintln!("Error: {}", miette::Report::new(err));
            std::process::exit(code);
        }
    }
}

fn run(cli: &Cli) -> Result<Vec<PathBuf>, ConvertError> {
    if cli.inputs.len() > 1 {
        run_batch(cli)
    } else {
        run_single(cli)
    }
}

fn run_single(cli: &Cli) -> Result<Vec<PathBuf>, ConvertError> {
    let input = cli
        .inputs
        .first()
        .ok_or_else(|| ConvertError::invalid_request("no input files specified"))?;
    let output = match &cli.output {
        Some(path) => path.clone(),
        None => input.with_extension(cli.target().extension()),
    };
    let driver = Driver::detect()?;
    convert_with_driver(&driver, input, &output, cli.keep_open).map(|path| vec![path])
}

fn run_batch(cli: &Cli) -> Result<Vec<PathBuf>, ConvertError> {
    let out_dir = match &cli.output {
        Some(dir) => dir.clone(),
        None => infer_common_parent(&cli.inputs).ok_or_else(|| {
            ConvertError::invalid_request(
                "input files are in different directories; specify --output DIRECTORY",
            )
        })?,
    };
    if out_dir.exists() && !out_dir.is_dir() {
        return Err(ConvertError::invalid_request(
            "--output must be a directory for multiple inputs",
        ));
    }
    std::fs::create_dir_all(&out_dir).map_err(|err| {
        ConvertError::invalid_request(format!(
            "cannot create output directory {}: {err}",
            out_dir.display()
        ))
    })?;

    let target = cli.target();
    let requests = cli
        .inputs
        .iter()
        .map(|input| {
            let mut name = input.file_stem().unwrap_or_default().to_os_string();
            name.push(".");
            name.push(target.extension());
            ConversionRequest::build(input, out_dir.join(name), cli.keep_open)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let driver = Driver::detect()?;
    convert_batch_with_driver(&driver, requests)
}

/// Shared parent directory of all inputs, if there is exactly one.
fn infer_common_parent(inputs: &[PathBuf]) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut parents: BTreeSet<PathBuf> = BTreeSet::new();
    for input in inputs {
        let absolute = if input.is_absolute() {
            input.clone()
        } else {
            cwd.join(input)
        };
        parents.insert(absolute.parent()?.to_path_buf());
    }
    if parents.len() == 1 {
        parents.into_iter().next()
    } else {
        None
    }
}

/// Errors exit with their wire code, like the automation scripts do.
fn exit_code(err: &ConvertError) -> i32 {
    let code = err.code();
    if code == 0 {
        1
    } else {
        code
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let ansi = supports_color::on(supports_color::Stream::Stderr).is_some();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .init();
}
