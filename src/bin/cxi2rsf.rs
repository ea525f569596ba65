use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command, value_parser};
use indoc::indoc;
use log::{LevelFilter, info};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use cxi2rsf::{ConverterSettings, CxiHeader, RsfDescriptor, RsfOutput};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::exit;

struct Cxi2Rsf {
    input: PathBuf,
    /// `None` writes to stdout.
    output: Option<PathBuf>,
    settings: ConverterSettings,
    verbosity_level: Option<LevelFilter>,
}

impl Cxi2Rsf {
    pub fn from_cli_matches(matches: &ArgMatches) -> Result<Self> {
        let input = matches
            .get_one::<PathBuf>("INPUT")
            .context("Missing INPUT argument")?
            .clone();

        let output = match matches.get_one::<String>("OUTPUT").map(String::as_str) {
            Some("-") => None,
            Some(path) => Some(PathBuf::from(path)),
            None => anyhow::bail!("Missing OUTPUT argument"),
        };

        let verbosity_level = match matches.get_count("verbose") {
            0 => None,
            1 => Some(LevelFilter::Info),
            2 => Some(LevelFilter::Debug),
            3 => Some(LevelFilter::Trace),
            _ => {
                eprintln!("using more than -vvv does not affect verbosity level");
                Some(LevelFilter::Trace)
            }
        };

        Ok(Cxi2Rsf {
            input,
            output,
            settings: ConverterSettings::default(),
            verbosity_level,
        })
    }

    pub fn run(&self) -> Result<()> {
        self.try_to_initialize_logging();

        // The whole header is read and decoded before the output is created, so a bad input
        // never leaves a truncated RSF behind.
        let file = File::open(&self.input)
            .with_context(|| format!("Failed to open input file {}", self.input.display()))?;
        let buf = CxiHeader::read_from(file)
            .with_context(|| format!("Invalid CXI file {}", self.input.display()))?;
        let descriptor = CxiHeader::from_buffer(&buf)?.decode(&self.settings);

        info!(
            "Decoded {:?} ({})",
            descriptor.basic_info.title, descriptor.basic_info.product_code
        );

        match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file {}", path.display()))?;
                self.emit(BufWriter::new(file), &descriptor)
                    .with_context(|| format!("Failed to write {}", path.display()))
            }
            None => self
                .emit(io::stdout().lock(), &descriptor)
                .context("Failed to write to stdout"),
        }
    }

    fn emit<W: Write>(&self, writer: W, descriptor: &RsfDescriptor) -> Result<()> {
        let mut output = RsfOutput::with_writer(writer, &self.settings);
        output.write_descriptor(descriptor)?;
        Ok(())
    }

    fn try_to_initialize_logging(&self) {
        if let Some(level) = self.verbosity_level {
            // Logs go to stderr, stdout may be carrying the RSF.
            if let Err(e) = TermLogger::init(
                level,
                Config::default(),
                TerminalMode::Stderr,
                ColorChoice::Auto,
            ) {
                eprintln!("Failed to initialize logging: {}", e);
            }
        }
    }
}

fn command() -> Command {
    Command::new("cxi2rsf")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate an RSF project specification from a CXI header")
        .long_about(indoc!(
            r#"
            Generate an RSF project specification from a CXI header.

            Reads the NCCH header and extended header (the first 0x600 bytes) of INPUT and
            writes a complete, editable RSF for `makerom` to OUTPUT. Permissions and fields
            the title does not use are written commented out.

            Use `-` as OUTPUT to write to stdout.
        "#
        ))
        .arg(
            Arg::new("INPUT")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("CXI file to read."),
        )
        .arg(
            Arg::new("OUTPUT")
                .required(true)
                .help("RSF file to create (`-` for stdout)."),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .action(ArgAction::Count)
                .help("-v - info, -vv - debug, -vvv - trace."),
        )
}

fn main() {
    let matches = command().get_matches();

    let result = Cxi2Rsf::from_cli_matches(&matches).and_then(|app| app.run());

    if let Err(e) = result {
        eprintln!("{:?}", e);
        exit(1);
    }
}
