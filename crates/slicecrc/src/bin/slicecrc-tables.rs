//! Slicing table generator.
//!
//! Usage:
//!   cargo run -p slicecrc --features cli --bin slicecrc-tables -- --width 16 --output crc_tables.mem
//!   cargo run -p slicecrc --features cli --bin slicecrc-tables -- --poly 0x1EDC6F41 --width 8
//!
//! Tables are generated before the output file is opened, so a bad
//! `--width` or `--poly` leaves an existing file untouched.

use std::{
  env,
  fs::File,
  io::{self, BufWriter},
  path::PathBuf,
  process::ExitCode,
};

use slicecrc::{PolynomialSpec, TableSet};
use tracing_subscriber::EnvFilter;

/// CLI arguments.
#[derive(Debug)]
struct Args {
  /// Generator polynomial.
  poly: u32,

  /// Bit-reverse the polynomial before generating (CRC-32 convention).
  reflect: bool,

  /// Number of tables.
  width: usize,

  /// Output file; stdout when absent.
  output: Option<PathBuf>,

  /// Show help.
  help: bool,
}

impl Default for Args {
  fn default() -> Self {
    Self {
      poly: PolynomialSpec::CRC32.value,
      reflect: true,
      width: 16,
      output: None,
      help: false,
    }
  }
}

fn parse_poly(value: &str) -> Result<u32, String> {
  let digits = value
    .strip_prefix("0x")
    .or_else(|| value.strip_prefix("0X"))
    .unwrap_or(value)
    .replace('_', "");
  u32::from_str_radix(&digits, 16).map_err(|_| format!("Invalid polynomial: {value}"))
}

fn parse_args(args: impl Iterator<Item = String>) -> Result<Args, String> {
  let mut parsed = Args::default();
  let mut iter = args;

  while let Some(arg) = iter.next() {
    match arg.as_str() {
      "--help" | "-h" => parsed.help = true,
      "--no-reflect" => parsed.reflect = false,
      "--poly" | "-p" => {
        let value = iter.next().ok_or("--poly requires a value")?;
        parsed.poly = parse_poly(&value)?;
      }
      "--width" | "-n" => {
        let value = iter.next().ok_or("--width requires a value")?;
        parsed.width = value.parse().map_err(|_| format!("Invalid width: {value}"))?;
      }
      "--output" | "-o" => {
        let value = iter.next().ok_or("--output requires a value")?;
        parsed.output = Some(PathBuf::from(value));
      }
      other => return Err(format!("Unknown argument: {other}")),
    }
  }

  Ok(parsed)
}

fn print_help() {
  eprintln!(
    "\
slicecrc-tables: generate slicing-by-N CRC lookup tables

USAGE:
    slicecrc-tables [OPTIONS]

OPTIONS:
    -p, --poly HEX        Generator polynomial (default: 0x04C11DB7)
    -n, --width N         Number of tables, 1..=64 (default: 16)
        --no-reflect      Use the polynomial as given (already LSB-first)
    -o, --output PATH     Write to PATH instead of stdout
    -h, --help            Show this help message

OUTPUT:
    One line per table, 256 space-separated 8-digit lowercase hex entries.

    Set RUST_LOG=slicecrc_tables=debug for more detail.
"
  );
}

fn run(args: &Args) -> Result<(), String> {
  let polynomial = PolynomialSpec {
    value: args.poly,
    reflected: args.reflect,
  };

  let tables = TableSet::generate(polynomial, args.width).map_err(|err| err.to_string())?;

  match &args.output {
    Some(path) => {
      let file = File::create(path).map_err(|err| format!("{}: {err}", path.display()))?;
      tables
        .write_mem(BufWriter::new(file))
        .map_err(|err| format!("{}: {err}", path.display()))?;
    }
    None => tables
      .write_mem(io::stdout().lock())
      .map_err(|err| format!("failed to write tables: {err}"))?,
  }

  tracing::info!(
    polynomial = format_args!("{:#010x}", polynomial.value),
    effective = format_args!("{:#010x}", polynomial.effective()),
    width = tables.width(),
    output = %args.output.as_ref().map_or_else(|| "<stdout>".into(), |p| p.display().to_string()),
    "wrote slicing tables"
  );
  Ok(())
}

fn main() -> ExitCode {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "slicecrc=info,slicecrc_tables=info".into()))
    .init();

  let args = match parse_args(env::args().skip(1)) {
    Ok(args) => args,
    Err(msg) => {
      eprintln!("Error: {msg}");
      eprintln!("Run with --help for usage information.");
      return ExitCode::FAILURE;
    }
  };

  if args.help {
    print_help();
    return ExitCode::SUCCESS;
  }

  match run(&args) {
    Ok(()) => ExitCode::SUCCESS,
    Err(msg) => {
      tracing::error!("{msg}");
      ExitCode::FAILURE
    }
  }
}
