// Command-line front end for the shrinker.
//
// Two transform subcommands (`shrink`, `unshrink`) plus `inspect` and
// `config`. The transform itself is in-memory; this layer only moves bytes
// between files/stdio and the codec.

use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::codec::TransformStats;
use crate::filter::{
    self, DELTA_ESCAPE, LARGE_RUN_MARKER, MAX_RUN, MIN_RUN, MIN_SHRINK_LEN, RUN_ESCAPE, Record,
    RecordIter,
};
use crate::io::{Mode, sha256, to_hex};

const BUF_SIZE: usize = 64 * 1024;

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Delta + run-length file shrinker.
#[derive(Parser, Debug)]
#[command(
    name = "shrinker",
    version,
    about = "Super file shrinker: delta + run-length byte transform",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Force overwrite existing output files.
    #[arg(short = 'f', long, global = true)]
    force: bool,

    /// Quiet mode (suppress non-error output).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Output stats as JSON to stderr.
    #[arg(long = "json", global = true)]
    json_output: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Compress an input file.
    Shrink(TransformArgs),
    /// Restore a file produced by `shrink`.
    Unshrink(TransformArgs),
    /// Print the run-length records of a shrunk file.
    Inspect(InspectArgs),
    /// Print build/format details.
    Config,
}

#[derive(Args, Debug)]
struct TransformArgs {
    /// Input file (default: stdin).
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "input_pos")]
    input: Option<PathBuf>,

    /// Output file (default: stdout).
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "output_pos")]
    output: Option<PathBuf>,

    /// Write output to stdout.
    #[arg(short = 'c', long)]
    stdout: bool,

    /// Run the transform but do not write output.
    #[arg(long = "check-only")]
    no_output: bool,

    /// Input file (positional form).
    #[arg(value_hint = ValueHint::FilePath)]
    input_pos: Option<PathBuf>,

    /// Output file (positional form).
    #[arg(value_hint = ValueHint::FilePath)]
    output_pos: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct InspectArgs {
    /// Shrunk input file.
    #[arg(value_hint = ValueHint::FilePath)]
    input: PathBuf,
}

// ---------------------------------------------------------------------------
// Resolved command + options (flattened from Cli)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Transform(Mode),
    Inspect,
    Config,
}

struct Options {
    command: Command,
    use_stdout: bool,
    force: bool,
    quiet: bool,
    verbose: u8,
    no_output: bool,
    input_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
    json_output: bool,
}

fn resolve_options(cli: Cli) -> Options {
    let mut opts = Options {
        command: Command::Config,
        use_stdout: false,
        force: cli.force,
        quiet: cli.quiet,
        verbose: cli.verbose.min(2),
        no_output: false,
        input_file: None,
        output_file: None,
        json_output: cli.json_output,
    };

    let (mode, args) = match cli.command {
        Cmd::Shrink(args) => (Mode::Shrink, args),
        Cmd::Unshrink(args) => (Mode::Unshrink, args),
        Cmd::Inspect(args) => {
            opts.command = Command::Inspect;
            opts.input_file = Some(args.input);
            return opts;
        }
        Cmd::Config => return opts,
    };

    opts.command = Command::Transform(mode);
    opts.use_stdout = args.stdout;
    opts.no_output = args.no_output;
    opts.input_file = args.input.or(args.input_pos);
    opts.output_file = args.output.or(args.output_pos);
    opts
}

#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_try_parse_args(args: &[String]) {
    let argv: Vec<String> = std::iter::once("shrinker".to_string())
        .chain(args.iter().cloned())
        .collect();
    if let Ok(cli) = Cli::try_parse_from(argv) {
        let _ = resolve_options(cli);
    }
}

// ---------------------------------------------------------------------------
// Input / output
// ---------------------------------------------------------------------------

fn read_input(opts: &Options) -> Result<Vec<u8>, i32> {
    match &opts.input_file {
        Some(path) => std::fs::read(path).map_err(|e| {
            eprintln!("shrinker: input file: {}: {e}", path.display());
            1
        }),
        None => {
            let mut data = Vec::new();
            io::stdin().lock().read_to_end(&mut data).map_err(|e| {
                eprintln!("shrinker: read error: {e}");
                1
            })?;
            Ok(data)
        }
    }
}

fn open_output(opts: &Options) -> Result<Box<dyn Write>, i32> {
    if opts.no_output {
        return Ok(Box::new(io::sink()));
    }
    match (opts.use_stdout, &opts.output_file) {
        (true, _) | (_, None) => Ok(Box::new(BufWriter::with_capacity(
            BUF_SIZE,
            io::stdout().lock(),
        ))),
        (false, Some(path)) => {
            if path.exists() && !opts.force {
                eprintln!(
                    "shrinker: output file exists, use -f to overwrite: {}",
                    path.display()
                );
                return Err(1);
            }
            match File::create(path) {
                Ok(f) => Ok(Box::new(BufWriter::with_capacity(BUF_SIZE, f))),
                Err(e) => {
                    eprintln!("shrinker: output file: {}: {e}", path.display());
                    Err(1)
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Transform commands
// ---------------------------------------------------------------------------

fn cmd_transform(opts: &Options, mode: Mode) -> i32 {
    let input = match read_input(opts) {
        Ok(data) => data,
        Err(code) => return code,
    };

    let (output, stats) = match mode.apply(&input) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("shrinker: {mode} error: {e}");
            return 1;
        }
    };

    let mut writer = match open_output(opts) {
        Ok(w) => w,
        Err(code) => return code,
    };
    if let Err(e) = writer.write_all(&output).and_then(|()| writer.flush()) {
        eprintln!("shrinker: write error: {e}");
        return 1;
    }

    if opts.verbose > 0 && !opts.quiet {
        eprintln!(
            "shrinker: {mode}: input size: {}, intermediate size: {}, output size: {}{}",
            stats.input_size,
            stats.intermediate_size,
            stats.output_size,
            if stats.passthrough { " (passthrough)" } else { "" }
        );
    }

    if opts.json_output {
        print_json(&transform_json(mode, &stats, &input, &output));
    }

    0
}

fn transform_json(
    mode: Mode,
    stats: &TransformStats,
    input: &[u8],
    output: &[u8],
) -> serde_json::Value {
    serde_json::json!({
        "command": mode.as_str(),
        "input_size": stats.input_size,
        "intermediate_size": stats.intermediate_size,
        "output_size": stats.output_size,
        "ratio": stats.ratio(),
        "passthrough": stats.passthrough,
        "input_sha256": sha256(input).map(|d| to_hex(&d)),
        "output_sha256": sha256(output).map(|d| to_hex(&d)),
    })
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => eprintln!("{s}"),
        Err(e) => eprintln!("shrinker: json error: {e}"),
    }
}

// ---------------------------------------------------------------------------
// Inspect command
// ---------------------------------------------------------------------------

#[derive(Debug, Default, PartialEq, Eq)]
struct RecordSummary {
    records: u64,
    literals: u64,
    runs: u64,
    decoded_size: u64,
}

fn cmd_inspect(opts: &Options) -> i32 {
    let data = match read_input(opts) {
        Ok(data) => data,
        Err(code) => return code,
    };

    let stdout = io::stdout();
    let mut out = BufWriter::with_capacity(BUF_SIZE, stdout.lock());

    let summary = if data.len() < MIN_SHRINK_LEN {
        if !opts.quiet {
            let _ = writeln!(out, "passthrough: {} bytes stored as-is", data.len());
        }
        RecordSummary {
            decoded_size: data.len() as u64,
            ..Default::default()
        }
    } else {
        match write_records(&mut out, &data, opts.quiet) {
            Ok(summary) => summary,
            Err(msg) => {
                let _ = out.flush();
                eprintln!("shrinker: inspect: {msg}");
                return 1;
            }
        }
    };

    if !opts.quiet {
        let _ = writeln!(
            out,
            "records: {}, literals: {}, runs: {}, delta size: {}",
            summary.records, summary.literals, summary.runs, summary.decoded_size
        );
    }
    if let Err(e) = out.flush() {
        eprintln!("shrinker: write error: {e}");
        return 1;
    }

    if opts.json_output {
        print_json(&serde_json::json!({
            "command": "inspect",
            "encoded_size": data.len(),
            "records": summary.records,
            "literals": summary.literals,
            "runs": summary.runs,
            "delta_size": summary.decoded_size,
        }));
    }

    0
}

fn write_records<W: Write>(
    out: &mut W,
    data: &[u8],
    quiet: bool,
) -> Result<RecordSummary, String> {
    let mut summary = RecordSummary::default();
    for span in RecordIter::new(data) {
        let span = span.map_err(|e| e.to_string())?;
        summary.records += 1;
        summary.decoded_size += span.record.decoded_len() as u64;
        let line = match span.record {
            Record::Literal(byte) => {
                summary.literals += 1;
                format!("{:>10} {:>2}  LITERAL {byte:#04x}", span.offset, span.width)
            }
            Record::Run { value, count } => {
                summary.runs += 1;
                format!(
                    "{:>10} {:>2}  RUN     {value:#04x} x {count}",
                    span.offset, span.width
                )
            }
        };
        if !quiet {
            writeln!(out, "{line}").map_err(|e| e.to_string())?;
        }
    }
    Ok(summary)
}

// ---------------------------------------------------------------------------
// Config command
// ---------------------------------------------------------------------------

fn cmd_config() -> i32 {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!("shrinker version {version} (Rust)");

    let file_io = cfg!(feature = "file-io") as u8;

    eprintln!("FILE_IO={file_io}");
    eprintln!("RUN_ESCAPE={RUN_ESCAPE}");
    eprintln!("LARGE_RUN_MARKER={LARGE_RUN_MARKER}");
    eprintln!("DELTA_ESCAPE={DELTA_ESCAPE}");
    eprintln!("MIN_RUN={MIN_RUN}");
    eprintln!("RUN_RADIX={}", filter::RUN_RADIX);
    eprintln!("MAX_RUN={MAX_RUN}");
    eprintln!("MIN_SHRINK_LEN={MIN_SHRINK_LEN}");

    0
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn log_filter(verbose: u8, quiet: bool) -> &'static str {
    match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        _ => "debug",
    }
}

/// Main CLI entry point. Parses arguments via clap, dispatches commands.
pub fn run() -> ! {
    let cli = Cli::parse();
    let mut opts = resolve_options(cli);

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_filter(opts.verbose, opts.quiet)),
    )
    .format_timestamp(None)
    .format_target(false)
    .init();

    // Warn if -c overrides output filename.
    if opts.use_stdout && !opts.quiet {
        if let Some(path) = &opts.output_file {
            eprintln!(
                "shrinker: warning: -c option overrides output filename: {}",
                path.display()
            );
        }
    }
    if opts.use_stdout {
        opts.output_file = None;
    }

    let exit_code = match opts.command {
        Command::Transform(mode) => cmd_transform(&opts, mode),
        Command::Inspect => cmd_inspect(&opts),
        Command::Config => cmd_config(),
    };

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
