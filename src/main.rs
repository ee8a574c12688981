use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use shoal::{Codebox, ErrorKind, Options, Session, Status};

/// The only message ><> allows for a fault.
const FISHY: &str = "something smells fishy...";
const LOAD_FAILED: i32 = 1;
const BUDGET_EXHAUSTED: i32 = 7;

#[derive(Parser, Debug)]
#[command(name = "shoal")]
#[command(about = "Run a ><> program")]
struct Args {
    /// Path to the program
    #[arg(required_unless_present = "code", conflicts_with = "code")]
    script: Option<PathBuf>,

    /// Program source given on the command line
    #[arg(short, long)]
    code: Option<String>,

    /// Push the characters of STRING onto the initial stack
    #[arg(short, long)]
    string: Option<String>,

    /// Push a number onto the initial stack, after --string. Repeatable
    #[arg(short = 'v', long = "value", action = ArgAction::Append, allow_negative_numbers = true)]
    values: Vec<f64>,

    /// Seed for the random mirror `x`
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many instructions
    #[arg(long)]
    max_steps: Option<u64>,
}

/// Logs go to stderr so stdout only carries program output. `RUST_LOG`
/// overrides the default filter.
fn init_logging () {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn fishy (kind: ErrorKind) -> ! {
    eprintln!("{FISHY}");
    process::exit(kind.exit_code())
}

/// Exit code for a rejected command line. `--help` and `--version` exit
/// cleanly.
fn usage_exit_code (e: &clap::Error) -> i32 {
    if e.use_stderr() { LOAD_FAILED } else { 0 }
}

fn main() {
    init_logging();
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            process::exit(usage_exit_code(&e));
        }
    };

    // Parse in program
    let src = match (&args.code, &args.script) {
        (Some(code), _) => code.clone(),
        (None, Some(path)) => match fs::read_to_string(path) {
            Ok(src) => src,
            Err(e) => {
                error!("Error reading file '{}': {}", path.display(), e);
                process::exit(LOAD_FAILED);
            }
        },
        (None, None) => {
            error!("no program given");
            process::exit(LOAD_FAILED);
        }
    };
    let codebox = Codebox::parse(&src);
    info!(width = codebox.width(), height = codebox.height(), "loaded program");

    let mut initial_stack: Vec<f64> = args
        .string
        .iter()
        .flat_map(|s| s.chars())
        .map(|c| f64::from(u32::from(c)))
        .collect();
    initial_stack.extend(&args.values);
    let options = Options { seed: args.seed, initial_stack };

    // Run program
    let input = io::stdin().lock();
    let output = io::stdout().lock();
    let mut session = Session::new(&codebox, input, output, options);
    let result = match args.max_steps {
        Some(budget) => session.run_for(budget),
        None => session.run().map(|_| session.status()),
    };
    let steps = session.steps();
    drop(session);
    let _ = io::stdout().flush();

    match result {
        Ok(Status::Halted) => debug!(steps, "finished"),
        Ok(Status::Running) => {
            warn!(steps, "step budget exhausted");
            process::exit(BUDGET_EXHAUSTED);
        },
        Ok(Status::Faulted(kind)) => fishy(kind),
        Err(e) => {
            debug!(steps, error = %e, "program faulted");
            fishy(e.kind())
        }
    }
}
