use std::{fs, path::PathBuf, process::ExitCode, rc::Rc, time::Instant};

use bramble::{
    analyzer::{analyzer::Analyzer, stdlib::Stdlib},
    errors::errors::Error,
    lexer::lexer::tokenize,
    optimizer::optimizer::optimize,
    parser::parser::parse,
    render_error,
};
use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Pipeline stage whose tree is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Stage {
    Parsed,
    Analyzed,
    Optimized,
}

#[derive(Parser)]
#[command(
    name = "bramble",
    version,
    about = "Check and optimize a bramble source file."
)]
struct Cli {
    /// Path to a bramble source file.
    input: PathBuf,

    /// Stop after this stage and print its tree.
    #[arg(long, value_enum, default_value_t = Stage::Optimized)]
    stage: Stage,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let source = match fs::read_to_string(&cli.input) {
        Ok(source) => source,
        Err(err) => {
            error!(path = %cli.input.display(), "failed to read source");
            eprintln!("Error: cannot read {}: {}", cli.input.display(), err);
            return ExitCode::FAILURE;
        }
    };
    let file_name = cli
        .input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("shell"));

    match run(cli.stage, &source, &file_name) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprint!("{}", render_error(&err, &source));
            ExitCode::FAILURE
        }
    }
}

fn run(stage: Stage, source: &str, file_name: &str) -> Result<(), Error> {
    let start = Instant::now();

    let tokens = tokenize(String::from(source), Some(String::from(file_name)))?;
    info!(elapsed = ?start.elapsed(), tokens = tokens.len(), "tokenized");

    let parse_start = Instant::now();
    let ast = parse(tokens, Rc::new(String::from(file_name)))?;
    info!(elapsed = ?parse_start.elapsed(), "parsed");

    if stage == Stage::Parsed {
        println!("{:#?}", ast);
        return Ok(());
    }

    let analyze_start = Instant::now();
    let program = Analyzer::new(Stdlib::standard()).analyze(ast)?;
    info!(elapsed = ?analyze_start.elapsed(), "analyzed");

    if stage == Stage::Analyzed {
        println!("{:#?}", program);
        return Ok(());
    }

    let optimize_start = Instant::now();
    let program = optimize(program);
    info!(elapsed = ?optimize_start.elapsed(), "optimized");

    println!("{:#?}", program);
    info!(elapsed = ?start.elapsed(), "total");
    Ok(())
}
