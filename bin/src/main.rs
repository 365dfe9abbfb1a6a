use std::{
    io::{stdin, stdout, Write},
    path::PathBuf,
};

use clap::Parser;

use exprparse::{run_file, run_source, Options, RunError};

/// Parse an expression and print its tree in prefix form.
#[derive(clap::Parser)]
struct Args {
    /// File holding a single expression. Starts a prompt when omitted.
    file: Option<PathBuf>,

    /// Also print the scanned tokens.
    #[arg(long)]
    tokens: bool,
}

fn run_prompt(options: Options) -> anyhow::Result<()> {
    loop {
        print!("> ");
        stdout().flush()?;

        let mut line = String::new();
        if stdin().read_line(&mut line)? == 0 {
            return Ok(());
        }
        if line.trim().is_empty() {
            continue;
        }

        match run_source(&line, options, &mut stdout()) {
            Ok(()) => (),
            Err(RunError::Diagnostics(e)) => eprintln!("{e}"),
            Err(e) => return Err(e.into()),
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let options = Options { show_tokens: args.tokens };

    match args.file {
        Some(file) => Ok(run_file(&file, options, &mut stdout())?),
        None => run_prompt(options),
    }
}
