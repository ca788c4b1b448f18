use anyhow::Result;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use asmbot::{Config, Dispatcher};
use asmbot_engines::NativeBackend;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Assemble and disassemble snippets from chat-style commands read on stdin"
)]
struct Opts {
    /// JSON config file, e.g. { "prefix": "!", "highlight": "x86asm" }
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Command prefix (overrides the config file)
    #[arg(long)]
    prefix: Option<String>,
    /// Run a single command and exit, e.g. `asm x86 nop; ret`
    #[arg(value_name = "COMMAND", trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let opts = Opts::parse();
    let mut config = match &opts.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(prefix) = opts.prefix {
        config.prefix = prefix;
    }
    let bot = Dispatcher::new(NativeBackend, config);

    if !opts.command.is_empty() {
        let line = format!("{}{}", bot.config().prefix, opts.command.join(" "));
        if let Some(reply) = bot.on_message(&line) {
            println!("{reply}");
        }
        return Ok(());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in io::stdin().lock().lines() {
        let line = line?;
        if let Some(reply) = bot.on_message(&line) {
            writeln!(out, "{reply}")?;
            out.flush()?;
        }
    }
    Ok(())
}
