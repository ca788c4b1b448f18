//! Chat command routing. One message in, at most one reply out.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::arch::{self, Direction};
use crate::config::Config;
use crate::engine::{self, Backend};
use crate::error::Error;
use crate::input;
use crate::listing;
use crate::reference;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Assemble { arch: String, text: String },
    Disassemble { arch: String, text: String },
    Manual { arch: String },
    ReTrick,
    ExploitTrick,
    Help,
}

impl Command {
    /// `args[0]` is the command name, `args[1]` the architecture, the rest is
    /// rejoined with single spaces.
    pub fn parse<S: AsRef<str>>(args: &[S], prefix: &str) -> Result<Self, Error> {
        let name = args.first().map(|a| a.as_ref()).unwrap_or_default();
        let arch = args.get(1).map(|a| a.as_ref().to_string());
        let rest = args.get(2..).map(input::join_args).unwrap_or_default();
        let missing = |usage: &str| Error::MissingArgument { usage: format!("{prefix}{usage}") };

        match name {
            "asm" | "assemble" => {
                let arch = arch.ok_or_else(|| missing("asm <arch> <instruction>[; <instruction>...]"))?;
                Ok(Command::Assemble { arch, text: rest })
            }
            "disasm" | "disassemble" => {
                let arch = arch.ok_or_else(|| missing("disasm <arch> <hex opcodes>"))?;
                Ok(Command::Disassemble { arch, text: rest })
            }
            "manual" => {
                let arch = arch.ok_or_else(|| missing("manual <arch>"))?;
                Ok(Command::Manual { arch })
            }
            "retrick" => Ok(Command::ReTrick),
            "exploittrick" => Ok(Command::ExploitTrick),
            "help" => Ok(Command::Help),
            other => Err(Error::UnknownCommand { name: other.to_string(), help: format!("{prefix}help") }),
        }
    }
}

pub struct Dispatcher<B> {
    backend: B,
    config: Config,
}

impl<B: Backend> Dispatcher<B> {
    pub fn new(backend: B, config: Config) -> Self {
        Self { backend, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replies to a chat line, or `None` when the line is not a command.
    pub fn on_message(&self, line: &str) -> Option<String> {
        let body = line.trim().strip_prefix(self.config.prefix.as_str())?;
        let args: Vec<&str> = body.split_whitespace().collect();
        if args.is_empty() {
            return None;
        }
        Some(self.reply(args.as_slice(), StdRng::from_entropy))
    }

    /// Runs a parsed argument list; failures become their reply text.
    ///
    /// `rng` is only called for the trivia commands.
    pub fn reply<S, F, R>(&self, args: &[S], rng: F) -> String
    where
        S: AsRef<str>,
        F: FnOnce() -> R,
        R: Rng,
    {
        match self.run(args, rng) {
            Ok(reply) => reply,
            Err(err) => {
                let reply = err.to_string();
                let systemic = err.is_systemic();
                let err = anyhow::Error::from(err);
                if systemic {
                    tracing::error!("request failed: {err:#}");
                } else {
                    tracing::warn!("request failed: {err:#}");
                }
                reply
            }
        }
    }

    pub fn run<S, F, R>(&self, args: &[S], rng: F) -> Result<String, Error>
    where
        S: AsRef<str>,
        F: FnOnce() -> R,
        R: Rng,
    {
        let command = Command::parse(args, &self.config.prefix)?;
        tracing::debug!(?command, "dispatching");
        match command {
            Command::Assemble { arch, text } => self.assemble(&arch, &text),
            Command::Disassemble { arch, text } => self.disassemble(&arch, &text),
            Command::Manual { arch } => match reference::manual_url(&arch) {
                Some(url) => Ok(format!("Here you go: {url}")),
                None => Err(Error::UnsupportedArchitecture {
                    name: arch,
                    supported: reference::manual_supported(),
                }),
            },
            Command::ReTrick => Ok(reference::pick(reference::RE_TRICKS, &mut rng()).to_string()),
            Command::ExploitTrick => Ok(reference::pick(reference::EXPLOIT_TRICKS, &mut rng()).to_string()),
            Command::Help => Ok(self.help()),
        }
    }

    pub fn assemble(&self, arch: &str, text: &str) -> Result<String, Error> {
        let spec = arch::resolve(Direction::Assemble, arch)?;
        let statements = input::split_instructions(text);
        let records = engine::assemble(&self.backend, &spec, &statements)?;
        Ok(listing::format_with(Direction::Assemble, &records, &self.config.highlight))
    }

    pub fn disassemble(&self, arch: &str, text: &str) -> Result<String, Error> {
        let spec = arch::resolve(Direction::Disassemble, arch)?;
        let bytes = input::decode_hex(&input::normalize_hex(text))?;
        let records = engine::disassemble(&self.backend, &spec, &bytes)?;
        Ok(listing::format_with(Direction::Disassemble, &records, &self.config.highlight))
    }

    pub fn help(&self) -> String {
        let p = &self.config.prefix;
        format!(
            "Commands:\n\
             {p}asm <arch> <instruction>[; <instruction>...]  assemble ({})\n\
             {p}disasm <arch> <hex opcodes>  disassemble ({})\n\
             {p}manual <arch>  instruction set manual ({})\n\
             {p}retrick  a reverse engineering trick\n\
             {p}exploittrick  an exploit development trick",
            arch::ASSEMBLE.supported(),
            arch::DISASSEMBLE.supported(),
            reference::manual_supported(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejoins_trailing_arguments() {
        let cmd = Command::parse(&["asm", "x86", "mov", "eax,", "1;", "ret"], "!").unwrap();
        assert_eq!(cmd, Command::Assemble { arch: "x86".into(), text: "mov eax, 1; ret".into() });
        let cmd = Command::parse(&["disasm", "x64", "0x90;", "0xc3"], "!").unwrap();
        assert_eq!(cmd, Command::Disassemble { arch: "x64".into(), text: "0x90; 0xc3".into() });
    }

    #[test]
    fn parse_without_instructions_gives_empty_text() {
        let cmd = Command::parse(&["assemble", "arm"], "!").unwrap();
        assert_eq!(cmd, Command::Assemble { arch: "arm".into(), text: String::new() });
    }

    #[test]
    fn parse_missing_arch_reports_usage_with_prefix() {
        let err = Command::parse(&["disasm"], ".").unwrap_err();
        assert_eq!(err.to_string(), "Usage: .disasm <arch> <hex opcodes>");
        assert!(matches!(Command::parse(&["manual"], "!"), Err(Error::MissingArgument { .. })));
    }

    #[test]
    fn parse_unknown_and_bare_commands() {
        assert!(matches!(Command::parse(&["frobnicate"], "!"), Err(Error::UnknownCommand { .. })));
        assert!(matches!(Command::parse::<&str>(&[], "!"), Err(Error::UnknownCommand { .. })));
        assert_eq!(Command::parse(&["retrick", "extra"], "!").unwrap(), Command::ReTrick);
        assert_eq!(Command::parse(&["exploittrick"], "!").unwrap(), Command::ExploitTrick);
        assert_eq!(Command::parse(&["help"], "!").unwrap(), Command::Help);
    }
}
