pub mod arch;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod listing;
pub mod reference;

pub use arch::{resolve, Arch, ArchSpec, Direction, Mode};
pub use command::{Command, Dispatcher};
pub use config::Config;
pub use engine::{AssemblerEngine, Backend, DisassemblerEngine};
pub use error::Error;
pub use listing::InstructionRecord;
