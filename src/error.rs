use crate::arch::Direction;

/// Every way a request can fail. The `Display` text is the reply sent back to
/// the user; engine details stay in `source` and go to the log.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Architecture not supported! Supported architectures: ```{supported}```")]
    UnsupportedArchitecture { name: String, supported: String },
    #[error("The {direction} engine is not working! :(")]
    EngineUnavailable {
        direction: Direction,
        #[source]
        source: anyhow::Error,
    },
    #[error("Failed to set the {direction} syntax option")]
    OptionConfiguration {
        direction: Direction,
        #[source]
        source: anyhow::Error,
    },
    #[error("Invalid opcodes: {detail}")]
    MalformedInput { detail: String },
    #[error("Could not assemble `{statement}`. Are the instructions valid?")]
    Encode {
        statement: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("Could not disassemble the given opcodes (stopped at +{offset}). Are the opcodes valid?")]
    Decode {
        offset: usize,
        #[source]
        source: anyhow::Error,
    },
    #[error("Usage: {usage}")]
    MissingArgument { usage: String },
    #[error("Unknown command `{name}`. Try `{help}`")]
    UnknownCommand { name: String, help: String },
}

impl Error {
    /// Systemic failures are the engine's fault, not the user's.
    pub fn is_systemic(&self) -> bool {
        matches!(self, Error::EngineUnavailable { .. } | Error::OptionConfiguration { .. })
    }
}
