//! Contracts for the external assembler and disassembler engines, and the
//! adapter that drives them for one request.
//!
//! A backend constructs an engine handle per request. Handles release their
//! native resources in `Drop`; the adapter functions below own the handle as
//! a local, so it is dropped on every return path.

use anyhow::{anyhow, Result};

use crate::arch::{ArchSpec, Direction};
use crate::error::Error;
use crate::listing::InstructionRecord;

pub trait AssemblerEngine {
    fn set_intel_syntax(&mut self) -> Result<()>;
    fn assemble(&mut self, statement: &str) -> Result<Vec<u8>>;
}

pub trait DisassemblerEngine {
    fn set_intel_syntax(&mut self) -> Result<()>;
    /// Decodes from the start of `bytes`; the engine picks instruction
    /// boundaries.
    fn disassemble(&mut self, bytes: &[u8]) -> Result<Vec<InstructionRecord>>;
}

/// Constructs engine handles for a resolved configuration.
pub trait Backend {
    type Assembler: AssemblerEngine;
    type Disassembler: DisassemblerEngine;

    fn assembler(&self, spec: &ArchSpec) -> Result<Self::Assembler>;
    fn disassembler(&self, spec: &ArchSpec) -> Result<Self::Disassembler>;
}

/// Assembles every statement, all or nothing. Empty statements produce no
/// record and never reach the engine, nor do statements holding a NUL byte.
pub fn assemble<B: Backend>(
    backend: &B,
    spec: &ArchSpec,
    statements: &[&str],
) -> Result<Vec<InstructionRecord>, Error> {
    let mut engine = backend
        .assembler(spec)
        .map_err(|source| Error::EngineUnavailable { direction: Direction::Assemble, source })?;

    if spec.is_x86() {
        engine
            .set_intel_syntax()
            .map_err(|source| Error::OptionConfiguration { direction: Direction::Assemble, source })?;
    }

    let mut records = Vec::with_capacity(statements.len());
    for statement in statements.iter().map(|s| s.trim()) {
        if statement.is_empty() {
            continue;
        }
        if statement.contains('\0') {
            return Err(Error::Encode {
                statement: statement.to_string(),
                source: anyhow!("statement contains a NUL byte"),
            });
        }
        let bytes = engine.assemble(statement).map_err(|source| Error::Encode {
            statement: statement.to_string(),
            source,
        })?;
        tracing::trace!(statement, len = bytes.len(), "assembled");
        records.push(InstructionRecord::assembled(statement, bytes));
    }
    Ok(records)
}

/// Disassembles `bytes` in one pass. Any byte the engine could not place in
/// an instruction fails the whole request.
pub fn disassemble<B: Backend>(
    backend: &B,
    spec: &ArchSpec,
    bytes: &[u8],
) -> Result<Vec<InstructionRecord>, Error> {
    let mut engine = backend
        .disassembler(spec)
        .map_err(|source| Error::EngineUnavailable { direction: Direction::Disassemble, source })?;

    if spec.is_x86() {
        engine
            .set_intel_syntax()
            .map_err(|source| Error::OptionConfiguration { direction: Direction::Disassemble, source })?;
    }

    let records = engine
        .disassemble(bytes)
        .map_err(|source| Error::Decode { offset: 0, source })?;

    let decoded: usize = records.iter().map(|r| r.bytes.len()).sum();
    if decoded != bytes.len() {
        return Err(Error::Decode {
            offset: decoded,
            source: anyhow!(
                "{} of {} bytes decoded, undecodable tail {}",
                decoded,
                bytes.len(),
                crate::listing::hex_bytes(bytes.get(decoded..).unwrap_or_default())
            ),
        });
    }
    Ok(records)
}
