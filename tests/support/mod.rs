//! Scripted engine backend for driving the adapter without native engines.
#![allow(dead_code)]

use anyhow::{anyhow, bail, Result};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use asmbot::{ArchSpec, AssemblerEngine, Backend, DisassemblerEngine, InstructionRecord};

#[derive(Debug, Default, Clone)]
pub struct Counters {
    pub constructed: Rc<Cell<usize>>,
    pub released: Rc<Cell<usize>>,
    pub statements: Rc<Cell<usize>>,
    pub last_spec: Rc<RefCell<Option<ArchSpec>>>,
}

impl Counters {
    pub fn constructed(&self) -> usize {
        self.constructed.get()
    }
    pub fn released(&self) -> usize {
        self.released.get()
    }
    pub fn statements(&self) -> usize {
        self.statements.get()
    }
    pub fn last_spec(&self) -> Option<ArchSpec> {
        *self.last_spec.borrow()
    }
}

#[derive(Debug, Default)]
pub struct FakeBackend {
    pub counters: Counters,
    pub fail_construct: bool,
    pub fail_syntax: bool,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn open(&self, spec: &ArchSpec) -> Result<Handle> {
        *self.counters.last_spec.borrow_mut() = Some(*spec);
        if self.fail_construct {
            bail!("engine init failed");
        }
        self.counters.constructed.set(self.counters.constructed() + 1);
        Ok(Handle { spec: *spec, intel: false, fail_syntax: self.fail_syntax, counters: self.counters.clone() })
    }
}

pub struct Handle {
    spec: ArchSpec,
    intel: bool,
    fail_syntax: bool,
    counters: Counters,
}

impl Drop for Handle {
    fn drop(&mut self) {
        self.counters.released.set(self.counters.released() + 1);
    }
}

impl Handle {
    fn set_syntax(&mut self) -> Result<()> {
        if self.fail_syntax {
            bail!("option rejected");
        }
        self.intel = true;
        Ok(())
    }

    fn check_syntax(&self) -> Result<()> {
        if self.spec.is_x86() && !self.intel {
            bail!("x86 used without intel syntax");
        }
        Ok(())
    }
}

impl AssemblerEngine for Handle {
    fn set_intel_syntax(&mut self) -> Result<()> {
        self.set_syntax()
    }

    fn assemble(&mut self, statement: &str) -> Result<Vec<u8>> {
        self.check_syntax()?;
        self.counters.statements.set(self.counters.statements() + 1);
        encode(statement)
    }
}

impl DisassemblerEngine for Handle {
    fn set_intel_syntax(&mut self) -> Result<()> {
        self.set_syntax()
    }

    fn disassemble(&mut self, bytes: &[u8]) -> Result<Vec<InstructionRecord>> {
        self.check_syntax()?;
        if bytes.is_empty() {
            bail!("nothing to decode");
        }
        Ok(decode(bytes))
    }
}

impl Backend for FakeBackend {
    type Assembler = Handle;
    type Disassembler = Handle;

    fn assembler(&self, spec: &ArchSpec) -> Result<Handle> {
        self.open(spec)
    }

    fn disassembler(&self, spec: &ArchSpec) -> Result<Handle> {
        self.open(spec)
    }
}

// A handful of x86 encodings.
fn encode(statement: &str) -> Result<Vec<u8>> {
    if statement.starts_with('#') {
        return Ok(Vec::new());
    }
    let bytes = match statement {
        "nop" => vec![0x90],
        "ret" => vec![0xc3],
        "int3" => vec![0xcc],
        "push ebp" => vec![0x55],
        "mov ebp, esp" => vec![0x89, 0xe5],
        "mov eax, 1" => vec![0xb8, 0x01, 0x00, 0x00, 0x00],
        other => return Err(anyhow!("invalid mnemonic in `{other}`")),
    };
    Ok(bytes)
}

// Stops at the first byte it does not know, like a real decoder without
// skipdata.
fn decode(bytes: &[u8]) -> Vec<InstructionRecord> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let (mn, ops, len) = match bytes[i] {
            0x90 => ("nop", String::new(), 1),
            0xc3 => ("ret", String::new(), 1),
            0xcc => ("int3", String::new(), 1),
            0x55 => ("push", "ebp".to_string(), 1),
            0x89 if bytes.get(i + 1) == Some(&0xe5) => ("mov", "ebp, esp".to_string(), 2),
            0xb8 if i + 5 <= bytes.len() => {
                let imm = u32::from_le_bytes([bytes[i + 1], bytes[i + 2], bytes[i + 3], bytes[i + 4]]);
                let ops = if imm < 10 { format!("eax, {imm}") } else { format!("eax, {imm:#x}") };
                ("mov", ops, 5)
            }
            _ => break,
        };
        out.push(InstructionRecord::decoded(mn, ops, bytes[i..i + len].to_vec()));
        i += len;
    }
    out
}
