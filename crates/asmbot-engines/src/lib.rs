pub mod asm;
pub mod disasm;

use anyhow::Result;
use asmbot::{ArchSpec, Backend};

pub use asm::KeystoneAssembler;
pub use disasm::CapstoneDisassembler;

/// Keystone for assembly, Capstone for disassembly.
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeBackend;

impl Backend for NativeBackend {
    type Assembler = KeystoneAssembler;
    type Disassembler = CapstoneDisassembler;

    fn assembler(&self, spec: &ArchSpec) -> Result<KeystoneAssembler> {
        KeystoneAssembler::new(spec)
    }

    fn disassembler(&self, spec: &ArchSpec) -> Result<CapstoneDisassembler> {
        CapstoneDisassembler::new(spec)
    }
}
