use anyhow::{anyhow, Result};
use capstone::{Arch as CsArch, Capstone, Endian, Mode as CsMode, Syntax, NO_EXTRA_MODE};

use asmbot::{Arch, ArchSpec, DisassemblerEngine, InstructionRecord, Mode};

/// Capstone handle for one request. Closed when dropped.
pub struct CapstoneDisassembler {
    cs: Capstone,
}

pub fn cs_config(spec: &ArchSpec) -> (CsArch, CsMode, Option<Endian>) {
    let m = spec.mode;
    let (arch, mode) = match spec.arch {
        Arch::X86 if m.contains(Mode::BITS16) => (CsArch::X86, CsMode::Mode16),
        Arch::X86 if m.contains(Mode::BITS64) => (CsArch::X86, CsMode::Mode64),
        Arch::X86 => (CsArch::X86, CsMode::Mode32),
        Arch::Arm if m.contains(Mode::THUMB) => (CsArch::ARM, CsMode::Thumb),
        Arch::Arm => (CsArch::ARM, CsMode::Arm),
        Arch::Arm64 => (CsArch::ARM64, CsMode::Arm),
        Arch::Ppc if m.contains(Mode::BITS64) => (CsArch::PPC, CsMode::Mode64),
        Arch::Ppc => (CsArch::PPC, CsMode::Mode32),
        Arch::Mips if m.contains(Mode::BITS64) => (CsArch::MIPS, CsMode::Mips64),
        Arch::Mips => (CsArch::MIPS, CsMode::Mips32),
    };
    let endian = if m.contains(Mode::BIG_ENDIAN) {
        Some(Endian::Big)
    } else if m.contains(Mode::LITTLE_ENDIAN) {
        Some(Endian::Little)
    } else {
        None
    };
    (arch, mode, endian)
}

impl CapstoneDisassembler {
    pub fn new(spec: &ArchSpec) -> Result<Self> {
        let (arch, mode, endian) = cs_config(spec);
        let cs = Capstone::new_raw(arch, mode, NO_EXTRA_MODE, endian)
            .map_err(|e| anyhow!("capstone init for {}: {e}", spec.name))?;
        tracing::debug!(arch = spec.name, "capstone ready");
        Ok(Self { cs })
    }
}

impl DisassemblerEngine for CapstoneDisassembler {
    fn set_intel_syntax(&mut self) -> Result<()> {
        self.cs
            .set_syntax(Syntax::Intel)
            .map_err(|e| anyhow!("capstone set syntax: {e}"))
    }

    fn disassemble(&mut self, bytes: &[u8]) -> Result<Vec<InstructionRecord>> {
        let insns = self
            .cs
            .disasm_all(bytes, 0)
            .map_err(|e| anyhow!("disassembly failed: {e}"))?;
        Ok(insns
            .iter()
            .map(|i| {
                InstructionRecord::decoded(
                    i.mnemonic().unwrap_or("???"),
                    i.op_str().unwrap_or(""),
                    i.bytes().to_vec(),
                )
            })
            .collect())
    }
}
