use anyhow::{anyhow, bail, Result};
use keystone_engine::{Arch as KsArch, Keystone, Mode as KsMode, OptionType, OptionValue};

use asmbot::{Arch, ArchSpec, AssemblerEngine, Mode};

/// Keystone handle for one request. Closed when dropped.
pub struct KeystoneAssembler {
    ks: Keystone,
}

pub fn ks_config(spec: &ArchSpec) -> (KsArch, KsMode) {
    let m = spec.mode;
    let (arch, base) = match spec.arch {
        Arch::X86 if m.contains(Mode::BITS16) => (KsArch::X86, KsMode::MODE_16),
        Arch::X86 if m.contains(Mode::BITS64) => (KsArch::X86, KsMode::MODE_64),
        Arch::X86 => (KsArch::X86, KsMode::MODE_32),
        Arch::Arm if m.contains(Mode::THUMB) => (KsArch::ARM, KsMode::THUMB),
        Arch::Arm => (KsArch::ARM, KsMode::ARM),
        Arch::Arm64 => (KsArch::ARM64, KsMode::LITTLE_ENDIAN),
        Arch::Ppc if m.contains(Mode::BITS64) => (KsArch::PPC, KsMode::PPC64),
        Arch::Ppc => (KsArch::PPC, KsMode::PPC32),
        Arch::Mips if m.contains(Mode::BITS64) => (KsArch::MIPS, KsMode::MIPS64),
        Arch::Mips => (KsArch::MIPS, KsMode::MIPS32),
    };
    if spec.is_big_endian() {
        (arch, base | KsMode::BIG_ENDIAN)
    } else {
        (arch, base)
    }
}

impl KeystoneAssembler {
    pub fn new(spec: &ArchSpec) -> Result<Self> {
        let (arch, mode) = ks_config(spec);
        let ks = Keystone::new(arch, mode).map_err(|e| anyhow!("keystone init for {}: {e:?}", spec.name))?;
        tracing::debug!(arch = spec.name, "keystone ready");
        Ok(Self { ks })
    }
}

impl AssemblerEngine for KeystoneAssembler {
    fn set_intel_syntax(&mut self) -> Result<()> {
        self.ks
            .option(OptionType::SYNTAX, OptionValue::SYNTAX_INTEL)
            .map_err(|e| anyhow!("keystone syntax option: {e:?}"))
    }

    fn assemble(&mut self, statement: &str) -> Result<Vec<u8>> {
        // keystone builds a C string from the statement and panics on NUL
        if statement.contains('\0') {
            bail!("statement contains a NUL byte");
        }
        let out = self
            .ks
            .asm(statement.to_string(), 0)
            .map_err(|e| anyhow!("keystone: {e:?}"))?;
        Ok(out.bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use asmbot::arch::ASSEMBLE;

    fn cfg(name: &str) -> (KsArch, KsMode) {
        ks_config(&ASSEMBLE.resolve(name).unwrap())
    }

    #[test]
    fn x86_widths() {
        assert!(matches!(cfg("x86_16"), (KsArch::X86, m) if m == KsMode::MODE_16));
        assert!(matches!(cfg("x86"), (KsArch::X86, m) if m == KsMode::MODE_32));
        assert!(matches!(cfg("x64"), (KsArch::X86, m) if m == KsMode::MODE_64));
    }

    #[test]
    fn ppc_is_big_endian_for_both_widths() {
        assert!(matches!(cfg("ppc32"), (KsArch::PPC, m) if m == KsMode::PPC32 | KsMode::BIG_ENDIAN));
        assert!(matches!(cfg("ppc64"), (KsArch::PPC, m) if m == KsMode::PPC64 | KsMode::BIG_ENDIAN));
    }

    #[test]
    fn mips_endianness() {
        assert!(matches!(cfg("mips"), (KsArch::MIPS, m) if m == KsMode::MIPS32 | KsMode::BIG_ENDIAN));
        assert!(matches!(cfg("mips64"), (KsArch::MIPS, m) if m == KsMode::MIPS64));
    }

    #[test]
    fn arm_family() {
        assert!(matches!(cfg("thumb"), (KsArch::ARM, m) if m == KsMode::THUMB));
        assert!(matches!(cfg("arm"), (KsArch::ARM, m) if m == KsMode::ARM));
        assert!(matches!(cfg("aarch64"), (KsArch::ARM64, m) if m == KsMode::LITTLE_ENDIAN));
    }
}
