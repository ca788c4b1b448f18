//! Static reference data: architecture manuals and trivia.

use rand::seq::SliceRandom;
use rand::Rng;

#[derive(Debug, Clone, Copy)]
pub struct Manual {
    pub names: &'static [&'static str],
    pub url: &'static str,
}

const INTEL_SDM: &str = "https://www.intel.com/content/dam/www/public/us/en/documents/manuals/64-ia-32-architectures-software-developer-instruction-set-reference-manual-325383.pdf";
const ARM_ARM: &str = "https://static.docs.arm.com/ddi0487/ca/DDI0487C_a_armv8_arm.pdf";
const PPC_BOOK: &str = "http://www.plantation-productions.com/Webster/www.writegreatcode.com/Vol2/wgc2_OB.pdf";
const MIPS_ISA: &str = "https://www.cs.cmu.edu/afs/cs/academic/class/15740-f97/public/doc/mips-isa.pdf";

pub static MANUALS: &[Manual] = &[
    Manual { names: &["x86"], url: INTEL_SDM },
    Manual { names: &["x86_16"], url: INTEL_SDM },
    Manual { names: &["x86_64", "x64", "x86-64"], url: INTEL_SDM },
    Manual { names: &["arm"], url: ARM_ARM },
    Manual { names: &["arm64", "aarch64"], url: ARM_ARM },
    Manual { names: &["ppc", "ppc32"], url: PPC_BOOK },
    Manual { names: &["ppc64"], url: PPC_BOOK },
    Manual { names: &["mips", "mips32"], url: MIPS_ISA },
    Manual { names: &["mips64"], url: MIPS_ISA },
];

pub fn manual_url(name: &str) -> Option<&'static str> {
    MANUALS.iter().find(|m| m.names.contains(&name)).map(|m| m.url)
}

pub fn manual_supported() -> String {
    MANUALS.iter().map(|m| m.names.join("/")).collect::<Vec<_>>().join(", ")
}

pub static RE_TRICKS: &[&str] = &[
    "When possible, use a debugger to trace user input in a function",
    "Viewing strings is very helpful",
    "IDA: IDA has a quick action dropdown to the right of the breakdown bar https://i.imgur.com/TmtXE1O.png",
    "IDA: You can view functions that call a target function and functions the target function calls with View -> Open subviews -> Function calls https://i.imgur.com/bdB0Rge.png",
    "IDA: Hit 'k' to convert 'rbp+var_xxx' format in instructions into 'rbp-xxxh'",
    "IDA: When in Graph View, the 'Graph overview' window can be used to quickly navigate around large functions https://i.imgur.com/8IqPs1r.png",
    "Intel x86 can be tricky, `mov eax, eax` may seem like a NOP, but it also implicitly clears the upper 32-bits of the rax register",
    "Intel x86 can be tricky, `cmpxchg` instructions implicitly modify the value of the RAX register, regardless of operands",
    "When you see instructions that check the value of one offset from a register, then the register is set to a value from another offset in a loop - it's probably a linked list",
];

pub static EXPLOIT_TRICKS: &[&str] = &[
    "Use infloop gadgets in ROP chains for blind debugging",
    "For use-after-free exploits, try empty heap spraying after code execution to stabilize the process if it's a critical object",
    "The power of going straight from a bug to PC/IP control is overrated, other primitives like arbitrary R/W are often easier and just as powerful",
    "When writing shellcode, use `xor [reg], [reg]` to avoid null bytes. This can also be used for patches, as `xor` instructions typically use less opcodes than `mov` instructions.",
    "When the patch is smaller than the original code, NOPS are your friend",
    "You don't always need a separate infoleak bug to defeat ASLR, sometimes you can use the context of other registers to calculate from.",
    "When looking for vulnerabilities in large software, map out attack surface first - it sucks to find a bug then realize it's in code that's unreachable later on.",
    "When looking for integer overflows in x86, `ja/jump above or jb/jump below` is an unsigned compare, `jg/jump greater or jl/jump lower` is a signed compare.",
    "If you're using gdb to debug exploits, use PEDA https://github.com/longld/peda",
];

/// Picks one entry with the caller's random source.
pub fn pick<R: Rng + ?Sized>(table: &'static [&'static str], rng: &mut R) -> &'static str {
    table.choose(rng).copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn manual_aliases_share_a_url() {
        assert_eq!(manual_url("x64"), manual_url("x86"));
        assert_eq!(manual_url("aarch64"), Some(ARM_ARM));
        assert_eq!(manual_url("mips64"), Some(MIPS_ISA));
        assert_eq!(manual_url("thumb"), None);
    }

    #[test]
    fn manual_supported_matches_table() {
        for group in manual_supported().split(", ") {
            for name in group.split('/') {
                assert!(manual_url(name).is_some(), "{name}");
            }
        }
        assert!(!manual_supported().contains("thumb"));
    }

    #[test]
    fn seeded_pick_is_deterministic_and_in_table() {
        let a = pick(RE_TRICKS, &mut StdRng::seed_from_u64(7));
        let b = pick(RE_TRICKS, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert!(RE_TRICKS.contains(&a));

        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..32 {
            assert!(EXPLOIT_TRICKS.contains(&pick(EXPLOIT_TRICKS, &mut rng)));
        }
    }
}
