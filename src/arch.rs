use bitflags::bitflags;
use std::fmt;

use crate::error::Error;

/// Which engine a request is headed for. The two engines disagree on some
/// defaults, so every lookup is made against one direction's table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Assemble,
    Disassemble,
}

impl Direction {
    pub fn engine(self) -> &'static str {
        match self {
            Direction::Assemble => "assembler",
            Direction::Disassemble => "disassembler",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.engine())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    X86,
    Arm,
    Arm64,
    Ppc,
    Mips,
}

bitflags! {
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mode: u32 {
const BITS16 = 1 << 0;
const BITS32 = 1 << 1;
const BITS64 = 1 << 2;
const ARM = 1 << 3; // A32 instruction set
const THUMB = 1 << 4;
const LITTLE_ENDIAN = 1 << 5;
const BIG_ENDIAN = 1 << 6;
}
}

/// Resolved engine configuration for one architecture name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArchSpec {
    /// Canonical (first listed) alias of the entry that matched.
    pub name: &'static str,
    pub arch: Arch,
    pub mode: Mode,
}

impl ArchSpec {
    pub fn is_x86(&self) -> bool {
        self.arch == Arch::X86
    }

    pub fn is_big_endian(&self) -> bool {
        self.mode.contains(Mode::BIG_ENDIAN)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ArchEntry {
    pub names: &'static [&'static str],
    pub arch: Arch,
    pub mode: Mode,
}

impl ArchEntry {
    const fn new(names: &'static [&'static str], arch: Arch, mode: Mode) -> Self {
        Self { names, arch, mode }
    }

    fn spec(&self) -> ArchSpec {
        ArchSpec { name: self.names[0], arch: self.arch, mode: self.mode }
    }
}

/// A constant name -> configuration table for one direction.
#[derive(Debug)]
pub struct ArchTable {
    pub direction: Direction,
    pub entries: &'static [ArchEntry],
}

impl ArchTable {
    pub fn resolve(&self, name: &str) -> Option<ArchSpec> {
        self.entries
            .iter()
            .find(|e| e.names.contains(&name))
            .map(ArchEntry::spec)
    }

    /// Every alias the table accepts, in listing order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().flat_map(|e| e.names.iter().copied())
    }

    /// Human readable list, aliases of one entry joined with `/`.
    pub fn supported(&self) -> String {
        self.entries
            .iter()
            .map(|e| e.names.join("/"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// Keystone side. ppc64 stays big-endian here.
pub static ASSEMBLE: ArchTable = ArchTable {
    direction: Direction::Assemble,
    entries: &[
        ArchEntry::new(&["x86"], Arch::X86, Mode::BITS32),
        ArchEntry::new(&["x86_16"], Arch::X86, Mode::BITS16),
        ArchEntry::new(&["x86_64", "x64", "x86-64"], Arch::X86, Mode::BITS64),
        ArchEntry::new(&["arm"], Arch::Arm, Mode::ARM),
        ArchEntry::new(&["thumb"], Arch::Arm, Mode::THUMB),
        ArchEntry::new(&["arm64", "aarch64"], Arch::Arm64, Mode::LITTLE_ENDIAN),
        ArchEntry::new(&["ppc", "ppc32"], Arch::Ppc, Mode::BITS32.union(Mode::BIG_ENDIAN)),
        ArchEntry::new(&["ppc64"], Arch::Ppc, Mode::BITS64.union(Mode::BIG_ENDIAN)),
        ArchEntry::new(&["mips", "mips32"], Arch::Mips, Mode::BITS32.union(Mode::BIG_ENDIAN)),
        ArchEntry::new(&["mips64"], Arch::Mips, Mode::BITS64.union(Mode::LITTLE_ENDIAN)),
    ],
};

// Capstone side. ppc64 decodes little-endian.
pub static DISASSEMBLE: ArchTable = ArchTable {
    direction: Direction::Disassemble,
    entries: &[
        ArchEntry::new(&["x86"], Arch::X86, Mode::BITS32),
        ArchEntry::new(&["x86_16"], Arch::X86, Mode::BITS16),
        ArchEntry::new(&["x86_64", "x64", "x86-64"], Arch::X86, Mode::BITS64),
        ArchEntry::new(&["arm"], Arch::Arm, Mode::ARM),
        ArchEntry::new(&["thumb"], Arch::Arm, Mode::THUMB),
        ArchEntry::new(&["arm64", "aarch64"], Arch::Arm64, Mode::ARM.union(Mode::LITTLE_ENDIAN)),
        ArchEntry::new(&["ppc", "ppc32"], Arch::Ppc, Mode::BITS32.union(Mode::BIG_ENDIAN)),
        ArchEntry::new(&["ppc64"], Arch::Ppc, Mode::BITS64.union(Mode::LITTLE_ENDIAN)),
        ArchEntry::new(&["mips", "mips32"], Arch::Mips, Mode::BITS32.union(Mode::BIG_ENDIAN)),
        ArchEntry::new(&["mips64"], Arch::Mips, Mode::BITS64.union(Mode::LITTLE_ENDIAN)),
    ],
};

pub fn table(direction: Direction) -> &'static ArchTable {
    match direction {
        Direction::Assemble => &ASSEMBLE,
        Direction::Disassemble => &DISASSEMBLE,
    }
}

pub fn resolve(direction: Direction, name: &str) -> Result<ArchSpec, Error> {
    let table = table(direction);
    match table.resolve(name) {
        Some(spec) => {
            tracing::debug!(%direction, arch = name, ?spec, "resolved architecture");
            Ok(spec)
        }
        None => Err(Error::UnsupportedArchitecture {
            name: name.to_string(),
            supported: table.supported(),
        }),
    }
}
