use std::fmt::Write as _;

use crate::arch::Direction;

/// Highlight language of the fenced block when none is configured.
pub const DEFAULT_HIGHLIGHT: &str = "x86asm";

const FENCE: &str = "```";

/// One instruction and its encoding, as produced by an engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionRecord {
    pub mnemonic: String,
    pub operands: String,
    pub bytes: Vec<u8>,
}

impl InstructionRecord {
    /// A source statement and the bytes the assembler produced for it.
    pub fn assembled(statement: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { mnemonic: statement.into(), operands: String::new(), bytes }
    }

    pub fn decoded(mnemonic: impl Into<String>, operands: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self { mnemonic: mnemonic.into(), operands: operands.into(), bytes }
    }

    pub fn text(&self) -> String {
        if self.operands.is_empty() {
            self.mnemonic.clone()
        } else {
            format!("{} {}", self.mnemonic, self.operands)
        }
    }
}

/// Lowercase two-digit tokens separated by single spaces.
pub fn hex_bytes(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 {
            s.push(' ');
        }
        let _ = write!(s, "{b:02x}");
    }
    s
}

struct Row<'a> {
    record: &'a InstructionRecord,
    hex: String,
    offset: usize,
}

pub fn format(direction: Direction, records: &[InstructionRecord]) -> String {
    format_with(direction, records, DEFAULT_HIGHLIGHT)
}

pub fn format_with(direction: Direction, records: &[InstructionRecord], highlight: &str) -> String {
    // Pass 1: rows with their offsets, and column widths.
    let mut rows = Vec::with_capacity(records.len());
    let mut offset = 0usize;
    let (mut text_w, mut mn_w, mut ops_w) = (0usize, 0usize, 0usize);
    for record in records {
        if record.bytes.is_empty() {
            continue;
        }
        match direction {
            Direction::Assemble => text_w = text_w.max(record.mnemonic.len()),
            Direction::Disassemble => {
                mn_w = mn_w.max(record.mnemonic.len());
                ops_w = ops_w.max(record.operands.len());
            }
        }
        rows.push(Row { record, hex: hex_bytes(&record.bytes), offset });
        offset += record.bytes.len();
    }

    // Pass 2: render.
    let label = match direction {
        Direction::Assemble => "Assembly",
        Direction::Disassemble => "Disassembly",
    };
    let mut out = format!("{label}: {FENCE}{highlight}\n");
    for row in &rows {
        let r = row.record;
        match direction {
            Direction::Assemble => {
                let _ = write!(out, "{:<text_w$}", r.mnemonic);
            }
            Direction::Disassemble => {
                let _ = write!(out, "{:<mn_w$} {:<ops_w$}", r.mnemonic, r.operands);
            }
        }
        let _ = writeln!(out, "  ; +{} = {}", row.offset, row.hex);
    }
    out.push_str(FENCE);
    tracing::debug!(%direction, rows = rows.len(), bytes = offset, "formatted listing");
    out
}
