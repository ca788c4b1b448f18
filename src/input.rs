//! Turning raw argument text into engine input.

use crate::error::Error;

/// Assembly statement terminator.
pub const STATEMENT_DELIMITER: char = ';';

/// Rejoins the argument list after the architecture name.
pub fn join_args<S: AsRef<str>>(args: &[S]) -> String {
    args.iter().map(|a| a.as_ref()).collect::<Vec<&str>>().join(" ")
}

/// Splits on `;` and trims every segment. Empty input gives one empty segment.
pub fn split_instructions(raw: &str) -> Vec<&str> {
    raw.split(STATEMENT_DELIMITER).map(str::trim).collect()
}

/// Strips cosmetic separators (`;`, `0x`, whitespace) from opcode text.
///
/// `;` is removed before `0x`, so `0;x90` becomes `90`.
pub fn normalize_hex(raw: &str) -> String {
    raw.replace(STATEMENT_DELIMITER, "")
        .replace("0x", "")
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect()
}

pub fn decode_hex(normalized: &str) -> Result<Vec<u8>, Error> {
    if normalized.is_empty() {
        return Err(Error::MalformedInput { detail: "no opcodes given".into() });
    }
    hex::decode(normalized).map_err(|e| Error::MalformedInput { detail: e.to_string() })
}
