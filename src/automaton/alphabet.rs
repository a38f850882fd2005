//! The fixed input alphabet and its dense symbol indexing.
//!
//! The automaton operates over exactly 36 symbols: lowercase ASCII letters
//! followed by ASCII digits. Every per-state table in the automaton is a
//! dense array indexed by the symbol's position in this alphabet, so the
//! mapping here is the single place a raw input byte is interpreted.

use crate::KeyscanError;

/// Number of symbols in the alphabet.
pub const SIGMA: usize = 36;

/// The alphabet in index order: `a`-`z` at 0..26, `0`-`9` at 26..36.
pub const ALPHABET: [u8; SIGMA] = [
    b'a', b'b', b'c', b'd', b'e', b'f', b'g', b'h', b'i', b'j', b'k', b'l', b'm', b'n', b'o',
    b'p', b'q', b'r', b's', b't', b'u', b'v', b'w', b'x', b'y', b'z', b'0', b'1', b'2', b'3',
    b'4', b'5', b'6', b'7', b'8', b'9',
];

/// Map a raw byte to its dense alphabet index, or `None` if the byte is
/// outside the alphabet.
#[inline]
pub fn sym_index(byte: u8) -> Option<usize> {
    match byte {
        b'a'..=b'z' => Some((byte - b'a') as usize),
        b'0'..=b'9' => Some(26 + (byte - b'0') as usize),
        _ => None,
    }
}

/// Map a raw byte to its alphabet index, surfacing an out-of-alphabet byte
/// as the error the build/scan boundary reports.
#[inline]
pub(crate) fn require_sym(byte: u8) -> Result<usize, KeyscanError> {
    sym_index(byte).ok_or(KeyscanError::InvalidAlphabet(byte as char))
}
