//! CESU-8 run-level primitives.
//!
//! CESU-8 encodes the Basic Multilingual Plane exactly as UTF-8 does. A
//! supplementary-plane codepoint is first split into its UTF-16 surrogate
//! pair, and each 16-bit half is then encoded as a 3-byte unit, giving a
//! 6-byte run where UTF-8 would use 4 bytes. 4-byte UTF-8 runs are not
//! valid CESU-8.
//!
//! This module provides the single-run encode/decode steps the span-level
//! transforms are built from, plus whole-string conveniences for callers
//! that hold complete values (e.g. a driver encoding one text parameter).

use alloc::{string::String, vec::Vec};

use crate::error::TranscodeError;

/// Longest CESU-8 run: a surrogate pair of two 3-byte units.
pub const MAX_RUN_LEN: usize = 6;

const TAG_CONT: u8 = 0b1000_0000;
const HIGH_SUR_MIN: u32 = 0xD800;
const LOW_SUR_MIN: u32 = 0xDC00;
const LOW_SUR_MAX: u32 = 0xDFFF;
const SUPPLEMENTARY_BASE: u32 = 0x1_0000;

/// Number of bytes `ch` occupies when encoded as CESU-8.
#[must_use]
pub fn char_len(ch: char) -> usize {
    if (ch as u32) < SUPPLEMENTARY_BASE {
        ch.len_utf8()
    } else {
        MAX_RUN_LEN
    }
}

/// Encodes `ch` into the front of `dst`, returning the number of bytes
/// written.
///
/// # Panics
///
/// Panics if `dst` is shorter than [`char_len`]`(ch)` bytes.
pub fn encode_char(dst: &mut [u8], ch: char) -> usize {
    let cp = ch as u32;
    if cp < SUPPLEMENTARY_BASE {
        ch.encode_utf8(dst).len()
    } else {
        let offset = cp - SUPPLEMENTARY_BASE;
        encode_unit(dst, HIGH_SUR_MIN + (offset >> 10));
        encode_unit(&mut dst[3..], LOW_SUR_MIN + (offset & 0x3FF));
        MAX_RUN_LEN
    }
}

// One 3-byte unit for a 16-bit surrogate half.
fn encode_unit(dst: &mut [u8], half: u32) {
    dst[0] = 0xE0 | (half >> 12) as u8;
    dst[1] = TAG_CONT | ((half >> 6) & 0x3F) as u8;
    dst[2] = TAG_CONT | (half & 0x3F) as u8;
}

/// Outcome of decoding the leading CESU-8 run of a byte span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Run {
    /// A complete codepoint and the number of source bytes it occupies.
    Char {
        /// The decoded codepoint.
        ch: char,
        /// Bytes the run occupies in the source, up to [`MAX_RUN_LEN`].
        len: usize,
    },
    /// The span ends partway through a well-formed run; more bytes are
    /// needed before it can be judged.
    Incomplete,
    /// The leading `len` bytes do not form a valid run.
    Invalid {
        /// Length of the offending run.
        len: usize,
    },
}

/// Decodes the leading CESU-8 run of `src`.
///
/// A run is either a single 1–3 byte unit or two consecutive 3-byte units
/// forming a high/low surrogate pair, which is reassembled into the one
/// codepoint it stands for. An unpaired surrogate half whose successor has
/// fully arrived is `Invalid`; one whose successor may still be in flight
/// is `Incomplete`.
#[must_use]
pub fn decode(src: &[u8]) -> Run {
    let Some(&lead) = src.first() else {
        return Run::Incomplete;
    };
    match lead {
        0x00..=0x7F => Run::Char {
            ch: lead as char,
            len: 1,
        },
        0xC2..=0xDF => decode_two(src, lead),
        0xE0..=0xEF => decode_three(src, lead),
        // Continuation byte, overlong lead, or a 4-byte UTF-8 lead, which
        // CESU-8 forbids.
        _ => Run::Invalid { len: 1 },
    }
}

fn decode_two(src: &[u8], lead: u8) -> Run {
    match src.get(1) {
        None => Run::Incomplete,
        Some(&cont) if !is_cont(cont) => Run::Invalid { len: 1 },
        Some(&cont) => Run::Char {
            ch: scalar((u32::from(lead & 0x1F) << 6) | u32::from(cont & 0x3F)),
            len: 2,
        },
    }
}

fn decode_three(src: &[u8], lead: u8) -> Run {
    // 0xE0 with a continuation below 0xA0 would be overlong. 0xED takes
    // the full continuation range: surrogate halves are legal units here,
    // unlike in UTF-8 proper.
    if let Some(&c1) = src.get(1) {
        let c1_ok = if lead == 0xE0 {
            (0xA0..=0xBF).contains(&c1)
        } else {
            is_cont(c1)
        };
        if !c1_ok {
            return Run::Invalid { len: 1 };
        }
    } else {
        return Run::Incomplete;
    }
    let Some(&c2) = src.get(2) else {
        return Run::Incomplete;
    };
    if !is_cont(c2) {
        return Run::Invalid { len: 2 };
    }

    let unit =
        (u32::from(lead & 0x0F) << 12) | (u32::from(src[1] & 0x3F) << 6) | u32::from(c2 & 0x3F);
    if unit < HIGH_SUR_MIN || unit > LOW_SUR_MAX {
        return Run::Char {
            ch: scalar(unit),
            len: 3,
        };
    }
    if unit >= LOW_SUR_MIN {
        // A low half with no preceding high half.
        return Run::Invalid { len: 3 };
    }
    decode_pair(src, unit)
}

// `src[..3]` decoded to the high half `high`; the matching low half must
// follow as another 3-byte unit.
fn decode_pair(src: &[u8], high: u32) -> Run {
    // Low halves encode as ED B0..BF 80..BF. Judge the trailing unit byte
    // by byte so that a truncated span stalls only while a valid low half
    // is still possible.
    match src.get(3) {
        None => return Run::Incomplete,
        Some(&0xED) => {}
        Some(_) => return Run::Invalid { len: 3 },
    }
    match src.get(4) {
        None => return Run::Incomplete,
        Some(c) if (0xB0..=0xBF).contains(c) => {}
        Some(_) => return Run::Invalid { len: 3 },
    }
    let Some(&c2) = src.get(5) else {
        return Run::Incomplete;
    };
    if !is_cont(c2) {
        return Run::Invalid { len: 3 };
    }

    let low = 0xD000 | (u32::from(src[4] & 0x3F) << 6) | u32::from(c2 & 0x3F);
    let cp = SUPPLEMENTARY_BASE + ((high - HIGH_SUR_MIN) << 10) + (low - LOW_SUR_MIN);
    Run::Char {
        ch: scalar(cp),
        len: MAX_RUN_LEN,
    }
}

fn is_cont(b: u8) -> bool {
    b & 0xC0 == TAG_CONT
}

// Every value reaching this point lies in a range `char` covers: 2- and
// 3-byte units outside the surrogate block, and reassembled pairs in
// [0x1_0000, 0x10FFFF]. Anything else is a defect in the decode tables,
// not bad input, and must not surface as a recoverable error.
fn scalar(cp: u32) -> char {
    match char::from_u32(cp) {
        Some(ch) => ch,
        None => unreachable!("decoded non-scalar {cp:#x}"),
    }
}

/// Number of bytes `s` occupies when encoded as CESU-8.
#[must_use]
pub fn encoded_len(s: &str) -> usize {
    s.chars().map(char_len).sum()
}

/// Encodes `s` as CESU-8.
#[must_use]
pub fn encode_str(s: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(s));
    let mut buf = [0u8; MAX_RUN_LEN];
    for ch in s.chars() {
        let n = encode_char(&mut buf, ch);
        out.extend_from_slice(&buf[..n]);
    }
    out
}

/// Decodes a complete CESU-8 byte sequence into a `String`.
///
/// # Errors
///
/// Returns [`TranscodeError::InvalidCesu8`] if `src` contains a malformed
/// run, an unpaired surrogate half, or a run truncated by the end of the
/// sequence.
pub fn decode_to_string(src: &[u8]) -> Result<String, TranscodeError> {
    let mut out = String::with_capacity(src.len());
    let mut i = 0;
    while i < src.len() {
        match decode(&src[i..]) {
            Run::Char { ch, len } => {
                out.push(ch);
                i += len;
            }
            // The sequence is complete by contract, so a trailing partial
            // run is a truncation fault, not a stall.
            Run::Incomplete => {
                return Err(TranscodeError::InvalidCesu8 {
                    at: i,
                    run: src[i..].to_vec(),
                });
            }
            Run::Invalid { len } => {
                return Err(TranscodeError::InvalidCesu8 {
                    at: i,
                    run: src[i..i + len].to_vec(),
                });
            }
        }
    }
    Ok(out)
}
