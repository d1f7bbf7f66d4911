//! The two directional span-level transforms.
//!
//! Each direction is a single left-to-right scan. Per step it consumes
//! exactly one full source run and produces exactly one full destination
//! run (or one ASCII byte on the shared fast path), so a stalled call
//! never leaves a partial run in either span. All resume state lives with
//! the caller: a call reports how much of each span it used, and retrying
//! from those offsets continues the stream.

use crate::{TranscodeError, cesu8, utf8};

/// Outcome of a single [`Transform::transform`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransformResult {
    /// The entire source span was consumed.
    Done,
    /// The destination cannot hold the next full run. Nothing was consumed
    /// or written for the stalled run; drain or grow the destination and
    /// retry from the returned offsets.
    ShortDst,
    /// The source span ends partway through a run. Append further input
    /// after the unconsumed tail and retry. A persistent `ShortSrc` at
    /// true end of stream is a truncation only the caller can judge.
    ShortSrc,
    /// The source contains bytes that are not valid in its encoding. The
    /// stream cannot be resumed past this point.
    Malformed(TranscodeError),
}

/// A stateless, reentrant byte-span transform.
///
/// Implementations are pure functions of their arguments and hold no
/// fields, so one instance may serve any number of threads concurrently as
/// long as the span pairs themselves are not shared.
pub trait Transform {
    /// Transcodes from the front of `src` into the front of `dst`,
    /// returning `(written, consumed, result)`.
    ///
    /// `at_eof` marks `src` as the final chunk of the stream. Neither
    /// direction changes behavior on it today: see
    /// [`TransformResult::ShortSrc`].
    fn transform(&self, dst: &mut [u8], src: &[u8], at_eof: bool)
    -> (usize, usize, TransformResult);

    /// Resets any internal state. The transforms here hold none, so the
    /// default is a no-op.
    fn reset(&self) {}
}

/// Transforms UTF-8 into CESU-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct Utf8ToCesu8;

/// Transforms CESU-8 into UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cesu8ToUtf8;

/// Process-wide UTF-8 → CESU-8 transform, shareable by reference.
pub static UTF8_TO_CESU8: Utf8ToCesu8 = Utf8ToCesu8;

/// Process-wide CESU-8 → UTF-8 transform, shareable by reference.
pub static CESU8_TO_UTF8: Cesu8ToUtf8 = Cesu8ToUtf8;

impl Transform for Utf8ToCesu8 {
    fn transform(
        &self,
        dst: &mut [u8],
        src: &[u8],
        _at_eof: bool,
    ) -> (usize, usize, TransformResult) {
        let mut i = 0;
        let mut j = 0;
        while i < src.len() {
            if src[i] < 0x80 {
                if j >= dst.len() {
                    return (j, i, TransformResult::ShortDst);
                }
                dst[j] = src[i];
                i += 1;
                j += 1;
                continue;
            }
            match utf8::decode(&src[i..]) {
                utf8::Run::Incomplete => return (j, i, TransformResult::ShortSrc),
                utf8::Run::Invalid => {
                    // The fault offset is `i`, carried by the consumed
                    // count; the caller still owns the bytes themselves.
                    return (
                        j,
                        i,
                        TransformResult::Malformed(TranscodeError::InvalidUtf8),
                    );
                }
                utf8::Run::Char { ch, len } => {
                    let out = cesu8::char_len(ch);
                    if j + out > dst.len() {
                        return (j, i, TransformResult::ShortDst);
                    }
                    cesu8::encode_char(&mut dst[j..], ch);
                    i += len;
                    j += out;
                }
            }
        }
        (j, i, TransformResult::Done)
    }
}

impl Transform for Cesu8ToUtf8 {
    fn transform(
        &self,
        dst: &mut [u8],
        src: &[u8],
        _at_eof: bool,
    ) -> (usize, usize, TransformResult) {
        let mut i = 0;
        let mut j = 0;
        while i < src.len() {
            if src[i] < 0x80 {
                if j >= dst.len() {
                    return (j, i, TransformResult::ShortDst);
                }
                dst[j] = src[i];
                i += 1;
                j += 1;
                continue;
            }
            match cesu8::decode(&src[i..]) {
                cesu8::Run::Incomplete => return (j, i, TransformResult::ShortSrc),
                cesu8::Run::Invalid { len } => {
                    let err = TranscodeError::InvalidCesu8 {
                        at: i,
                        run: src[i..i + len].to_vec(),
                    };
                    return (j, i, TransformResult::Malformed(err));
                }
                cesu8::Run::Char { ch, len } => {
                    let out = ch.len_utf8();
                    if j + out > dst.len() {
                        return (j, i, TransformResult::ShortDst);
                    }
                    ch.encode_utf8(&mut dst[j..j + out]);
                    i += len;
                    j += out;
                }
            }
        }
        (j, i, TransformResult::Done)
    }
}
