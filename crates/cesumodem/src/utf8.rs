//! UTF-8 run classification over raw byte spans.
//!
//! The transforms need one distinction that lossy decoders blur: a span
//! that *ends in the middle* of a well-formed run must stall for more
//! input, while a malformed run must fail. `core::str::from_utf8` reports
//! exactly that split through [`core::str::Utf8Error::error_len`], so the
//! classification rides on the standard validator instead of a hand-rolled
//! state table.

/// Longest UTF-8 run.
pub(crate) const MAX_RUN_LEN: usize = 4;

/// Outcome of examining the leading run of a byte span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Run {
    /// A complete scalar and the number of source bytes it occupies.
    Char { ch: char, len: usize },
    /// The span ends partway through a well-formed run.
    Incomplete,
    /// The leading bytes can never begin a valid run.
    Invalid,
}

/// Decodes the leading UTF-8 run of `src`.
///
/// Only the first [`MAX_RUN_LEN`] bytes are examined, so validation cost
/// does not depend on the span length. `Incomplete` is returned only when
/// the truncated bytes could still grow into a valid run; a run whose
/// present bytes are already malformed is `Invalid` even at the end of the
/// span.
pub(crate) fn decode(src: &[u8]) -> Run {
    let window = &src[..src.len().min(MAX_RUN_LEN)];
    match core::str::from_utf8(window) {
        Ok(s) => first_char(s),
        Err(e) if e.valid_up_to() > 0 => {
            // The leading run is complete; the error belongs to a later one.
            match core::str::from_utf8(&window[..e.valid_up_to()]) {
                Ok(s) => first_char(s),
                Err(_) => unreachable!("prefix vouched for by from_utf8"),
            }
        }
        Err(e) => match e.error_len() {
            Some(_) => Run::Invalid,
            // `error_len() == None` means the window ended mid-run. The
            // window only falls short of MAX_RUN_LEN when it is the whole
            // remaining span, so this is a genuine truncation.
            None => Run::Incomplete,
        },
    }
}

fn first_char(s: &str) -> Run {
    match s.chars().next() {
        Some(ch) => Run::Char {
            ch,
            len: ch.len_utf8(),
        },
        None => Run::Incomplete,
    }
}

#[cfg(test)]
mod tests {
    use super::{Run, decode};

    #[test]
    fn ascii_and_multibyte_runs() {
        assert_eq!(decode(b"a"), Run::Char { ch: 'a', len: 1 });
        assert_eq!(decode("é".as_bytes()), Run::Char { ch: 'é', len: 2 });
        assert_eq!(decode("☃".as_bytes()), Run::Char { ch: '☃', len: 3 });
        assert_eq!(decode("😀x".as_bytes()), Run::Char { ch: '😀', len: 4 });
    }

    #[test]
    fn truncated_run_is_incomplete() {
        let snowman = "☃".as_bytes();
        assert_eq!(decode(&snowman[..1]), Run::Incomplete);
        assert_eq!(decode(&snowman[..2]), Run::Incomplete);
    }

    #[test]
    fn malformed_run_is_invalid_even_when_short() {
        // Lone continuation byte.
        assert_eq!(decode(&[0x80]), Run::Invalid);
        // Overlong lead.
        assert_eq!(decode(&[0xC0, 0xAF]), Run::Invalid);
        // 0xE0 requires a continuation in 0xA0..=0xBF; 0x41 settles the
        // matter before the run is even complete.
        assert_eq!(decode(&[0xE0, 0x41]), Run::Invalid);
        // UTF-8 proper rejects encoded surrogate halves.
        assert_eq!(decode(&[0xED, 0xA0, 0xBD]), Run::Invalid);
    }

    #[test]
    fn only_the_leading_run_is_judged() {
        // Second run is malformed; the first still decodes.
        assert_eq!(decode(&[b'a', 0xFF]), Run::Char { ch: 'a', len: 1 });
    }
}
