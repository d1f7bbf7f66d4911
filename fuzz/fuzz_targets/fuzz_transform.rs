#![no_main]
use arbitrary::Arbitrary;
use cesumodem::{CESU8_TO_UTF8, Transform, TransformResult, UTF8_TO_CESU8, cesu8};
use libfuzzer_sys::fuzz_target;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[derive(Arbitrary, Debug)]
struct FuzzInput<'a> {
    dst_cap: u8,
    chunk_seed: u32,
    payload: &'a [u8],
}

fuzz_target!(|input: FuzzInput| run(&input));

/// Pump `src` through `t` in randomly sized chunks with a small, drained
/// destination buffer. Returns the collected output, or `None` if the
/// transform reported malformed input.
///
/// Panics if a call stops making progress, which would mean a stalled run
/// neither fits the (full-run-sized) destination nor consumes input.
fn pump<T: Transform>(t: &T, src: &[u8], rng: &mut SmallRng, dst_cap: usize) -> Option<Vec<u8>> {
    let mut buf = vec![0u8; dst_cap.max(cesu8::MAX_RUN_LEN)];
    let mut out = Vec::new();
    let mut pending: Vec<u8> = Vec::new();
    let mut fed = 0;

    while fed < src.len() || !pending.is_empty() {
        if fed < src.len() {
            let take = rng.random_range(1..=src.len() - fed);
            pending.extend_from_slice(&src[fed..fed + take]);
            fed += take;
        }
        let at_eof = fed == src.len();
        loop {
            let (written, consumed, result) = t.transform(&mut buf, &pending, at_eof);
            out.extend_from_slice(&buf[..written]);
            pending.drain(..consumed);
            // The buffer holds a full run, so a stall that neither wrote
            // nor consumed anything can never be a destination problem.
            assert!(
                written + consumed > 0 || !matches!(result, TransformResult::ShortDst),
                "no progress with a drained full-run destination"
            );
            match result {
                TransformResult::Done => break,
                TransformResult::ShortDst => {}
                TransformResult::ShortSrc => {
                    if at_eof {
                        // Truncated tail; nothing more will arrive.
                        return Some(out);
                    }
                    break;
                }
                TransformResult::Malformed(_) => return None,
            }
        }
    }
    Some(out)
}

fn run(input: &FuzzInput) {
    let mut rng = SmallRng::seed_from_u64(u64::from(input.chunk_seed));
    let dst_cap = 1 + usize::from(input.dst_cap);

    // Arbitrary bytes through the CESU-8 decoder: must never panic, and
    // every byte it emits must form valid UTF-8.
    if let Some(out) = pump(&CESU8_TO_UTF8, input.payload, &mut rng, dst_cap) {
        assert!(std::str::from_utf8(&out).is_ok(), "emitted broken UTF-8");
    }

    // Valid UTF-8 through the encoder and back: must round-trip exactly.
    if let Ok(text) = std::str::from_utf8(input.payload) {
        let encoded = pump(&UTF8_TO_CESU8, text.as_bytes(), &mut rng, dst_cap)
            .expect("valid UTF-8 rejected");
        assert_eq!(encoded, cesu8::encode_str(text));

        let decoded = pump(&CESU8_TO_UTF8, &encoded, &mut rng, dst_cap)
            .expect("own CESU-8 output rejected");
        assert_eq!(decoded, text.as_bytes());
    }
}
