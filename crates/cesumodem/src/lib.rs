//! A streaming, bidirectional transcoder between UTF-8 and CESU-8.
//!
//! CESU-8 is byte-compatible with UTF-8 for codepoints up to U+FFFF, but
//! encodes each supplementary-plane codepoint as two 3-byte units holding
//! the halves of its UTF-16 surrogate pair instead of one 4-byte run.
//! Database wire protocols (notably SAP HANA's) mandate it for text
//! parameters and results.
//!
//! The two directions are exposed as stateless span-level transforms that
//! can be called repeatedly across buffer boundaries: each call reports how
//! many bytes of each span it used, and recoverable stalls
//! ([`TransformResult::ShortDst`], [`TransformResult::ShortSrc`]) leave the
//! caller free to grow a buffer or append input and retry from the reported
//! offsets. No partial run is ever written.
//!
//! ```rust
//! use cesumodem::{Transform, TransformResult, UTF8_TO_CESU8};
//!
//! let mut dst = [0u8; 8];
//! let (written, consumed, result) = UTF8_TO_CESU8.transform(&mut dst, "😀".as_bytes(), true);
//! assert_eq!(result, TransformResult::Done);
//! assert_eq!((written, consumed), (6, 4));
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod cesu8;
mod conn;
mod error;
mod transform;
mod utf8;


pub use conn::{DbConnectInfo, DriverConn, ServerInfo};
pub use error::TranscodeError;
pub use transform::{
    CESU8_TO_UTF8, Cesu8ToUtf8, Transform, TransformResult, UTF8_TO_CESU8, Utf8ToCesu8,
};
