#![warn(missing_docs)]
//! # Bit patterns
//!
//! This crate renders bytes as the digits of their base-2 representation, e.g.
//! the byte `5` becomes the text `101`. The digits are *not* padded to eight
//! positions, so `0` renders as `0` and `255` as `11111111`.
//!
//! ```
//! use bitpattern::Encoder;
//!
//! let encoder = Encoder::new();
//! let text = encoder.encode(b"AB").with_delim(Some(b" ")).to_string();
//! assert_eq!(text, "1000001 1000010");
//! ```
//!
//! Large inputs can be streamed from any [`std::io::Read`] into any
//! [`std::io::Write`] with [`Encoder::convert_and_write`].
//!
//! ## Delimiters
//!
//! Without a delimiter, the rendered values are simply concatenated. This
//! is ambiguous: the bytes `1, 1` and the single byte `3` both render as
//! `11`. Pass a delimiter if the output needs to be split up again.

mod conversion;
mod error;
mod pattern;
mod stream;

pub use conversion::{encode, Conversion};
pub use error::{StreamError, StreamResult};
pub use pattern::{to_bit_pattern, BitPattern};
pub use stream::{Encoder, DEFAULT_BUFFER_LEN};
