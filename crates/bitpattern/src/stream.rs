//! # Streaming conversion

use std::{
    io::{self, Read, Write},
    sync::{Mutex, MutexGuard, PoisonError},
};

use log::{debug, trace, warn};

use crate::{
    conversion::{encode, Conversion},
    error::{StreamError, StreamResult},
};

/// The read buffer size used when none (or zero) is requested
pub const DEFAULT_BUFFER_LEN: usize = 8192;

#[derive(Debug, Default)]
struct Buffers {
    read: Vec<u8>,
    out: Vec<u8>,
}

/// Converts bytes into bit patterns, either all at once or streaming.
///
/// The encoder owns the buffers used by [`Encoder::convert_and_write`]. They
/// are locked for the duration of a call, so streaming through a shared
/// encoder from several threads processes one stream after the other.
/// [`Encoder::encode`] does not touch these buffers.
#[derive(Debug, Default)]
pub struct Encoder {
    buffers: Mutex<Buffers>,
}

impl Encoder {
    /// Creates a new encoder; buffers are allocated on first use
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert `bytes` into a [`Conversion`] without a delimiter
    pub fn encode(&self, bytes: &[u8]) -> Conversion<'static> {
        encode(bytes)
    }

    /// Length of the read buffer used by the last streaming call
    pub fn buffer_len(&self) -> usize {
        self.lock().read.len()
    }

    fn lock(&self) -> MutexGuard<'_, Buffers> {
        self.buffers.lock().unwrap_or_else(|poisoned| {
            debug!("Recovering buffers from a panicked stream");
            PoisonError::into_inner(poisoned)
        })
    }

    /// Stream the bit patterns of everything in `src` into `dst`.
    ///
    /// This is [`Encoder::convert_and_write`] for handles that are known to be present.
    pub fn stream<R: Read, W: Write>(
        &self,
        src: R,
        dst: W,
        buf_len: Option<usize>,
        delim: Option<&[u8]>,
    ) -> StreamResult<()> {
        self.convert_and_write(Some(src), Some(dst), buf_len, delim)
    }

    /// Read `src` in chunks of `buf_len` bytes and write the bit patterns to `dst`.
    ///
    /// If `buf_len` is `None` or zero, [`DEFAULT_BUFFER_LEN`] is used. Every
    /// chunk is rendered on its own, so `delim` only appears between values
    /// of the same chunk.
    ///
    /// A single newline is written after the input is exhausted, and also
    /// after a failed read or write. Failing to write that newline is not an
    /// error.
    ///
    /// # Errors
    ///
    /// - [`StreamError::InvalidArgument`] if `src` or `dst` is `None`, before
    ///   any I/O happens
    /// - [`StreamError::Alloc`] if a read buffer of `buf_len` bytes cannot be
    ///   allocated, also before any I/O
    /// - [`StreamError::Read`] for the first failed read, other than
    ///   [`io::ErrorKind::Interrupted`], which is retried
    /// - [`StreamError::Write`] for the first failed write, or if the final
    ///   flush fails
    pub fn convert_and_write<R: Read, W: Write>(
        &self,
        src: Option<R>,
        dst: Option<W>,
        buf_len: Option<usize>,
        delim: Option<&[u8]>,
    ) -> StreamResult<()> {
        let (mut src, mut dst) = match (src, dst) {
            (Some(src), Some(dst)) => (src, dst),
            _ => return Err(StreamError::InvalidArgument),
        };

        let mut buffers = self.lock();
        let Buffers { read, out } = &mut *buffers;

        let len = match buf_len {
            Some(n) if n > 0 => n,
            _ => DEFAULT_BUFFER_LEN,
        };
        read.clear();
        read.try_reserve_exact(len).map_err(StreamError::Alloc)?;
        read.resize(len, 0);
        debug!("Streaming with a {} byte buffer", len);

        let result = pump(&mut src, &mut dst, read, out, delim);

        if let Err(e) = dst.write_all(b"\n") {
            warn!("Failed to write trailing newline: {}", e);
        }
        let flushed = dst.flush().map_err(StreamError::Write);
        result.and(flushed)
    }
}

fn pump<R: Read, W: Write>(
    src: &mut R,
    dst: &mut W,
    read: &mut [u8],
    out: &mut Vec<u8>,
    delim: Option<&[u8]>,
) -> StreamResult<()> {
    let mut total = 0u64;
    loop {
        let n = match src.read(read) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(StreamError::Read(e)),
        };
        trace!("Converting a chunk of {} bytes", n);

        out.clear();
        encode(&read[..n]).with_delim(delim).write_bytes(out);
        dst.write_all(out).map_err(StreamError::Write)?;
        total += n as u64;
    }
    debug!("Reached end of stream after {} bytes", total);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Encoder, DEFAULT_BUFFER_LEN};

    #[test]
    fn test_buffer_len() {
        let encoder = Encoder::new();
        assert_eq!(encoder.buffer_len(), 0);

        let mut out = Vec::new();
        encoder.stream(&b"ab"[..], &mut out, Some(16), None).unwrap();
        assert_eq!(encoder.buffer_len(), 16);

        encoder.stream(&b"ab"[..], &mut out, Some(0), None).unwrap();
        assert_eq!(encoder.buffer_len(), DEFAULT_BUFFER_LEN);

        encoder.stream(&b"ab"[..], &mut out, Some(3), None).unwrap();
        encoder.stream(&b"ab"[..], &mut out, None, None).unwrap();
        assert_eq!(encoder.buffer_len(), DEFAULT_BUFFER_LEN);
    }

    #[test]
    fn test_encode_does_not_allocate_buffers() {
        let encoder = Encoder::new();
        let conversion = encoder.encode(b"\x01\x02").with_delim(Some(b"-"));
        assert_eq!(conversion.to_string(), "1-10");
        assert_eq!(encoder.buffer_len(), 0);
    }

    #[test]
    fn test_recovers_after_panic() {
        use std::io::{self, Read};

        struct Panicking;

        impl Read for Panicking {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                panic!("source exploded");
            }
        }

        let encoder = Encoder::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _ = encoder.stream(Panicking, io::sink(), None, None);
        }));
        assert!(result.is_err());

        let mut out = Vec::new();
        encoder.stream(&[5u8][..], &mut out, None, None).unwrap();
        assert_eq!(out, b"101\n");
    }
}
