//! A cursor-aware binary stream over a seekable channel.

use crate::binary;
use crate::error::{Error, Result};
use crate::mode::{Input, Mode, Output, Readable, Synchronized, Unified, Unsynchronized, Writable};
use crate::text::{CodeUnit, TextCodec};
use crate::traits::{Packable, Unpackable};
use byteorder::{ByteOrder, NativeEndian};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::marker::PhantomData;
use tracing::{debug, trace};

/// Encoding used by callers that do not name one.
pub const DEFAULT_ENCODING: &str = "UTF-8";

/// Packs values into and unpacks values from a byte channel.
///
/// The stream is generic over the channel `S`, a capability [`Mode`] `M`
/// and a byte order `E`. Operations the mode does not support do not exist on
/// the type, so misuse fails to compile rather than at runtime.
///
/// The stream owns `S`. To keep using a channel afterwards, pass `&mut
/// channel`, since `&mut T` forwards `Read`, `Write` and `Seek`. The stream
/// assumes it is the channel's only user while it is alive: seeking or
/// transferring through the channel directly leaves the tracked cursors
/// stale. Like the channel itself, a stream is not meant to be shared between
/// threads without outside locking.
///
/// ```rust
/// use binstream::{BinaryStream, LittleEndian, Synchronized};
/// use std::io::Cursor;
///
/// let mut stream = BinaryStream::<_, Synchronized, LittleEndian>::new(Cursor::new(Vec::new()))?;
/// stream.write(&0x0123u16)?;
/// assert_eq!(stream.tell(), 2);
///
/// stream.to_begin(0)?;
/// assert_eq!(stream.read::<u16>()?, 0x0123);
/// assert_eq!(stream.tell_input(), 2);
/// # Ok::<(), binstream::Error>(())
/// ```
#[derive(Debug)]
pub struct BinaryStream<S, M: Mode = Synchronized, E: ByteOrder = NativeEndian> {
    inner: S,
    input: u64,
    output: u64,
    codec: TextCodec,
    _phantom: PhantomData<(M, E)>,
}

/// A read-only [`BinaryStream`].
pub type BinaryInputStream<S, E = NativeEndian> = BinaryStream<S, Input, E>;

/// A write-only [`BinaryStream`].
pub type BinaryOutputStream<S, E = NativeEndian> = BinaryStream<S, Output, E>;

impl<S: Read + Seek, E: ByteOrder> BinaryStream<S, Input, E> {
    /// Creates a read-only stream starting at the channel's current position.
    pub fn new(inner: S) -> Result<Self> {
        Self::open(inner)
    }
}

impl<S: Write + Seek, E: ByteOrder> BinaryStream<S, Output, E> {
    /// Creates a write-only stream starting at the channel's current position.
    pub fn new(inner: S) -> Result<Self> {
        Self::open(inner)
    }
}

impl<S: Read + Write + Seek, E: ByteOrder> BinaryStream<S, Synchronized, E> {
    /// Creates a stream whose read and write cursors both start at, and stay
    /// at, the same position.
    pub fn new(inner: S) -> Result<Self> {
        Self::open(inner)
    }
}

impl<S: Read + Write + Seek, E: ByteOrder> BinaryStream<S, Unsynchronized, E> {
    /// Creates a stream whose read and write cursors both start at the
    /// channel's current position and then move independently.
    pub fn new(inner: S) -> Result<Self> {
        Self::open(inner)
    }
}

impl<S, M: Mode, E: ByteOrder> BinaryStream<S, M, E> {
    /// Replaces the text codec used by the string operations.
    pub fn with_codec(mut self, codec: TextCodec) -> Self {
        debug!(mode = M::NAME, converting = codec.is_converting(), "binary stream codec set");
        self.codec = codec;
        self
    }

    /// The text codec used by the string operations.
    pub fn codec(&self) -> &TextCodec {
        &self.codec
    }

    /// Gets a reference to the underlying channel.
    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    /// Gets a mutable reference to the underlying channel.
    ///
    /// Moving the channel's position through this reference desynchronizes
    /// the stream's cursors.
    pub fn get_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Consumes the stream, returning the underlying channel.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: Seek, M: Mode, E: ByteOrder> BinaryStream<S, M, E> {
    fn open(mut inner: S) -> Result<Self> {
        let position = inner.stream_position()?;
        debug!(mode = M::NAME, position, "binary stream opened");
        Ok(Self {
            inner,
            input: position,
            output: position,
            codec: TextCodec::raw(),
            _phantom: PhantomData,
        })
    }

    /// Moves the stream's cursors.
    ///
    /// A synchronized or single-cursor stream moves the channel once and
    /// adopts the result for every cursor it has. An unsynchronized stream
    /// applies `pos` to each cursor separately, so `SeekFrom::Current` is
    /// relative to each cursor's own position.
    pub fn seek(&mut self, pos: SeekFrom) -> Result<()> {
        if M::INDEPENDENT {
            // Both targets must resolve before either cursor moves.
            let input = self.reposition(self.input, pos)?;
            let output = self.reposition(self.output, pos)?;
            self.input = input;
            self.output = output;
        } else {
            let position = self.inner.seek(pos)?;
            self.input = position;
            self.output = position;
        }
        trace!(mode = M::NAME, input = self.input, output = self.output, "binary stream seek");
        Ok(())
    }

    /// Moves to `offset` bytes from the start of the channel.
    pub fn to_begin(&mut self, offset: u64) -> Result<()> {
        self.seek(SeekFrom::Start(offset))
    }

    /// Moves to `offset` bytes from the end of the channel. Use a negative
    /// offset to land before the end.
    pub fn to_end(&mut self, offset: i64) -> Result<()> {
        self.seek(SeekFrom::End(offset))
    }

    /// Moves `offset` bytes from the current position.
    pub fn skip(&mut self, offset: i64) -> Result<()> {
        self.seek(SeekFrom::Current(offset))
    }

    /// Applies `pos` as if the channel were at `from`.
    fn reposition(&mut self, from: u64, pos: SeekFrom) -> Result<u64> {
        if !matches!(pos, SeekFrom::Start(_)) {
            self.inner.seek(SeekFrom::Start(from))?;
        }
        Ok(self.inner.seek(pos)?)
    }

    /// Adopts the channel's reported position after a failed transfer.
    fn resync(&mut self, input: bool) {
        match self.inner.stream_position() {
            Ok(position) => {
                if input || M::SYNCHRONIZED {
                    self.input = position;
                }
                if !input || M::SYNCHRONIZED {
                    self.output = position;
                }
                trace!(mode = M::NAME, input = self.input, output = self.output, "binary stream resync");
            }
            Err(error) => {
                debug!(
                    mode = M::NAME,
                    %error,
                    input = self.input,
                    output = self.output,
                    "binary stream resync failed, cursors unchanged"
                );
            }
        }
    }
}

impl<S, M: Unified, E: ByteOrder> BinaryStream<S, M, E> {
    /// The stream's position.
    pub fn tell(&self) -> u64 {
        if M::INPUT {
            self.input
        } else {
            self.output
        }
    }
}

impl<S: Read + Seek, M: Readable, E: ByteOrder> BinaryStream<S, M, E> {
    /// The read cursor's position.
    pub fn tell_input(&self) -> u64 {
        self.input
    }

    /// Moves only the read cursor, unless the stream is synchronized.
    pub fn seek_input(&mut self, pos: SeekFrom) -> Result<()> {
        if M::INDEPENDENT {
            self.input = self.reposition(self.input, pos)?;
        } else {
            self.input = self.inner.seek(pos)?;
            if M::SYNCHRONIZED {
                self.output = self.input;
            }
        }
        trace!(mode = M::NAME, input = self.input, "binary stream input seek");
        Ok(())
    }

    /// Whether the read cursor is at or past the end of the channel.
    pub fn eof(&mut self) -> Result<bool> {
        let end = self.inner.seek(SeekFrom::End(0))?;
        self.inner.seek(SeekFrom::Start(self.input))?;
        Ok(self.input >= end)
    }

    /// Reads exactly `buf.len()` bytes.
    ///
    /// Running out of data fails with [`Error::UnexpectedEof`]; the stream
    /// neither retries nor pads.
    pub fn read_raw_into(&mut self, buf: &mut [u8]) -> Result<()> {
        if M::INDEPENDENT {
            self.inner.seek(SeekFrom::Start(self.input))?;
        }
        if let Err(e) = self.inner.read_exact(buf) {
            self.resync(true);
            return Err(match e.kind() {
                io::ErrorKind::UnexpectedEof => Error::UnexpectedEof,
                _ => e.into(),
            });
        }
        self.input += buf.len() as u64;
        if M::SYNCHRONIZED {
            self.output = self.input;
        }
        trace!(mode = M::NAME, len = buf.len(), input = self.input, "binary stream read");
        Ok(())
    }

    /// Reads `length` bytes into a new buffer.
    pub fn read_raw(&mut self, length: usize) -> Result<Vec<u8>> {
        let mut data = vec![0u8; length];
        self.read_raw_into(&mut data)?;
        Ok(data)
    }

    /// Reads one value, or a tuple of values, of type `T`.
    ///
    /// ```rust
    /// use binstream::{BinaryStream, BigEndian, Input};
    /// use std::io::Cursor;
    ///
    /// let data = Cursor::new(vec![0x01, 0x23, 0x01, 0x23, 0x45, 0x67]);
    /// let mut stream = BinaryStream::<_, Input, BigEndian>::new(data)?;
    /// let (b, c) = stream.read::<(u16, u32)>()?;
    /// assert_eq!((b, c), (0x0123, 0x01234567));
    /// assert!(stream.eof()?);
    /// # Ok::<(), binstream::Error>(())
    /// ```
    pub fn read<T: Unpackable>(&mut self) -> Result<T> {
        let raw = self.read_raw(T::SIZE)?;
        binary::from_bytes::<E, T>(&raw)
    }

    /// Reads `length` bytes and decodes them from `encoding` into code units `U`.
    pub fn read_text<U: CodeUnit>(&mut self, length: usize, encoding: &str) -> Result<Vec<U>> {
        let raw = self.read_raw(length)?;
        self.codec.decode(&raw, encoding)
    }

    /// Reads `length` bytes and decodes them from `encoding` into a string.
    pub fn read_string(&mut self, length: usize, encoding: &str) -> Result<String> {
        let raw = self.read_raw(length)?;
        self.codec.decode_string(&raw, encoding)
    }
}

impl<S: Write + Seek, M: Writable, E: ByteOrder> BinaryStream<S, M, E> {
    /// The write cursor's position.
    pub fn tell_output(&self) -> u64 {
        self.output
    }

    /// Moves only the write cursor, unless the stream is synchronized.
    pub fn seek_output(&mut self, pos: SeekFrom) -> Result<()> {
        if M::INDEPENDENT {
            self.output = self.reposition(self.output, pos)?;
        } else {
            self.output = self.inner.seek(pos)?;
            if M::SYNCHRONIZED {
                self.input = self.output;
            }
        }
        trace!(mode = M::NAME, output = self.output, "binary stream output seek");
        Ok(())
    }

    /// Whether the write cursor is at or past the end of the channel, so the
    /// next write appends.
    pub fn eof_output(&mut self) -> Result<bool> {
        let end = self.inner.seek(SeekFrom::End(0))?;
        self.inner.seek(SeekFrom::Start(self.output))?;
        Ok(self.output >= end)
    }

    /// Writes all of `data`.
    pub fn write_raw(&mut self, data: &[u8]) -> Result<()> {
        if M::INDEPENDENT {
            self.inner.seek(SeekFrom::Start(self.output))?;
        }
        if let Err(e) = self.inner.write_all(data) {
            self.resync(false);
            return Err(e.into());
        }
        self.output += data.len() as u64;
        if M::SYNCHRONIZED {
            self.input = self.output;
        }
        trace!(mode = M::NAME, len = data.len(), output = self.output, "binary stream write");
        Ok(())
    }

    /// Writes one value, or a tuple of values.
    pub fn write<T: Packable>(&mut self, value: &T) -> Result<()> {
        self.write_raw(&binary::to_bytes::<E, T>(value))
    }

    /// Encodes code units `U` into `encoding` and writes the result.
    pub fn write_text<U: CodeUnit>(&mut self, text: &[U], encoding: &str) -> Result<()> {
        let raw = self.codec.encode(text, encoding)?;
        self.write_raw(&raw)
    }

    /// Encodes a string into `encoding` and writes the result.
    pub fn write_string(&mut self, text: &str, encoding: &str) -> Result<()> {
        let raw = self.codec.encode_str(text, encoding)?;
        self.write_raw(&raw)
    }

    /// Flushes the underlying channel.
    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()?;
        Ok(())
    }
}
