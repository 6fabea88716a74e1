use std::io::{Read, Result, Seek, SeekFrom, Write};

pub struct FaultyChannel<S> {
    inner: S,
    mode: FaultMode,
    counter: usize,
}

pub enum FaultMode {
    OneByteChunks,
    InterruptedEvery(usize),
    PrematureEofAt(usize),
    BrokenPipeAfter(usize),
}

impl<S> FaultyChannel<S> {
    pub fn new(inner: S, mode: FaultMode) -> Self {
        Self {
            inner,
            mode,
            counter: 0,
        }
    }

    #[allow(dead_code)]
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: Read> Read for FaultyChannel<S> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        self.counter += 1;
        match self.mode {
            FaultMode::OneByteChunks if !buf.is_empty() => self.inner.read(&mut buf[..1]),
            FaultMode::InterruptedEvery(n) if n != 0 && self.counter % n == 0 => {
                Err(std::io::Error::from(std::io::ErrorKind::Interrupted))
            }
            FaultMode::PrematureEofAt(n) if self.counter >= n => Ok(0),
            _ => self.inner.read(buf),
        }
    }
}

impl<S: Write> Write for FaultyChannel<S> {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.counter += 1;
        match self.mode {
            FaultMode::OneByteChunks if !buf.is_empty() => self.inner.write(&buf[..1]),
            FaultMode::BrokenPipeAfter(n) if self.counter > n => Err(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "Simulated I/O error",
            )),
            _ => self.inner.write(buf),
        }
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.flush()
    }
}

impl<S: Seek> Seek for FaultyChannel<S> {
    fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        self.inner.seek(pos)
    }
}
