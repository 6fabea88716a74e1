//! Capability markers for [`BinaryStream`](crate::BinaryStream).
//!
//! The mode decides at compile time which operations a stream offers and
//! how its read and write cursors relate:
//!
//! | Mode               | read | write | cursors                     |
//! |--------------------|------|-------|-----------------------------|
//! | [`Input`]          | yes  | no    | read only                   |
//! | [`Output`]         | no   | yes   | write only                  |
//! | [`Synchronized`]   | yes  | yes   | always equal                |
//! | [`Unsynchronized`] | yes  | yes   | independent                 |
//!
//! ```compile_fail
//! use binstream::{BinaryStream, Input};
//! use std::io::Cursor;
//!
//! let mut stream = BinaryStream::<_, Input>::new(Cursor::new(vec![0u8; 4])).unwrap();
//! stream.write(&1u16).unwrap(); // input-only streams have no `write`
//! ```
//!
//! ```compile_fail
//! use binstream::{BinaryStream, Unsynchronized};
//! use std::io::Cursor;
//!
//! let stream = BinaryStream::<_, Unsynchronized>::new(Cursor::new(Vec::new())).unwrap();
//! stream.tell(); // ambiguous: use `tell_input` or `tell_output`
//! ```

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Input {}
    impl Sealed for super::Output {}
    impl Sealed for super::Synchronized {}
    impl Sealed for super::Unsynchronized {}
}

/// A stream capability set.
pub trait Mode: sealed::Sealed {
    /// The stream has a read cursor.
    const INPUT: bool;
    /// The stream has a write cursor.
    const OUTPUT: bool;
    /// Reads and writes move both cursors together.
    const SYNCHRONIZED: bool;
    /// Short name used in log output.
    const NAME: &'static str;

    /// Both cursors exist and move independently, so the channel has to be
    /// repositioned before every transfer.
    const INDEPENDENT: bool = Self::INPUT && Self::OUTPUT && !Self::SYNCHRONIZED;
}

/// Modes that can read.
pub trait Readable: Mode {}

/// Modes that can write.
pub trait Writable: Mode {}

/// Modes with a single observable position, reported by `tell()`.
pub trait Unified: Mode {}

/// Read-only access to the channel.
#[derive(Debug)]
pub enum Input {}

/// Write-only access to the channel.
#[derive(Debug)]
pub enum Output {}

/// Read and write access sharing one cursor.
#[derive(Debug)]
pub enum Synchronized {}

/// Read and write access with separate cursors.
#[derive(Debug)]
pub enum Unsynchronized {}

impl Mode for Input {
    const INPUT: bool = true;
    const OUTPUT: bool = false;
    const SYNCHRONIZED: bool = false;
    const NAME: &'static str = "input";
}

impl Mode for Output {
    const INPUT: bool = false;
    const OUTPUT: bool = true;
    const SYNCHRONIZED: bool = false;
    const NAME: &'static str = "output";
}

impl Mode for Synchronized {
    const INPUT: bool = true;
    const OUTPUT: bool = true;
    const SYNCHRONIZED: bool = true;
    const NAME: &'static str = "synchronized";
}

impl Mode for Unsynchronized {
    const INPUT: bool = true;
    const OUTPUT: bool = true;
    const SYNCHRONIZED: bool = false;
    const NAME: &'static str = "unsynchronized";
}

impl Readable for Input {}
impl Readable for Synchronized {}
impl Readable for Unsynchronized {}

impl Writable for Output {}
impl Writable for Synchronized {}
impl Writable for Unsynchronized {}

impl Unified for Input {}
impl Unified for Output {}
impl Unified for Synchronized {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_unsynchronized_is_independent() {
        assert!(!Input::INDEPENDENT);
        assert!(!Output::INDEPENDENT);
        assert!(!Synchronized::INDEPENDENT);
        assert!(Unsynchronized::INDEPENDENT);
    }
}
