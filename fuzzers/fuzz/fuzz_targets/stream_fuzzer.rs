#![no_main]
use binstream::{binary, BigEndian, BinaryStream, TextCodec, Unsynchronized};
use libfuzzer_sys::fuzz_target;
use std::io::{Cursor, SeekFrom};

// Drives an unsynchronized stream with an opcode per input byte. Any input
// must produce errors rather than panics, and a successful transfer moves
// only its own cursor by exactly the bytes transferred.
fuzz_target!(|data: &[u8]| {
    let Some((&first, ops)) = data.split_first() else {
        return;
    };
    let seed = ops.iter().take(usize::from(first)).copied().collect::<Vec<u8>>();
    let Ok(stream) = BinaryStream::<_, Unsynchronized, BigEndian>::new(Cursor::new(seed)) else {
        return;
    };
    let mut stream = stream.with_codec(TextCodec::unicode());

    for chunk in ops.chunks(2) {
        let arg = chunk.get(1).copied().unwrap_or(0);
        let (input, output) = (stream.tell_input(), stream.tell_output());
        match chunk[0] % 8 {
            0 => {
                if stream.read::<(u8, u16, u32)>().is_ok() {
                    let len = binary::length_of::<(u8, u16, u32)>() as u64;
                    assert_eq!(stream.tell_input(), input + len);
                    assert_eq!(stream.tell_output(), output);
                }
            }
            1 => {
                if stream.read::<[f64; 2]>().is_ok() {
                    assert_eq!(stream.tell_input(), input + 16);
                    assert_eq!(stream.tell_output(), output);
                }
            }
            2 => {
                if stream.write(&(arg, u64::from(arg))).is_ok() {
                    assert_eq!(stream.tell_output(), output + 9);
                    assert_eq!(stream.tell_input(), input);
                }
            }
            3 => {
                if stream.seek_input(SeekFrom::Start(u64::from(arg))).is_ok() {
                    assert_eq!(stream.tell_input(), u64::from(arg));
                }
                assert_eq!(stream.tell_output(), output);
            }
            4 => {
                let delta = i64::from(arg as i8);
                match stream.seek_output(SeekFrom::Current(delta)) {
                    Ok(()) => assert_eq!(stream.tell_output() as i64, output as i64 + delta),
                    Err(_) => assert_eq!(stream.tell_output(), output),
                }
                assert_eq!(stream.tell_input(), input);
            }
            5 => {
                let len = usize::from(arg % 16);
                if stream.read_string(len, "UTF-16").is_ok() {
                    assert_eq!(stream.tell_input(), input + len as u64);
                    assert_eq!(stream.tell_output(), output);
                }
            }
            6 => {
                if stream.write_string("fuzz", "UTF-8").is_ok() {
                    assert_eq!(stream.tell_output(), output + 4);
                    assert_eq!(stream.tell_input(), input);
                }
            }
            _ => {
                let _ = stream.eof();
                let _ = stream.eof_output();
                assert_eq!((stream.tell_input(), stream.tell_output()), (input, output));
            }
        }
    }
});
