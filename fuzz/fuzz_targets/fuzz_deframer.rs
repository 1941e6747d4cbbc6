#![no_main]

use argali_tether::Deframer;
use libfuzzer_sys::fuzz_target;

// Feeds arbitrary bytes to the deframer one at a time and again as a
// whole buffer. Neither path should ever panic, regardless of stray
// FLAG/ESCAPE bytes or truncated length/checksum fields.
fuzz_target!(|data: &[u8]| {
    let mut byte_at_a_time = Deframer::new();
    for &b in data {
        let _ = byte_at_a_time.feed_byte(b);
    }

    let mut whole_buffer = Deframer::new();
    let _ = whole_buffer.feed(data);
});
