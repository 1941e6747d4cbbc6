#![no_main]

use argali_tether::Packet;
use libfuzzer_sys::fuzz_target;

// The packet codec is the layer right after the deframer hands back a
// trusted frame body, but its input is still attacker/firmware
// controlled — arbitrary discriminators, truncated variable-length
// fields, oversized counts. Decoding must error, never panic.
fuzz_target!(|data: &[u8]| {
    let _ = Packet::decode(data);
});
