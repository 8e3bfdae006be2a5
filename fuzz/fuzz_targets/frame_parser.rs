#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mbparse::{Endianness, FrameParser, ParserConfig, Role};
use std::num::NonZeroU16;

#[derive(Debug, Arbitrary)]
struct FuzzInput<'a> {
    request: bool,
    slave_address: u8,
    little_endian: bool,
    swap_registers: bool,
    register_size: u16,
    stream: &'a [u8],
}

fuzz_target!(|input: FuzzInput| {
    // we only care about panics so we can ignore results
    let role = if input.request {
        Role::Request
    } else {
        Role::Response
    };
    let config = ParserConfig {
        slave_address: input.slave_address,
        endianness: if input.little_endian {
            Endianness::Little
        } else {
            Endianness::Big
        },
        swap_registers: input.swap_registers,
        register_size: NonZeroU16::new(input.register_size)
            .unwrap_or_else(|| NonZeroU16::new(2).unwrap()),
        ..ParserConfig::default()
    };
    let mut parser = FrameParser::with_config(role, config, Vec::new());
    // errors are terminal for one frame only; keep feeding to exercise
    // the implicit reset path
    for &byte in input.stream {
        let _ = parser.feed_byte(byte);
    }
});
