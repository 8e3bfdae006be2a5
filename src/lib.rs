//! # mbparse - incremental Modbus RTU decoding for Rust
//!
//! mbparse decodes Modbus RTU frames one byte at a time, straight off
//! the UART. There is no framing buffer to size, no inter-character
//! timer to wire up and no transport dependency: push each received
//! octet into the parser and it tells you when a frame is complete or
//! why it is broken.
//!
//! ## Why a byte-driven parser?
//!
//! * RTU frames are delimited by silent intervals, not by markers, so
//!   a decoder must be correct under arbitrary token boundaries.
//!   mbparse consumes any chunking - one byte from an interrupt
//!   handler or a whole read() worth - with identical results.
//!
//! * the CRC is folded in the same pass, so by the time the last
//!   payload byte lands the frame is already verified except for the
//!   two CRC octets themselves.
//!
//! * mbparse is platform independent (**no_std is fully supported**)
//!   and allocates at most once per frame, bounded by a configurable
//!   byte-count limit. On heapless targets the payload can be backed
//!   by a `fixedvec` or `heapless` buffer instead.
//!
//! Both directions of traffic are covered: [`ResponseParser`] decodes
//! what a slave sends back to a master, [`RequestParser`] decodes what
//! a master asks of a slave. Functions 0x01-0x06, 0x0F and 0x10 are
//! supported, plus exception responses.
//!
//! ## Decoding a response
//!
//! ```rust
//! use mbparse::{ParserState, ResponseParser};
//!
//! let mut parser = ResponseParser::new();
//! parser.set_slave_address(1);
//!
//! // addr, func, byte count, payload, CRC low, CRC high
//! let frame = [0x01, 0x03, 0x04, 0x00, 0x06, 0x00, 0x05, 0xDA, 0x31];
//! let state = parser.feed(&frame).unwrap();
//!
//! assert_eq!(state, ParserState::Complete);
//! assert_eq!(parser.function_code(), 0x03);
//! assert_eq!(parser.data(), &[0x00, 0x06, 0x00, 0x05]);
//! ```
//!
//! The same frame can arrive one byte at a time; completion is then
//! usually observed through a handler instead of the return value:
//!
//! ```rust
//! use mbparse::ResponseParser;
//!
//! let mut parser = ResponseParser::new();
//! parser.set_slave_address(1);
//! parser.set_on_complete(|frame| {
//!     println!("payload: {:02X?}", frame.data());
//! });
//!
//! for byte in [0x01, 0x03, 0x04, 0x00, 0x06, 0x00, 0x05, 0xDA, 0x31] {
//!     if parser.feed_byte(byte).is_err() {
//!         // broken frame: wait for a silent interval, then resync
//!         parser.reset();
//!     }
//! }
//! ```
//!
//! A parse error is terminal for the current frame only. The next fed
//! byte implicitly resets the machine, and leading line noise is
//! skipped while hunting for the configured slave address, so a parser
//! left running on a shared bus resynchronizes by itself.
//!
//! ## no_std
//!
//! Disable the default `std` feature and hand the parser a
//! fixed-capacity buffer:
//!
//! ```toml
//! mbparse = { version = "*", default-features = false }
//! ```
//!
//! ```rust
//! use fixedvec::{alloc_stack, FixedVec};
//! use mbparse::RequestParser;
//!
//! let mut mem = alloc_stack!([u8; 96]);
//! let buf = FixedVec::new(&mut mem);
//! let mut parser = RequestParser::with_buffer(buf);
//! parser.set_slave_address(1);
//! ```
//!
//! Without `std` there are no boxed completion handlers; poll
//! [`is_complete`](`FrameParser::is_complete`) /
//! [`is_error`](`FrameParser::is_error`) after each feed instead.
#![cfg_attr(not(feature = "std"), no_std)]

mod consts;
mod crc;
mod error;
mod parser;
mod payload;

pub use consts::{ModbusFunction, DEFAULT_BYTE_COUNT_LIMIT, MAX_SLAVE_ADDRESS};
pub use crc::Crc16;
pub use error::ErrorKind;
pub use parser::{
    Endianness, Frame, FrameParser, ParserConfig, ParserState, RequestParser, ResponseParser, Role,
};
pub use payload::PayloadStorage;

#[cfg(all(test, feature = "std"))]
#[path = "tests/test_std.rs"]
mod test_std;

#[cfg(test)]
#[path = "tests/test_nostd.rs"]
mod test_nostd;
