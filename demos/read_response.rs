//! Feeds a canned slave response into the parser one byte at a time,
//! the way octets would arrive from a UART, and prints the decoded
//! payload.

use mbparse::{ParserState, ResponseParser};

fn main() {
    let mut parser = ResponseParser::new();
    parser.set_slave_address(1);

    // read-holdings response carrying two registers
    let wire = [0x01, 0x03, 0x04, 0x00, 0x06, 0x00, 0x05, 0xDA, 0x31];

    for byte in wire {
        match parser.feed_byte(byte) {
            Ok(ParserState::Complete) => {
                print!("payload:");
                for value in parser.data() {
                    print!(" {:02X}", value);
                }
                println!();
                println!("crc: {:04X}", parser.crc());
            }
            Ok(_) => {}
            Err(e) => {
                println!("ERROR: {}", e);
                parser.reset();
            }
        }
    }
}
