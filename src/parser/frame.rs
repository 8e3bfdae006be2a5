use crate::payload::PayloadStorage;
use crate::ErrorKind;

/// Decoded frame record, filled in place as bytes are consumed.
///
/// Payload-derived fields are only guaranteed coherent once the parser
/// reports [`ParserState::Complete`](`super::ParserState::Complete`).
#[derive(Debug)]
pub struct Frame<V: PayloadStorage> {
    pub(crate) slave_address: u8,
    pub(crate) function_code: u8,
    pub(crate) address: u16,
    pub(crate) quantity: u16,
    pub(crate) byte_count: u8,
    pub(crate) payload: V,
    pub(crate) data_len: usize,
    pub(crate) crc: u16,
    pub(crate) error: Option<ErrorKind>,
}

impl<V: PayloadStorage> Frame<V> {
    pub(crate) fn new(payload: V) -> Self {
        Self {
            slave_address: 0,
            function_code: 0,
            address: 0,
            quantity: 0,
            byte_count: 0,
            payload,
            data_len: 0,
            crc: 0,
            error: None,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slave_address = 0;
        self.function_code = 0;
        self.address = 0;
        self.quantity = 0;
        self.byte_count = 0;
        self.payload.clear();
        self.data_len = 0;
        self.crc = 0;
        self.error = None;
    }

    /// Slave address echoed from the wire.
    pub fn slave_address(&self) -> u8 {
        self.slave_address
    }

    /// Function code echoed from the wire. For exception responses the
    /// high bit is still set.
    pub fn function_code(&self) -> u8 {
        self.function_code
    }

    /// Register or coil start address, when the frame carries one.
    pub fn address(&self) -> u16 {
        self.address
    }

    /// Register or coil count, when the frame carries one.
    pub fn quantity(&self) -> u16 {
        self.quantity
    }

    /// Declared payload byte count. Stays 0 for the fixed two-byte
    /// payloads of the single-write functions (0x05/0x06).
    pub fn byte_count(&self) -> u8 {
        self.byte_count
    }

    /// Decoded payload, sized once the byte count is known. At
    /// `Complete` this is the full declared payload (or the two-byte
    /// value of a single write); positions not yet received read as
    /// zero.
    pub fn data(&self) -> &[u8] {
        &self.payload.as_slice()[..self.data_len]
    }

    /// CRC of the frame body in wire order (first wire byte in the
    /// high half). Frozen when the body ends, so at `Complete` it
    /// matches the received CRC and on a CRC error it does not.
    pub fn crc(&self) -> u16 {
        self.crc
    }

    /// Error recorded for the current frame, if any.
    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error
    }
}
