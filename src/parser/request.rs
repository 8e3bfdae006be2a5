use super::{Frame, FrameParser, ParserConfig, ParserState, Role};
use crate::payload::PayloadStorage;
use crate::ErrorKind;

/// Decoder for master-to-slave request frames.
///
/// Picks the request dispatch tables: reads carry a start address and
/// quantity, single writes a register address and value, bulk writes
/// additionally a byte count and payload.
pub struct RequestParser<V: PayloadStorage> {
    inner: FrameParser<V>,
}

#[cfg(feature = "std")]
impl RequestParser<Vec<u8>> {
    /// Heap-backed parser with the default configuration (promiscuous,
    /// big-endian).
    pub fn new() -> Self {
        Self::with_buffer(Vec::new())
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self::with_config_and_buffer(config, Vec::new())
    }
}

#[cfg(feature = "std")]
impl Default for RequestParser<Vec<u8>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: PayloadStorage> RequestParser<V> {
    /// Parser with a caller-provided payload backing store, for
    /// targets without a heap.
    pub fn with_buffer(buffer: V) -> Self {
        Self::with_config_and_buffer(ParserConfig::default(), buffer)
    }

    pub fn with_config_and_buffer(config: ParserConfig, buffer: V) -> Self {
        Self {
            inner: FrameParser::with_config(Role::Request, config, buffer),
        }
    }

    pub fn feed_byte(&mut self, token: u8) -> Result<ParserState, ErrorKind> {
        self.inner.feed_byte(token)
    }

    pub fn feed(&mut self, buf: &[u8]) -> Result<ParserState, ErrorKind> {
        self.inner.feed(buf)
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    pub fn state(&self) -> ParserState {
        self.inner.state()
    }

    pub fn is_complete(&self) -> bool {
        self.inner.is_complete()
    }

    pub fn is_error(&self) -> bool {
        self.inner.is_error()
    }

    pub fn frame(&self) -> &Frame<V> {
        self.inner.frame()
    }

    pub fn slave_address(&self) -> u8 {
        self.inner.frame().slave_address()
    }

    pub fn function_code(&self) -> u8 {
        self.inner.frame().function_code()
    }

    pub fn address(&self) -> u16 {
        self.inner.frame().address()
    }

    pub fn quantity(&self) -> u16 {
        self.inner.frame().quantity()
    }

    pub fn byte_count(&self) -> u8 {
        self.inner.frame().byte_count()
    }

    pub fn data(&self) -> &[u8] {
        self.inner.frame().data()
    }

    pub fn crc(&self) -> u16 {
        self.inner.frame().crc()
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.inner.frame().error_kind()
    }

    pub fn set_slave_address(&mut self, address: u8) {
        self.inner.set_slave_address(address);
    }

    #[cfg(feature = "std")]
    pub fn set_on_complete<F: FnMut(&Frame<V>) + 'static>(&mut self, hook: F) {
        self.inner.set_on_complete(hook);
    }

    #[cfg(feature = "std")]
    pub fn set_on_error<F: FnMut(&Frame<V>) + 'static>(&mut self, hook: F) {
        self.inner.set_on_error(hook);
    }
}
