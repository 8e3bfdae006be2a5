//! Byte-driven RTU frame decoding.
//!
//! One engine, [`FrameParser`], drives the outer state machine
//! (slave address, function code, payload phases, CRC). The payload
//! phases between the function code and the CRC differ per function
//! code and per direction of traffic, so the engine walks a fixed
//! phase list selected by [`Role`] and function code. The
//! [`RequestParser`] and [`ResponseParser`] facades pin the role.

mod dispatch;
mod frame;
mod request;
mod response;

pub use dispatch::Role;
pub use frame::Frame;
pub use request::RequestParser;
pub use response::ResponseParser;

use crate::consts::{ModbusFunction, DEFAULT_BYTE_COUNT_LIMIT};
use crate::crc::Crc16;
use crate::payload::PayloadStorage;
use crate::ErrorKind;
use core::num::NonZeroU16;
use dispatch::{dispatch_for, Phase};

/// Wire order of 16-bit fields and of the trailing CRC pair.
///
/// Standard Modbus RTU is `Big` (field high byte first, CRC low byte
/// first). `Little` reverses both, for peers that transmit words in
/// native little-endian order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Endianness {
    #[default]
    Big,
    Little,
}

/// Observable parser state.
///
/// `Complete` and `Error` are terminal: the next fed byte silently
/// resets the machine and is treated as the first byte of a new frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParserState {
    SlaveAddress,
    FunctionCode,
    Address,
    Quantity,
    ByteCount,
    Data,
    ModbusException,
    FirstCRC,
    SecondCRC,
    Complete,
    Error,
}

impl ParserState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ParserState::Complete | ParserState::Error)
    }
}

/// Engine configuration, applied from the first byte of the next frame.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Address this parser accepts, `0` to accept any (promiscuous
    /// mode). Valid slave addresses are `1..=`[`MAX_SLAVE_ADDRESS`](`crate::MAX_SLAVE_ADDRESS`).
    pub slave_address: u8,
    pub endianness: Endianness,
    /// Reverse byte order within each register of the payload.
    pub swap_registers: bool,
    /// Register width in bytes for `swap_registers`.
    pub register_size: NonZeroU16,
    /// Upper bound on the declared payload byte count.
    pub byte_count_limit: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            slave_address: 0,
            endianness: Endianness::Big,
            swap_registers: false,
            register_size: NonZeroU16::new(2).unwrap(),
            byte_count_limit: DEFAULT_BYTE_COUNT_LIMIT,
        }
    }
}

#[cfg(feature = "std")]
type FrameHook<V> = Box<dyn FnMut(&Frame<V>)>;

/// Incremental Modbus RTU frame parser.
///
/// Feed bytes as they arrive on the wire; the parser validates
/// framing, function code, data sizing and the trailing CRC in a
/// single pass and never buffers more than the frame payload. The
/// caller owns the transport and decides when a silent interval should
/// [`reset`](`FrameParser::reset`) the machine.
pub struct FrameParser<V: PayloadStorage> {
    role: Role,
    config: ParserConfig,
    state: ParserState,
    frame: Frame<V>,
    crc: Crc16,
    phases: &'static [Phase],
    phase_idx: usize,
    pending_half: Option<u8>,
    data_to_receive: u16,
    write_pos: usize,
    swap_remaining: u16,
    #[cfg(feature = "std")]
    on_complete: Option<FrameHook<V>>,
    #[cfg(feature = "std")]
    on_error: Option<FrameHook<V>>,
}

impl<V: PayloadStorage> FrameParser<V> {
    /// Creates an engine for the given role, with `buffer` as the
    /// payload backing store.
    pub fn with_config(role: Role, config: ParserConfig, buffer: V) -> Self {
        Self {
            role,
            config,
            state: ParserState::SlaveAddress,
            frame: Frame::new(buffer),
            crc: Crc16::new(),
            phases: &[],
            phase_idx: 0,
            pending_half: None,
            data_to_receive: 0,
            write_pos: 0,
            swap_remaining: 0,
            #[cfg(feature = "std")]
            on_complete: None,
            #[cfg(feature = "std")]
            on_error: None,
        }
    }

    /// Consumes one byte from the wire.
    ///
    /// Returns the state reached by this byte; a terminal error is
    /// also surfaced as `Err` so bulk feeding can short-circuit with
    /// `?`. If the previous byte ended a frame (`Complete` or
    /// `Error`), the machine resets first and `token` starts a new
    /// frame.
    pub fn feed_byte(&mut self, token: u8) -> Result<ParserState, ErrorKind> {
        if self.state.is_terminal() {
            self.reset();
        }
        match self.state {
            ParserState::SlaveAddress => self.accept_slave_address(token),
            ParserState::FunctionCode => self.accept_function_code(token),
            ParserState::Address => self.accept_address(token),
            ParserState::Quantity => self.accept_quantity(token),
            ParserState::ByteCount => self.accept_byte_count(token),
            ParserState::Data => self.accept_data(token),
            ParserState::ModbusException => self.fail(ErrorKind::from_modbus_error(token)),
            ParserState::FirstCRC => self.accept_first_crc(token),
            ParserState::SecondCRC => self.accept_second_crc(token),
            ParserState::Complete | ParserState::Error => unreachable!(), // reset above
        }?;
        Ok(self.state)
    }

    /// Feeds a buffer byte by byte.
    ///
    /// Stops at the first byte that puts the machine into `Error`,
    /// leaving the remaining bytes unconsumed so the caller can decide
    /// how to resynchronize. A `Complete` in the middle of the buffer
    /// does not stop the loop; the next byte starts a new frame.
    pub fn feed(&mut self, buf: &[u8]) -> Result<ParserState, ErrorKind> {
        for &token in buf {
            self.feed_byte(token)?;
        }
        Ok(self.state)
    }

    /// Abandons the current frame and returns to `SlaveAddress`. The
    /// payload buffer is emptied, the CRC re-seeded and the error
    /// cleared. Safe to call at any time.
    pub fn reset(&mut self) {
        self.frame.clear();
        self.crc.reset();
        self.state = ParserState::SlaveAddress;
        self.phases = &[];
        self.phase_idx = 0;
        self.pending_half = None;
        self.data_to_receive = 0;
        self.write_pos = 0;
        self.swap_remaining = 0;
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == ParserState::Complete
    }

    pub fn is_error(&self) -> bool {
        self.state == ParserState::Error
    }

    /// The frame record being populated. Payload-derived fields are
    /// coherent only at `Complete`.
    pub fn frame(&self) -> &Frame<V> {
        &self.frame
    }

    /// Changes the accepted slave address (0 = any), effective from
    /// the next frame.
    pub fn set_slave_address(&mut self, address: u8) {
        self.config.slave_address = address;
    }

    /// Handler invoked synchronously from the byte that completes a
    /// frame. The handler must not feed this parser re-entrantly; it
    /// only receives the frame record.
    #[cfg(feature = "std")]
    pub fn set_on_complete<F: FnMut(&Frame<V>) + 'static>(&mut self, hook: F) {
        self.on_complete = Some(Box::new(hook));
    }

    /// Handler invoked synchronously from the byte that fails a frame.
    #[cfg(feature = "std")]
    pub fn set_on_error<F: FnMut(&Frame<V>) + 'static>(&mut self, hook: F) {
        self.on_error = Some(Box::new(hook));
    }

    fn accept_slave_address(&mut self, token: u8) -> Result<(), ErrorKind> {
        if self.config.slave_address != 0 && token != self.config.slave_address {
            // pre-frame noise, keep hunting for our address
            return Ok(());
        }
        self.frame.slave_address = token;
        self.crc.fold(token);
        self.state = ParserState::FunctionCode;
        Ok(())
    }

    fn accept_function_code(&mut self, token: u8) -> Result<(), ErrorKind> {
        if token > 128 {
            // exception response: the next byte carries the exception
            // code, reported without waiting for the trailing CRC
            self.frame.function_code = token;
            self.state = ParserState::ModbusException;
            return Ok(());
        }
        let func = match ModbusFunction::try_from(token) {
            Ok(func) => func,
            Err(e) => return self.fail(e),
        };
        self.frame.function_code = token;
        self.phases = dispatch_for(self.role, func);
        self.phase_idx = 0;
        self.crc.fold(token);
        self.enter_phase(self.phases[0])
    }

    fn accept_address(&mut self, token: u8) -> Result<(), ErrorKind> {
        self.crc.fold(token);
        match self.pending_half.take() {
            None => self.pending_half = Some(token),
            Some(first) => self.frame.address = self.assemble_word(first, token),
        }
        self.advance()
    }

    fn accept_quantity(&mut self, token: u8) -> Result<(), ErrorKind> {
        self.crc.fold(token);
        match self.pending_half.take() {
            None => self.pending_half = Some(token),
            Some(first) => {
                let quantity = self.assemble_word(first, token);
                if quantity == 0 {
                    return self.fail(ErrorKind::IllegalDataValue);
                }
                self.frame.quantity = quantity;
            }
        }
        self.advance()
    }

    fn accept_byte_count(&mut self, token: u8) -> Result<(), ErrorKind> {
        if token == 0 || usize::from(token) > self.config.byte_count_limit {
            return self.fail(ErrorKind::IllegalDataValue);
        }
        self.frame.byte_count = token;
        self.data_to_receive = u16::from(token);
        self.crc.fold(token);
        self.advance()
    }

    fn accept_data(&mut self, token: u8) -> Result<(), ErrorKind> {
        if self.config.swap_registers {
            self.write_swapped(token);
        } else {
            self.frame.payload.set(self.write_pos, token);
            self.write_pos += 1;
        }
        self.crc.fold(token);
        self.data_to_receive -= 1;
        if self.data_to_receive == 0 {
            self.begin_crc();
        }
        Ok(())
    }

    fn accept_first_crc(&mut self, token: u8) -> Result<(), ErrorKind> {
        let expected = match self.config.endianness {
            Endianness::Big => self.crc.low(),
            Endianness::Little => self.crc.high(),
        };
        if token != expected {
            return self.fail(ErrorKind::FrameCRCError);
        }
        self.state = ParserState::SecondCRC;
        Ok(())
    }

    fn accept_second_crc(&mut self, token: u8) -> Result<(), ErrorKind> {
        let expected = match self.config.endianness {
            Endianness::Big => self.crc.high(),
            Endianness::Little => self.crc.low(),
        };
        if token != expected {
            return self.fail(ErrorKind::FrameCRCError);
        }
        if self.data_to_receive != 0 {
            return self.fail(ErrorKind::IllegalDataValue);
        }
        self.state = ParserState::Complete;
        self.notify_complete();
        Ok(())
    }

    /// Moves to the next dispatched phase, or to the CRC when the
    /// phase list is exhausted.
    fn advance(&mut self) -> Result<(), ErrorKind> {
        self.phase_idx += 1;
        match self.phases.get(self.phase_idx).copied() {
            Some(phase) => self.enter_phase(phase),
            None => {
                self.begin_crc();
                Ok(())
            }
        }
    }

    fn enter_phase(&mut self, phase: Phase) -> Result<(), ErrorKind> {
        match phase {
            Phase::Address => self.state = ParserState::Address,
            Phase::Quantity => self.state = ParserState::Quantity,
            Phase::ByteCount => self.state = ParserState::ByteCount,
            Phase::Data => return self.start_data(),
        }
        Ok(())
    }

    /// Allocates the payload buffer. Entered at most once per frame:
    /// either after `ByteCount`, or directly for the fixed two-byte
    /// value of the single-write functions.
    fn start_data(&mut self) -> Result<(), ErrorKind> {
        if self.data_to_receive == 0 {
            self.data_to_receive = 2;
        }
        let len = usize::from(self.data_to_receive);
        let rs = usize::from(self.config.register_size.get());
        // swap mode fills whole registers; the last register may be
        // only partially covered by the declared count
        let capacity = if self.config.swap_registers {
            (len + rs - 1) / rs * rs
        } else {
            len
        };
        if self.frame.payload.resize_zeroed(capacity).is_err() {
            return self.fail(ErrorKind::OOB);
        }
        self.frame.data_len = len;
        self.write_pos = if self.config.swap_registers { rs - 1 } else { 0 };
        self.swap_remaining = self.config.register_size.get();
        self.state = ParserState::Data;
        Ok(())
    }

    /// Writes backwards within the current register, then hops the
    /// write position to the tail of the next one.
    fn write_swapped(&mut self, token: u8) {
        let rs = self.config.register_size.get();
        self.frame.payload.set(self.write_pos, token);
        self.swap_remaining -= 1;
        if self.swap_remaining == 0 {
            self.write_pos += 2 * usize::from(rs) - 1;
            self.swap_remaining = rs;
        } else {
            self.write_pos -= 1;
        }
    }

    /// Freezes the computed CRC in wire order and starts comparing.
    fn begin_crc(&mut self) {
        self.frame.crc = match self.config.endianness {
            Endianness::Big => self.crc.value().swap_bytes(),
            Endianness::Little => self.crc.value(),
        };
        self.state = ParserState::FirstCRC;
    }

    fn assemble_word(&self, first: u8, second: u8) -> u16 {
        match self.config.endianness {
            Endianness::Big => u16::from_be_bytes([first, second]),
            Endianness::Little => u16::from_le_bytes([first, second]),
        }
    }

    fn fail(&mut self, kind: ErrorKind) -> Result<(), ErrorKind> {
        self.frame.error = Some(kind);
        self.state = ParserState::Error;
        self.notify_error();
        Err(kind)
    }

    #[cfg(feature = "std")]
    fn notify_complete(&mut self) {
        if let Some(mut hook) = self.on_complete.take() {
            hook(&self.frame);
            self.on_complete = Some(hook);
        }
    }

    #[cfg(not(feature = "std"))]
    fn notify_complete(&mut self) {}

    #[cfg(feature = "std")]
    fn notify_error(&mut self) {
        if let Some(mut hook) = self.on_error.take() {
            hook(&self.frame);
            self.on_error = Some(hook);
        }
    }

    #[cfg(not(feature = "std"))]
    fn notify_error(&mut self) {}
}
