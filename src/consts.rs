//! Wire-level constants.

/// Declared payload byte counts above this limit are rejected before
/// any buffer is allocated.
pub const DEFAULT_BYTE_COUNT_LIMIT: usize = 96;

/// Highest addressable RTU slave; 0 is reserved as the promiscuous
/// wildcard.
pub const MAX_SLAVE_ADDRESS: u8 = 247;

/// Function codes this parser understands.
///
/// What matters to the decoder is not the register semantics but the
/// wire shape that follows the code: the four reads, the two
/// single-value writes and the two multi-value writes each share one
/// phase sequence per role. Anything else on the wire is either an
/// exception response (high bit set) or an illegal function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ModbusFunction {
    /// `0x01`, read a span of coils.
    ReadCoils = 0x01,
    /// `0x02`, read a span of discrete inputs.
    ReadDiscreteInputs = 0x02,
    /// `0x03`, read a span of holding registers.
    ReadHoldingRegisters = 0x03,
    /// `0x04`, read a span of input registers.
    ReadInputRegisters = 0x04,
    /// `0x05`, force one coil.
    WriteSingleCoil = 0x05,
    /// `0x06`, preset one holding register.
    WriteSingleRegister = 0x06,
    /// `0x0F`, force a run of coils.
    WriteMultipleCoils = 0x0F,
    /// `0x10`, preset a run of holding registers.
    WriteMultipleRegisters = 0x10,
}

impl TryFrom<u8> for ModbusFunction {
    type Error = crate::ErrorKind;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x01 => Ok(Self::ReadCoils),
            0x02 => Ok(Self::ReadDiscreteInputs),
            0x03 => Ok(Self::ReadHoldingRegisters),
            0x04 => Ok(Self::ReadInputRegisters),
            0x05 => Ok(Self::WriteSingleCoil),
            0x06 => Ok(Self::WriteSingleRegister),
            0x0F => Ok(Self::WriteMultipleCoils),
            0x10 => Ok(Self::WriteMultipleRegisters),
            _ => Err(crate::ErrorKind::IllegalFunction),
        }
    }
}

impl ModbusFunction {
    /// Wire value of the code.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// The four read functions, codes `0x01..=0x04`.
    pub fn is_read(self) -> bool {
        self.code() <= 0x04
    }

    /// The one-value writes, `0x05` and `0x06`. Their frames carry a
    /// fixed two-byte value instead of a declared byte count.
    pub fn is_write_single(self) -> bool {
        matches!(self, Self::WriteSingleCoil | Self::WriteSingleRegister)
    }

    /// The multi-value writes, `0x0F` and `0x10`.
    pub fn is_write_bulk(self) -> bool {
        matches!(self, Self::WriteMultipleCoils | Self::WriteMultipleRegisters)
    }
}
