use crate::consts::ModbusFunction;

/// Which side of the Modbus exchange a parser decodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Role {
    /// Master to slave traffic.
    Request,
    /// Slave to master traffic.
    Response,
}

/// Payload-phase tags walked between the function code and the CRC.
///
/// A 16-bit field takes one tag per wire byte, so `Address` and
/// `Quantity` always appear twice in a row. `Data`, when present, is
/// the last tag and consumes a run of bytes rather than a single one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Address,
    Quantity,
    ByteCount,
    Data,
}

const RESPONSE_READ: &[Phase] = &[Phase::ByteCount, Phase::Data];
const RESPONSE_WRITE_SINGLE: &[Phase] = &[Phase::Address, Phase::Address, Phase::Data];
const RESPONSE_WRITE_BULK: &[Phase] = &[
    Phase::Address,
    Phase::Address,
    Phase::Quantity,
    Phase::Quantity,
];
const REQUEST_READ: &[Phase] = &[
    Phase::Address,
    Phase::Address,
    Phase::Quantity,
    Phase::Quantity,
];
const REQUEST_WRITE_SINGLE: &[Phase] = &[Phase::Address, Phase::Address, Phase::Data];
const REQUEST_WRITE_BULK: &[Phase] = &[
    Phase::Address,
    Phase::Address,
    Phase::Quantity,
    Phase::Quantity,
    Phase::ByteCount,
    Phase::Data,
];

/// Phase list for a (role, function) pair. Every supported function
/// belongs to exactly one of the read / write-single / write-bulk
/// families.
pub(crate) fn dispatch_for(role: Role, func: ModbusFunction) -> &'static [Phase] {
    match role {
        Role::Response => {
            if func.is_read() {
                RESPONSE_READ
            } else if func.is_write_single() {
                RESPONSE_WRITE_SINGLE
            } else {
                RESPONSE_WRITE_BULK
            }
        }
        Role::Request => {
            if func.is_read() {
                REQUEST_READ
            } else if func.is_write_single() {
                REQUEST_WRITE_SINGLE
            } else {
                REQUEST_WRITE_BULK
            }
        }
    }
}
