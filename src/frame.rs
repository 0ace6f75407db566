use log::{debug, trace, warn};

use crate::checksum::checksum;
use crate::error::Error;
use crate::interface::Interface;
use crate::reading::SensorReading;

// Special protocol bytes
/// Start-of-frame sentinel.
pub const FRAME_HEADER: u8 = 0xaa;
/// End-of-frame sentinel.
pub const FRAME_TAIL: u8 = 0x55;

/// Fixed payload width: two big-endian 16-bit fields.
pub const PAYLOAD_WIDTH: u8 = 4;
/// Bytes surrounding the payload: header, length, checksum, tail.
pub const FRAME_OVERHEAD: usize = 4;
/// Total size of an encoded frame on the wire.
pub const FRAME_LEN: usize = PAYLOAD_WIDTH as usize + FRAME_OVERHEAD;
/// Largest frame the receiver will consider; a longer length claim means the
/// header byte under it was noise.
pub const MAX_FRAME_LEN: usize = 64;

/// Builds the complete frame byte sequence for one reading.
///
/// ```text
/// [0xAA] [0x04] [soil hi] [soil lo] [light hi] [light lo] [checksum] [0x55]
/// ```
///
/// The checksum covers the length byte and the payload, not the sentinels;
/// the decoder validates exactly the same range. Cannot fail: both fields are
/// already bounded by their declared width.
pub fn encode(reading: &SensorReading) -> [u8; FRAME_LEN] {
    let soil = reading.soil_moisture.to_be_bytes();
    let light = reading.light_intensity.to_be_bytes();
    let mut frame = [0_u8; FRAME_LEN];
    frame[0] = FRAME_HEADER;
    frame[1] = PAYLOAD_WIDTH;
    frame[2] = soil[0];
    frame[3] = soil[1];
    frame[4] = light[0];
    frame[5] = light[1];
    frame[FRAME_LEN - 2] = checksum(&frame[1..FRAME_LEN - 2]);
    frame[FRAME_LEN - 1] = FRAME_TAIL;
    frame
}

/// Transmit half of the link: frames a reading and pushes it byte-by-byte
/// through the hardware interface.
pub struct Encoder<'a, T>
where
    T: Interface,
{
    /// Identifier string for debug.
    pub name: String,
    /// Hardwar interface
    pub hw_if: &'a T,
}

impl<'a, T> Encoder<'a, T>
where
    T: Interface,
{
    /// Construct an `Encoder`.
    /// # Arguments
    /// * `name` - identifier string for debug.
    /// * `hw_if` - Reference of hardware interface.
    pub fn new(name: String, hw_if: &'a T) -> Self {
        Encoder {
            name: name,
            hw_if: hw_if,
        }
    }

    /// Frames `reading` and sends it on the wire, returning the number of
    /// bytes sent or `Error::NoEnoughTxSpace`.
    pub fn send_reading(&self, reading: &SensorReading) -> Result<u8, Error> {
        let frame = encode(reading);
        let avaliable_for_send = self.hw_if.tx_space();
        if (frame.len() as u16) > avaliable_for_send {
            warn!(
                target: self.name.as_str(),
                "no enough tx space: oversize={}",
                frame.len() as u16 - avaliable_for_send
            );
            return Err(Error::NoEnoughTxSpace(frame.len() as u16 - avaliable_for_send));
        }

        trace!(target: self.name.as_str(), "tx frame: {}", hex_dump(&frame));

        self.hw_if.tx_start();
        for byte in frame.iter() {
            self.hw_if.tx_byte(*byte);
        }
        self.hw_if.tx_finished();

        debug!(
            target: self.name.as_str(),
            "sent reading: soil={}%, light={}",
            reading.soil_moisture,
            reading.light_intensity
        );
        Ok(frame.len() as u8)
    }
}

pub(crate) fn hex_dump(frame: &[u8]) -> String {
    let mut output = String::from("[");
    for byte in frame {
        output.push_str(format!(" 0x{:02x}", byte).as_str());
    }
    output.push_str(" ]");
    output
}
