use std::collections::VecDeque;

use log::{debug, trace, warn};

use crate::buffer::ByteStreamBuffer;
use crate::checksum::checksum;
use crate::error::Error;
use crate::frame::{hex_dump, FRAME_HEADER, FRAME_OVERHEAD, FRAME_TAIL, MAX_FRAME_LEN, PAYLOAD_WIDTH};
use crate::reading::SensorReading;

/// Default receive buffer capacity: room for a burst of frames plus noise
/// between two polls.
pub const DEFAULT_RX_CAPACITY: usize = 256;

// Shortest prefix the scanner can act on: header, length and tail bytes.
const MIN_DECIDABLE: usize = 3;

/// Why the scanner refused the byte at the front of the buffer.
///
/// Every reject costs exactly one discarded byte and scanning resumes; none
/// is fatal and none halts the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Leading byte is not the header sentinel.
    NoiseByte,
    /// Zero or over-maximum payload length claim.
    InvalidLength,
    /// Last byte of the candidate frame is not the tail sentinel.
    TailMismatch,
    /// Checksum over length byte + payload does not match the frame.
    ChecksumMismatch,
    /// Structurally sound frame whose payload is not one sensor reading.
    UnexpectedPayloadWidth,
}

/// Wrapping diagnostic counters, one per reject reason.
///
/// Correctness never depends on anyone consuming these; they exist so a
/// caller can watch link quality.
#[derive(Debug, Default, Clone, Copy)]
pub struct DecoderStats {
    pub noise_bytes: u32,
    pub invalid_lengths: u32,
    pub tail_mismatches: u32,
    pub checksum_mismatches: u32,
    pub unexpected_widths: u32,
    pub frames_decoded: u32,
    pub bytes_discarded: u32,
}

// One pass of the scanner over the front of the buffer.
enum Scan {
    /// A whole frame was validated and consumed.
    Accepted(SensorReading),
    /// The leading byte must go; scanning restarts behind it.
    Rejected(RejectReason),
    /// Not enough bytes buffered to decide. Wait for more.
    Starved,
}

/// Receive half of the link.
///
/// Raw bytes go in one at a time through `push` (the only operation an
/// arrival context may call) or in bursts through `poll`. `scan` re-runs the
/// frame state machine against whatever is buffered; it keeps no frame
/// state between calls, so a partially arrived frame simply stays in the
/// buffer until the next poll. Decoded readings queue up in arrival order
/// for `get_reading`.
pub struct Decoder {
    /// Identifier string for debug.
    pub name: String,
    buffer: ByteStreamBuffer,
    readings: VecDeque<SensorReading>,
    stats: DecoderStats,
}

impl Decoder {
    /// Construct a `Decoder`.
    /// # Arguments
    /// * `name` - identifier string for debug.
    /// * `capacity` - receive buffer capacity in bytes; on overflow the
    ///   oldest bytes are evicted.
    pub fn new(name: String, capacity: usize) -> Self {
        Decoder {
            name: name,
            buffer: ByteStreamBuffer::new(capacity),
            readings: VecDeque::new(),
            stats: DecoderStats::default(),
        }
    }

    /// Appends one received byte without scanning.
    ///
    /// Never blocks, never fails; a full buffer evicts its oldest byte. If
    /// arrival happens in an interrupt-like context this is the sole
    /// operation that context may perform; decoding belongs in the
    /// cooperative polling step.
    pub fn push(&mut self, byte: u8) {
        self.buffer.push(byte);
    }

    /// Feeds a burst of received bytes, then runs the scanner.
    pub fn poll(&mut self, buf: &[u8]) {
        for byte in buf {
            self.buffer.push(*byte);
        }
        self.scan();
    }

    /// Runs the state machine until the buffer offers no more decidable
    /// frame.
    ///
    /// Every iteration either accepts a frame or discards exactly one byte,
    /// so the loop terminates and the decoder realigns after arbitrary
    /// corruption. A corrupted length or checksum byte may itself be the
    /// header of the next real frame one position later, which is why a
    /// reject never skips the whole candidate.
    pub fn scan(&mut self) {
        loop {
            match self.scan_front() {
                Scan::Accepted(reading) => {
                    self.stats.frames_decoded = self.stats.frames_decoded.wrapping_add(1);
                    debug!(
                        target: self.name.as_str(),
                        "frame accepted: soil={}%, light={}",
                        reading.soil_moisture,
                        reading.light_intensity
                    );
                    self.readings.push_back(reading);
                }
                Scan::Rejected(reason) => {
                    self.discard_one(reason);
                }
                Scan::Starved => {
                    break;
                }
            }
        }
    }

    /// Oldest decoded reading, in arrival order.
    pub fn get_reading(&mut self) -> Result<SensorReading, Error> {
        match self.readings.pop_front() {
            Some(reading) => Ok(reading),
            None => Err(Error::NoReading),
        }
    }

    /// Bytes currently buffered and not yet consumed by the scanner.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    pub fn stats(&self) -> &DecoderStats {
        &self.stats
    }

    // Examine the front of the buffer for one frame. Nothing is consumed on
    // the reject paths; the caller discards exactly one byte and retries.
    fn scan_front(&mut self) -> Scan {
        let head = match self.buffer.peek(0) {
            Ok(byte) => byte,
            Err(_) => return Scan::Starved,
        };
        if head != FRAME_HEADER {
            return Scan::Rejected(RejectReason::NoiseByte);
        }

        if self.buffer.len() < MIN_DECIDABLE {
            return Scan::Starved;
        }

        let len_byte = match self.buffer.peek(1) {
            Ok(byte) => byte,
            Err(_) => return Scan::Starved,
        };
        let frame_len = len_byte as usize + FRAME_OVERHEAD;
        if len_byte == 0 || frame_len > MAX_FRAME_LEN {
            return Scan::Rejected(RejectReason::InvalidLength);
        }

        if self.buffer.len() < frame_len {
            return Scan::Starved;
        }

        let mut frame = [0_u8; MAX_FRAME_LEN];
        for i in 0..frame_len {
            frame[i] = match self.buffer.peek(i) {
                Ok(byte) => byte,
                Err(_) => return Scan::Starved,
            };
        }
        let frame = &frame[0..frame_len];

        if frame[frame_len - 1] != FRAME_TAIL {
            return Scan::Rejected(RejectReason::TailMismatch);
        }

        // The checksum spans the length byte and the payload, mirroring the
        // encoder exactly.
        if checksum(&frame[1..frame_len - 2]) != frame[frame_len - 2] {
            return Scan::Rejected(RejectReason::ChecksumMismatch);
        }

        if len_byte != PAYLOAD_WIDTH {
            return Scan::Rejected(RejectReason::UnexpectedPayloadWidth);
        }

        trace!(target: self.name.as_str(), "rx frame: {}", hex_dump(frame));

        let soil_moisture = u16::from_be_bytes([frame[2], frame[3]]);
        let light_intensity = u16::from_be_bytes([frame[4], frame[5]]);
        for _ in 0..frame_len {
            self.buffer.pop().ok();
        }
        Scan::Accepted(SensorReading::new(soil_moisture, light_intensity))
    }

    fn discard_one(&mut self, reason: RejectReason) {
        let byte = match self.buffer.pop() {
            Ok(byte) => byte,
            Err(_) => return,
        };
        self.stats.bytes_discarded = self.stats.bytes_discarded.wrapping_add(1);
        match reason {
            RejectReason::NoiseByte => {
                self.stats.noise_bytes = self.stats.noise_bytes.wrapping_add(1);
                trace!(target: self.name.as_str(), "drop noise byte 0x{:02x}", byte);
            }
            RejectReason::InvalidLength => {
                self.stats.invalid_lengths = self.stats.invalid_lengths.wrapping_add(1);
                debug!(target: self.name.as_str(), "invalid frame length, drop one byte and rescan.");
            }
            RejectReason::TailMismatch => {
                self.stats.tail_mismatches = self.stats.tail_mismatches.wrapping_add(1);
                warn!(target: self.name.as_str(), "tail mismatch, drop one byte and rescan.");
            }
            RejectReason::ChecksumMismatch => {
                self.stats.checksum_mismatches = self.stats.checksum_mismatches.wrapping_add(1);
                warn!(target: self.name.as_str(), "checksum error, drop one byte and rescan.");
            }
            RejectReason::UnexpectedPayloadWidth => {
                self.stats.unexpected_widths = self.stats.unexpected_widths.wrapping_add(1);
                warn!(target: self.name.as_str(), "unexpected payload width, drop one byte and rescan.");
            }
        }
    }
}
