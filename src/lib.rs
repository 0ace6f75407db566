//! # flora-link
//! Frame-based protocol for carrying plant-sensor readings over a single
//! half-duplex asynchronous serial line, from a sampling microcontroller to a
//! telemetry gateway.
//!
//! The line delivers a continuous, error-prone byte stream with no message
//! boundaries, so the crate's job is to recover discrete, validated
//! [`SensorReading`] records from that stream and to produce the stream from
//! records on the other end. One frame carries one reading:
//!
//! ```text
//! [0xAA] [len=0x04] [soil hi] [soil lo] [light hi] [light lo] [checksum] [0x55]
//! ```
//!
//! The checksum is an additive 8-bit sum over the length byte and the payload.
//! The receiver buffers arriving bytes in a bounded ring and rescans from the
//! front on every poll; any malformed candidate frame costs exactly one
//! discarded byte, so the decoder resynchronizes after arbitrary corruption.

//! ## Example
//! ```
//! use std::cell::RefCell;
//! use flora_link::{Decoder, Encoder, Interface, SensorReading};
//!
//! struct Uart {
//!     tx_space_avaliable: u16,
//!     line: RefCell<Vec<u8>>,
//! }
//!
//! impl Interface for Uart {
//!     fn tx_space(&self) -> u16 {
//!         self.tx_space_avaliable
//!     }
//!
//!     fn tx_start(&self) {}
//!
//!     fn tx_finished(&self) {}
//!
//!     fn tx_byte(&self, byte: u8) {
//!         self.line.borrow_mut().push(byte);
//!     }
//! }
//!
//! fn main() {
//!     let uart = Uart {
//!         tx_space_avaliable: 128,
//!         line: RefCell::new(Vec::new()),
//!     };
//!     let reading = SensorReading::new(60, 1800);
//!
//!     let encoder = Encoder::new(String::from("node"), &uart);
//!     let sent = match encoder.send_reading(&reading) {
//!         Ok(size) => size,
//!         Err(_) => panic!("Opps!"),
//!     };
//!     assert_eq!(8, sent);
//!
//!     let mut decoder = Decoder::new(String::from("gateway"), 256);
//!     decoder.poll(uart.line.borrow().as_slice());
//!
//!     assert_eq!(reading, decoder.get_reading().unwrap());
//! }
//! ```

mod buffer;
mod checksum;
mod decoder;
mod error;
mod frame;
mod interface;
mod reading;

pub use buffer::ByteStreamBuffer;
pub use checksum::checksum;
pub use decoder::{Decoder, DecoderStats, RejectReason, DEFAULT_RX_CAPACITY};
pub use error::Error;
pub use frame::{
    encode, Encoder, FRAME_HEADER, FRAME_LEN, FRAME_OVERHEAD, FRAME_TAIL, MAX_FRAME_LEN,
    PAYLOAD_WIDTH,
};
pub use interface::Interface;
pub use reading::SensorReading;
