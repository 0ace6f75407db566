/// Hardware seam for the transmit side of the link.
///
/// Implemented by whatever owns the serial peripheral. The encoder calls
/// `tx_byte` once per encoded byte, in order, bracketed by `tx_start` and
/// `tx_finished`.
pub trait Interface {
    /// Space left in the transmit buffer, in bytes.
    fn tx_space(&self) -> u16;
    /// A frame transmission is starting.
    fn tx_start(&self);
    /// The frame has been fully handed to the transport.
    fn tx_finished(&self);
    /// Send a single byte on the line.
    fn tx_byte(&self, byte: u8);
}
