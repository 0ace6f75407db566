#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use flora_link::{
        checksum, encode, Decoder, Encoder, Error, Interface, SensorReading, FRAME_LEN,
    };

    struct Uart {
        tx_space_avaliable: u16,
        line: RefCell<Vec<u8>>,
    }

    impl Uart {
        fn new(tx_space_avaliable: u16) -> Self {
            Uart {
                tx_space_avaliable: tx_space_avaliable,
                line: RefCell::new(Vec::new()),
            }
        }
    }

    impl Interface for Uart {
        fn tx_space(&self) -> u16 {
            self.tx_space_avaliable
        }

        fn tx_start(&self) {}

        fn tx_finished(&self) {}

        fn tx_byte(&self, byte: u8) {
            self.line.borrow_mut().push(byte);
        }
    }

    #[test]
    fn encode_matches_wire_layout() {
        let reading = SensorReading::new(60, 1800);
        let frame = encode(&reading);

        // 60 = 0x003c, 1800 = 0x0708
        let expected_checksum = checksum(&[0x04, 0x00, 0x3c, 0x07, 0x08]);
        assert_eq!(8, frame.len());
        assert_eq!(
            [0xaa, 0x04, 0x00, 0x3c, 0x07, 0x08, expected_checksum, 0x55],
            frame
        );
        assert_eq!(0x4f, frame[6]);
    }

    #[test]
    fn send_reading_over_uart() {
        let uart = Uart::new(128);
        let encoder = Encoder::new(String::from("node"), &uart);
        let reading = SensorReading::new(60, 1800);

        let sent = match encoder.send_reading(&reading) {
            Ok(size) => size,
            Err(_) => panic!("Opps!"),
        };

        assert_eq!(FRAME_LEN, sent as usize);
        assert_eq!(encode(&reading).to_vec(), *uart.line.borrow());
    }

    #[test]
    fn send_no_enough_buffer() {
        let uart = Uart::new(5);
        let encoder = Encoder::new(String::from("node"), &uart);

        let oversized = match encoder.send_reading(&SensorReading::new(60, 1800)) {
            Ok(_) => 0,
            Err(Error::NoEnoughTxSpace(size)) => size,
            Err(_) => panic!("Opps!"),
        };

        assert_eq!(3, oversized);
        assert_eq!(0, uart.line.borrow().len());
    }

    #[test]
    fn roundtrip_single_frame() {
        let reading = SensorReading::new(60, 1800);
        let mut decoder = Decoder::new(String::from("gateway"), 256);

        decoder.poll(&encode(&reading));

        assert_eq!(reading, decoder.get_reading().unwrap());
        assert_eq!(Err(Error::NoReading), decoder.get_reading());
        assert_eq!(0, decoder.buffered_len());
        assert_eq!(1, decoder.stats().frames_decoded);
        assert_eq!(0, decoder.stats().bytes_discarded);
    }

    #[test]
    fn roundtrip_extreme_values() {
        let mut decoder = Decoder::new(String::from("gateway"), 256);
        let readings = [
            SensorReading::new(0, 0),
            SensorReading::new(100, 65535),
            SensorReading::new(1, 256),
        ];

        for reading in readings.iter() {
            decoder.poll(&encode(reading));
        }

        for reading in readings.iter() {
            assert_eq!(*reading, decoder.get_reading().unwrap());
        }
        assert_eq!(0, decoder.buffered_len());
    }

    #[test]
    fn noise_prefix_costs_exactly_the_noise() {
        let noise = [0x00, 0x13, 0xfe, 0x55, 0x03];
        let reading = SensorReading::new(42, 1000);
        let mut decoder = Decoder::new(String::from("gateway"), 256);

        decoder.poll(&noise);
        decoder.poll(&encode(&reading));

        assert_eq!(reading, decoder.get_reading().unwrap());
        assert_eq!(noise.len() as u32, decoder.stats().noise_bytes);
        assert_eq!(noise.len() as u32, decoder.stats().bytes_discarded);
        assert_eq!(0, decoder.buffered_len());
    }

    #[test]
    fn truncated_frame_stays_buffered() {
        let frame = encode(&SensorReading::new(60, 1800));
        let mut decoder = Decoder::new(String::from("gateway"), 256);

        decoder.poll(&frame[0..5]);

        assert_eq!(Err(Error::NoReading), decoder.get_reading());
        assert_eq!(5, decoder.buffered_len());

        // The rest of the frame arrives; nothing was lost while waiting.
        decoder.poll(&frame[5..8]);

        assert_eq!(SensorReading::new(60, 1800), decoder.get_reading().unwrap());
        assert_eq!(0, decoder.buffered_len());
    }

    #[test]
    fn checksum_corruption_discards_header_and_rescans() {
        let mut frame = encode(&SensorReading::new(60, 1800));
        frame[6] ^= 0x01;
        let mut decoder = Decoder::new(String::from("gateway"), 256);

        decoder.poll(&frame);

        assert_eq!(Err(Error::NoReading), decoder.get_reading());
        assert_eq!(1, decoder.stats().checksum_mismatches);
        // The header went first; the remaining seven bytes were then
        // re-scanned as ordinary stream content and dropped as noise.
        assert_eq!(7, decoder.stats().noise_bytes);
        assert_eq!(0, decoder.buffered_len());

        // A later clean frame still decodes.
        decoder.poll(&encode(&SensorReading::new(7, 7)));
        assert_eq!(SensorReading::new(7, 7), decoder.get_reading().unwrap());
    }

    #[test]
    fn tail_corruption_discards_header_and_rescans() {
        let mut frame = encode(&SensorReading::new(60, 1800));
        frame[7] = 0x00;
        let mut decoder = Decoder::new(String::from("gateway"), 256);

        decoder.poll(&frame);

        assert_eq!(Err(Error::NoReading), decoder.get_reading());
        assert_eq!(1, decoder.stats().tail_mismatches);
        assert_eq!(0, decoder.buffered_len());
    }

    #[test]
    fn embedded_frames_decode_in_order() {
        let reading_a = SensorReading::new(10, 200);
        let reading_b = SensorReading::new(90, 40000);
        let mut stream: Vec<u8> = vec![0x01, 0x02, 0x03];
        stream.extend_from_slice(&encode(&reading_a));
        stream.extend_from_slice(&encode(&reading_b));
        let mut decoder = Decoder::new(String::from("gateway"), 256);

        decoder.poll(&stream);

        assert_eq!(reading_a, decoder.get_reading().unwrap());
        assert_eq!(reading_b, decoder.get_reading().unwrap());
        assert_eq!(Err(Error::NoReading), decoder.get_reading());
        assert_eq!(2, decoder.stats().frames_decoded);
        assert_eq!(3, decoder.stats().noise_bytes);
    }

    #[test]
    fn zero_length_claim_is_noise() {
        let mut decoder = Decoder::new(String::from("gateway"), 256);

        decoder.poll(&[0xaa, 0x00, 0x55]);

        assert_eq!(Err(Error::NoReading), decoder.get_reading());
        assert_eq!(1, decoder.stats().invalid_lengths);
        // 0x00 and 0x55 fall through as noise once the header is gone.
        assert_eq!(2, decoder.stats().noise_bytes);
        assert_eq!(0, decoder.buffered_len());
    }

    #[test]
    fn oversize_length_claim_is_noise() {
        let mut decoder = Decoder::new(String::from("gateway"), 256);

        // Length byte 0xff would mean a 259-byte frame; rejected before the
        // scanner ever waits for that many bytes.
        decoder.poll(&[0xaa, 0xff, 0x01]);

        assert_eq!(Err(Error::NoReading), decoder.get_reading());
        assert_eq!(1, decoder.stats().invalid_lengths);
    }

    #[test]
    fn unexpected_payload_width_is_rejected() {
        // Structurally valid two-byte-payload frame: right checksum, right
        // tail, wrong width for a sensor reading.
        let mut frame = vec![0xaa, 0x02, 0x11, 0x22];
        frame.push(checksum(&frame[1..4]));
        frame.push(0x55);
        let mut decoder = Decoder::new(String::from("gateway"), 256);

        decoder.poll(&frame);

        assert_eq!(Err(Error::NoReading), decoder.get_reading());
        assert_eq!(1, decoder.stats().unexpected_widths);
        assert_eq!(0, decoder.buffered_len());
    }

    #[test]
    fn sentinels_inside_payload_are_fine() {
        // Light value 0xaa55 puts both sentinel values in the payload.
        let reading = SensorReading::new(0xaa00, 0xaa55);
        let mut decoder = Decoder::new(String::from("gateway"), 256);

        decoder.poll(&encode(&reading));

        assert_eq!(reading, decoder.get_reading().unwrap());
        assert_eq!(0, decoder.buffered_len());
    }

    #[test]
    fn push_then_scan_matches_poll() {
        let reading = SensorReading::new(33, 12345);
        let mut decoder = Decoder::new(String::from("gateway"), 256);

        // Arrival context appends byte by byte; decoding happens later.
        for byte in encode(&reading).iter() {
            decoder.push(*byte);
        }
        assert_eq!(Err(Error::NoReading), decoder.get_reading());

        decoder.scan();

        assert_eq!(reading, decoder.get_reading().unwrap());
    }

    #[test]
    fn ring_overflow_keeps_newest_frame() {
        let reading = SensorReading::new(55, 555);
        let mut stream: Vec<u8> = vec![0x01, 0x02, 0x03];
        stream.extend_from_slice(&encode(&reading));

        // Capacity of exactly one frame: the garbage prefix is evicted while
        // the frame bytes arrive, and the frame itself survives.
        let mut decoder = Decoder::new(String::from("gateway"), 8);
        decoder.poll(&stream);

        assert_eq!(reading, decoder.get_reading().unwrap());
    }

    #[test]
    fn loopback_uart_roundtrip() {
        let uart = Uart::new(128);
        let encoder = Encoder::new(String::from("node"), &uart);
        let mut decoder = Decoder::new(String::from("gateway"), 256);
        let reading = SensorReading::new(73, 2048);

        encoder.send_reading(&reading).unwrap_or(0);
        decoder.poll(uart.line.borrow().as_slice());

        assert_eq!(reading, decoder.get_reading().unwrap());
    }
}
