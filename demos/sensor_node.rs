extern crate flora_link as link;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;
use std::time::Duration;

use env_logger;
use log::LevelFilter;

struct Uart {
    name: String,
    tx_space_avaliable: u16,
    sender: Sender<u8>,
}

impl Uart {
    fn new(name: String, tx_space_avaliable: u16, sender: Sender<u8>) -> Self {
        Uart {
            name: name,
            tx_space_avaliable: tx_space_avaliable,
            sender: sender,
        }
    }

    fn open(&self) {
        println!("{}: Open uart.", self.name);
    }

    fn close(&self) {
        println!("{}: Close uart.", self.name);
    }

    fn available_for_write(&self) -> u16 {
        self.tx_space_avaliable
    }

    fn tx(&self, byte: u8) {
        match self.sender.send(byte) {
            Ok(_) => {}
            Err(e) => {
                println!("{}: {}", self.name, e);
            }
        }
    }
}

impl link::Interface for Uart {
    fn tx_space(&self) -> u16 {
        self.available_for_write()
    }

    fn tx_start(&self) {}

    fn tx_finished(&self) {}

    fn tx_byte(&self, byte: u8) {
        self.tx(byte);
    }
}

// Stand-in for the ADC channels: raw conversions in 0..4095, scaled the way
// the firmware scales them.
struct Sensors {
    moisture_raw: u16,
    light_raw: u16,
}

impl Sensors {
    fn sample(&mut self) -> link::SensorReading {
        self.moisture_raw = (self.moisture_raw + 311) % 4096;
        self.light_raw = (self.light_raw + 1777) % 4096;
        let soil = (self.moisture_raw as u32 * 100 / 4095) as u16;
        link::SensorReading::new(soil, self.light_raw)
    }
}

fn main() {
    log::set_max_level(LevelFilter::Debug);
    env_logger::init();

    let (tx, rx): (Sender<u8>, Receiver<u8>) = channel();

    let node_builder = thread::Builder::new().name("node".into());
    let node = node_builder
        .spawn(move || {
            let uart = Uart::new(String::from("uart1"), 128, tx);
            let encoder = link::Encoder::new(String::from("node"), &uart);
            let mut sensors = Sensors {
                moisture_raw: 1024,
                light_raw: 2000,
            };

            uart.open();

            for _ in 0..5 {
                let reading = sensors.sample();
                match encoder.send_reading(&reading) {
                    Ok(size) => {
                        println!(
                            "node: sent soil={}%, light={} ({} bytes)",
                            reading.soil_moisture, reading.light_intensity, size
                        );
                    }
                    Err(_) => panic!("Opps!"),
                };
                thread::sleep(Duration::from_millis(50));
            }

            uart.close();
        })
        .unwrap();

    let gateway_builder = thread::Builder::new().name("gateway".into());
    let gateway = gateway_builder
        .spawn(move || {
            let mut decoder = link::Decoder::new(String::from("gateway"), 256);

            // One byte at a time, the way a serial interrupt would hand them
            // over; the scan runs on the polling step afterwards.
            for byte in rx.iter() {
                decoder.push(byte);
                decoder.scan();
                if let Ok(reading) = decoder.get_reading() {
                    println!(
                        "gateway: received soil={}%, light={}",
                        reading.soil_moisture, reading.light_intensity
                    );
                }
            }

            println!(
                "gateway: {} frames decoded, {} bytes discarded",
                decoder.stats().frames_decoded,
                decoder.stats().bytes_discarded
            );
        })
        .unwrap();

    node.join().unwrap();
    gateway.join().unwrap();
}
