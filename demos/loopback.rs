extern crate flora_link as link;
use std::cell::RefCell;

use env_logger;
use log::LevelFilter;

struct Uart {
    name: String,
    tx_space_avaliable: u16,
    line: RefCell<Vec<u8>>,
}

impl Uart {
    fn new(name: String, tx_space_avaliable: u16) -> Self {
        Uart {
            name: name,
            tx_space_avaliable: tx_space_avaliable,
            line: RefCell::new(Vec::new()),
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
}

impl link::Interface for Uart {
    fn tx_space(&self) -> u16 {
        self.available_for_write()
    }

    fn tx_start(&self) {
        print!("{} send frame: [ ", self.name);
    }

    fn tx_finished(&self) {
        println!("]");
    }

    fn tx_byte(&self, byte: u8) {
        print!("0x{:02x} ", byte);
        self.line.borrow_mut().push(byte);
    }
}

fn main() {
    log::set_max_level(LevelFilter::Trace);
    env_logger::init();

    let uart = Uart::new(String::from("uart"), 128);
    let reading = link::SensorReading::new(60, 1800);
    let encoder = link::Encoder::new(String::from("node"), &uart);
    let mut decoder = link::Decoder::new(String::from("gateway"), 256);

    uart.open();

    println!(
        "The reading to be sent: soil={}%, light={}",
        reading.soil_moisture, reading.light_intensity
    );

    match encoder.send_reading(&reading) {
        Ok(size) => {
            println!("{}: {} bytes sent.", uart.name, size);
        }
        Err(_) => panic!("Opps!"),
    };

    decoder.poll(uart.line.borrow().as_slice());

    match decoder.get_reading() {
        Ok(received) => {
            println!(
                "The reading received: soil={}%, light={}",
                received.soil_moisture, received.light_intensity
            );
        }
        Err(_) => {
            println!("No reading!");
        }
    }

    uart.close();
}
