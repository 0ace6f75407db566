extern crate flora_link as link;
use std::time::{SystemTime, UNIX_EPOCH};

use env_logger;
use log::LevelFilter;

// Stand-in for the network publisher: stamps each reading and prints it.
struct TelemetrySink {
    name: String,
}

impl TelemetrySink {
    fn publish(&self, reading: &link::SensorReading) {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(std::time::Duration::from_secs(0))
            .as_millis();
        println!(
            "{}: publish soil={}%, light={}, timestamp={}",
            self.name, reading.soil_moisture, reading.light_intensity, timestamp
        );
    }
}

fn main() {
    log::set_max_level(LevelFilter::Debug);
    env_logger::init();

    let sink = TelemetrySink {
        name: String::from("sink"),
    };
    let mut decoder = link::Decoder::new(String::from("gateway"), link::DEFAULT_RX_CAPACITY);

    // A line as the gateway actually sees it: line noise, then a frame, then
    // a frame corrupted in transit, then a frame split across two bursts.
    let good = link::encode(&link::SensorReading::new(60, 1800));
    let mut corrupted = link::encode(&link::SensorReading::new(12, 300));
    corrupted[6] ^= 0x40;
    let split = link::encode(&link::SensorReading::new(88, 4095));

    let mut first_burst: Vec<u8> = vec![0x00, 0x37, 0xfe];
    first_burst.extend_from_slice(&good);
    first_burst.extend_from_slice(&corrupted);
    first_burst.extend_from_slice(&split[0..3]);

    for burst in [&first_burst[..], &split[3..8]].iter() {
        decoder.poll(burst);
        while let Ok(reading) = decoder.get_reading() {
            sink.publish(&reading);
        }
    }

    let stats = decoder.stats();
    println!(
        "gateway: {} frames decoded, {} noise bytes, {} checksum errors, {} bytes discarded",
        stats.frames_decoded, stats.noise_bytes, stats.checksum_mismatches, stats.bytes_discarded
    );
}
