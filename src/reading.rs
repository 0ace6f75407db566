/// One decoded sensor record, as carried by a single frame.
///
/// `soil_moisture` is a percentage (0-100). `light_intensity` is in whatever
/// unit the sensor calibration defines; the protocol only promises a 16-bit
/// value. Both fields are always present on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorReading {
    pub soil_moisture: u16,
    pub light_intensity: u16,
}

impl SensorReading {
    pub fn new(soil_moisture: u16, light_intensity: u16) -> Self {
        SensorReading {
            soil_moisture: soil_moisture,
            light_intensity: light_intensity,
        }
    }
}
