use serde::Deserialize;

/// One raw reading from the device, as served by `GET /api/data`.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub tds: f64,
    pub rpm: f64,
    pub accel: Axes,
    pub gyro: Axes,
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Axes {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_device_body() {
        let body = r#"{
            "tds": 12.5,
            "rpm": 100,
            "accel": {"x": 1, "y": 2, "z": 3},
            "gyro": {"x": 0.1, "y": 0.2, "z": 0.3}
        }"#;
        let sample: Sample = serde_json::from_str(body).unwrap();
        assert_eq!(sample.tds, 12.5);
        assert_eq!(sample.rpm, 100.0);
        assert_eq!(sample.accel, Axes { x: 1.0, y: 2.0, z: 3.0 });
        assert_eq!(sample.gyro, Axes { x: 0.1, y: 0.2, z: 0.3 });
    }

    #[test]
    fn rejects_missing_fields() {
        let body = r#"{"tds": 12.5, "rpm": 100}"#;
        assert!(serde_json::from_str::<Sample>(body).is_err());
    }
}
