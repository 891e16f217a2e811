use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use serde::Deserialize;

/// Shown until a lookup resolves, and whenever one fails (San Francisco).
pub const FALLBACK_LAT: f64 = 37.7749;
pub const FALLBACK_LNG: f64 = -122.4194;

const GEOIP_URL: &str = "http://ip-api.com/json/";

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LocationSource {
    Resolved,
    Fallback,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DeviceLocation {
    pub lat: f64,
    pub lng: f64,
    pub source: LocationSource,
}

impl DeviceLocation {
    pub fn fallback() -> Self {
        Self {
            lat: FALLBACK_LAT,
            lng: FALLBACK_LNG,
            source: LocationSource::Fallback,
        }
    }
}

#[derive(Deserialize)]
struct GeoIpResponse {
    status: String,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// Fire-and-forget lookup. Sends exactly one location: the resolved
/// coordinates, or the fallback pair on any failure.
pub fn resolve() -> mpsc::Receiver<DeviceLocation> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(lookup().unwrap_or_else(DeviceLocation::fallback));
    });
    rx
}

fn lookup() -> Option<DeviceLocation> {
    let agent = ureq::AgentBuilder::new()
        .timeout_connect(Duration::from_millis(800))
        .timeout_read(Duration::from_secs(2))
        .build();

    let resp = agent.get(GEOIP_URL).call().ok()?;
    let geo = resp.into_json::<GeoIpResponse>().ok()?;
    if geo.status != "success" {
        return None;
    }
    Some(DeviceLocation {
        lat: geo.lat?,
        lng: geo.lon?,
        source: LocationSource::Resolved,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_is_the_default_pair() {
        let loc = DeviceLocation::fallback();
        assert_eq!(loc.lat, 37.7749);
        assert_eq!(loc.lng, -122.4194);
        assert_eq!(loc.source, LocationSource::Fallback);
    }

    #[test]
    fn parses_geoip_body() {
        let body = r#"{"status":"success","lat":51.5,"lon":-0.12,"city":"London"}"#;
        let geo: GeoIpResponse = serde_json::from_str(body).unwrap();
        assert_eq!(geo.status, "success");
        assert_eq!(geo.lat, Some(51.5));
        assert_eq!(geo.lon, Some(-0.12));
    }
}
