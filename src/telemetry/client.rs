use std::time::Duration;

use super::sample::Sample;

/// Anything the poll loop can draw samples from. The real implementation is
/// [`DeviceClient`]; tests script their own.
pub trait SampleSource {
    fn fetch(&self) -> Result<Sample, FetchError>;
}

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    /// Network unreachable, connect/read timeout, or a non-2xx status.
    #[error("request failed: {0}")]
    Request(#[from] Box<ureq::Error>),
    /// 2xx response whose body was not a valid sample.
    #[error("malformed response body: {0}")]
    Decode(#[from] std::io::Error),
}

/// HTTP client for one sensor node.
pub struct DeviceClient {
    agent: ureq::Agent,
    data_url: String,
}

impl DeviceClient {
    pub fn new(endpoint: &str) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_millis(500))
            .timeout_read(Duration::from_secs(5))
            .build();
        Self {
            agent,
            data_url: data_url(endpoint),
        }
    }
}

impl SampleSource for DeviceClient {
    fn fetch(&self) -> Result<Sample, FetchError> {
        let resp = self.agent.get(&self.data_url).call().map_err(Box::new)?;
        Ok(resp.into_json::<Sample>()?)
    }
}

fn data_url(endpoint: &str) -> String {
    format!("{}/api/data", endpoint.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_data_path() {
        assert_eq!(data_url("http://10.0.0.39"), "http://10.0.0.39/api/data");
        assert_eq!(data_url("http://10.0.0.39/"), "http://10.0.0.39/api/data");
    }
}
