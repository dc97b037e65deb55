use std::time::Duration;

use crate::core::{ResearchError, Result};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Build a reqwest client with a connect timeout and a whole-request timeout.
/// The provider runs the tool loop before answering, so the request timeout
/// must be generous.
pub fn make_http_client(timeout_secs: u64) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| ResearchError::Config(format!("http client: {e}")))
}

#[cfg(test)]
mod tests {
    #[test]
    fn it_builds_a_client() {
        assert!(super::make_http_client(5).is_ok());
    }
}
