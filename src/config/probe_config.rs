use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result};
use crate::http_probe::prelude::*;

/// The list of endpoints to probe, as read from the config file.
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeConfig {
    pub targets: Vec<TargetConfig>,
}

impl ProbeConfig {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }
}

/// One endpoint as written by the user. Nothing is validated until
/// [`TargetConfig::to_request`] is called.
#[derive(Debug, Clone, Deserialize)]
pub struct TargetConfig {
    /// The URL of the API to test.
    pub url: String,

    /// GET, POST, PUT or DELETE, case-insensitive. Defaults to GET.
    #[serde(default = "default_method")]
    pub method: String,

    /// Sent verbatim as the `Authorization` header, e.g. `Bearer abc`.
    #[serde(default)]
    pub auth: Option<String>,

    /// JSON text sent as the request body. Only used for POST and PUT.
    #[serde(default)]
    pub body: Option<String>,
}

fn default_method() -> String {
    "GET".to_string()
}

impl TargetConfig {
    /// Validates the target and turns it into a request the engine can probe.
    pub fn to_request(&self) -> Result<ProbeRequest> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(Error::EmptyUrl);
        }
        Url::parse(url).map_err(|source| Error::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        let method: Method = self.method.parse()?;
        let mut request = ProbeRequest::new(url, method);

        if let Some(token) = self.auth.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            request = request.with_authorization(token);
        }

        if method.takes_body() {
            let text = self.body.as_deref().unwrap_or_default().trim();
            let body = serde_json::from_str(text).map_err(Error::InvalidJsonBody)?;
            request = request.with_body(body);
        }

        Ok(request)
    }
}
