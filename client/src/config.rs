use crate::traits::ClientError;
use std::fmt;
use std::time::Duration;
use vision::{Feature, PrepareOptions};

pub const DEFAULT_ENDPOINT: &str = "https://vision.googleapis.com/v1/images:annotate";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Headers that tie an API key restricted to one app to its caller.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientIdentity {
    IosBundle(String),
    Android {
        package: String,
        /// SHA-1 signing certificate fingerprint.
        cert: Option<String>,
    },
}

impl ClientIdentity {
    pub fn headers(&self) -> Vec<(&'static str, &str)> {
        match self {
            ClientIdentity::IosBundle(id) => vec![("X-Ios-Bundle-Identifier", id.as_str())],
            ClientIdentity::Android { package, cert } => {
                let mut headers = vec![("X-Android-Package", package.as_str())];
                if let Some(cert) = cert {
                    headers.push(("X-Android-Cert", cert.as_str()));
                }
                headers
            }
        }
    }
}

#[derive(Clone)]
pub struct ClientConfig {
    pub endpoint: String,
    pub api_key: String,
    pub identity: Option<ClientIdentity>,
    /// Bound on the HTTP exchange, not on image preparation.
    pub timeout: Duration,
    pub prepare: PrepareOptions,
    pub features: Vec<Feature>,
}

impl ClientConfig {
    /// Configuration for the public endpoint with the given key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            api_key: api_key.into(),
            identity: None,
            timeout: DEFAULT_TIMEOUT,
            prepare: PrepareOptions::default(),
            features: Feature::defaults(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_identity(mut self, identity: ClientIdentity) -> Self {
        self.identity = Some(identity);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read configuration from the environment.
    ///
    /// `GOOGLE_VISION_API_KEY` is required. `VISION_ENDPOINT`,
    /// `VISION_TIMEOUT_SECS` and one identity are optional: either
    /// `VISION_BUNDLE_ID`, or `VISION_ANDROID_PACKAGE` with an optional
    /// `VISION_ANDROID_CERT`. A bundle id wins when both are set.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with variables resolved by
    /// `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ClientError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let key = lookup("GOOGLE_VISION_API_KEY")
            .ok_or_else(|| ClientError::Config("GOOGLE_VISION_API_KEY is not set".into()))?;
        let mut config = Self::new(key);
        if let Some(endpoint) = lookup("VISION_ENDPOINT") {
            config = config.with_endpoint(endpoint);
        }
        if let Some(bundle) = lookup("VISION_BUNDLE_ID") {
            config = config.with_identity(ClientIdentity::IosBundle(bundle));
        } else if let Some(package) = lookup("VISION_ANDROID_PACKAGE") {
            config = config.with_identity(ClientIdentity::Android {
                package,
                cert: lookup("VISION_ANDROID_CERT"),
            });
        }
        if let Some(secs) = lookup("VISION_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .map_err(|_| ClientError::Config(format!("bad VISION_TIMEOUT_SECS: {secs}")))?;
            config = config.with_timeout(Duration::from_secs(secs));
        }
        Ok(config)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("identity", &self.identity)
            .field("timeout", &self.timeout)
            .field("prepare", &self.prepare)
            .field("features", &self.features)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn android_identity_sends_both_headers() {
        let id = ClientIdentity::Android {
            package: "com.example.seefood".into(),
            cert: Some("AB:CD".into()),
        };
        assert_eq!(
            id.headers(),
            vec![("X-Android-Package", "com.example.seefood"), ("X-Android-Cert", "AB:CD")]
        );
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn key_is_required() {
        let err = ClientConfig::from_lookup(vars(&[("VISION_ENDPOINT", "http://x")])).unwrap_err();
        assert!(matches!(err, ClientError::Config(msg) if msg.contains("GOOGLE_VISION_API_KEY")));
    }

    #[test]
    fn key_alone_uses_defaults() {
        let config = ClientConfig::from_lookup(vars(&[("GOOGLE_VISION_API_KEY", "k")])).unwrap();
        assert_eq!(config.api_key, "k");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.identity, None);
    }

    #[test]
    fn optional_overrides_apply() {
        let config = ClientConfig::from_lookup(vars(&[
            ("GOOGLE_VISION_API_KEY", "k"),
            ("VISION_ENDPOINT", "http://localhost:9000/annotate"),
            ("VISION_BUNDLE_ID", "com.example.seefood"),
            ("VISION_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.endpoint, "http://localhost:9000/annotate");
        assert_eq!(
            config.identity,
            Some(ClientIdentity::IosBundle("com.example.seefood".into()))
        );
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn android_identity_from_vars() {
        let config = ClientConfig::from_lookup(vars(&[
            ("GOOGLE_VISION_API_KEY", "k"),
            ("VISION_ANDROID_PACKAGE", "com.example.seefood"),
            ("VISION_ANDROID_CERT", "AB:CD"),
        ]))
        .unwrap();
        assert_eq!(
            config.identity,
            Some(ClientIdentity::Android {
                package: "com.example.seefood".into(),
                cert: Some("AB:CD".into()),
            })
        );
    }

    #[test]
    fn bundle_id_wins_over_android() {
        let config = ClientConfig::from_lookup(vars(&[
            ("GOOGLE_VISION_API_KEY", "k"),
            ("VISION_BUNDLE_ID", "com.example.ios"),
            ("VISION_ANDROID_PACKAGE", "com.example.android"),
        ]))
        .unwrap();
        assert_eq!(config.identity, Some(ClientIdentity::IosBundle("com.example.ios".into())));
    }

    #[test]
    fn bad_timeout_is_config_error() {
        let err = ClientConfig::from_lookup(vars(&[
            ("GOOGLE_VISION_API_KEY", "k"),
            ("VISION_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ClientError::Config(msg) if msg.contains("soon")));
    }

    #[test]
    fn debug_hides_key() {
        let rendered = format!("{:?}", ClientConfig::new("secret-key"));
        assert!(!rendered.contains("secret-key"));
    }
}
