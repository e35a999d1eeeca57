//! `.typeagenrc.json` loading.
//!
//! The file is read with the same parser as the documents it describes, so
//! `${NAME}` placeholders work in any string value once an `envFile` is set:
//!
//! ```json
//! {
//!   "outFile": "types.d.ts",
//!   "envFile": ".env",
//!   "endpoints": [
//!     {
//!       "rootType": "User",
//!       "url": "https://api.example.com/users/1",
//!       "method": "GET",
//!       "headers": { "Authorization": "Bearer ${TOKEN}" }
//!     }
//!   ]
//! }
//! ```
//!
//! Relative `outFile` and `envFile` paths are resolved against the directory
//! holding the config file.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use indexmap::IndexMap;
use serde::Deserialize;
use tracing::debug;
use typeagen_core::{env, EnvMap};

/// Config file looked up in the working directory by default.
pub const DEFAULT_FILE: &str = ".typeagenrc.json";

#[derive(Debug)]
pub struct Config {
    /// Where to write the interfaces; stdout when `None`.
    pub output: Option<PathBuf>,
    pub endpoints: Vec<Endpoint>,
}

/// One document to fetch and the name of its root interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub root_type: String,
    pub url: String,
    pub method: String,
    pub headers: IndexMap<String, String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawConfig {
    out_file: Option<String>,
    env_file: Option<String>,
    endpoints: Vec<RawEndpoint>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEndpoint {
    root_type: Option<String>,
    url: Option<String>,
    method: Option<String>,
    #[serde(default)]
    headers: IndexMap<String, String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_str(&text, base)
            .with_context(|| format!("Invalid config file: {}", path.display()))
    }

    /// Parse config text. `base` is the directory relative paths start from.
    pub fn from_str(text: &str, base: &Path) -> Result<Self> {
        let raw = decode(text, None)?;

        let vars = match &raw.env_file {
            Some(file) => {
                let path = base.join(file);
                env::load_file(&path)
                    .with_context(|| format!("Failed to load env file: {}", path.display()))?
            }
            None => None,
        };

        // Placeholders can appear anywhere, so decode again with the mapping.
        let raw = match &vars {
            Some(vars) => decode(text, Some(vars))?,
            None => raw,
        };

        let endpoints = raw
            .endpoints
            .into_iter()
            .enumerate()
            .map(|(idx, endpoint)| endpoint.validate(idx))
            .collect::<Result<Vec<_>>>()?;
        debug!(endpoints = endpoints.len(), interpolated = vars.is_some(), "parsed config");

        Ok(Self {
            output: raw.out_file.map(|file| base.join(file)),
            endpoints,
        })
    }
}

impl RawEndpoint {
    fn validate(self, idx: usize) -> Result<Endpoint> {
        Ok(Endpoint {
            root_type: required("rootType", self.root_type, idx)?,
            url: required("url", self.url, idx)?,
            method: required("method", self.method, idx)?,
            headers: self.headers,
        })
    }
}

fn required(field: &str, value: Option<String>, idx: usize) -> Result<String> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => bail!("endpoints[{idx}]: '{field}' is a required prop for endpoint configuration"),
    }
}

fn decode(text: &str, vars: Option<&EnvMap>) -> Result<RawConfig> {
    let value = typeagen_core::parse(text, vars)?;
    if value.as_object().is_none() {
        bail!("config must be a JSON object, found {}", value.kind_name());
    }
    Ok(serde_json::from_value(value.to_json())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const MINIMAL: &str = r#"{
        "endpoints": [
            {"rootType": "User", "url": "http://localhost/users/1", "method": "GET"}
        ]
    }"#;

    #[test]
    fn minimal_config() {
        let config = Config::from_str(MINIMAL, Path::new("")).unwrap();
        assert!(config.output.is_none());
        assert_eq!(
            config.endpoints,
            vec![Endpoint {
                root_type: "User".into(),
                url: "http://localhost/users/1".into(),
                method: "GET".into(),
                headers: IndexMap::new(),
            }]
        );
    }

    #[test]
    fn out_file_is_relative_to_config_dir() {
        let text = r#"{"outFile": "types.d.ts", "endpoints": []}"#;
        let config = Config::from_str(text, Path::new("/project")).unwrap();
        assert_eq!(config.output, Some(PathBuf::from("/project/types.d.ts")));
    }

    #[test]
    fn headers_keep_order() {
        let text = r#"{"endpoints": [{"rootType": "A", "url": "u", "method": "POST",
            "headers": {"X-B": "2", "X-A": "1"}}]}"#;
        let config = Config::from_str(text, Path::new("")).unwrap();
        let names: Vec<&str> = config.endpoints[0].headers.keys().map(String::as_str).collect();
        assert_eq!(names, ["X-B", "X-A"]);
    }

    #[test]
    fn env_file_fills_placeholders() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".env"), "TOKEN=s3cret\nHOST = api.test\n").unwrap();
        let text = r#"{
            "envFile": ".env",
            "endpoints": [{
                "rootType": "User",
                "url": "https://${HOST}/users",
                "method": "GET",
                "headers": {"Authorization": "Bearer ${TOKEN}"}
            }]
        }"#;
        std::fs::write(dir.path().join(DEFAULT_FILE), text).unwrap();

        let config = Config::load(&dir.path().join(DEFAULT_FILE)).unwrap();
        let endpoint = &config.endpoints[0];
        assert_eq!(endpoint.url, "https://api.test/users");
        assert_eq!(endpoint.headers["Authorization"], "Bearer s3cret");
    }

    #[test]
    fn missing_env_file_leaves_placeholders() {
        let text = r#"{"envFile": "nope.env", "endpoints": [
            {"rootType": "A", "url": "https://${HOST}/", "method": "GET"}]}"#;
        let config = Config::from_str(text, Path::new("/definitely/missing")).unwrap();
        assert_eq!(config.endpoints[0].url, "https://${HOST}/");
    }

    #[test]
    fn malformed_env_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(".env"), "JUSTANAME\n").unwrap();
        let text = r#"{"envFile": ".env", "endpoints": []}"#;
        let err = Config::from_str(text, dir.path()).unwrap_err();
        assert!(format!("{err:#}").contains("no '=' separator"));
    }

    #[test]
    fn missing_required_prop() {
        let text = r#"{"endpoints": [{"rootType": "A", "method": "GET"}]}"#;
        let err = Config::from_str(text, Path::new("")).unwrap_err();
        assert!(err.to_string().contains("'url' is a required prop"));
    }

    #[test]
    fn empty_required_prop() {
        let text = r#"{"endpoints": [{"rootType": "", "url": "u", "method": "GET"}]}"#;
        let err = Config::from_str(text, Path::new("")).unwrap_err();
        assert!(err.to_string().contains("endpoints[0]: 'rootType'"));
    }

    #[test]
    fn endpoints_must_be_present() {
        let err = Config::from_str(r#"{"outFile": "x.ts"}"#, Path::new("")).unwrap_err();
        assert!(err.to_string().contains("endpoints"));
    }

    #[test]
    fn root_array_is_rejected() {
        let err = Config::from_str("[]", Path::new("")).unwrap_err();
        assert!(err.to_string().contains("must be a JSON object"));
    }

    #[test]
    fn malformed_config_reports_position() {
        let err = Config::from_str(r#"{"endpoints" []}"#, Path::new("")).unwrap_err();
        assert!(err.to_string().contains("line 1, column 14"));
    }
}
