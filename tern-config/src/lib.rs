//! Loader for Tern configuration with YAML + environment overlays.
//!
//! The schema is deliberately small: the four Twitter credentials and the
//! Slack incoming-webhook settings. Values may reference environment
//! variables with `${VAR}`; expansion happens after all sources are merged
//! and before the typed structs are materialised.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

/// Top-level configuration for the bridge.
#[derive(Debug, Deserialize)]
pub struct TernConfig {
    pub twitter: TwitterCredentialsConfig,
    pub slack: SlackConfig,
}

/// OAuth 1.0a credential set for the Twitter API.
///
/// None of these are validated locally; a bad credential surfaces as a remote
/// call failure.
#[derive(Debug, Deserialize)]
pub struct TwitterCredentialsConfig {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

/// Slack incoming-webhook settings used for failure notifications.
#[derive(Debug, Deserialize)]
pub struct SlackConfig {
    pub webhook_url: String,
    /// Channel commands are read for / errors reported to when the caller
    /// does not name one.
    #[serde(default = "default_channel")]
    pub channel: String,
}

fn default_channel() -> String {
    "#general".into()
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hiding the `config` crate wiring (YAML + env overrides).
pub struct TernConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for TernConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl TernConfigLoader {
    /// Start with the defaults: `TERN_`-prefixed env overrides, `__` as the
    /// nesting separator (`TERN_SLACK__CHANNEL=#ops`).
    pub fn new() -> Self {
        let builder =
            Config::builder().add_source(Environment::with_prefix("TERN").separator("__"));
        Self { builder }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self.builder.add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Merge an inline YAML snippet (used by tests and the binary's defaults).
    ///
    /// ```
    /// use tern_config::TernConfigLoader;
    ///
    /// let cfg = TernConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// twitter:
    ///   consumer_key: "ck"
    ///   consumer_secret: "cs"
    ///   access_token: "at"
    ///   access_token_secret: "as"
    /// slack:
    ///   webhook_url: "https://hooks.slack.com/services/T0/B0/x"
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.twitter.consumer_key, "ck");
    /// assert_eq!(cfg.slack.channel, "#general");
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources.
    ///
    /// Sources are combined, `${VAR}` placeholders are expanded recursively
    /// (bounded depth), and the result is materialised into [`TernConfig`].
    pub fn load(self) -> Result<TernConfig, ConfigError> {
        let cfg = self.builder.build()?;

        // Round-trip through serde_json::Value so env expansion can walk
        // nested maps before the typed deserialize.
        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: TernConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}
