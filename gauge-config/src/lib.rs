//! Loader for pagegauge configuration with YAML + environment overlays.
//!
//! Sources merge in order: an optional YAML file, then `GAUGE_`-prefixed
//! environment variables (`GAUGE_CRAWL__API_KEY` maps to `crawl.api_key`).
//! `${VAR}` placeholders are expanded recursively, with a depth cap so
//! cyclic definitions terminate.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

#[derive(Debug, Default, Deserialize)]
pub struct GaugeConfig {
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub crawl: CrawlConfig,
    /// Absent means the LLM stages are unavailable; extraction and scoring
    /// still run.
    #[serde(default)]
    pub llm: Option<LlmConfig>,
}

/// Direct page-fetch knobs.
#[derive(Debug, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_fetch_timeout_secs")]
    pub timeout_secs: u64,
    /// Browser identity override; the extractor supplies its default when
    /// unset.
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_fetch_timeout_secs(),
            user_agent: None,
        }
    }
}

/// Managed crawl-API knobs.
#[derive(Debug, Deserialize)]
pub struct CrawlConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_crawl_attempts")]
    pub max_attempts: usize,
    #[serde(default = "default_crawl_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub use_proxy: bool,
    /// Self-hosted endpoint override.
    #[serde(default)]
    pub base_url: Option<String>,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            max_attempts: default_crawl_attempts(),
            timeout_secs: default_crawl_timeout_secs(),
            use_proxy: false,
            base_url: None,
        }
    }
}

/// The tag is `provider`; only OpenAI-compatible endpoints are wired up.
#[derive(Debug, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum LlmConfig {
    Openai {
        model: String,
        auth_token: String,
        #[serde(default = "default_openai_endpoint")]
        endpoint: String,
    },
}

fn default_fetch_timeout_secs() -> u64 {
    30
}
fn default_crawl_attempts() -> usize {
    2
}
fn default_crawl_timeout_secs() -> u64 {
    30
}
fn default_openai_endpoint() -> String {
    "https://api.openai.com/v1/".into()
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
pub struct GaugeConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for GaugeConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl GaugeConfigLoader {
    /// Start with the defaults: `GAUGE_` env overrides only.
    ///
    /// ```
    /// use gauge_config::GaugeConfigLoader;
    ///
    /// let config = GaugeConfigLoader::new().load().expect("valid config");
    /// assert_eq!(config.fetch.timeout_secs, 30);
    /// assert!(config.llm.is_none());
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a config file that must exist; the `config` crate infers the
    /// format from the suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a config file that may be absent, for the conventional
    /// `pagegauge.yaml` next to the binary.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Merge an inline YAML snippet (tests, CLI overrides).
    ///
    /// ```
    /// use gauge_config::{GaugeConfigLoader, LlmConfig};
    ///
    /// let cfg = GaugeConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// crawl:
    ///   api_key: "fc-test"
    ///   max_attempts: 4
    /// llm:
    ///   provider: openai
    ///   model: "gpt-4o-mini"
    ///   auth_token: "sk-test"
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.crawl.api_key.as_deref(), Some("fc-test"));
    /// assert_eq!(cfg.crawl.max_attempts, 4);
    /// assert!(matches!(cfg.llm, Some(LlmConfig::Openai { .. })));
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources.
    ///
    /// `${VAR}` placeholders are expanded before the strongly typed config
    /// materialises, so secrets can live in the environment:
    ///
    /// ```
    /// use gauge_config::GaugeConfigLoader;
    ///
    /// unsafe { std::env::set_var("FC_KEY", "fc-from-env"); }
    ///
    /// let config = GaugeConfigLoader::new()
    ///     .with_yaml_str("crawl:\n  api_key: \"${FC_KEY}\"")
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(config.crawl.api_key.as_deref(), Some("fc-from-env"));
    ///
    /// unsafe { std::env::remove_var("FC_KEY"); }
    /// ```
    pub fn load(self) -> Result<GaugeConfig, ConfigError> {
        // Env goes in last so it always wins over file values.
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix("GAUGE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        // Round-trip through serde_json::Value so ${VAR} expansion can walk
        // the whole tree before typing it.
        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: GaugeConfig =
            serde_json::from_value(v).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}
