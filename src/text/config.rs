/// Settings for text recovery.
///
/// The defaults are empirically chosen values that work on typical project
/// files. They are kept here, not in the decoders, so they can be tuned
/// against a corpus without touching the scanning code.
use once_cell::sync::Lazy;
use serde::Deserialize;

static DEFAULT_CONFIG: Lazy<RecoveryConfig> = Lazy::new(RecoveryConfig::default);

/// Error loading a [`RecoveryConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The document could not be parsed
    #[error("invalid recovery settings: {0}")]
    Parse(String),
    /// A value is out of range
    #[error("invalid recovery setting '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Tunable constants of the recovery engine.
///
/// # Examples
///
/// ```rust
/// use aepkit::text::RecoveryConfig;
///
/// let config = RecoveryConfig::new()
///     .with_min_printable_ratio(0.75)
///     .with_rejected_prefix("tmp_");
/// assert!(config.rejected_prefixes.iter().any(|p| p == "tmp_"));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RecoveryConfig {
    /// Minimum share of printable ASCII characters in accepted text
    pub min_printable_ratio: f64,
    /// Candidates starting with any of these are rejected
    pub rejected_prefixes: Vec<String>,
    /// Candidates containing any of these are rejected
    pub rejected_substrings: Vec<String>,
    /// Minimum code units in a UTF-16LE run
    pub min_utf16_units: usize,
    /// Minimum length of a NUL-terminated ASCII run
    pub min_nul_terminated_len: usize,
    /// A printable run must be longer than this to be accepted
    pub min_printable_run: usize,
    /// Payloads shorter than this are not scanned
    pub min_payload_len: usize,
    /// Only the first `max_scan_len` bytes of a payload are scanned
    pub max_scan_len: usize,
    /// Byte sequences that precede embedded text
    pub markers: Vec<String>,
    /// Layer name fragments (case-insensitive) that mark a text-like layer
    pub layer_name_hints: Vec<String>,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            min_printable_ratio: 0.5,
            rejected_prefixes: ["ADBE", "tdbs", "pard", "-_", "@@"].map(String::from).to_vec(),
            rejected_substrings: vec!["::".to_string()],
            min_utf16_units: 3,
            min_nul_terminated_len: 5,
            min_printable_run: 4,
            min_payload_len: 8,
            max_scan_len: 64 * 1024,
            markers: ["TEXT", "text", "Utf8", "utf8", "tdbs", "\0\0\0"]
                .map(String::from)
                .to_vec(),
            layer_name_hints: ["text", "title", "placeholder"].map(String::from).to_vec(),
        }
    }
}

impl RecoveryConfig {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared default settings.
    pub fn global() -> &'static RecoveryConfig {
        &DEFAULT_CONFIG
    }

    /// Set the minimum printable ratio.
    #[inline]
    pub fn with_min_printable_ratio(mut self, ratio: f64) -> Self {
        self.min_printable_ratio = ratio;
        self
    }

    /// Add a rejected prefix.
    #[inline]
    pub fn with_rejected_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.rejected_prefixes.push(prefix.into());
        self
    }

    /// Add a rejected substring.
    #[inline]
    pub fn with_rejected_substring(mut self, needle: impl Into<String>) -> Self {
        self.rejected_substrings.push(needle.into());
        self
    }

    /// Set the per-payload scan limit.
    #[inline]
    pub fn with_max_scan_len(mut self, len: usize) -> Self {
        self.max_scan_len = len;
        self
    }

    /// Set the minimum scanned payload length.
    #[inline]
    pub fn with_min_payload_len(mut self, len: usize) -> Self {
        self.min_payload_len = len;
        self
    }

    /// Replace the layer name hints.
    pub fn with_layer_name_hints<I, S>(mut self, hints: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.layer_name_hints = hints.into_iter().map(Into::into).collect();
        self
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.min_printable_ratio) {
            return Err(ConfigError::Invalid {
                field: "min_printable_ratio",
                reason: format!("{} is not between 0 and 1", self.min_printable_ratio),
            });
        }
        if self.markers.iter().any(String::is_empty) {
            return Err(ConfigError::Invalid {
                field: "markers",
                reason: "markers must not be empty".to_string(),
            });
        }
        if self.max_scan_len == 0 {
            return Err(ConfigError::Invalid {
                field: "max_scan_len",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }

    /// Load settings from a YAML document. Missing fields keep their
    /// defaults.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use aepkit::text::RecoveryConfig;
    ///
    /// let config = RecoveryConfig::from_yaml("min_printable_ratio: 0.8\n").unwrap();
    /// assert_eq!(config.min_printable_ratio, 0.8);
    /// assert_eq!(config.min_payload_len, 8);
    /// ```
    #[cfg(feature = "config")]
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_saphyr::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
