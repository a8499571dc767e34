/*!
 * Bridge Configuration
 *
 * Settings the host process may supply through the environment. The bridge
 * never reads them implicitly; `init_tracing` takes a config explicitly.
 */

/// Environment variable holding the tracing filter directive
pub const ENV_LOG: &str = "VMEM_LOG";

/// Environment variable enabling JSON trace output
pub const ENV_TRACE_JSON: &str = "VMEM_TRACE_JSON";

/// Environment variable enabling file/line fields in trace output
pub const ENV_TRACE_SOURCE: &str = "VMEM_TRACE_SOURCE";

/// Tracing configuration for the bridge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BridgeConfig {
    /// `EnvFilter` directive (default: info)
    pub log_filter: String,

    /// Emit JSON instead of compact human-readable lines
    pub trace_json: bool,

    /// Include file and line number in every event
    pub with_source_location: bool,
}

impl BridgeConfig {
    /// Create default configuration
    pub fn new() -> Self {
        Self {
            log_filter: "info".to_string(),
            trace_json: false,
            with_source_location: false,
        }
    }

    /// Only warnings and errors
    pub fn quiet() -> Self {
        Self {
            log_filter: "warn".to_string(),
            ..Self::new()
        }
    }

    /// Every bridge call, with source locations
    pub fn verbose() -> Self {
        Self {
            log_filter: "vmem_bridge=trace".to_string(),
            trace_json: false,
            with_source_location: true,
        }
    }

    /// Read configuration from the process environment
    ///
    /// `VMEM_LOG` takes precedence over `RUST_LOG`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::new();
        let flag = |key: &str| {
            lookup(key)
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false)
        };

        Self {
            log_filter: lookup(ENV_LOG)
                .or_else(|| lookup("RUST_LOG"))
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.log_filter),
            trace_json: flag(ENV_TRACE_JSON),
            with_source_location: flag(ENV_TRACE_SOURCE),
        }
    }
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::new()
    }
}
