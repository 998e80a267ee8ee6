//! # Configuration
//!
//! Construction-time options for a [`Cpu`](crate::Cpu) or
//! [`Processor`](crate::Processor). The values seed the runtime switches held by
//! [`Signals`](crate::Signals); every one of them can be changed later while the
//! run loop is executing.
//!
//! `Config` is serde-serializable so a host can keep it in a settings file:
//!
//! ```
//! use lib65c02::{Config, UnimplementedPolicy};
//!
//! let config = Config::default()
//!     .with_cycle_period_ns(1_000)
//!     .with_unimplemented(UnimplementedPolicy::Fail)
//!     .with_rockwell_extensions(true);
//!
//! assert_eq!(config.cycle_period_ns, 1_000);
//! assert!(config.rockwell_extensions);
//! assert!(!config.pausable);
//! ```

use serde::{Deserialize, Serialize};

/// What the engine does when it fetches an opcode without 65C02 semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnimplementedPolicy {
    /// Halt with [`ExecutionError::UnimplementedOpcode`](crate::ExecutionError).
    Fail,
    /// Skip the opcode's documented length and charge its documented cycles.
    #[default]
    Nop,
}

/// Processor options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Nanoseconds per clock cycle. Zero runs unthrottled.
    pub cycle_period_ns: u64,

    /// Handling of unimplemented opcodes.
    pub unimplemented: UnimplementedPolicy,

    /// Execute RMBn/SMBn/BBRn/BBSn. Off by default.
    pub rockwell_extensions: bool,

    /// Execute STP and WAI. Off by default.
    pub pausable: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cycle_period_ns: 0,
            unimplemented: UnimplementedPolicy::Nop,
            rockwell_extensions: false,
            pausable: false,
        }
    }
}

impl Config {
    pub fn with_cycle_period_ns(mut self, nanoseconds: u64) -> Self {
        self.cycle_period_ns = nanoseconds;
        self
    }

    pub fn with_unimplemented(mut self, policy: UnimplementedPolicy) -> Self {
        self.unimplemented = policy;
        self
    }

    pub fn with_rockwell_extensions(mut self, enabled: bool) -> Self {
        self.rockwell_extensions = enabled;
        self
    }

    pub fn with_pausable(mut self, enabled: bool) -> Self {
        self.pausable = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.cycle_period_ns, 0);
        assert_eq!(config.unimplemented, UnimplementedPolicy::Nop);
        assert!(!config.rockwell_extensions);
        assert!(!config.pausable);
    }

    #[test]
    fn test_json_round_trip() {
        let config = Config::default()
            .with_cycle_period_ns(500)
            .with_unimplemented(UnimplementedPolicy::Fail)
            .with_pausable(true);

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"unimplemented\":\"fail\""));

        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config: Config = serde_json::from_str(r#"{"cycle_period_ns": 250}"#).unwrap();
        assert_eq!(config.cycle_period_ns, 250);
        assert_eq!(config.unimplemented, UnimplementedPolicy::Nop);
        assert!(!config.rockwell_extensions);
        assert!(!config.pausable);
    }
}
