//! Deterministic signal scanner for tests and development.

use std::collections::{HashMap, HashSet};

use crate::domain::SignalChannel;

use super::{ScanError, SignalScanner};

/// A [`SignalScanner`] that returns fixed identifier lists per channel.
///
/// Channels never configured return an empty list; channels marked as
/// failing return [`ScanError`], letting tests exercise the validator's
/// degrade-gracefully path.
#[derive(Debug, Clone, Default)]
pub struct StaticScanner {
    observed: HashMap<SignalChannel, Vec<String>>,
    failing: HashSet<SignalChannel>,
}

impl StaticScanner {
    /// Create a scanner with no observed signals.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the identifiers observed on a channel.
    pub fn with_channel(mut self, channel: SignalChannel, identifiers: &[&str]) -> Self {
        self.observed.insert(
            channel,
            identifiers.iter().map(|s| s.to_string()).collect(),
        );
        self
    }

    /// Mark a channel as unavailable.
    pub fn with_failing(mut self, channel: SignalChannel) -> Self {
        self.failing.insert(channel);
        self
    }
}

impl SignalScanner for StaticScanner {
    fn scan(&self, channel: SignalChannel) -> Result<Vec<String>, ScanError> {
        if self.failing.contains(&channel) {
            return Err(ScanError {
                channel,
                detail: "configured as failing".to_string(),
            });
        }
        Ok(self.observed.get(&channel).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_channel() {
        let scanner = StaticScanner::new()
            .with_channel(SignalChannel::Wifi, &["NET-A", "NET-B"]);

        let ids = scanner.scan(SignalChannel::Wifi).unwrap();
        assert_eq!(ids, vec!["NET-A".to_string(), "NET-B".to_string()]);
    }

    #[test]
    fn test_unconfigured_channel_is_empty() {
        let scanner = StaticScanner::new();
        assert!(scanner.scan(SignalChannel::Bluetooth).unwrap().is_empty());
    }

    #[test]
    fn test_failing_channel() {
        let scanner = StaticScanner::new().with_failing(SignalChannel::Cellular);
        let err = scanner.scan(SignalChannel::Cellular).unwrap_err();
        assert_eq!(err.channel, SignalChannel::Cellular);
    }
}
