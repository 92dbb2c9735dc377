use crate::node::StoreKeyMode;
use std::convert::TryFrom;
use tokio::time::Duration;

#[derive(Clone, Default)]
pub struct PaxosOptions {
    /// Route mutations through the leader fast path instead of a full round.
    pub leader_based: Option<bool>,
    /// Replace nodes that the liveness monitor declares dead.
    pub allow_node_restart: Option<bool>,
    /// Period of the liveness and election monitors, and the leader fast path retry delay.
    pub monitor_delay: Option<Duration>,
    /// Total leader fast path attempts before giving up.
    pub request_attempts: Option<u32>,
    pub rpc_timeout: Option<Duration>,
    pub shutdown_grace: Option<Duration>,
    pub store_key_mode: Option<StoreKeyMode>,
}

#[derive(Clone, Debug)]
pub(crate) struct PaxosOptionsValidated {
    pub leader_based: bool,
    pub allow_node_restart: bool,
    pub monitor_delay: Duration,
    pub request_attempts: u32,
    pub rpc_timeout: Duration,
    pub shutdown_grace: Duration,
    pub store_key_mode: StoreKeyMode,
}

impl PaxosOptionsValidated {
    fn validate(&self) -> Result<(), &'static str> {
        if self.request_attempts == 0 {
            return Err("Leader request attempts must be at least 1");
        }
        if self.monitor_delay == Duration::from_millis(0) {
            return Err("Monitor delay must be greater than 0");
        }
        if self.rpc_timeout == Duration::from_millis(0) {
            return Err("RPC timeout must be greater than 0");
        }

        Ok(())
    }
}

impl TryFrom<PaxosOptions> for PaxosOptionsValidated {
    type Error = &'static str;

    fn try_from(options: PaxosOptions) -> Result<Self, Self::Error> {
        let values = PaxosOptionsValidated {
            leader_based: options.leader_based.unwrap_or(false),
            allow_node_restart: options.allow_node_restart.unwrap_or(false),
            monitor_delay: options.monitor_delay.unwrap_or(Duration::from_millis(500)),
            request_attempts: options.request_attempts.unwrap_or(3),
            rpc_timeout: options.rpc_timeout.unwrap_or(Duration::from_secs(1)),
            shutdown_grace: options.shutdown_grace.unwrap_or(Duration::from_secs(5)),
            store_key_mode: options.store_key_mode.unwrap_or_default(),
        };

        values.validate()?;
        Ok(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = PaxosOptionsValidated::try_from(PaxosOptions::default()).unwrap();
        assert!(!options.leader_based);
        assert!(!options.allow_node_restart);
        assert_eq!(options.monitor_delay, Duration::from_millis(500));
        assert_eq!(options.request_attempts, 3);
        assert_eq!(options.rpc_timeout, Duration::from_secs(1));
        assert_eq!(options.store_key_mode, StoreKeyMode::Shared);
    }

    #[test]
    fn rejects_zero_attempts() {
        let options = PaxosOptions {
            request_attempts: Some(0),
            ..PaxosOptions::default()
        };
        assert!(PaxosOptionsValidated::try_from(options).is_err());
    }

    #[test]
    fn rejects_zero_timeout() {
        let options = PaxosOptions {
            rpc_timeout: Some(Duration::from_millis(0)),
            ..PaxosOptions::default()
        };
        assert!(PaxosOptionsValidated::try_from(options).is_err());
    }
}
