use crate::api::{PaxosMemberInfo, PaxosOptions};
use serde::Deserialize;
use std::net::Ipv4Addr;
use std::path::Path;
use std::{fs, io};
use tokio::time::Duration;

/// ClusterFile is the JSON cluster description read by the `paxos-node` binary.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ClusterFile {
    pub members: Vec<MemberEntry>,
    #[serde(default)]
    pub leader_based: bool,
    #[serde(default)]
    pub allow_node_restart: bool,
    pub delay_millis: Option<u64>,
    pub request_attempts: Option<u32>,
    /// Only honored by builds with the `fault-injection` feature.
    pub accept_random_error_probability: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct MemberEntry {
    pub node_id: usize,
    pub ip: Ipv4Addr,
    pub port: u16,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file")]
    Io(#[from] io::Error),
    #[error("Malformed config file: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ClusterFile {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn members(&self) -> Vec<PaxosMemberInfo> {
        self.members
            .iter()
            .map(|m| PaxosMemberInfo {
                node_id: m.node_id,
                ip_addr: m.ip,
                port: m.port,
            })
            .collect()
    }

    pub fn options(&self) -> PaxosOptions {
        PaxosOptions {
            leader_based: Some(self.leader_based),
            allow_node_restart: Some(self.allow_node_restart),
            monitor_delay: self.delay_millis.map(Duration::from_millis),
            request_attempts: self.request_attempts,
            ..PaxosOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "members": [
            { "node_id": 0, "ip": "127.0.0.1", "port": 7100 },
            { "node_id": 1, "ip": "127.0.0.1", "port": 7101 }
        ],
        "leader_based": true,
        "delay_millis": 250,
        "request_attempts": 5
    }"#;

    #[test]
    fn parses_sample() {
        let file = ClusterFile::parse(SAMPLE).unwrap();
        assert!(file.leader_based);
        assert!(!file.allow_node_restart);
        assert_eq!(file.accept_random_error_probability, None);

        let members = file.members();
        assert_eq!(members.len(), 2);
        assert_eq!(members[1].port, 7101);

        let options = file.options();
        assert_eq!(options.monitor_delay, Some(Duration::from_millis(250)));
        assert_eq!(options.request_attempts, Some(5));
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = ClusterFile::parse(r#"{ "members": [], "leaderBased": true }"#);
        assert!(matches!(err, Err(ConfigError::Parse(_))));
    }
}
