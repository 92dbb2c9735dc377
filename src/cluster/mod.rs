mod cluster;
mod launcher;
mod rejoin;

pub use cluster::ClusterTransport;
pub use cluster::PaxosCluster;
pub use cluster::PaxosClusterConfig;
pub use cluster::PaxosClusterError;
