use crate::node::NodeId;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};

/// PaxosMemberInfo is one entry of the static membership registry. `node_id` is the member's
/// slot in every node's membership table and never changes, even across rejoin.
#[derive(Clone, Debug, PartialEq)]
pub struct PaxosMemberInfo {
    pub node_id: usize,
    pub ip_addr: Ipv4Addr,
    pub port: u16,
}

impl PaxosMemberInfo {
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::V4(SocketAddrV4::new(self.ip_addr, self.port))
    }

    pub(crate) fn id(&self) -> NodeId {
        NodeId::new(self.node_id)
    }
}

/// MembershipView is what a node currently believes about the cluster.
#[derive(Clone, Debug, PartialEq)]
pub struct MembershipView {
    pub num_servers: usize,
    pub live_nodes: Vec<NodeId>,
    pub leader: Option<NodeId>,
}
