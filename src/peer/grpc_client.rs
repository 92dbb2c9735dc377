use crate::api::PaxosMemberInfo;
use crate::grpc::grpc_acceptor_client::GrpcAcceptorClient;
use crate::grpc::grpc_learner_client::GrpcLearnerClient;
use crate::grpc::{
    proto_accept_result, proto_prepare_result, proto_unit_result, ProtoAcceptReq, ProtoEmpty, ProtoLearnReq,
    ProtoPrepareReq, ProtoRequestStopReq, ProtoUnitResult,
};
use crate::node::{NodeId, Operation, ProposalId};
use crate::peer::wire;
use crate::peer::{AcceptReply, AcceptorApi, LearnerApi, PeerError, PrepareReply, StoreUpdate};
use std::future::Future;
use tokio::time::Duration;
use tonic::codegen::http::uri;
use tonic::transport::{Channel, Endpoint};
use tonic::{Response, Status};

/// GrpcPeerClient talks to one remote node. The channel connects lazily, so creating a client
/// for a node that is down succeeds and only its calls fail.
#[derive(Clone)]
pub struct GrpcPeerClient {
    logger: slog::Logger,
    acceptor: GrpcAcceptorClient<Channel>,
    learner: GrpcLearnerClient<Channel>,
    rpc_timeout: Duration,
}

impl GrpcPeerClient {
    pub fn new(logger: slog::Logger, member: &PaxosMemberInfo, rpc_timeout: Duration) -> Result<Self, ConnectError> {
        let url = format!("http://{}:{}", member.ip_addr, member.port);
        let endpoint = Endpoint::from_shared(url)?.timeout(rpc_timeout);
        let channel = endpoint.connect_lazy()?;

        Ok(GrpcPeerClient {
            logger: logger.new(slog::o!("Peer" => member.node_id)),
            acceptor: GrpcAcceptorClient::new(channel.clone()),
            learner: GrpcLearnerClient::new(channel),
            rpc_timeout,
        })
    }

    async fn call<T, F>(&self, rpc: F) -> Result<T, PeerError>
    where
        T: std::fmt::Debug,
        F: Future<Output = Result<Response<T>, Status>>,
    {
        let rpc_reply = tokio::time::timeout(self.rpc_timeout, rpc).await;
        slog::debug!(self.logger, "ClientWire - {:?}", rpc_reply);

        match rpc_reply {
            Ok(Ok(response)) => Ok(response.into_inner()),
            Ok(Err(status)) => Err(PeerError::Unreachable(format!("{}", status))),
            Err(_) => Err(PeerError::Unreachable("Timed out".to_string())),
        }
    }

    fn convert_unit_result(result: ProtoUnitResult) -> Result<(), PeerError> {
        match result.result {
            Some(proto_unit_result::Result::Ok(_)) => Ok(()),
            Some(proto_unit_result::Result::Err(err)) => Err(wire::peer_error_from_proto(err)),
            None => Err(PeerError::Rejected("Peer replied with an empty result".to_string())),
        }
    }
}

#[async_trait::async_trait]
impl AcceptorApi for GrpcPeerClient {
    async fn acceptor_id(&self) -> Result<NodeId, PeerError> {
        let mut client = self.acceptor.clone();
        let reply = self.call(client.acceptor_id(ProtoEmpty {})).await?;
        Ok(NodeId::new(reply.node_id as usize))
    }

    async fn leader_id(&self) -> Result<Option<NodeId>, PeerError> {
        let mut client = self.acceptor.clone();
        let reply = self.call(client.leader_id(ProtoEmpty {})).await?;
        Ok(reply.leader.map(|l| NodeId::new(l.node_id as usize)))
    }

    async fn prepare(&self, proposal_id: ProposalId, operation: Operation) -> Result<PrepareReply, PeerError> {
        let mut client = self.acceptor.clone();
        let rpc_request = ProtoPrepareReq {
            proposal_id: proposal_id.as_u64(),
            operation: Some(wire::operation_to_proto(operation)),
        };
        let reply = self.call(client.prepare(rpc_request)).await?;

        match reply.result {
            Some(proto_prepare_result::Result::Ok(ok)) => {
                let accepted = match ok.accepted {
                    Some(accepted) => Some(wire::operation_from_proto(Some(accepted)).map_err(PeerError::Rejected)?),
                    None => None,
                };
                Ok(PrepareReply {
                    proposal_id: ProposalId::new(ok.proposal_id),
                    accepted,
                })
            }
            Some(proto_prepare_result::Result::Err(err)) => Err(wire::peer_error_from_proto(err)),
            None => Err(PeerError::Rejected("Peer replied with an empty result".to_string())),
        }
    }

    async fn accept(&self, proposal_id: ProposalId, operation: Operation) -> Result<AcceptReply, PeerError> {
        let mut client = self.acceptor.clone();
        let rpc_request = ProtoAcceptReq {
            proposal_id: proposal_id.as_u64(),
            operation: Some(wire::operation_to_proto(operation)),
        };
        let reply = self.call(client.accept(rpc_request)).await?;

        match reply.result {
            Some(proto_accept_result::Result::Ok(ok)) => Ok(AcceptReply {
                proposal_id: ProposalId::new(ok.proposal_id),
                operation: wire::operation_from_proto(ok.operation).map_err(PeerError::Rejected)?,
            }),
            Some(proto_accept_result::Result::Err(err)) => Err(wire::peer_error_from_proto(err)),
            None => Err(PeerError::Rejected("Peer replied with an empty result".to_string())),
        }
    }

    async fn request_stop(&self, force: bool, delay: Duration) -> Result<(), PeerError> {
        let mut client = self.acceptor.clone();
        let rpc_request = ProtoRequestStopReq {
            force,
            delay_millis: delay.as_millis() as u64,
        };
        Self::convert_unit_result(self.call(client.request_stop(rpc_request)).await?)
    }

    async fn register_peer(&self, member: PaxosMemberInfo) -> Result<(), PeerError> {
        let mut client = self.acceptor.clone();
        Self::convert_unit_result(self.call(client.register_peer(wire::member_to_proto(&member))).await?)
    }

    async fn register_peer_pair(&self, member: PaxosMemberInfo) -> Result<(), PeerError> {
        let mut client = self.acceptor.clone();
        Self::convert_unit_result(
            self.call(client.register_peer_pair(wire::member_to_proto(&member)))
                .await?,
        )
    }
}

#[async_trait::async_trait]
impl LearnerApi for GrpcPeerClient {
    async fn learner_id(&self) -> Result<NodeId, PeerError> {
        let mut client = self.learner.clone();
        let reply = self.call(client.learner_id(ProtoEmpty {})).await?;
        Ok(NodeId::new(reply.node_id as usize))
    }

    async fn learn(&self, proposal_id: ProposalId, operation: Operation) -> Result<(), PeerError> {
        let mut client = self.learner.clone();
        let rpc_request = ProtoLearnReq {
            proposal_id: proposal_id.as_u64(),
            operation: Some(wire::operation_to_proto(operation)),
        };
        Self::convert_unit_result(self.call(client.learn(rpc_request)).await?)
    }

    async fn log_state(&self) -> Result<(), PeerError> {
        let mut client = self.learner.clone();
        Self::convert_unit_result(self.call(client.log_state(ProtoEmpty {})).await?)
    }

    async fn update_store(&self, update: StoreUpdate) -> Result<(), PeerError> {
        let mut client = self.learner.clone();
        Self::convert_unit_result(
            self.call(client.update_store(wire::store_update_to_proto(update)))
                .await?,
        )
    }

    async fn leader_update(&self, update: StoreUpdate) -> Result<(), PeerError> {
        let mut client = self.learner.clone();
        Self::convert_unit_result(
            self.call(client.leader_update(wire::store_update_to_proto(update)))
                .await?,
        )
    }

    async fn register_learner(&self, member: PaxosMemberInfo) -> Result<(), PeerError> {
        let mut client = self.learner.clone();
        Self::convert_unit_result(self.call(client.register_learner(wire::member_to_proto(&member))).await?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    #[error("Invalid peer uri")]
    InvalidUri(#[from] uri::InvalidUri),
    #[error("Failed to set up channel")]
    Transport(#[from] tonic::transport::Error),
}
