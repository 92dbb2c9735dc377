use crate::api::{PaxosError, PaxosNode};
use crate::grpc::grpc_acceptor_server::{GrpcAcceptor, GrpcAcceptorServer};
use crate::grpc::grpc_learner_server::{GrpcLearner, GrpcLearnerServer};
use crate::grpc::grpc_store_server::{GrpcStore, GrpcStoreServer};
use crate::grpc::{
    proto_accept_result, proto_prepare_result, proto_store_result, proto_unit_result, ProtoAcceptReq,
    ProtoAcceptResult, ProtoAcceptSuccess, ProtoEmpty, ProtoKeyReq, ProtoLeaderId, ProtoLearnReq,
    ProtoLogGlobalStateReq, ProtoMemberInfo, ProtoNodeId, ProtoPrepareReq, ProtoPrepareResult, ProtoPrepareSuccess,
    ProtoPutReq, ProtoRequestStopReq, ProtoStopNodeReq, ProtoStopServerReq, ProtoStoreError, ProtoStoreErrorKind,
    ProtoStoreResult, ProtoStoreSuccess, ProtoStoreUpdate, ProtoUnitResult, ProtoValue,
};
use crate::node::{ProposalId, StopCheck};
use crate::peer::wire;
use crate::peer::{AcceptReply, AcceptorApi, LearnerApi, PeerError, PrepareReply};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::time::Duration;
use tonic::transport::Server;
use tonic::{Request, Response, Status};

/// RpcServer is the type that implements the acceptor, learner and store gRPC interfaces of one
/// node.
#[derive(Clone)]
pub struct RpcServer {
    logger: slog::Logger,
    acceptor: Arc<dyn AcceptorApi>,
    learner: Arc<dyn LearnerApi>,
    node: PaxosNode,
}

impl RpcServer {
    pub fn new(logger: slog::Logger, node: PaxosNode) -> Self {
        let handle = node.peer_handle();
        RpcServer {
            logger,
            acceptor: handle.acceptor,
            learner: handle.learner,
            node,
        }
    }

    pub(crate) async fn run(self, socket_addr: SocketAddr, mut shutdown: StopCheck) {
        let logger = self.logger.clone();
        slog::info!(logger, "Listening on '{:?}'", socket_addr);

        let result = Server::builder()
            .add_service(GrpcAcceptorServer::new(self.clone()))
            .add_service(GrpcLearnerServer::new(self.clone()))
            .add_service(GrpcStoreServer::new(self))
            .serve_with_shutdown(socket_addr, async move { shutdown.stopped().await })
            .await;

        slog::info!(logger, "Server run() has exited: {:?}", result);
    }

    fn convert_prepare_result(app_result: Result<PrepareReply, PeerError>) -> ProtoPrepareResult {
        let result = match app_result {
            Ok(ok) => proto_prepare_result::Result::Ok(ProtoPrepareSuccess {
                proposal_id: ok.proposal_id.as_u64(),
                accepted: ok.accepted.map(wire::operation_to_proto),
            }),
            Err(e) => proto_prepare_result::Result::Err(wire::peer_error_to_proto(e)),
        };
        ProtoPrepareResult { result: Some(result) }
    }

    fn convert_accept_result(app_result: Result<AcceptReply, PeerError>) -> ProtoAcceptResult {
        let result = match app_result {
            Ok(ok) => proto_accept_result::Result::Ok(ProtoAcceptSuccess {
                proposal_id: ok.proposal_id.as_u64(),
                operation: Some(wire::operation_to_proto(ok.operation)),
            }),
            Err(e) => proto_accept_result::Result::Err(wire::peer_error_to_proto(e)),
        };
        ProtoAcceptResult { result: Some(result) }
    }

    fn convert_unit_result(app_result: Result<(), PeerError>) -> ProtoUnitResult {
        let result = match app_result {
            Ok(()) => proto_unit_result::Result::Ok(ProtoEmpty {}),
            Err(e) => proto_unit_result::Result::Err(wire::peer_error_to_proto(e)),
        };
        ProtoUnitResult { result: Some(result) }
    }

    fn convert_store_result(app_result: Result<Option<String>, PaxosError>) -> ProtoStoreResult {
        let result = match app_result {
            Ok(value) => proto_store_result::Result::Ok(ProtoStoreSuccess {
                value: value.map(|value| ProtoValue { value }),
            }),
            Err(e) => {
                let kind = match &e {
                    PaxosError::Unauthorized => ProtoStoreErrorKind::Unauthorized,
                    PaxosError::MissingKey => ProtoStoreErrorKind::MissingKey,
                    PaxosError::StaleProposal { .. } => ProtoStoreErrorKind::StaleProposal,
                    PaxosError::QuorumNotReached { .. } => ProtoStoreErrorKind::QuorumNotReached,
                    PaxosError::UpdateFailed { .. } => ProtoStoreErrorKind::UpdateFailed,
                    PaxosError::PeerUnreachable(_) => ProtoStoreErrorKind::PeerUnreachable,
                    PaxosError::Rejected(_) => ProtoStoreErrorKind::Rejected,
                    PaxosError::NodeStopped => ProtoStoreErrorKind::NodeStopped,
                };
                proto_store_result::Result::Err(ProtoStoreError {
                    kind: kind as i32,
                    message: e.to_string(),
                })
            }
        };
        ProtoStoreResult { result: Some(result) }
    }

    fn convert_invalid<T>(result: Result<T, String>) -> Result<T, Status> {
        result.map_err(Status::invalid_argument)
    }
}

#[async_trait::async_trait]
impl GrpcAcceptor for RpcServer {
    async fn acceptor_id(&self, _: Request<ProtoEmpty>) -> Result<Response<ProtoNodeId>, Status> {
        let node_id = self
            .acceptor
            .acceptor_id()
            .await
            .map_err(|e| Status::unavailable(e.to_string()))?;

        Ok(Response::new(ProtoNodeId {
            node_id: node_id.as_usize() as u64,
        }))
    }

    async fn leader_id(&self, _: Request<ProtoEmpty>) -> Result<Response<ProtoLeaderId>, Status> {
        let leader = self
            .acceptor
            .leader_id()
            .await
            .map_err(|e| Status::unavailable(e.to_string()))?;

        Ok(Response::new(ProtoLeaderId {
            leader: leader.map(|id| ProtoNodeId {
                node_id: id.as_usize() as u64,
            }),
        }))
    }

    async fn prepare(&self, rpc_request_wrapped: Request<ProtoPrepareReq>) -> Result<Response<ProtoPrepareResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);

        let operation = Self::convert_invalid(wire::operation_from_proto(rpc_request.operation))?;
        let app_result = self
            .acceptor
            .prepare(ProposalId::new(rpc_request.proposal_id), operation)
            .await;
        let rpc_reply = Self::convert_prepare_result(app_result);

        slog::debug!(self.logger, "ServerWire - {:?}", rpc_reply);
        Ok(Response::new(rpc_reply))
    }

    async fn accept(&self, rpc_request_wrapped: Request<ProtoAcceptReq>) -> Result<Response<ProtoAcceptResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);

        let operation = Self::convert_invalid(wire::operation_from_proto(rpc_request.operation))?;
        let app_result = self
            .acceptor
            .accept(ProposalId::new(rpc_request.proposal_id), operation)
            .await;
        let rpc_reply = Self::convert_accept_result(app_result);

        slog::debug!(self.logger, "ServerWire - {:?}", rpc_reply);
        Ok(Response::new(rpc_reply))
    }

    async fn request_stop(&self, rpc_request_wrapped: Request<ProtoRequestStopReq>) -> Result<Response<ProtoUnitResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);

        let app_result = self
            .acceptor
            .request_stop(rpc_request.force, Duration::from_millis(rpc_request.delay_millis))
            .await;
        Ok(Response::new(Self::convert_unit_result(app_result)))
    }

    async fn register_peer(&self, rpc_request_wrapped: Request<ProtoMemberInfo>) -> Result<Response<ProtoUnitResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);

        let member = Self::convert_invalid(wire::member_from_proto(rpc_request))?;
        let app_result = self.acceptor.register_peer(member).await;
        Ok(Response::new(Self::convert_unit_result(app_result)))
    }

    async fn register_peer_pair(
        &self,
        rpc_request_wrapped: Request<ProtoMemberInfo>,
    ) -> Result<Response<ProtoUnitResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);

        let member = Self::convert_invalid(wire::member_from_proto(rpc_request))?;
        let app_result = self.acceptor.register_peer_pair(member).await;
        Ok(Response::new(Self::convert_unit_result(app_result)))
    }
}

#[async_trait::async_trait]
impl GrpcLearner for RpcServer {
    async fn learner_id(&self, _: Request<ProtoEmpty>) -> Result<Response<ProtoNodeId>, Status> {
        let node_id = self
            .learner
            .learner_id()
            .await
            .map_err(|e| Status::unavailable(e.to_string()))?;

        Ok(Response::new(ProtoNodeId {
            node_id: node_id.as_usize() as u64,
        }))
    }

    async fn learn(&self, rpc_request_wrapped: Request<ProtoLearnReq>) -> Result<Response<ProtoUnitResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);

        let operation = Self::convert_invalid(wire::operation_from_proto(rpc_request.operation))?;
        let app_result = self
            .learner
            .learn(ProposalId::new(rpc_request.proposal_id), operation)
            .await;
        Ok(Response::new(Self::convert_unit_result(app_result)))
    }

    async fn log_state(&self, _: Request<ProtoEmpty>) -> Result<Response<ProtoUnitResult>, Status> {
        let app_result = self.learner.log_state().await;
        Ok(Response::new(Self::convert_unit_result(app_result)))
    }

    async fn update_store(&self, rpc_request_wrapped: Request<ProtoStoreUpdate>) -> Result<Response<ProtoUnitResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);

        let update = Self::convert_invalid(wire::store_update_from_proto(rpc_request))?;
        let app_result = self.learner.update_store(update).await;
        Ok(Response::new(Self::convert_unit_result(app_result)))
    }

    async fn leader_update(&self, rpc_request_wrapped: Request<ProtoStoreUpdate>) -> Result<Response<ProtoUnitResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);

        let update = Self::convert_invalid(wire::store_update_from_proto(rpc_request))?;
        let app_result = self.learner.leader_update(update).await;
        Ok(Response::new(Self::convert_unit_result(app_result)))
    }

    async fn register_learner(&self, rpc_request_wrapped: Request<ProtoMemberInfo>) -> Result<Response<ProtoUnitResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);

        let member = Self::convert_invalid(wire::member_from_proto(rpc_request))?;
        let app_result = self.learner.register_learner(member).await;
        Ok(Response::new(Self::convert_unit_result(app_result)))
    }
}

#[async_trait::async_trait]
impl GrpcStore for RpcServer {
    async fn put(&self, rpc_request_wrapped: Request<ProtoPutReq>) -> Result<Response<ProtoStoreResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);

        let app_result = self
            .node
            .put(&rpc_request.key, &rpc_request.value, &rpc_request.requester_id)
            .await
            .map(|()| None);
        Ok(Response::new(Self::convert_store_result(app_result)))
    }

    async fn get(&self, rpc_request_wrapped: Request<ProtoKeyReq>) -> Result<Response<ProtoStoreResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);

        let app_result = self.node.get(&rpc_request.key, &rpc_request.requester_id).await;
        Ok(Response::new(Self::convert_store_result(app_result)))
    }

    async fn delete(&self, rpc_request_wrapped: Request<ProtoKeyReq>) -> Result<Response<ProtoStoreResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);

        let app_result = self
            .node
            .delete(&rpc_request.key, &rpc_request.requester_id)
            .await
            .map(|()| None);
        Ok(Response::new(Self::convert_store_result(app_result)))
    }

    async fn stop_server(&self, rpc_request_wrapped: Request<ProtoStopServerReq>) -> Result<Response<ProtoStoreResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);

        let app_result = self
            .node
            .request_stop(&rpc_request.requester_id, rpc_request.force)
            .map(|()| None);
        Ok(Response::new(Self::convert_store_result(app_result)))
    }

    async fn log_global_state(
        &self,
        rpc_request_wrapped: Request<ProtoLogGlobalStateReq>,
    ) -> Result<Response<ProtoStoreResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);

        let app_result = self.node.log_global_state(&rpc_request.name).await.map(|()| None);
        Ok(Response::new(Self::convert_store_result(app_result)))
    }

    async fn stop_node(&self, rpc_request_wrapped: Request<ProtoStopNodeReq>) -> Result<Response<ProtoStoreResult>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);

        let app_result = self
            .node
            .request_stop_node(rpc_request.index as usize)
            .await
            .map(|()| None);
        Ok(Response::new(Self::convert_store_result(app_result)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_keep_their_kind() {
        let reply = RpcServer::convert_store_result(Err(PaxosError::Unauthorized));
        match reply.result {
            Some(proto_store_result::Result::Err(err)) => {
                assert_eq!(err.kind, ProtoStoreErrorKind::Unauthorized as i32)
            }
            other => panic!("Unexpected {:?}", other),
        }

        let reply = RpcServer::convert_store_result(Err(PaxosError::Rejected("bad kind".to_string())));
        match reply.result {
            Some(proto_store_result::Result::Err(err)) => {
                assert_eq!(err.kind, ProtoStoreErrorKind::Rejected as i32)
            }
            other => panic!("Unexpected {:?}", other),
        }

        let reply = RpcServer::convert_store_result(Ok(Some("v".to_string())));
        match reply.result {
            Some(proto_store_result::Result::Ok(ok)) => assert_eq!(ok.value.unwrap().value, "v"),
            other => panic!("Unexpected {:?}", other),
        }
    }

    #[test]
    fn stale_prepare_is_reported_to_the_proposer() {
        let reply = RpcServer::convert_prepare_result(Err(PeerError::StaleProposal {
            proposal_id: ProposalId::new(3),
            last_prepared: ProposalId::new(8),
        }));
        match reply.result {
            Some(proto_prepare_result::Result::Err(err)) => match wire::peer_error_from_proto(err) {
                PeerError::StaleProposal { last_prepared, .. } => assert_eq!(last_prepared, ProposalId::new(8)),
                other => panic!("Unexpected {:?}", other),
            },
            other => panic!("Unexpected {:?}", other),
        }
    }
}
