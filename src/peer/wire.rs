use crate::api::PaxosMemberInfo;
use crate::grpc::{
    proto_peer_error, ProtoMemberInfo, ProtoOperation, ProtoOperationKind, ProtoPeerError, ProtoRejected,
    ProtoServerFault, ProtoStaleProposal, ProtoStoreUpdate, ProtoValue,
};
use crate::node::{Operation, OperationKind, ProposalId};
use crate::peer::{PeerError, StoreUpdate};
use std::net::Ipv4Addr;

// Conversions shared by `RpcServer` and `GrpcPeerClient`. Decoding failures are plain strings;
// the server turns them into `Status::invalid_argument`, the client into `PeerError::Rejected`.

pub(crate) fn kind_to_proto(kind: OperationKind) -> i32 {
    let proto_kind = match kind {
        OperationKind::Put => ProtoOperationKind::Put,
        OperationKind::Delete => ProtoOperationKind::Delete,
        OperationKind::Log => ProtoOperationKind::Log,
        OperationKind::Elect => ProtoOperationKind::Elect,
    };
    proto_kind as i32
}

pub(crate) fn kind_from_proto(kind: i32) -> Result<OperationKind, String> {
    match ProtoOperationKind::from_i32(kind) {
        Some(ProtoOperationKind::Put) => Ok(OperationKind::Put),
        Some(ProtoOperationKind::Delete) => Ok(OperationKind::Delete),
        Some(ProtoOperationKind::Log) => Ok(OperationKind::Log),
        Some(ProtoOperationKind::Elect) => Ok(OperationKind::Elect),
        None => Err(format!("Unknown operation kind {}", kind)),
    }
}

fn value_to_proto(value: Option<String>) -> Option<ProtoValue> {
    value.map(|value| ProtoValue { value })
}

fn value_from_proto(value: Option<ProtoValue>) -> Option<String> {
    value.map(|v| v.value)
}

pub(crate) fn operation_to_proto(operation: Operation) -> ProtoOperation {
    ProtoOperation {
        kind: kind_to_proto(operation.kind),
        key: operation.key,
        value: value_to_proto(operation.value),
        requester_id: operation.requester_id,
        proposal_id: operation.proposal_id.as_u64(),
    }
}

pub(crate) fn operation_from_proto(operation: Option<ProtoOperation>) -> Result<Operation, String> {
    let operation = operation.ok_or_else(|| "Missing operation".to_string())?;
    Ok(Operation {
        kind: kind_from_proto(operation.kind)?,
        key: operation.key,
        value: value_from_proto(operation.value),
        requester_id: operation.requester_id,
        proposal_id: ProposalId::new(operation.proposal_id),
    })
}

pub(crate) fn store_update_to_proto(update: StoreUpdate) -> ProtoStoreUpdate {
    ProtoStoreUpdate {
        kind: kind_to_proto(update.kind),
        key: update.key,
        value: value_to_proto(update.value),
    }
}

pub(crate) fn store_update_from_proto(update: ProtoStoreUpdate) -> Result<StoreUpdate, String> {
    Ok(StoreUpdate {
        kind: kind_from_proto(update.kind)?,
        key: update.key,
        value: value_from_proto(update.value),
    })
}

pub(crate) fn member_to_proto(member: &PaxosMemberInfo) -> ProtoMemberInfo {
    ProtoMemberInfo {
        node_id: member.node_id as u64,
        ip_addr: member.ip_addr.to_string(),
        port: member.port as u32,
    }
}

pub(crate) fn member_from_proto(member: ProtoMemberInfo) -> Result<PaxosMemberInfo, String> {
    let ip_addr = member
        .ip_addr
        .parse::<Ipv4Addr>()
        .map_err(|e| format!("Invalid member ip '{}': {}", member.ip_addr, e))?;
    if member.port > u16::MAX as u32 {
        return Err(format!("Invalid member port {}", member.port));
    }

    Ok(PaxosMemberInfo {
        node_id: member.node_id as usize,
        ip_addr,
        port: member.port as u16,
    })
}

pub(crate) fn peer_error_to_proto(error: PeerError) -> ProtoPeerError {
    let err = match error {
        PeerError::StaleProposal {
            proposal_id,
            last_prepared,
        } => proto_peer_error::Err::StaleProposal(ProtoStaleProposal {
            proposal_id: proposal_id.as_u64(),
            last_prepared: last_prepared.as_u64(),
        }),
        PeerError::Unreachable(message) => proto_peer_error::Err::ServerFault(ProtoServerFault { message }),
        PeerError::Rejected(message) => proto_peer_error::Err::Rejected(ProtoRejected { message }),
    };

    ProtoPeerError { err: Some(err) }
}

pub(crate) fn peer_error_from_proto(error: ProtoPeerError) -> PeerError {
    match error.err {
        Some(proto_peer_error::Err::StaleProposal(payload)) => PeerError::StaleProposal {
            proposal_id: ProposalId::new(payload.proposal_id),
            last_prepared: ProposalId::new(payload.last_prepared),
        },
        Some(proto_peer_error::Err::ServerFault(payload)) => {
            PeerError::Unreachable(format!("Explicit server fault: {}", payload.message))
        }
        Some(proto_peer_error::Err::Rejected(payload)) => PeerError::Rejected(payload.message),
        None => PeerError::Rejected("Peer replied with an empty error".to_string()),
    }
}
