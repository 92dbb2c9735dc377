#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoEmpty {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoNodeId {
    #[prost(uint64, tag = "1")]
    pub node_id: u64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoLeaderId {
    /// Absent when the node has no leader installed.
    #[prost(message, optional, tag = "1")]
    pub leader: ::core::option::Option<ProtoNodeId>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoValue {
    #[prost(string, tag = "1")]
    pub value: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoOperation {
    #[prost(enumeration = "ProtoOperationKind", tag = "1")]
    pub kind: i32,
    #[prost(string, tag = "2")]
    pub key: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "3")]
    pub value: ::core::option::Option<ProtoValue>,
    #[prost(string, tag = "4")]
    pub requester_id: ::prost::alloc::string::String,
    #[prost(uint64, tag = "5")]
    pub proposal_id: u64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoMemberInfo {
    #[prost(uint64, tag = "1")]
    pub node_id: u64,
    #[prost(string, tag = "2")]
    pub ip_addr: ::prost::alloc::string::String,
    #[prost(uint32, tag = "3")]
    pub port: u32,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoPrepareReq {
    #[prost(uint64, tag = "1")]
    pub proposal_id: u64,
    #[prost(message, optional, tag = "2")]
    pub operation: ::core::option::Option<ProtoOperation>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoPrepareResult {
    #[prost(oneof = "proto_prepare_result::Result", tags = "1, 2")]
    pub result: ::core::option::Option<proto_prepare_result::Result>,
}
/// Nested message and enum types in `ProtoPrepareResult`.
pub mod proto_prepare_result {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Result {
        #[prost(message, tag = "1")]
        Ok(super::ProtoPrepareSuccess),
        #[prost(message, tag = "2")]
        Err(super::ProtoPeerError),
    }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoPrepareSuccess {
    #[prost(uint64, tag = "1")]
    pub proposal_id: u64,
    /// Previously accepted operation for the same key, carrying its own proposal id.
    #[prost(message, optional, tag = "2")]
    pub accepted: ::core::option::Option<ProtoOperation>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoAcceptReq {
    #[prost(uint64, tag = "1")]
    pub proposal_id: u64,
    #[prost(message, optional, tag = "2")]
    pub operation: ::core::option::Option<ProtoOperation>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoAcceptResult {
    #[prost(oneof = "proto_accept_result::Result", tags = "1, 2")]
    pub result: ::core::option::Option<proto_accept_result::Result>,
}
/// Nested message and enum types in `ProtoAcceptResult`.
pub mod proto_accept_result {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Result {
        #[prost(message, tag = "1")]
        Ok(super::ProtoAcceptSuccess),
        #[prost(message, tag = "2")]
        Err(super::ProtoPeerError),
    }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoAcceptSuccess {
    #[prost(uint64, tag = "1")]
    pub proposal_id: u64,
    #[prost(message, optional, tag = "2")]
    pub operation: ::core::option::Option<ProtoOperation>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoLearnReq {
    #[prost(uint64, tag = "1")]
    pub proposal_id: u64,
    #[prost(message, optional, tag = "2")]
    pub operation: ::core::option::Option<ProtoOperation>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoStoreUpdate {
    #[prost(enumeration = "ProtoOperationKind", tag = "1")]
    pub kind: i32,
    #[prost(string, tag = "2")]
    pub key: ::prost::alloc::string::String,
    #[prost(message, optional, tag = "3")]
    pub value: ::core::option::Option<ProtoValue>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoRequestStopReq {
    #[prost(bool, tag = "1")]
    pub force: bool,
    #[prost(uint64, tag = "2")]
    pub delay_millis: u64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoUnitResult {
    #[prost(oneof = "proto_unit_result::Result", tags = "1, 2")]
    pub result: ::core::option::Option<proto_unit_result::Result>,
}
/// Nested message and enum types in `ProtoUnitResult`.
pub mod proto_unit_result {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Result {
        #[prost(message, tag = "1")]
        Ok(super::ProtoEmpty),
        #[prost(message, tag = "2")]
        Err(super::ProtoPeerError),
    }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoPeerError {
    #[prost(oneof = "proto_peer_error::Err", tags = "1, 2, 3")]
    pub err: ::core::option::Option<proto_peer_error::Err>,
}
/// Nested message and enum types in `ProtoPeerError`.
pub mod proto_peer_error {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Err {
        #[prost(message, tag = "1")]
        StaleProposal(super::ProtoStaleProposal),
        #[prost(message, tag = "2")]
        ServerFault(super::ProtoServerFault),
        #[prost(message, tag = "3")]
        Rejected(super::ProtoRejected),
    }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoStaleProposal {
    #[prost(uint64, tag = "1")]
    pub proposal_id: u64,
    #[prost(uint64, tag = "2")]
    pub last_prepared: u64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoServerFault {
    #[prost(string, tag = "1")]
    pub message: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoRejected {
    #[prost(string, tag = "1")]
    pub message: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoPutReq {
    #[prost(string, tag = "1")]
    pub key: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub value: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub requester_id: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoKeyReq {
    #[prost(string, tag = "1")]
    pub key: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub requester_id: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoStopServerReq {
    #[prost(string, tag = "1")]
    pub requester_id: ::prost::alloc::string::String,
    #[prost(bool, tag = "2")]
    pub force: bool,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoLogGlobalStateReq {
    #[prost(string, tag = "1")]
    pub name: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoStopNodeReq {
    #[prost(uint64, tag = "1")]
    pub index: u64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoStoreResult {
    #[prost(oneof = "proto_store_result::Result", tags = "1, 2")]
    pub result: ::core::option::Option<proto_store_result::Result>,
}
/// Nested message and enum types in `ProtoStoreResult`.
pub mod proto_store_result {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Result {
        #[prost(message, tag = "1")]
        Ok(super::ProtoStoreSuccess),
        #[prost(message, tag = "2")]
        Err(super::ProtoStoreError),
    }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoStoreSuccess {
    #[prost(message, optional, tag = "1")]
    pub value: ::core::option::Option<ProtoValue>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoStoreError {
    #[prost(enumeration = "ProtoStoreErrorKind", tag = "1")]
    pub kind: i32,
    #[prost(string, tag = "2")]
    pub message: ::prost::alloc::string::String,
}
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ProtoOperationKind {
    Put = 0,
    Delete = 1,
    Log = 2,
    Elect = 3,
}
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum ProtoStoreErrorKind {
    Unknown = 0,
    Unauthorized = 1,
    MissingKey = 2,
    StaleProposal = 3,
    QuorumNotReached = 4,
    UpdateFailed = 5,
    PeerUnreachable = 6,
    NodeStopped = 7,
    Rejected = 8,
}
#[doc = r" Generated client implementations."]
pub mod grpc_acceptor_client {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = " Per-node acceptor role. Prepare/Accept are fenced by the node's proposal watermark."]
    pub struct GrpcAcceptorClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl GrpcAcceptorClient<tonic::transport::Channel> {
        #[doc = r" Attempt to create a new client by connecting to a given endpoint."]
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: std::convert::TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }
    impl<T> GrpcAcceptorClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::ResponseBody: Body + HttpBody + Send + 'static,
        T::Error: Into<StdError>,
        <T::ResponseBody as HttpBody>::Error: Into<StdError> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = tonic::client::Grpc::with_interceptor(inner, interceptor);
            Self { inner }
        }
        pub async fn acceptor_id(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoEmpty>,
        ) -> Result<tonic::Response<super::ProtoNodeId>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/paxos.GrpcAcceptor/AcceptorId");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn leader_id(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoEmpty>,
        ) -> Result<tonic::Response<super::ProtoLeaderId>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/paxos.GrpcAcceptor/LeaderId");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn prepare(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoPrepareReq>,
        ) -> Result<tonic::Response<super::ProtoPrepareResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/paxos.GrpcAcceptor/Prepare");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn accept(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoAcceptReq>,
        ) -> Result<tonic::Response<super::ProtoAcceptResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/paxos.GrpcAcceptor/Accept");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn request_stop(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoRequestStopReq>,
        ) -> Result<tonic::Response<super::ProtoUnitResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/paxos.GrpcAcceptor/RequestStop");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn register_peer(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoMemberInfo>,
        ) -> Result<tonic::Response<super::ProtoUnitResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/paxos.GrpcAcceptor/RegisterPeer");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn register_peer_pair(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoMemberInfo>,
        ) -> Result<tonic::Response<super::ProtoUnitResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/paxos.GrpcAcceptor/RegisterPeerPair");
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
    impl<T: Clone> Clone for GrpcAcceptorClient<T> {
        fn clone(&self) -> Self {
            Self {
                inner: self.inner.clone(),
            }
        }
    }
    impl<T> std::fmt::Debug for GrpcAcceptorClient<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "GrpcAcceptorClient {{ ... }}")
        }
    }
}
#[doc = r" Generated client implementations."]
pub mod grpc_learner_client {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    pub struct GrpcLearnerClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl GrpcLearnerClient<tonic::transport::Channel> {
        #[doc = r" Attempt to create a new client by connecting to a given endpoint."]
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: std::convert::TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }
    impl<T> GrpcLearnerClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::ResponseBody: Body + HttpBody + Send + 'static,
        T::Error: Into<StdError>,
        <T::ResponseBody as HttpBody>::Error: Into<StdError> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = tonic::client::Grpc::with_interceptor(inner, interceptor);
            Self { inner }
        }
        pub async fn learner_id(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoEmpty>,
        ) -> Result<tonic::Response<super::ProtoNodeId>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/paxos.GrpcLearner/LearnerId");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn learn(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoLearnReq>,
        ) -> Result<tonic::Response<super::ProtoUnitResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/paxos.GrpcLearner/Learn");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn log_state(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoEmpty>,
        ) -> Result<tonic::Response<super::ProtoUnitResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/paxos.GrpcLearner/LogState");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn update_store(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoStoreUpdate>,
        ) -> Result<tonic::Response<super::ProtoUnitResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/paxos.GrpcLearner/UpdateStore");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn leader_update(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoStoreUpdate>,
        ) -> Result<tonic::Response<super::ProtoUnitResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/paxos.GrpcLearner/LeaderUpdate");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn register_learner(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoMemberInfo>,
        ) -> Result<tonic::Response<super::ProtoUnitResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/paxos.GrpcLearner/RegisterLearner");
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
    impl<T: Clone> Clone for GrpcLearnerClient<T> {
        fn clone(&self) -> Self {
            Self {
                inner: self.inner.clone(),
            }
        }
    }
    impl<T> std::fmt::Debug for GrpcLearnerClient<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "GrpcLearnerClient {{ ... }}")
        }
    }
}
#[doc = r" Generated client implementations."]
pub mod grpc_store_client {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = " Client facing surface of a single node."]
    pub struct GrpcStoreClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl GrpcStoreClient<tonic::transport::Channel> {
        #[doc = r" Attempt to create a new client by connecting to a given endpoint."]
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: std::convert::TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }
    impl<T> GrpcStoreClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::ResponseBody: Body + HttpBody + Send + 'static,
        T::Error: Into<StdError>,
        <T::ResponseBody as HttpBody>::Error: Into<StdError> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = tonic::client::Grpc::with_interceptor(inner, interceptor);
            Self { inner }
        }
        pub async fn put(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoPutReq>,
        ) -> Result<tonic::Response<super::ProtoStoreResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/paxos.GrpcStore/Put");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn get(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoKeyReq>,
        ) -> Result<tonic::Response<super::ProtoStoreResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/paxos.GrpcStore/Get");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn delete(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoKeyReq>,
        ) -> Result<tonic::Response<super::ProtoStoreResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/paxos.GrpcStore/Delete");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn stop_server(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoStopServerReq>,
        ) -> Result<tonic::Response<super::ProtoStoreResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/paxos.GrpcStore/StopServer");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn log_global_state(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoLogGlobalStateReq>,
        ) -> Result<tonic::Response<super::ProtoStoreResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/paxos.GrpcStore/LogGlobalState");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn stop_node(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoStopNodeReq>,
        ) -> Result<tonic::Response<super::ProtoStoreResult>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/paxos.GrpcStore/StopNode");
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
    impl<T: Clone> Clone for GrpcStoreClient<T> {
        fn clone(&self) -> Self {
            Self {
                inner: self.inner.clone(),
            }
        }
    }
    impl<T> std::fmt::Debug for GrpcStoreClient<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "GrpcStoreClient {{ ... }}")
        }
    }
}
#[doc = r" Generated server implementations."]
pub mod grpc_acceptor_server {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = "Generated trait containing gRPC methods that should be implemented for use with GrpcAcceptorServer."]
    #[async_trait]
    pub trait GrpcAcceptor: Send + Sync + 'static {
        async fn acceptor_id(
            &self,
            request: tonic::Request<super::ProtoEmpty>,
        ) -> Result<tonic::Response<super::ProtoNodeId>, tonic::Status>;
        async fn leader_id(
            &self,
            request: tonic::Request<super::ProtoEmpty>,
        ) -> Result<tonic::Response<super::ProtoLeaderId>, tonic::Status>;
        async fn prepare(
            &self,
            request: tonic::Request<super::ProtoPrepareReq>,
        ) -> Result<tonic::Response<super::ProtoPrepareResult>, tonic::Status>;
        async fn accept(
            &self,
            request: tonic::Request<super::ProtoAcceptReq>,
        ) -> Result<tonic::Response<super::ProtoAcceptResult>, tonic::Status>;
        async fn request_stop(
            &self,
            request: tonic::Request<super::ProtoRequestStopReq>,
        ) -> Result<tonic::Response<super::ProtoUnitResult>, tonic::Status>;
        async fn register_peer(
            &self,
            request: tonic::Request<super::ProtoMemberInfo>,
        ) -> Result<tonic::Response<super::ProtoUnitResult>, tonic::Status>;
        async fn register_peer_pair(
            &self,
            request: tonic::Request<super::ProtoMemberInfo>,
        ) -> Result<tonic::Response<super::ProtoUnitResult>, tonic::Status>;
    }
    #[doc = " Per-node acceptor role. Prepare/Accept are fenced by the node's proposal watermark."]
    #[derive(Debug)]
    pub struct GrpcAcceptorServer<T: GrpcAcceptor> {
        inner: _Inner<T>,
    }
    struct _Inner<T>(Arc<T>, Option<tonic::Interceptor>);
    impl<T: GrpcAcceptor> GrpcAcceptorServer<T> {
        pub fn new(inner: T) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, None);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, Some(interceptor.into()));
            Self { inner }
        }
    }
    impl<T, B> Service<http::Request<B>> for GrpcAcceptorServer<T>
    where
        T: GrpcAcceptor,
        B: HttpBody + Send + Sync + 'static,
        B::Error: Into<StdError> + Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = Never;
        type Future = BoxFuture<Self::Response, Self::Error>;
        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            let inner = self.inner.clone();
            match req.uri().path() {
                "/paxos.GrpcAcceptor/AcceptorId" => {
                    #[allow(non_camel_case_types)]
                    struct AcceptorIdSvc<T: GrpcAcceptor>(pub Arc<T>);
                    impl<T: GrpcAcceptor> tonic::server::UnaryService<super::ProtoEmpty> for AcceptorIdSvc<T> {
                        type Response = super::ProtoNodeId;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoEmpty>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).acceptor_id(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = AcceptorIdSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/paxos.GrpcAcceptor/LeaderId" => {
                    #[allow(non_camel_case_types)]
                    struct LeaderIdSvc<T: GrpcAcceptor>(pub Arc<T>);
                    impl<T: GrpcAcceptor> tonic::server::UnaryService<super::ProtoEmpty> for LeaderIdSvc<T> {
                        type Response = super::ProtoLeaderId;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoEmpty>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).leader_id(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = LeaderIdSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/paxos.GrpcAcceptor/Prepare" => {
                    #[allow(non_camel_case_types)]
                    struct PrepareSvc<T: GrpcAcceptor>(pub Arc<T>);
                    impl<T: GrpcAcceptor> tonic::server::UnaryService<super::ProtoPrepareReq> for PrepareSvc<T> {
                        type Response = super::ProtoPrepareResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoPrepareReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).prepare(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = PrepareSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/paxos.GrpcAcceptor/Accept" => {
                    #[allow(non_camel_case_types)]
                    struct AcceptSvc<T: GrpcAcceptor>(pub Arc<T>);
                    impl<T: GrpcAcceptor> tonic::server::UnaryService<super::ProtoAcceptReq> for AcceptSvc<T> {
                        type Response = super::ProtoAcceptResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoAcceptReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).accept(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = AcceptSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/paxos.GrpcAcceptor/RequestStop" => {
                    #[allow(non_camel_case_types)]
                    struct RequestStopSvc<T: GrpcAcceptor>(pub Arc<T>);
                    impl<T: GrpcAcceptor> tonic::server::UnaryService<super::ProtoRequestStopReq>
                        for RequestStopSvc<T>
                    {
                        type Response = super::ProtoUnitResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoRequestStopReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).request_stop(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = RequestStopSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/paxos.GrpcAcceptor/RegisterPeer" => {
                    #[allow(non_camel_case_types)]
                    struct RegisterPeerSvc<T: GrpcAcceptor>(pub Arc<T>);
                    impl<T: GrpcAcceptor> tonic::server::UnaryService<super::ProtoMemberInfo> for RegisterPeerSvc<T> {
                        type Response = super::ProtoUnitResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoMemberInfo>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).register_peer(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = RegisterPeerSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/paxos.GrpcAcceptor/RegisterPeerPair" => {
                    #[allow(non_camel_case_types)]
                    struct RegisterPeerPairSvc<T: GrpcAcceptor>(pub Arc<T>);
                    impl<T: GrpcAcceptor> tonic::server::UnaryService<super::ProtoMemberInfo>
                        for RegisterPeerPairSvc<T>
                    {
                        type Response = super::ProtoUnitResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoMemberInfo>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).register_peer_pair(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = RegisterPeerPairSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                _ => Box::pin(async move {
                    Ok(http::Response::builder()
                        .status(200)
                        .header("grpc-status", "12")
                        .header("content-type", "application/grpc")
                        .body(tonic::body::BoxBody::empty())
                        .unwrap())
                }),
            }
        }
    }
    impl<T: GrpcAcceptor> Clone for GrpcAcceptorServer<T> {
        fn clone(&self) -> Self {
            let inner = self.inner.clone();
            Self { inner }
        }
    }
    impl<T: GrpcAcceptor> Clone for _Inner<T> {
        fn clone(&self) -> Self {
            Self(self.0.clone(), self.1.clone())
        }
    }
    impl<T: std::fmt::Debug> std::fmt::Debug for _Inner<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self.0)
        }
    }
    impl<T: GrpcAcceptor> tonic::transport::NamedService for GrpcAcceptorServer<T> {
        const NAME: &'static str = "paxos.GrpcAcceptor";
    }
}
#[doc = r" Generated server implementations."]
pub mod grpc_learner_server {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = "Generated trait containing gRPC methods that should be implemented for use with GrpcLearnerServer."]
    #[async_trait]
    pub trait GrpcLearner: Send + Sync + 'static {
        async fn learner_id(
            &self,
            request: tonic::Request<super::ProtoEmpty>,
        ) -> Result<tonic::Response<super::ProtoNodeId>, tonic::Status>;
        async fn learn(
            &self,
            request: tonic::Request<super::ProtoLearnReq>,
        ) -> Result<tonic::Response<super::ProtoUnitResult>, tonic::Status>;
        async fn log_state(
            &self,
            request: tonic::Request<super::ProtoEmpty>,
        ) -> Result<tonic::Response<super::ProtoUnitResult>, tonic::Status>;
        async fn update_store(
            &self,
            request: tonic::Request<super::ProtoStoreUpdate>,
        ) -> Result<tonic::Response<super::ProtoUnitResult>, tonic::Status>;
        async fn leader_update(
            &self,
            request: tonic::Request<super::ProtoStoreUpdate>,
        ) -> Result<tonic::Response<super::ProtoUnitResult>, tonic::Status>;
        async fn register_learner(
            &self,
            request: tonic::Request<super::ProtoMemberInfo>,
        ) -> Result<tonic::Response<super::ProtoUnitResult>, tonic::Status>;
    }
    #[derive(Debug)]
    pub struct GrpcLearnerServer<T: GrpcLearner> {
        inner: _Inner<T>,
    }
    struct _Inner<T>(Arc<T>, Option<tonic::Interceptor>);
    impl<T: GrpcLearner> GrpcLearnerServer<T> {
        pub fn new(inner: T) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, None);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, Some(interceptor.into()));
            Self { inner }
        }
    }
    impl<T, B> Service<http::Request<B>> for GrpcLearnerServer<T>
    where
        T: GrpcLearner,
        B: HttpBody + Send + Sync + 'static,
        B::Error: Into<StdError> + Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = Never;
        type Future = BoxFuture<Self::Response, Self::Error>;
        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            let inner = self.inner.clone();
            match req.uri().path() {
                "/paxos.GrpcLearner/LearnerId" => {
                    #[allow(non_camel_case_types)]
                    struct LearnerIdSvc<T: GrpcLearner>(pub Arc<T>);
                    impl<T: GrpcLearner> tonic::server::UnaryService<super::ProtoEmpty> for LearnerIdSvc<T> {
                        type Response = super::ProtoNodeId;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoEmpty>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).learner_id(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = LearnerIdSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/paxos.GrpcLearner/Learn" => {
                    #[allow(non_camel_case_types)]
                    struct LearnSvc<T: GrpcLearner>(pub Arc<T>);
                    impl<T: GrpcLearner> tonic::server::UnaryService<super::ProtoLearnReq> for LearnSvc<T> {
                        type Response = super::ProtoUnitResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoLearnReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).learn(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = LearnSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/paxos.GrpcLearner/LogState" => {
                    #[allow(non_camel_case_types)]
                    struct LogStateSvc<T: GrpcLearner>(pub Arc<T>);
                    impl<T: GrpcLearner> tonic::server::UnaryService<super::ProtoEmpty> for LogStateSvc<T> {
                        type Response = super::ProtoUnitResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoEmpty>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).log_state(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = LogStateSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/paxos.GrpcLearner/UpdateStore" => {
                    #[allow(non_camel_case_types)]
                    struct UpdateStoreSvc<T: GrpcLearner>(pub Arc<T>);
                    impl<T: GrpcLearner> tonic::server::UnaryService<super::ProtoStoreUpdate> for UpdateStoreSvc<T> {
                        type Response = super::ProtoUnitResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoStoreUpdate>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).update_store(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = UpdateStoreSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/paxos.GrpcLearner/LeaderUpdate" => {
                    #[allow(non_camel_case_types)]
                    struct LeaderUpdateSvc<T: GrpcLearner>(pub Arc<T>);
                    impl<T: GrpcLearner> tonic::server::UnaryService<super::ProtoStoreUpdate> for LeaderUpdateSvc<T> {
                        type Response = super::ProtoUnitResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoStoreUpdate>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).leader_update(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = LeaderUpdateSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/paxos.GrpcLearner/RegisterLearner" => {
                    #[allow(non_camel_case_types)]
                    struct RegisterLearnerSvc<T: GrpcLearner>(pub Arc<T>);
                    impl<T: GrpcLearner> tonic::server::UnaryService<super::ProtoMemberInfo> for RegisterLearnerSvc<T> {
                        type Response = super::ProtoUnitResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoMemberInfo>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).register_learner(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = RegisterLearnerSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                _ => Box::pin(async move {
                    Ok(http::Response::builder()
                        .status(200)
                        .header("grpc-status", "12")
                        .header("content-type", "application/grpc")
                        .body(tonic::body::BoxBody::empty())
                        .unwrap())
                }),
            }
        }
    }
    impl<T: GrpcLearner> Clone for GrpcLearnerServer<T> {
        fn clone(&self) -> Self {
            let inner = self.inner.clone();
            Self { inner }
        }
    }
    impl<T: GrpcLearner> Clone for _Inner<T> {
        fn clone(&self) -> Self {
            Self(self.0.clone(), self.1.clone())
        }
    }
    impl<T: std::fmt::Debug> std::fmt::Debug for _Inner<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self.0)
        }
    }
    impl<T: GrpcLearner> tonic::transport::NamedService for GrpcLearnerServer<T> {
        const NAME: &'static str = "paxos.GrpcLearner";
    }
}
#[doc = r" Generated server implementations."]
pub mod grpc_store_server {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = "Generated trait containing gRPC methods that should be implemented for use with GrpcStoreServer."]
    #[async_trait]
    pub trait GrpcStore: Send + Sync + 'static {
        async fn put(
            &self,
            request: tonic::Request<super::ProtoPutReq>,
        ) -> Result<tonic::Response<super::ProtoStoreResult>, tonic::Status>;
        async fn get(
            &self,
            request: tonic::Request<super::ProtoKeyReq>,
        ) -> Result<tonic::Response<super::ProtoStoreResult>, tonic::Status>;
        async fn delete(
            &self,
            request: tonic::Request<super::ProtoKeyReq>,
        ) -> Result<tonic::Response<super::ProtoStoreResult>, tonic::Status>;
        async fn stop_server(
            &self,
            request: tonic::Request<super::ProtoStopServerReq>,
        ) -> Result<tonic::Response<super::ProtoStoreResult>, tonic::Status>;
        async fn log_global_state(
            &self,
            request: tonic::Request<super::ProtoLogGlobalStateReq>,
        ) -> Result<tonic::Response<super::ProtoStoreResult>, tonic::Status>;
        async fn stop_node(
            &self,
            request: tonic::Request<super::ProtoStopNodeReq>,
        ) -> Result<tonic::Response<super::ProtoStoreResult>, tonic::Status>;
    }
    #[doc = " Client facing surface of a single node."]
    #[derive(Debug)]
    pub struct GrpcStoreServer<T: GrpcStore> {
        inner: _Inner<T>,
    }
    struct _Inner<T>(Arc<T>, Option<tonic::Interceptor>);
    impl<T: GrpcStore> GrpcStoreServer<T> {
        pub fn new(inner: T) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, None);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, Some(interceptor.into()));
            Self { inner }
        }
    }
    impl<T, B> Service<http::Request<B>> for GrpcStoreServer<T>
    where
        T: GrpcStore,
        B: HttpBody + Send + Sync + 'static,
        B::Error: Into<StdError> + Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = Never;
        type Future = BoxFuture<Self::Response, Self::Error>;
        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            let inner = self.inner.clone();
            match req.uri().path() {
                "/paxos.GrpcStore/Put" => {
                    #[allow(non_camel_case_types)]
                    struct PutSvc<T: GrpcStore>(pub Arc<T>);
                    impl<T: GrpcStore> tonic::server::UnaryService<super::ProtoPutReq> for PutSvc<T> {
                        type Response = super::ProtoStoreResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoPutReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).put(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = PutSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/paxos.GrpcStore/Get" => {
                    #[allow(non_camel_case_types)]
                    struct GetSvc<T: GrpcStore>(pub Arc<T>);
                    impl<T: GrpcStore> tonic::server::UnaryService<super::ProtoKeyReq> for GetSvc<T> {
                        type Response = super::ProtoStoreResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoKeyReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).get(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = GetSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/paxos.GrpcStore/Delete" => {
                    #[allow(non_camel_case_types)]
                    struct DeleteSvc<T: GrpcStore>(pub Arc<T>);
                    impl<T: GrpcStore> tonic::server::UnaryService<super::ProtoKeyReq> for DeleteSvc<T> {
                        type Response = super::ProtoStoreResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoKeyReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).delete(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = DeleteSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/paxos.GrpcStore/StopServer" => {
                    #[allow(non_camel_case_types)]
                    struct StopServerSvc<T: GrpcStore>(pub Arc<T>);
                    impl<T: GrpcStore> tonic::server::UnaryService<super::ProtoStopServerReq> for StopServerSvc<T> {
                        type Response = super::ProtoStoreResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoStopServerReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).stop_server(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = StopServerSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/paxos.GrpcStore/LogGlobalState" => {
                    #[allow(non_camel_case_types)]
                    struct LogGlobalStateSvc<T: GrpcStore>(pub Arc<T>);
                    impl<T: GrpcStore> tonic::server::UnaryService<super::ProtoLogGlobalStateReq>
                        for LogGlobalStateSvc<T>
                    {
                        type Response = super::ProtoStoreResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoLogGlobalStateReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).log_global_state(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = LogGlobalStateSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/paxos.GrpcStore/StopNode" => {
                    #[allow(non_camel_case_types)]
                    struct StopNodeSvc<T: GrpcStore>(pub Arc<T>);
                    impl<T: GrpcStore> tonic::server::UnaryService<super::ProtoStopNodeReq> for StopNodeSvc<T> {
                        type Response = super::ProtoStoreResult;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoStopNodeReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).stop_node(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = StopNodeSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                _ => Box::pin(async move {
                    Ok(http::Response::builder()
                        .status(200)
                        .header("grpc-status", "12")
                        .header("content-type", "application/grpc")
                        .body(tonic::body::BoxBody::empty())
                        .unwrap())
                }),
            }
        }
    }
    impl<T: GrpcStore> Clone for GrpcStoreServer<T> {
        fn clone(&self) -> Self {
            let inner = self.inner.clone();
            Self { inner }
        }
    }
    impl<T: GrpcStore> Clone for _Inner<T> {
        fn clone(&self) -> Self {
            Self(self.0.clone(), self.1.clone())
        }
    }
    impl<T: std::fmt::Debug> std::fmt::Debug for _Inner<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self.0)
        }
    }
    impl<T: GrpcStore> tonic::transport::NamedService for GrpcStoreServer<T> {
        const NAME: &'static str = "paxos.GrpcStore";
    }
}
