//! Wire model of the NAKIVO Director JSON-RPC API.
//!
//! Only the subset read by the exporter is modelled: the RPC envelope,
//! job summaries returned by `getJobInfo` and job groups returned by
//! `getGroupInfo`.

mod domain;
pub use domain::*;

mod rpc;
pub use rpc::{RPC_KIND, RpcKind, RpcRequest, RpcResponse};
