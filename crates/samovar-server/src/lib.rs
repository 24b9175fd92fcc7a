//! Aggregation server: action dispatch, context accumulation, HTTP transport.

pub mod context;
pub mod dispatch;
pub mod transport;

pub use context::ContextProcessor;
pub use dispatch::{ActionRequest, ActionResponse, DispatchPolicy, Dispatcher};
