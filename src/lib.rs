//! Core ad unit primitives for a header bidding SDK: asynchronous demand
//! fetch against an external auction collaborator, interval-gated auto
//! refresh, and the targeting stores merged into each outgoing bid request.

mod ad_unit;
mod demand;
mod dispatcher;
mod request;
mod result_code;
mod targeting;

pub use ad_unit::{AdSize, AdUnit};
pub use demand::{DemandSource, StubDemand};
pub use dispatcher::{Dispatcher, MIN_AUTO_REFRESH_MILLIS};
pub use request::{BidRequest, RequestError};
pub use result_code::ResultCode;
pub use targeting::{Targeting, UserKeywords};
