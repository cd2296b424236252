use std::{future::Future, pin::Pin};

use crate::{request::BidRequest, result_code::ResultCode};

/// Boundary to the external auction client. Implementations resolve the
/// returned future exactly once with the outcome of the fetch; transport,
/// encoding, and account configuration all live behind this trait.
pub trait DemandSource: Send + Sync {
    fn fetch(&self, request: BidRequest) -> Pin<Box<dyn Future<Output = ResultCode> + Send>>;
}

/// Demand source that resolves immediately with a scripted result code.
/// Stands in for the real auction client in tests and demos.
pub struct StubDemand {
    scenario: ResultCode,
}

impl StubDemand {
    pub fn new(scenario: ResultCode) -> Self {
        StubDemand { scenario }
    }
}

impl DemandSource for StubDemand {
    fn fetch(&self, _request: BidRequest) -> Pin<Box<dyn Future<Output = ResultCode> + Send>> {
        let code = self.scenario;
        Box::pin(async move { code })
    }
}
