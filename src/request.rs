use std::collections::{HashMap, HashSet};

use crate::{ad_unit::AdSize, result_code::ResultCode, targeting::Targeting};

/// Pre-flight validation failures caught before a request reaches the
/// demand source. Delivered to the caller as result codes through the
/// normal completion path rather than as errors.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("config id is empty")]
    EmptyConfigId,
    #[error("ad size {0}x{1} has a zero dimension")]
    ZeroSize(u32, u32),
}

impl RequestError {
    pub fn result_code(&self) -> ResultCode {
        match self {
            RequestError::EmptyConfigId => ResultCode::InvalidConfigId,
            RequestError::ZeroSize(..) => ResultCode::InvalidSize,
        }
    }
}

/// Everything handed to the demand source for one fetch: the unit's
/// identity plus a point-in-time snapshot of its targeting data. Not a
/// wire format; encoding is the demand source's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidRequest {
    pub config_id: String,
    pub size: AdSize,
    pub user_keywords: HashSet<String>,
    pub context_data: HashMap<String, HashSet<String>>,
    pub context_keywords: HashSet<String>,
}

impl BidRequest {
    pub fn new(config_id: &str, size: AdSize, targeting: &Targeting) -> Result<Self, RequestError> {
        if config_id.trim().is_empty() {
            return Err(RequestError::EmptyConfigId);
        }
        if size.width == 0 || size.height == 0 {
            return Err(RequestError::ZeroSize(size.width, size.height));
        }
        Ok(BidRequest {
            config_id: config_id.to_string(),
            size,
            user_keywords: targeting.user_keywords_set(),
            context_data: targeting.context_data_dictionary(),
            context_keywords: targeting.context_keywords_set(),
        })
    }
}
