/// Outcome of a demand fetch, forwarded from the demand layer to the
/// caller's completion listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultCode {
    /// Demand fetch succeeded and bids were returned.
    Success,
    /// The ad unit's config id is missing or blank.
    InvalidConfigId,
    /// The ad unit's size has a zero dimension.
    InvalidSize,
    /// The account id registered with the demand source is invalid.
    InvalidAccountId,
    /// No auction server has been configured on the demand source.
    ServerNotSpecified,
    /// The request could not reach the auction server.
    NetworkError,
    /// The auction server did not respond within the fetch timeout.
    TimedOut,
    /// The auction ran but returned no bids for this unit.
    NoBids,
    /// The auction server responded with an error.
    ServerError,
}

impl ResultCode {
    /// Stable identifier used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            ResultCode::Success => "success",
            ResultCode::InvalidConfigId => "invalid_config_id",
            ResultCode::InvalidSize => "invalid_size",
            ResultCode::InvalidAccountId => "invalid_account_id",
            ResultCode::ServerNotSpecified => "server_not_specified",
            ResultCode::NetworkError => "network_error",
            ResultCode::TimedOut => "timed_out",
            ResultCode::NoBids => "no_bids",
            ResultCode::ServerError => "server_error",
        }
    }
}

impl std::fmt::Display for ResultCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            ResultCode::Success => "demand fetch successful",
            ResultCode::InvalidConfigId => "missing or blank config id",
            ResultCode::InvalidSize => "ad size has a zero dimension",
            ResultCode::InvalidAccountId => "invalid account id",
            ResultCode::ServerNotSpecified => "no auction server specified",
            ResultCode::NetworkError => "network error during demand fetch",
            ResultCode::TimedOut => "demand fetch timed out",
            ResultCode::NoBids => "no bids returned",
            ResultCode::ServerError => "auction server error",
        };
        write!(f, "{}", message)
    }
}
