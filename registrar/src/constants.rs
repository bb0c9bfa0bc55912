/// Fixed gas ceiling on every registration transaction; the devnet never
/// charges close to this for a single script function call.
pub const MAX_GAS_AMOUNT: u64 = 2000;
pub const GAS_UNIT_PRICE: u64 = 1;
/// Transactions expire this many seconds after construction.
pub const EXPIRATION_WINDOW_SECS: u64 = 600;
/// Default faucet drip for a freshly minted account.
pub const DEFAULT_FUND_AMOUNT: u64 = 10_000;
/// Connect and overall call timeout for every outbound HTTP request.
pub const HTTP_TIMEOUT_SECS: u64 = 60;
