//! System-wide constants for the Equilib reconciliation engine.

/// Default absolute discrepancy threshold for the fiat currency (TOMAN):
/// gaps under 500 units are suppressed.
pub const DEFAULT_FIAT_THRESHOLD: i64 = 500;

/// Default absolute discrepancy threshold for the stable-coin currency
/// (USDT): gaps under 10 units are surfaced as moderate, not actionable.
pub const DEFAULT_STABLECOIN_THRESHOLD: i64 = 10;

/// Fixed margin added to the market quote when suggesting a price.
pub const DEFAULT_PRICE_MARKUP: i64 = 200;

/// Current schema version of the persisted wizard snapshot. Bump on any
/// shape change; decoding rejects foreign versions explicitly.
pub const WIZARD_SNAPSHOT_VERSION: u32 = 1;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine name.
pub const ENGINE_NAME: &str = "Equilib";
