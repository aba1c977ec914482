//! Shared timing values and storage keys.

/// How long a transient notification stays on screen before auto-dismissing.
pub const NOTICE_TTL_MS: u32 = 3_000;

/// Quiet period after the last keystroke before a search request fires.
pub const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Delay between the order confirmation screen and the redirect to order history.
pub const ORDER_REDIRECT_DELAY_MS: u32 = 2_000;

/// Storage key holding the persisted session snapshot.
pub const SESSION_STORAGE_KEY: &str = "gamestore.session";

/// Substring the backend uses when a cart quantity exceeds stock.
pub const STOCK_EXCEEDED_MARKER: &str = "exceeds available stock";

/// Default API base when no compile-time override is present.
pub const DEFAULT_API_BASE: &str = "/api";

/// Inventory rows at or below this count are flagged as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 5;
