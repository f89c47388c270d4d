/// Fixed timings and paths shared by the extension surfaces

/// Background poll period (30 minutes)
pub const POLL_INTERVAL_MS: i32 = 30 * 60 * 1000;

/// Companion page reload period (5 minutes)
pub const PAGE_RELOAD_MS: i32 = 5 * 60 * 1000;

/// Delay before the popup reloads its tables after a manual scan
pub const SCAN_RELOAD_DELAY_MS: i32 = 3_000;

/// Scan endpoint on the monitoring site itself, used by the companion page
pub const LOCAL_SCAN_ENDPOINT: &str = "/api/iniciar-escaneo";

/// Manual-scan button served by the monitoring site
pub const SCAN_BUTTON_ID: &str = "btnEscaneoManual";

/// Host element for pages that do not serve the button themselves
pub const SCAN_MOUNT_ID: &str = "escaneo-manual";
