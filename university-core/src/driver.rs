//! Process-wide driver registration.
//!
//! Registration happens lazily on the first `Session::open` and is a no-op
//! afterwards. Nothing needs tearing down at exit.

use once_cell::sync::OnceCell;
use tracing::debug;

/// Static description of the registered driver.
#[derive(Debug, PartialEq, Eq)]
pub struct DriverInfo {
    pub name: &'static str,
    pub scheme: &'static str,
}

static DRIVER: OnceCell<DriverInfo> = OnceCell::new();

/// Register the MySQL driver once per process and return its description.
pub fn register() -> &'static DriverInfo {
    DRIVER.get_or_init(|| {
        let info = DriverInfo {
            name: "MySQL (sqlx)",
            scheme: "mysql",
        };
        debug!(driver = info.name, "registered database driver");
        info
    })
}
