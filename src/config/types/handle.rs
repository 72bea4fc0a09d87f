//! Global config handle.
//!
//! Uses `arc-swap` for lock-free reads from batch worker threads.

use crate::config::SmilConfig;
use arc_swap::ArcSwap;
use std::sync::{Arc, LazyLock};

/// Global config storage.
pub static CONFIG: LazyLock<ArcSwap<SmilConfig>> =
    LazyLock::new(|| ArcSwap::from_pointee(SmilConfig::default()));

#[inline]
pub fn cfg() -> Arc<SmilConfig> {
    CONFIG.load_full()
}

/// Install the loaded configuration for the rest of the process.
#[inline]
pub fn init_config(config: SmilConfig) -> Arc<SmilConfig> {
    let arc = Arc::new(config);
    CONFIG.store(Arc::clone(&arc));
    arc
}
