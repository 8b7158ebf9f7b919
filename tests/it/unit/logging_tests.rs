//! Unit tests for subscriber setup.

use databoard::logging;

#[test]
fn test_init_only_installs_once() {
    // Another test may have installed a subscriber first
    let _ = logging::init();
    assert!(!logging::init());
}

#[test]
fn test_default_filter_targets_crate() {
    assert!(logging::DEFAULT_FILTER.starts_with("databoard"));
}
