/// Assert that a behaviour has pending changes but is held back by its
/// sync interval
#[macro_export]
macro_rules! assert_gated {
    ($behaviour:expr, $now:expr) => {
        assert!(
            $behaviour.has_dirty_bits() && !$behaviour.is_dirty($now),
            "{} should be dirty but waiting for its sync interval",
            $behaviour.name()
        );
    };
}

/// Assert that a behaviour has no pending changes at all
#[macro_export]
macro_rules! assert_clean {
    ($behaviour:expr) => {
        assert!(
            !$behaviour.has_dirty_bits(),
            "{} should have no dirty fields, mask is {:?}",
            $behaviour.name(),
            $behaviour.dirty_mask()
        );
    };
}
