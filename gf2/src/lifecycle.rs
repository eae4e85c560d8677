//! Process-wide lifecycle hooks around the Gray-code table cache.
//!
//! Every M4RM/M4RI entry point already builds the table set lazily on
//! first use ([`crate::gray::tables`]); `init_library` exists for callers
//! that want the build cost paid predictably at startup instead of on the
//! first multiply, and `fini_library` releases that cache so a later call
//! rebuilds it from scratch.

use crate::gray;

/// Forces the Gray-code table set to build now instead of on first use.
pub fn init_library() {
    gray::tables();
}

/// Releases the cached Gray-code table set. Any later call to
/// `init_library`, or any M4RM/M4RI operation, rebuilds it from scratch;
/// rebuilding after teardown is always safe since the tables are a pure
/// function of `k`.
pub fn fini_library() {
    gray::release();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_then_fini_then_init_again_is_fine() {
        init_library();
        fini_library();
        init_library();
        assert_eq!(gray::tables().len(), gray::MAXKAY + 1);
    }

    #[test]
    fn fini_then_rebuild_yields_a_fresh_allocation() {
        init_library();
        let before = gray::tables().as_ptr();
        fini_library();
        let after = gray::tables().as_ptr();
        assert_ne!(before, after, "fini_library should force a fresh build on the next use");
    }
}
