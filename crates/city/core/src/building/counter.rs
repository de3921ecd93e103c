//! Process-wide count of live buildings, kept for diagnostics only.

use std::sync::atomic::{AtomicUsize, Ordering};

static LIVE_BUILDINGS: AtomicUsize = AtomicUsize::new(0);

/// Returns the number of [`Building`](super::Building) values currently alive,
/// regardless of which city, slot or local variable owns them.
pub fn live_buildings() -> usize {
    LIVE_BUILDINGS.load(Ordering::Relaxed)
}

/// Token embedded in every building; creation and clone increment the
/// counter, drop decrements it.
pub(crate) struct LiveToken(());

impl LiveToken {
    pub(crate) fn new() -> Self {
        LIVE_BUILDINGS.fetch_add(1, Ordering::Relaxed);
        Self(())
    }
}

impl Clone for LiveToken {
    fn clone(&self) -> Self {
        Self::new()
    }
}

impl Drop for LiveToken {
    fn drop(&mut self) {
        LIVE_BUILDINGS.fetch_sub(1, Ordering::Relaxed);
    }
}

// Tokens carry no state, so they never affect building equality.
impl PartialEq for LiveToken {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl core::fmt::Debug for LiveToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("LiveToken")
    }
}
