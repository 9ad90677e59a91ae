//! Debug-only reentry detection.
//!
//! The only user code the table ever runs is the caller-supplied hash
//! function, invoked while probing. A hash function that calls back
//! into the same table can observe (or corrupt) a chain mid-mutation,
//! so in debug builds every public entry point takes a guard and a
//! nested entry panics. Release builds compile the check away.

use core::cell::Cell;
use core::marker::PhantomData;

/// Per-table reentry tracker. Entry points hold a guard for their whole
/// body: `let _g = self.reentry.enter();`.
#[derive(Debug)]
pub(crate) struct ReentryCheck {
    #[cfg(debug_assertions)]
    depth: Cell<u32>,
    // Raw-pointer marker keeps this !Send + !Sync, matching the
    // single-threaded design.
    _nosend: PhantomData<*mut ()>,
}

impl ReentryCheck {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            depth: Cell::new(0),
            _nosend: PhantomData,
        }
    }

    /// Enter a guarded section; panics in debug builds if one is
    /// already active on this table.
    #[inline]
    pub(crate) fn enter(&self) -> ReentryGuard<'_> {
        #[cfg(debug_assertions)]
        {
            let d = self.depth.get();
            assert!(
                d == 0,
                "reentry detected: hash function called back into the table"
            );
            self.depth.set(d + 1);
            return ReentryGuard { owner: self };
        }

        #[cfg(not(debug_assertions))]
        {
            return ReentryGuard { _z: PhantomData };
        }
    }
}

/// RAII guard returned by [`ReentryCheck::enter`].
pub(crate) struct ReentryGuard<'a> {
    #[cfg(debug_assertions)]
    owner: &'a ReentryCheck,
    #[cfg(not(debug_assertions))]
    _z: PhantomData<&'a ()>,
}

impl<'a> Drop for ReentryGuard<'a> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        {
            let d = self.owner.depth.get();
            debug_assert!(d > 0);
            self.owner.depth.set(d - 1);
        }
    }
}
