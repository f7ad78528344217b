/// Terminal sound adapter.
///
/// There are no audio assets: effects are logged, and the loud ones ring the
/// terminal bell on the next rendered frame unless muted.

use std::sync::atomic::{AtomicBool, Ordering};

use caw_space::adapters::{Sound, SoundEffect};
use tracing::trace;

pub struct TerminalSound {
    muted: bool,
    bell: AtomicBool,
}

impl TerminalSound {
    pub fn new(muted: bool) -> Self {
        Self {
            muted,
            bell: AtomicBool::new(false),
        }
    }

    /// Returns whether a bell is owed and clears the request.
    pub fn take_bell(&self) -> bool {
        self.bell.swap(false, Ordering::SeqCst)
    }
}

impl Sound for TerminalSound {
    fn play(&self, effect: SoundEffect) {
        trace!(?effect, "sound");
        if self.muted {
            return;
        }
        if matches!(effect, SoundEffect::ShipExplosion | SoundEffect::GameTheme) {
            self.bell.store(true, Ordering::SeqCst);
        }
    }
}
