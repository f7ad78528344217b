/// Tiny cooperative scheduler for the game's timed phase changes.
///
/// Nothing runs on its own: the tick loop asks for the actions that are due
/// at its current time and applies them.  Times are milliseconds on the
/// caller's game clock.

/// Delay between a new-game request and the start of play ("Get Ready!").
pub const NEW_GAME_DELAY_MS: u64 = 1_500;
/// How long the game-over screen stays up before the title returns.
pub const GAME_OVER_DELAY_MS: u64 = 3_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Starting → Playing.
    BeginPlay,
    /// GameOver → NotStarted.
    ReturnToTitle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScheduledTransition {
    pub fires_at: u64,
    pub action: Transition,
}

#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    pending: Vec<ScheduledTransition>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `action`.  An identical action that is already pending is
    /// replaced, so each transition is outstanding at most once.
    pub fn schedule(&mut self, fires_at: u64, action: Transition) {
        self.pending.retain(|p| p.action != action);
        self.pending.push(ScheduledTransition { fires_at, action });
    }

    /// Removes and returns every action due at `now`, earliest first.
    pub fn take_due(&mut self, now: u64) -> Vec<Transition> {
        let mut due: Vec<ScheduledTransition> = Vec::new();
        self.pending.retain(|p| {
            if p.fires_at <= now {
                due.push(*p);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|p| p.fires_at);
        due.into_iter().map(|p| p.action).collect()
    }

    pub fn is_pending(&self, action: Transition) -> bool {
        self.pending.iter().any(|p| p.action == action)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
