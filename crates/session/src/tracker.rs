//! Fetch deduplication and staleness tracking.

use scolaris_core::SubjectId;

/// Single slot recording which subject the latest fetch attempt owns.
///
/// Written synchronously the instant a fetch is initiated, before any
/// await, so a second event for the same subject can recognize "already in
/// flight". The generation is monotonic; completions compare against it to
/// detect that a newer fetch (or a sign-out) superseded them.
#[derive(Debug, Default)]
pub struct FetchTracker {
    subject: Option<SubjectId>,
    generation: u64,
}

impl FetchTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subject currently owned by the latest fetch attempt.
    pub fn subject(&self) -> Option<SubjectId> {
        self.subject
    }

    /// Generation of the latest fetch attempt.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Record that a fetch for `subject` is starting. Returns the new
    /// generation, which the completion must present to apply its result.
    pub fn begin(&mut self, subject: SubjectId) -> u64 {
        self.subject = Some(subject);
        self.generation += 1;
        self.generation
    }

    /// Whether a completion holding `generation` is still the latest.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Reset on sign-out. Also bumps the generation so in-flight
    /// completions turn stale instead of resurrecting a cleared state.
    pub fn clear(&mut self) {
        self.subject = None;
        self.generation += 1;
    }
}
