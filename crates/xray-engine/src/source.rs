//! Event sources: where step histories come from.
//!
//! An [`EventSource`] produces the ordered step history of an event from
//! its [`EventId`] alone. Generation is a pure function of the id, so the
//! same run yields the same histories no matter how events are spread
//! over workers.

use smallvec::SmallVec;
use xray_core::{EventId, StepRecord};

/// Ordered steps of one event. Most events are a handful of steps long.
pub type EventHistory = SmallVec<[StepRecord; 8]>;

/// Produces step histories by event id.
///
/// Shared by reference between worker threads during a run.
pub trait EventSource: Sync {
    /// Short name for logging.
    fn name(&self) -> &str;

    /// Write the history of `event` into `out`.
    ///
    /// `out` is cleared by the caller. An empty history is a valid event
    /// that scores nothing.
    fn generate(&self, event: EventId, out: &mut EventHistory);
}

impl<S: EventSource + ?Sized> EventSource for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn generate(&self, event: EventId, out: &mut EventHistory) {
        (**self).generate(event, out)
    }
}

/// Replays fixed histories: event `i` gets history `i`.
///
/// Events past the end of the script have empty histories.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    events: Vec<EventHistory>,
}

impl ScriptedSource {
    /// Source over the given histories.
    pub fn new<I, E>(events: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: IntoIterator<Item = StepRecord>,
    {
        Self {
            events: events
                .into_iter()
                .map(|e| e.into_iter().collect())
                .collect(),
        }
    }

    /// Number of scripted events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the script is empty.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Append one history.
    pub fn push(&mut self, steps: impl IntoIterator<Item = StepRecord>) {
        self.events.push(steps.into_iter().collect());
    }
}

impl EventSource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    fn generate(&self, event: EventId, out: &mut EventHistory) {
        let Ok(index) = usize::try_from(event.0) else {
            return;
        };
        if let Some(steps) = self.events.get(index) {
            out.extend_from_slice(steps);
        }
    }
}
