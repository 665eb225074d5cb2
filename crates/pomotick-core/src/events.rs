use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every observable change in the engine produces an Event.
///
/// Operations return their events in emission order; within one batch a
/// `Completed` always precedes the `PhaseChanged` that follows it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// The countdown advanced (or was reset) to this many seconds.
    Tick {
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// The engine entered a new phase.
    PhaseChanged { phase: Phase, at: DateTime<Utc> },
    /// A countdown phase ran out; `finished` is the phase that ended.
    Completed { finished: Phase, at: DateTime<Utc> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_type_tag() {
        let event = Event::PhaseChanged {
            phase: Phase::LongBreak,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "PhaseChanged");
        assert_eq!(json["phase"], "long_break");
    }

    #[test]
    fn tick_roundtrips() {
        let event = Event::Tick {
            remaining_secs: 42,
            at: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        assert!(matches!(
            back,
            Event::Tick {
                remaining_secs: 42,
                ..
            }
        ));
    }
}
