use chrono::{DateTime, Utc};

/// A fact recorded by an aggregate.
///
/// The orchestration layer persists events per stream, keyed by
/// [`Event::aggregate_id`], and replays them in order to rebuild state.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Identifier of the aggregate whose stream this event belongs to.
    type AggregateId: Clone + Eq + core::fmt::Debug;

    /// Stable event name (e.g. "sharing.expense.share_claimed").
    fn event_type(&self) -> &'static str;

    /// Schema version for this event type.
    fn version(&self) -> u32;

    fn aggregate_id(&self) -> Self::AggregateId;

    /// When the event occurred (business time).
    fn occurred_at(&self) -> DateTime<Utc>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct Ping {
        stream: u8,
        at: DateTime<Utc>,
    }

    impl Event for Ping {
        type AggregateId = u8;

        fn event_type(&self) -> &'static str {
            "test.ping"
        }

        fn version(&self) -> u32 {
            1
        }

        fn aggregate_id(&self) -> u8 {
            self.stream
        }

        fn occurred_at(&self) -> DateTime<Utc> {
            self.at
        }
    }

    #[test]
    fn events_group_by_aggregate_id() {
        let at = Utc::now();
        let events = [Ping { stream: 1, at }, Ping { stream: 2, at }, Ping { stream: 1, at }];
        let first_stream: Vec<_> = events.iter().filter(|e| e.aggregate_id() == 1).collect();
        assert_eq!(first_stream.len(), 2);
        assert!(first_stream.iter().all(|e| e.occurred_at() == at));
    }
}
