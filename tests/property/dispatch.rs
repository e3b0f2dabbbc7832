//! Property-based tests for at-most-once, selective, consistent dispatch

use gamestate::script::{run_script, Step};
use gamestate::{ChangeTracker, GameContext};
use proptest::prelude::*;
use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;

const TOPICS: u8 = 4;

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        (0i64..5).prop_map(|coins| Step::UseCoins { coins }),
        (0i64..5, 0i64..5).prop_map(|(stars, coins)| Step::BuyStars { stars, coins }),
        (0u32..4, 0i64..3).prop_map(|(id, stars)| Step::Unlock { id, stars }),
        (0u32..4, 0i64..3).prop_map(|(id, coins)| Step::Upgrade { id, coins }),
        Just(Step::Flush),
    ]
}

proptest! {
    /// Every callback runs at most once per flush, and exactly once when any
    /// of its topics is both subscribed and dirty.
    #[test]
    fn test_callbacks_run_at_most_once_and_only_for_dirty_topics(
        subscribed_mask in proptest::collection::vec(any::<bool>(), TOPICS as usize),
        attachments in proptest::collection::vec(
            proptest::collection::vec(0..TOPICS, 0..6),
            1..6,
        ),
        marks in proptest::collection::vec(0..TOPICS, 0..12),
    ) {
        let subscribed: HashSet<u8> = (0..TOPICS)
            .filter(|t| subscribed_mask[*t as usize])
            .collect();
        let tracker = ChangeTracker::<u8>::new();
        for topic in &subscribed {
            tracker.subscribe(*topic);
        }

        let mut counters = Vec::new();
        for topics in &attachments {
            let count = Rc::new(Cell::new(0u32));
            let sink = Rc::clone(&count);
            let id = tracker.register(move || sink.set(sink.get() + 1));
            for topic in topics {
                tracker.on_changed(id, *topic);
            }
            counters.push(count);
        }

        for topic in &marks {
            tracker.mark_changed(*topic);
        }
        let dirty: HashSet<u8> = marks.iter().copied().collect();
        let invoked = tracker.flush();

        let mut expected_invoked = 0;
        for (topics, count) in attachments.iter().zip(&counters) {
            let expected = topics
                .iter()
                .any(|t| subscribed.contains(t) && dirty.contains(t));
            prop_assert!(count.get() <= 1);
            prop_assert_eq!(count.get() == 1, expected);
            expected_invoked += usize::from(expected);
        }
        prop_assert_eq!(invoked, expected_invoked);
        prop_assert!(tracker.dirty_topics().is_empty());
        prop_assert_eq!(tracker.flush(), 0);
    }

    /// Observers only ever see the state as of the flush that notified them.
    #[test]
    fn test_observers_see_final_state_of_each_batch(
        steps in proptest::collection::vec(step_strategy(), 0..24),
    ) {
        let mut context = GameContext::new(10, 10);
        let report = run_script(&mut context, &steps);

        for flush in &report.flushes {
            let mut observers = HashSet::new();
            for notification in &flush.notifications {
                prop_assert!(observers.insert(notification.observer.clone()));
                prop_assert_eq!(&notification.state, &flush.notifications[0].state);
            }
            prop_assert_eq!(flush.notifications.len(), flush.invoked);
        }
        if let Some(last) = report.flushes.last().and_then(|f| f.notifications.last()) {
            prop_assert_eq!(&last.state, &report.final_state);
        }
    }
}
