//! Property tests for delivery ordering and filter semantics.

use parking_lot::Mutex;
use proptest::prelude::*;
use statecast::{Store, Subscriber, Subscription};
use std::sync::Arc;

fn drive(subscription: &Subscription<i32>, values: &[i32]) {
    let mut old: Option<i32> = None;
    for value in values {
        subscription.new_values(old.as_ref(), value);
        old = Some(*value);
    }
}

fn collect(subscription: &Subscription<i32>) -> Arc<Mutex<Vec<i32>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    subscription.set_observer(move |_old, new| sink.lock().push(*new));
    log
}

struct Recorder {
    values: Arc<Mutex<Vec<i32>>>,
}

impl Subscriber for Recorder {
    type State = i32;

    fn new_state(&self, state: &i32) {
        self.values.lock().push(*state);
    }
}

proptest! {
    /// An unfiltered chain forwards every value, in order.
    #[test]
    fn prop_unfiltered_chain_preserves_sequence(
        values in proptest::collection::vec(-100i32..100, 0..64),
    ) {
        let root = Subscription::new();
        let log = collect(&root);

        drive(&root, &values);
        prop_assert_eq!(&*log.lock(), &values);
    }

    /// Equality-based repeat skipping is exactly adjacent deduplication.
    #[test]
    fn prop_skip_repeats_deduplicates_adjacent(
        values in proptest::collection::vec(0i32..8, 0..64),
    ) {
        let root = Subscription::new();
        let filtered = root.skip_repeats();
        let log = collect(&filtered);

        drive(&root, &values);

        let mut expected: Vec<i32> = Vec::new();
        for value in &values {
            if expected.last() != Some(value) {
                expected.push(*value);
            }
        }
        prop_assert_eq!(&*log.lock(), &expected);
    }

    /// Chained filters suppress a pair iff either predicate calls it a
    /// repeat, evaluated in order against the same pair.
    #[test]
    fn prop_filter_composition_is_or(
        values in proptest::collection::vec(0i32..16, 0..64),
    ) {
        let root = Subscription::new();
        let filtered = root
            .skip_repeats_by(|old, new| old == new)
            .skip_repeats_by(|old, new| old % 2 == new % 2);
        let log = collect(&filtered);

        drive(&root, &values);

        let mut expected: Vec<i32> = Vec::new();
        let mut old: Option<i32> = None;
        for new in &values {
            let suppressed = match old {
                Some(previous) => previous == *new || previous % 2 == *new % 2,
                None => false,
            };
            if !suppressed {
                expected.push(*new);
            }
            old = Some(*new);
        }
        prop_assert_eq!(&*log.lock(), &expected);
    }

    /// A pair with no prior state always forwards, whatever the predicate.
    #[test]
    fn prop_first_delivery_always_forwarded(value in any::<i32>()) {
        let root = Subscription::new();
        let filtered = root.skip_repeats_by(|_old, _new| true);
        let log = collect(&filtered);

        root.new_values(None, &value);
        prop_assert_eq!(&*log.lock(), &vec![value]);
    }

    /// The store delivers the initial state plus one callback per dispatch,
    /// in dispatch order.
    #[test]
    fn prop_store_delivers_every_transition(
        values in proptest::collection::vec(-50i32..50, 0..32),
    ) {
        let store = Store::new(Box::new(|action: &i32, _state: &i32| *action), 0);

        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::new(Recorder {
            values: Arc::clone(&seen),
        });
        store.subscribe(&recorder);

        let mut expected = vec![0];
        for value in &values {
            store.dispatch(*value).unwrap();
            expected.push(*value);
        }
        prop_assert_eq!(&*seen.lock(), &expected);
    }
}
