//! Property-based invariant tests for `PatternTracker`.
//!
//! Arbitrary pointer streams (including NaN, off-grid, and repeated input)
//! must keep the tracker consistent:
//!
//! 1. No panics on any input sequence
//! 2. Pattern never holds a dot twice, and the lookup agrees with it
//! 3. Event grammar: Started precedes Progress; one terminal per gesture
//! 4. Returned events equal listener-observed events, in order
//! 5. Completed patterns match the final Progress snapshot
//! 6. Determinism: same input yields same events

use std::cell::RefCell;
use std::rc::Rc;

use patternlock_core::{
    PatternEvent, PatternEventKind, PatternTracker, Point, PointerEvent, TrackerConfig,
};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn coord_strategy() -> impl Strategy<Value = f32> {
    prop_oneof![
        8 => -50.0f32..450.0,
        1 => Just(f32::NAN),
        1 => Just(f32::INFINITY),
    ]
}

fn point_strategy() -> impl Strategy<Value = Point> {
    (coord_strategy(), coord_strategy()).prop_map(|(x, y)| Point::new(x, y))
}

fn pointer_strategy() -> impl Strategy<Value = PointerEvent> {
    prop_oneof![
        2 => point_strategy().prop_map(PointerEvent::Down),
        5 => proptest::collection::vec(point_strategy(), 0..8).prop_map(PointerEvent::Move),
        2 => Just(PointerEvent::Up),
        1 => Just(PointerEvent::Cancel),
    ]
}

fn script_strategy() -> impl Strategy<Value = Vec<PointerEvent>> {
    proptest::collection::vec(pointer_strategy(), 0..60)
}

fn tracker(size: u16) -> PatternTracker {
    let config = TrackerConfig {
        grid_size: size,
        ..TrackerConfig::default()
    };
    let mut tracker = PatternTracker::new(&config).unwrap();
    tracker.layout(400.0, 400.0);
    tracker
}

/// Run `script`, returning every emitted event.
fn run(tracker: &mut PatternTracker, script: &[PointerEvent]) -> Vec<PatternEvent> {
    script.iter().flat_map(|e| tracker.process(e)).collect()
}

// ═══════════════════════════════════════════════════════════════════════
// 1–2. Structural consistency
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn pattern_stays_unique_and_consistent(
        size in 1u16..=6,
        script in script_strategy(),
    ) {
        let mut t = tracker(size);
        for event in &script {
            t.process(event);
            let pattern = t.pattern();
            let mut ids = pattern.ids();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), pattern.len());
            prop_assert_eq!(pattern.lookup().count(), pattern.len());
            for dot in pattern.iter() {
                prop_assert!(pattern.lookup().is_visited(dot.row(), dot.column()));
            }
            prop_assert!(pattern.len() <= usize::from(size) * usize::from(size));
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Event grammar
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn events_follow_gesture_grammar(
        script in script_strategy(),
    ) {
        let mut t = tracker(3);
        let events = run(&mut t, &script);

        // Between two terminals there is at most one Started, and every
        // Progress follows a Started in the same gesture.
        let mut started = false;
        for event in &events {
            match event.kind() {
                PatternEventKind::Started => {
                    prop_assert!(!started, "second Started without a terminal");
                    started = true;
                }
                PatternEventKind::Progress => {
                    prop_assert!(started, "Progress outside a gesture");
                }
                PatternEventKind::Complete => {
                    prop_assert!(started, "Complete outside a gesture");
                    started = false;
                }
                PatternEventKind::Cleared => {
                    started = false;
                }
            }
        }
        prop_assert_eq!(started, t.is_drawing());
    }

    #[test]
    fn progress_grows_by_one_dot(
        script in script_strategy(),
    ) {
        let mut t = tracker(3);
        let events = run(&mut t, &script);

        let mut last_len = 0usize;
        for event in &events {
            match event {
                PatternEvent::Started | PatternEvent::Cleared => last_len = 0,
                PatternEvent::Progress(p) => {
                    prop_assert_eq!(p.len(), last_len + 1);
                    last_len = p.len();
                }
                PatternEvent::Complete(p) => {
                    prop_assert_eq!(p.len(), last_len);
                    prop_assert!(!p.is_empty());
                }
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Listener parity
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn listeners_observe_returned_events(
        script in script_strategy(),
    ) {
        let mut t = tracker(4);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        t.listeners().add_fn(move |e| s.borrow_mut().push(e.clone()));

        let events = run(&mut t, &script);
        prop_assert_eq!(&*seen.borrow(), &events);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 5. Completion snapshot
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn complete_matches_last_progress(
        script in script_strategy(),
    ) {
        let mut t = tracker(3);
        let events = run(&mut t, &script);

        let mut last_progress = None;
        for event in &events {
            match event {
                PatternEvent::Progress(p) => last_progress = Some(p.clone()),
                PatternEvent::Complete(p) => {
                    prop_assert_eq!(Some(p), last_progress.as_ref());
                }
                _ => {}
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 6. Determinism
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn same_script_same_events(
        size in 1u16..=5,
        script in script_strategy(),
    ) {
        let mut a = tracker(size);
        let mut b = tracker(size);
        prop_assert_eq!(run(&mut a, &script), run(&mut b, &script));
        prop_assert_eq!(a.pattern(), b.pattern());
        prop_assert_eq!(a.state(), b.state());
    }
}
