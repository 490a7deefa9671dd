//! End-to-end use of the facade: draw, persist, verify, and replay.

use std::cell::RefCell;
use std::rc::Rc;

use patternlock::prelude::*;

fn tracker() -> PatternTracker {
    let mut tracker = PatternTracker::new(&TrackerConfig::default()).unwrap();
    tracker.layout(300.0, 300.0);
    tracker
}

/// Lock screen collaborator: stores a hash and checks later attempts.
struct Verifier {
    stored: String,
    results: RefCell<Vec<bool>>,
}

impl PatternLockListener for Verifier {
    fn on_complete(&self, pattern: &Pattern) {
        let ok = hash(pattern, HashAlgorithm::Sha256) == self.stored;
        self.results.borrow_mut().push(ok);
    }
}

#[test]
fn draw_persist_and_verify() {
    let grid = Grid::default();
    let secret = decode(grid, "01258").unwrap();
    let verifier = Rc::new(Verifier {
        stored: hash(&secret, HashAlgorithm::Sha256),
        results: RefCell::new(Vec::new()),
    });

    let mut t = tracker();
    t.add_listener(verifier.clone());

    // Too short: 0 -> 2 fills 1, giving 012.
    t.on_down(Point::new(50.0, 50.0));
    t.on_move(&[Point::new(250.0, 50.0)]);
    t.on_up();

    // Full stroke: 0 -> (1) -> 2 -> 5 -> 8.
    t.on_down(Point::new(50.0, 50.0));
    t.on_move(&[
        Point::new(250.0, 50.0),
        Point::new(250.0, 150.0),
        Point::new(250.0, 250.0),
    ]);
    t.on_up();

    assert_eq!(*verifier.results.borrow(), vec![false, true]);
    assert_eq!(encode(t.pattern()), "01258");
}

#[test]
fn generated_pattern_auto_draws() {
    let grid = Grid::default();
    let pattern = PatternGenerator::seeded(11).generate(grid, 5).unwrap();

    let mut t = tracker();
    t.set_pattern(ViewMode::AutoDraw, pattern.iter().copied()).unwrap();

    let snapshot = t.render_snapshot();
    assert_eq!(snapshot.view_mode, ViewMode::AutoDraw);
    assert_eq!(snapshot.pattern, pattern);
    assert_eq!(snapshot.state, TrackerState::Idle);
    assert_eq!(decode(grid, &encode(&pattern)).unwrap(), pattern);
}

#[test]
fn errors_unify_under_facade_error() {
    fn load(size: u16, text: &str) -> Result<Pattern> {
        let grid = Grid::new(size)?;
        Ok(decode(grid, text)?)
    }
    assert!(matches!(load(0, ""), Err(Error::Config(_))));
    assert!(matches!(load(3, "9"), Err(Error::Decode(_))));
    assert_eq!(load(3, "84").unwrap().len(), 2);
}
