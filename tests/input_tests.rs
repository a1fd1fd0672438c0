use ir_battleship::input::{Cadence, EdgeSampler};
use ir_battleship::{Direction, InputEvent, Keys};

#[test]
fn test_held_key_reports_once() {
    let mut sampler = EdgeSampler::new();
    let push = Keys::pressing(InputEvent::Confirm);
    assert_eq!(sampler.sample(push), Some(InputEvent::Confirm));
    assert_eq!(sampler.sample(push), None);
    assert_eq!(sampler.sample(push), None);
    assert_eq!(sampler.sample(Keys::default()), None);
    assert_eq!(sampler.sample(push), Some(InputEvent::Confirm));
}

#[test]
fn test_one_event_per_sample_in_priority_order() {
    let mut sampler = EdgeSampler::new();
    let all = Keys {
        north: true,
        east: true,
        south: true,
        west: true,
        push: true,
        button: true,
    };
    assert_eq!(sampler.sample(all), Some(InputEvent::Move(Direction::West)));
    // Everything else went down on the same sample, so nothing is left
    assert_eq!(sampler.sample(all), None);

    let mut sampler = EdgeSampler::new();
    let keys = Keys {
        south: true,
        button: true,
        ..Keys::default()
    };
    assert_eq!(sampler.sample(keys), Some(InputEvent::Move(Direction::South)));
}

#[test]
fn test_new_press_while_another_is_held() {
    let mut sampler = EdgeSampler::new();
    let east = Keys::pressing(InputEvent::Move(Direction::East));
    assert_eq!(sampler.sample(east), Some(InputEvent::Move(Direction::East)));
    let east_and_button = Keys {
        button: true,
        ..east
    };
    assert_eq!(sampler.sample(east_and_button), Some(InputEvent::Rotate));
}

#[test]
fn test_pressing_maps_each_event() {
    assert!(Keys::pressing(InputEvent::Move(Direction::North)).north);
    assert!(Keys::pressing(InputEvent::Rotate).button);
    assert!(Keys::pressing(InputEvent::Confirm).any());
    assert!(!Keys::default().any());
}

#[test]
fn test_cadence_matches_input_rate() {
    let mut cadence = Cadence::default();
    let due: Vec<_> = (1..=45).filter(|_| cadence.ready()).collect();
    assert_eq!(due.len(), 3);

    let mut cadence = Cadence::new(4);
    let pattern: Vec<_> = (0..8).map(|_| cadence.ready()).collect();
    assert_eq!(pattern, [false, false, false, true, false, false, false, true]);
}
