use ir_battleship::display::{Flicker, Led, ResultAnimation};
use ir_battleship::node::HeadlessRenderer;
use ir_battleship::{Coordinator, LedIntent, Phase, PhaseCue, Renderer, Scene, StrikeResult};

#[test]
fn test_hit_animation_length() {
    let mut anim = ResultAnimation::new(StrikeResult::Hit);
    for _ in 0..309 {
        assert!(!anim.tick());
    }
    assert!(anim.tick());
    assert!(anim.is_done());
    assert!(anim.tick());
}

#[test]
fn test_miss_animation_is_slower() {
    let mut anim = ResultAnimation::new(StrikeResult::Miss);
    let ticks = (1..).find(|_| anim.tick()).unwrap();
    assert_eq!(ticks, 5 * 151);
}

#[test]
fn test_flicker_duty_cycle() {
    let mut flicker = Flicker::default();
    let on = (0..75).filter(|_| flicker.update()).count();
    assert_eq!(on, 50);
    assert!(flicker.update());

    let mut flicker = Flicker::new(4, 1);
    let pattern: Vec<_> = (0..4).map(|_| flicker.update()).collect();
    assert_eq!(pattern, [true, false, false, false]);
}

#[test]
fn test_led_hold_keeps_level() {
    let mut led = Led::default();
    assert!(led.apply(LedIntent::On));
    assert!(led.apply(LedIntent::Hold));
    assert!(!led.apply(LedIntent::Off));
    assert!(!led.apply(LedIntent::Hold));
}

#[test]
fn test_led_flicker_restarts_on_each_run() {
    let mut led = Led::default();
    // Run into the dark part of the cycle
    for _ in 0..60 {
        led.apply(LedIntent::Flicker);
    }
    assert!(!led.level());
    // A hold keeps the cycle going
    assert!(!led.apply(LedIntent::Hold));
    assert!(!led.apply(LedIntent::Flicker));

    // Leaving and coming back starts lit again
    led.apply(LedIntent::Off);
    assert!(led.apply(LedIntent::Flicker));
}

#[test]
fn test_led_intent_by_phase() {
    assert_eq!(LedIntent::for_phase(Phase::Placing, None, false), LedIntent::On);
    assert_eq!(LedIntent::for_phase(Phase::Wait, None, false), LedIntent::Off);
    assert_eq!(
        LedIntent::for_phase(Phase::Result, Some(StrikeResult::Hit), false),
        LedIntent::Flicker
    );
    assert_eq!(
        LedIntent::for_phase(Phase::ResultGraphic, Some(StrikeResult::Miss), false),
        LedIntent::Off
    );
    assert_eq!(LedIntent::for_phase(Phase::EndResult, None, true), LedIntent::On);
    assert_eq!(LedIntent::for_phase(Phase::EndResult, None, false), LedIntent::Off);
}

#[test]
fn test_phase_cue_text() {
    let cue = |from, to, last| PhaseCue::for_transition(from, to, last).scene;
    assert_eq!(cue(Phase::Placing, Phase::Ready, None), Scene::Text("READY?"));
    assert_eq!(
        cue(Phase::ResultGraphic, Phase::Result, Some(StrikeResult::Hit)),
        Scene::Text("HIT")
    );
    assert_eq!(
        cue(Phase::ResultGraphic, Phase::Result, Some(StrikeResult::Miss)),
        Scene::Text("MISS")
    );
    assert_eq!(cue(Phase::Result, Phase::EndResult, None), Scene::Text("YOU WIN!"));
    assert_eq!(cue(Phase::Transfer, Phase::EndResult, None), Scene::Text("YOU LOSE!"));
    assert_eq!(
        cue(Phase::EndResult, Phase::PlayAgain, None),
        Scene::Text("PUSH TO PLAY AGAIN!")
    );
    assert_eq!(cue(Phase::Result, Phase::Wait, None), Scene::Clear);
    assert_eq!(cue(Phase::Transfer, Phase::Aim, None), Scene::Keep);
}

#[test]
fn test_headless_renderer_times_result_graphic() {
    let mut renderer = HeadlessRenderer::new("test");
    let coordinator = Coordinator::new();
    let mut snap = coordinator.snapshot();
    assert!(!renderer.draw(&snap));

    snap.phase = Phase::ResultGraphic;
    snap.last_result = Some(StrikeResult::Hit);
    snap.led = LedIntent::Flicker;
    renderer.enter(&PhaseCue::for_transition(Phase::Fire, Phase::ResultGraphic, snap.last_result));
    let ticks = (1..).find(|_| renderer.draw(&snap)).unwrap();
    assert_eq!(ticks, 310);

    // Entering the phase again restarts the animation
    renderer.enter(&PhaseCue::for_transition(Phase::Fire, Phase::ResultGraphic, snap.last_result));
    assert!(!renderer.draw(&snap));
    assert!(renderer.led_level());
}
