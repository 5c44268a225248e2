use std::cell::Cell;
use std::rc::Rc;

use super::*;
use crate::animation::props::Prop;
use crate::animation::spec::Repeat;
use crate::controller::interaction::InteractionKind;
use crate::foundation::core::Rect;
use crate::trigger::condition::ReplayPolicy;

struct Fixture {
    ctl: ViewportAnimationController,
    section: ElementId,
    card: ElementId,
    instance: InstanceId,
}

fn fixture() -> Fixture {
    let mut ctl = ViewportAnimationController::new(StageConfig::default()).unwrap();
    let doc = ctl.document_mut();
    let section = doc.create("section", Rect::new(0.0, 1600.0, 1280.0, 2400.0));
    let card = doc.create("card", Rect::new(100.0, 1700.0, 400.0, 2000.0));
    let footer = doc.create("footer", Rect::new(0.0, 2400.0, 1280.0, 4000.0));
    let root = doc.root();
    doc.append(root, section);
    doc.append(section, card);
    doc.append(root, footer);
    let instance = ctl.mount("features", section);
    Fixture {
        ctl,
        section,
        card,
        instance,
    }
}

fn fade_in(card: ElementId, ms: u64) -> Timeline {
    Timeline::new().then(
        AnimationSpec::from("fade-in", Millis(ms))
            .set(Prop::Opacity, 0.0)
            .ease(Ease::Linear),
        vec![card],
    )
}

fn opacity(ctl: &ViewportAnimationController, id: ElementId) -> f64 {
    ctl.document()
        .visual(id)
        .map(|v| v.get(Prop::Opacity))
        .unwrap_or(f64::NAN)
}

fn count(ctl: &ViewportAnimationController, pred: impl Fn(&ControllerEvent) -> bool) -> usize {
    ctl.events().iter().filter(|e| pred(&e.event)).count()
}

fn starts(ctl: &ViewportAnimationController) -> usize {
    count(ctl, |e| matches!(e, ControllerEvent::EntranceStarted { .. }))
}

fn exits(ctl: &ViewportAnimationController) -> usize {
    count(ctl, |e| matches!(e, ControllerEvent::ExitStarted { .. }))
}

fn trigger(policy: ReplayPolicy) -> TriggerCondition {
    TriggerCondition::scroll("top bottom", policy).unwrap()
}

#[test]
fn detached_root_is_a_logged_noop() {
    let mut f = fixture();
    let orphan = f.ctl.document_mut().create("section", Rect::ZERO);
    let handle = f
        .ctl
        .bind_entrance(
            f.instance,
            orphan,
            &fade_in(f.card, 100),
            trigger(ReplayPolicy::PlayOnce),
        )
        .unwrap();
    assert!(handle.is_none());
    assert!(f.ctl.resources().is_empty());
    assert_eq!(count(&f.ctl, |e| matches!(e, ControllerEvent::Skipped { .. })), 1);
}

#[test]
fn entrance_hides_targets_then_plays_when_scrolled_into_view() {
    let mut f = fixture();
    let h = f
        .ctl
        .bind_entrance(
            f.instance,
            f.section,
            &fade_in(f.card, 1000),
            trigger(ReplayPolicy::PlayOnce),
        )
        .unwrap()
        .unwrap();
    assert_eq!(opacity(&f.ctl, f.card), 0.0);
    assert_eq!(f.ctl.entrance_state(h), Some(EntranceState::Unarmed));

    f.ctl.tick(Millis(500));
    assert_eq!(opacity(&f.ctl, f.card), 0.0, "not in view yet");

    f.ctl.scroll_to(900.0);
    assert_eq!(f.ctl.entrance_state(h), Some(EntranceState::Entering));
    f.ctl.tick(Millis(500));
    assert!((opacity(&f.ctl, f.card) - 0.5).abs() < 1e-9);
    f.ctl.tick(Millis(600));
    assert_eq!(opacity(&f.ctl, f.card), 1.0);
    assert_eq!(f.ctl.entrance_state(h), Some(EntranceState::Shown));
    assert_eq!(f.ctl.entrance_position(h), Some(Millis(1000)));
}

#[test]
fn play_once_never_restarts() {
    let mut f = fixture();
    let h = f
        .ctl
        .bind_entrance(
            f.instance,
            f.section,
            &fade_in(f.card, 100),
            trigger(ReplayPolicy::PlayOnce),
        )
        .unwrap()
        .unwrap();
    f.ctl.scroll_to(900.0);
    f.ctl.tick(Millis(200));
    for y in [0.0, 900.0, 0.0, 900.0] {
        f.ctl.scroll_to(y);
        f.ctl.tick(Millis(50));
    }
    assert_eq!(starts(&f.ctl), 1);
    assert_eq!(exits(&f.ctl), 0);
    assert_eq!(f.ctl.entrance_state(h), Some(EntranceState::Shown));
    assert_eq!(opacity(&f.ctl, f.card), 1.0);
}

#[test]
fn replay_every_entry_plays_twice_and_exits_once() {
    let mut f = fixture();
    f.ctl
        .bind_entrance(
            f.instance,
            f.section,
            &fade_in(f.card, 100),
            trigger(ReplayPolicy::ReplayEveryEntry),
        )
        .unwrap();
    f.ctl.scroll_to(900.0);
    f.ctl.tick(Millis(200));
    f.ctl.scroll_to(0.0);
    f.ctl.tick(Millis(200));
    assert_eq!(opacity(&f.ctl, f.card), 0.0);
    f.ctl.scroll_to(900.0);
    assert_eq!(starts(&f.ctl), 2);
    assert_eq!(exits(&f.ctl), 1);
}

#[test]
fn reverse_on_exit_stays_hidden() {
    let mut f = fixture();
    let h = f
        .ctl
        .bind_entrance(
            f.instance,
            f.section,
            &fade_in(f.card, 100),
            trigger(ReplayPolicy::PlayAndReverseOnExit),
        )
        .unwrap()
        .unwrap();
    f.ctl.scroll_to(900.0);
    f.ctl.tick(Millis(200));
    f.ctl.scroll_to(0.0);
    f.ctl.tick(Millis(200));
    f.ctl.scroll_to(900.0);
    f.ctl.tick(Millis(200));
    assert_eq!(f.ctl.entrance_state(h), Some(EntranceState::Hidden));
    assert_eq!(starts(&f.ctl), 1);
    assert_eq!(opacity(&f.ctl, f.card), 0.0);
}

#[test]
fn unmount_mid_entrance_releases_everything() {
    let mut f = fixture();
    let fired = Rc::new(Cell::new(0));
    let h = f
        .ctl
        .bind_entrance(
            f.instance,
            f.section,
            &fade_in(f.card, 1000),
            TriggerCondition::immediate(),
        )
        .unwrap()
        .unwrap();
    let seen = fired.clone();
    assert!(f.ctl.on_complete(h, Box::new(move || seen.set(seen.get() + 1))));
    let ticks = fired.clone();
    f.ctl
        .bind_interval(
            f.instance,
            Millis(100),
            Box::new(move || ticks.set(ticks.get() + 100)),
        )
        .unwrap();
    f.ctl
        .bind_interaction(
            f.instance,
            &[f.card],
            InteractionKind::Hover {
                enter: AnimationSpec::to("lift", Millis(300)).set(Prop::Y, -10.0),
                leave: AnimationSpec::to("drop", Millis(300)).set(Prop::Y, 0.0),
            },
        )
        .unwrap();
    f.ctl.pointer(PointerEvent::Enter { target: f.card });
    f.ctl.tick(Millis(50));
    let before = f.ctl.instance_resources(f.instance);
    assert_eq!(before.timers, 1);
    assert_eq!(before.listeners, 2);
    assert_eq!(before.observations, 1);

    assert_eq!(f.ctl.unmount(f.instance), 3);
    let mid = opacity(&f.ctl, f.card);
    assert!(f.ctl.resources().is_empty());
    assert_eq!(f.ctl.observer_registrations(), 0);
    assert_eq!(f.ctl.active_tweens(), 0);

    f.ctl.tick(Millis(5000));
    assert_eq!(fired.get(), 0, "no callback after unmount");
    assert_eq!(opacity(&f.ctl, f.card), mid, "visual state is not restored");
}

#[test]
fn release_is_idempotent() {
    let mut f = fixture();
    let h = f
        .ctl
        .bind_entrance(
            f.instance,
            f.section,
            &fade_in(f.card, 1000),
            TriggerCondition::immediate(),
        )
        .unwrap()
        .unwrap();
    f.ctl.tick(Millis(250));
    assert!(f.ctl.release(h));
    assert!(!f.ctl.release(h));
    f.ctl.tick(Millis(250));
    assert!((opacity(&f.ctl, f.card) - 0.25).abs() < 1e-9);
    assert_eq!(f.ctl.entrance_state(h), None);
}

#[test]
fn completion_callbacks_fire_once_per_completion() {
    let mut f = fixture();
    let fired = Rc::new(Cell::new(0));
    let h = f
        .ctl
        .bind_entrance(
            f.instance,
            f.section,
            &fade_in(f.card, 100),
            trigger(ReplayPolicy::ReplayEveryEntry),
        )
        .unwrap()
        .unwrap();
    let seen = fired.clone();
    f.ctl.on_complete(h, Box::new(move || seen.set(seen.get() + 1)));
    f.ctl.scroll_to(900.0);
    f.ctl.tick(Millis(100));
    f.ctl.tick(Millis(100));
    assert_eq!(fired.get(), 1);
    f.ctl.scroll_to(0.0);
    f.ctl.tick(Millis(100));
    f.ctl.scroll_to(900.0);
    f.ctl.tick(Millis(100));
    assert_eq!(fired.get(), 2);
}

#[test]
fn zero_length_entrance_completes_on_bind() {
    let mut f = fixture();
    let h = f
        .ctl
        .bind_entrance(
            f.instance,
            f.section,
            &fade_in(f.card, 0),
            TriggerCondition::immediate(),
        )
        .unwrap()
        .unwrap();
    assert_eq!(f.ctl.entrance_state(h), Some(EntranceState::Shown));
    assert_eq!(opacity(&f.ctl, f.card), 1.0);
}

#[test]
fn infinite_entrance_entries_are_rejected() {
    let mut f = fixture();
    let tl = Timeline::new().then(
        AnimationSpec::to("spin", Millis(100))
            .set(Prop::Rotation, 360.0)
            .repeat(Repeat::Infinite),
        vec![f.card],
    );
    let err = f
        .ctl
        .bind_entrance(f.instance, f.section, &tl, TriggerCondition::immediate())
        .unwrap_err();
    assert!(err.to_string().contains("loop"));
}

#[test]
fn timers_fire_every_period_until_released() {
    let mut f = fixture();
    let fired = Rc::new(Cell::new(0));
    let seen = fired.clone();
    let h = f
        .ctl
        .bind_interval(
            f.instance,
            Millis(5000),
            Box::new(move || seen.set(seen.get() + 1)),
        )
        .unwrap()
        .unwrap();
    f.ctl.tick(Millis(4999));
    assert_eq!(fired.get(), 0);
    f.ctl.tick(Millis(1));
    assert_eq!(fired.get(), 1);
    f.ctl.tick(Millis(10_000));
    assert_eq!(fired.get(), 3);
    f.ctl.release(h);
    f.ctl.tick(Millis(10_000));
    assert_eq!(fired.get(), 3);
}

#[test]
fn zero_period_timers_are_rejected() {
    let mut f = fixture();
    assert!(
        f.ctl
            .bind_interval(f.instance, Millis::ZERO, Box::new(|| {}))
            .is_err()
    );
}

#[test]
fn hovering_pauses_a_loop() {
    let mut f = fixture();
    let spin = AnimationSpec::to("spin", Millis(1000))
        .set(Prop::Rotation, 360.0)
        .ease(Ease::Linear)
        .repeat(Repeat::Infinite);
    let looped = f
        .ctl
        .bind_loop(f.instance, &[f.card], spin)
        .unwrap()
        .unwrap();
    f.ctl
        .bind_interaction(
            f.instance,
            &[f.section],
            InteractionKind::PauseLoop { target: looped },
        )
        .unwrap();
    let rotation = |ctl: &ViewportAnimationController| {
        ctl.document()
            .visual(f.card)
            .map(|v| v.get(Prop::Rotation))
    };
    f.ctl.tick(Millis(250));
    assert_eq!(rotation(&f.ctl), Some(90.0));
    f.ctl.pointer(PointerEvent::Enter { target: f.section });
    f.ctl.tick(Millis(250));
    assert_eq!(rotation(&f.ctl), Some(90.0));
    f.ctl.pointer(PointerEvent::Leave { target: f.section });
    f.ctl.tick(Millis(250));
    assert_eq!(rotation(&f.ctl), Some(180.0));
    assert_eq!(
        count(&f.ctl, |e| matches!(e, ControllerEvent::LoopPaused { .. })),
        1
    );
}

#[test]
fn interactions_skip_detached_targets() {
    let mut f = fixture();
    let orphan = f.ctl.document_mut().create("card", Rect::ZERO);
    let kind = InteractionKind::Hover {
        enter: AnimationSpec::to("lift", Millis(300)).set(Prop::Y, -10.0),
        leave: AnimationSpec::to("drop", Millis(300)).set(Prop::Y, 0.0),
    };
    assert!(
        f.ctl
            .bind_interaction(f.instance, &[orphan], kind.clone())
            .unwrap()
            .is_none()
    );
    let h = f
        .ctl
        .bind_interaction(f.instance, &[orphan, f.card], kind)
        .unwrap();
    assert!(h.is_some());
    assert_eq!(f.ctl.instance_resources(f.instance).listeners, 2);
}

#[test]
fn smooth_scroll_moves_viewport_and_manual_scroll_cancels_it() {
    let mut f = fixture();
    f.ctl.smooth_scroll_to(1600.0);
    assert!(f.ctl.is_smooth_scrolling());
    f.ctl.tick(Millis(500));
    let mid = f.ctl.viewport().scroll_y;
    assert!(mid > 0.0 && mid < 1600.0, "{mid}");
    f.ctl.tick(Millis(500));
    assert_eq!(f.ctl.viewport().scroll_y, 1600.0);
    assert!(!f.ctl.is_smooth_scrolling());

    f.ctl.smooth_scroll_to(0.0);
    f.ctl.tick(Millis(100));
    f.ctl.scroll_to(1000.0);
    assert!(!f.ctl.is_smooth_scrolling());
    f.ctl.tick(Millis(900));
    assert_eq!(f.ctl.viewport().scroll_y, 1000.0);
}

#[test]
fn scroll_is_clamped_to_document() {
    let mut f = fixture();
    f.ctl.scroll_to(1.0e9);
    assert_eq!(f.ctl.viewport().scroll_y, 4000.0 - 800.0);
    f.ctl.scroll_to(-50.0);
    assert_eq!(f.ctl.viewport().scroll_y, 0.0);
}

#[test]
fn a_huge_tick_fires_a_bounded_number_of_timer_periods() {
    let mut f = fixture();
    let fired = Rc::new(Cell::new(0u64));
    let seen = fired.clone();
    f.ctl
        .bind_interval(
            f.instance,
            Millis(5000),
            Box::new(move || seen.set(seen.get() + 1)),
        )
        .unwrap();
    f.ctl.tick(Millis(u64::MAX));
    assert_eq!(fired.get(), MAX_TIMER_CATCH_UP);
    assert_eq!(
        count(&f.ctl, |e| matches!(e, ControllerEvent::TimerFired { .. })),
        MAX_TIMER_CATCH_UP as usize
    );
    // stage time cannot advance any further, so the timer is spent
    f.ctl.tick(Millis(1));
    f.ctl.tick(Millis(5000));
    assert_eq!(fired.get(), MAX_TIMER_CATCH_UP);
}

#[test]
fn long_stalls_catch_up_at_most_a_few_periods_and_stay_on_the_grid() {
    let mut f = fixture();
    let fired = Rc::new(Cell::new(0u64));
    let seen = fired.clone();
    f.ctl
        .bind_interval(
            f.instance,
            Millis(100),
            Box::new(move || seen.set(seen.get() + 1)),
        )
        .unwrap();
    f.ctl.tick(Millis(1_000_000));
    assert_eq!(fired.get(), MAX_TIMER_CATCH_UP);
    f.ctl.tick(Millis(99));
    assert_eq!(fired.get(), MAX_TIMER_CATCH_UP);
    f.ctl.tick(Millis(1));
    assert_eq!(fired.get(), MAX_TIMER_CATCH_UP + 1);
}

#[test]
fn toggle_actions_keep_the_entrance_when_scrolled_past_downward() {
    let mut f = fixture();
    let h = f
        .ctl
        .bind_entrance(
            f.instance,
            f.section,
            &fade_in(f.card, 100),
            TriggerCondition::scroll(
                "top center+=100",
                ReplayPolicy::from_toggle_actions("play none none reverse").unwrap(),
            )
            .unwrap(),
        )
        .unwrap()
        .unwrap();
    // start line reached at scroll 1100, end line at 2400
    f.ctl.scroll_to(1200.0);
    f.ctl.tick(Millis(200));
    f.ctl.scroll_to(4000.0);
    f.ctl.tick(Millis(200));
    f.ctl.scroll_to(1200.0);
    f.ctl.tick(Millis(200));
    assert_eq!((starts(&f.ctl), exits(&f.ctl)), (1, 0));
    assert_eq!(f.ctl.entrance_state(h), Some(EntranceState::Shown));
    assert_eq!(opacity(&f.ctl, f.card), 1.0);

    f.ctl.scroll_to(0.0);
    f.ctl.tick(Millis(200));
    assert_eq!(f.ctl.entrance_state(h), Some(EntranceState::Hidden));
    assert_eq!(opacity(&f.ctl, f.card), 0.0);
    f.ctl.scroll_to(1200.0);
    assert_eq!((starts(&f.ctl), exits(&f.ctl)), (2, 1));
}

#[test]
fn batches_play_the_tween_for_each_crossing_direction() {
    let mut f = fixture();
    let doc = f.ctl.document_mut();
    let second = doc.create("card", Rect::new(500.0, 1700.0, 800.0, 2000.0));
    doc.append(f.section, second);
    let fade = |name: &str, opacity: f64, y: f64| {
        AnimationSpec::to(name, Millis(100))
            .set(Prop::Opacity, opacity)
            .set(Prop::Y, y)
            .ease(Ease::Linear)
    };
    let batch = ScrollBatch::new()
        .on(IntersectionChange::Enter, fade("in", 1.0, 0.0))
        .on(IntersectionChange::Leave, fade("out-top", 0.0, 50.0))
        .on(IntersectionChange::LeaveBack, fade("out-bottom", 0.0, -50.0));
    let h = f
        .ctl
        .bind_batch(f.instance, &[f.card, second], batch)
        .unwrap()
        .unwrap();
    assert_eq!(f.ctl.instance_resources(f.instance).observations, 2);
    let played = |ctl: &ViewportAnimationController| -> Vec<(IntersectionChange, usize)> {
        ctl.events()
            .iter()
            .filter_map(|e| match e.event {
                ControllerEvent::BatchPlayed {
                    handle,
                    change,
                    targets,
                } if handle == h => Some((change, targets)),
                _ => None,
            })
            .collect()
    };

    // cards span 1700..2000: in view from scroll 900, past the top from 2000
    f.ctl.scroll_to(2500.0);
    f.ctl.tick(Millis(100));
    let y = |ctl: &ViewportAnimationController, id| ctl.document().visual(id).map(|v| v.get(Prop::Y));
    assert_eq!(y(&f.ctl, second), Some(50.0));
    f.ctl.scroll_to(1000.0);
    f.ctl.tick(Millis(100));
    f.ctl.scroll_to(0.0);
    f.ctl.tick(Millis(100));
    assert_eq!(y(&f.ctl, f.card), Some(-50.0));
    assert_eq!(opacity(&f.ctl, second), 0.0);
    assert_eq!(
        played(&f.ctl),
        vec![
            (IntersectionChange::Enter, 2),
            (IntersectionChange::Leave, 2),
            (IntersectionChange::LeaveBack, 2),
        ]
    );

    assert_eq!(f.ctl.unmount(f.instance), 1);
    assert_eq!(f.ctl.observer_registrations(), 0);
}
