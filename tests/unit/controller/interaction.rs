use super::*;
use crate::foundation::core::{Rect, Size};
use crate::foundation::ids::InstanceId;

fn handle(id: u32) -> BindingHandle {
    BindingHandle {
        instance: InstanceId(0),
        id,
    }
}

fn stage_with_card() -> (Document, ElementId) {
    let mut doc = Document::new(Size::new(800.0, 800.0));
    let card = doc.create("card", Rect::new(100.0, 100.0, 300.0, 300.0));
    doc.append(doc.root(), card);
    (doc, card)
}

fn get(doc: &Document, id: ElementId, prop: Prop) -> f64 {
    doc.visual(id).map(|v| v.get(prop)).unwrap_or(f64::NAN)
}

fn drag_spec(followers: Vec<ElementId>) -> DragSpec {
    DragSpec {
        min_x: -400.0,
        max_x: 0.0,
        edge_resistance: 0.65,
        inertia: false,
        followers,
        follower_tilt: 0.02,
        follower_duration: Millis(500),
        release: AnimationSpec::to("release", Millis(800))
            .set(Prop::RotationY, 0.0)
            .ease(Ease::OutElastic {
                amplitude: 1.0,
                period: 0.8,
            }),
        pauses: Some(handle(9)),
    }
}

#[test]
fn hover_spawns_enter_and_leave_tweens() {
    let (mut doc, card) = stage_with_card();
    let mut tweens = TweenSet::default();
    let kind = InteractionKind::Hover {
        enter: AnimationSpec::to("lift", Millis(300))
            .set(Prop::Y, -10.0)
            .ease(Ease::Linear),
        leave: AnimationSpec::to("drop", Millis(300))
            .set(Prop::Y, 0.0)
            .ease(Ease::Linear),
    };
    let mut rt = InteractionRuntime::new(kind, vec![card]);
    let mut stage = Stage {
        doc: &mut doc,
        tweens: &mut tweens,
        now: Millis(0),
    };
    rt.handle(handle(1), PointerEvent::Enter { target: card }, &mut stage);
    assert_eq!(stage.tweens.len(), 1);
    stage.tweens.advance(Millis(300), stage.doc, Ease::Linear);
    assert_eq!(get(stage.doc, card, Prop::Y), -10.0);

    stage.now = Millis(300);
    rt.handle(handle(1), PointerEvent::Leave { target: card }, &mut stage);
    stage.tweens.advance(Millis(600), stage.doc, Ease::Linear);
    assert_eq!(get(stage.doc, card, Prop::Y), 0.0);
}

#[test]
fn hover_ignores_other_elements() {
    let (mut doc, card) = stage_with_card();
    let other = doc.create("card", Rect::ZERO);
    let mut tweens = TweenSet::default();
    let kind = InteractionKind::Hover {
        enter: AnimationSpec::to("lift", Millis(300)).set(Prop::Y, -10.0),
        leave: AnimationSpec::to("drop", Millis(300)).set(Prop::Y, 0.0),
    };
    let mut rt = InteractionRuntime::new(kind, vec![card]);
    let mut stage = Stage {
        doc: &mut doc,
        tweens: &mut tweens,
        now: Millis(0),
    };
    rt.handle(handle(1), PointerEvent::Enter { target: other }, &mut stage);
    assert_eq!(stage.tweens.len(), 0);
}

#[test]
fn companion_hover_animates_only_the_paired_element() {
    let (mut doc, card) = stage_with_card();
    let icon = doc.create("icon", Rect::new(120.0, 120.0, 184.0, 184.0));
    doc.append(card, icon);
    let other_card = doc.create("card", Rect::new(400.0, 100.0, 600.0, 300.0));
    let other_icon = doc.create("icon", Rect::new(420.0, 120.0, 484.0, 184.0));
    doc.append(doc.root(), other_card);
    doc.append(other_card, other_icon);
    let mut tweens = TweenSet::default();
    let kind = InteractionKind::HoverCompanion {
        pairs: vec![(card, icon), (other_card, other_icon)],
        enter: AnimationSpec::to("icon-lift", Millis(400))
            .set(Prop::Y, -5.0)
            .set(Prop::Scale, 1.1)
            .ease(Ease::Linear),
        leave: AnimationSpec::to("icon-drop", Millis(300))
            .set(Prop::Y, 0.0)
            .set(Prop::Scale, 1.0)
            .ease(Ease::Linear),
    };
    assert_eq!(kind.listeners_per_target(), 2);
    let mut rt = InteractionRuntime::new(kind, vec![card, other_card]);
    let mut stage = Stage {
        doc: &mut doc,
        tweens: &mut tweens,
        now: Millis(0),
    };
    rt.handle(handle(1), PointerEvent::Enter { target: card }, &mut stage);
    stage.tweens.advance(Millis(400), stage.doc, Ease::Linear);
    assert_eq!(get(stage.doc, icon, Prop::Y), -5.0);
    assert_eq!(get(stage.doc, icon, Prop::Scale), 1.1);
    assert_eq!(get(stage.doc, card, Prop::Y), 0.0);
    assert_eq!(get(stage.doc, other_icon, Prop::Scale), 1.0);

    stage.now = Millis(400);
    rt.handle(handle(1), PointerEvent::Leave { target: card }, &mut stage);
    stage.tweens.advance(Millis(700), stage.doc, Ease::Linear);
    assert_eq!(get(stage.doc, icon, Prop::Y), 0.0);
    assert_eq!(get(stage.doc, icon, Prop::Scale), 1.0);
}

#[test]
fn tilt_scales_with_pointer_offset_from_center() {
    let (mut doc, card) = stage_with_card();
    let mut tweens = TweenSet::default();
    let kind = InteractionKind::Tilt(TiltSpec {
        max_deg: 3.0,
        duration: Millis(400),
        ease: Ease::Linear,
        settle: AnimationSpec::to("settle", Millis(600))
            .set(Prop::RotationX, 0.0)
            .set(Prop::RotationY, 0.0),
    });
    let mut rt = InteractionRuntime::new(kind, vec![card]);
    let mut stage = Stage {
        doc: &mut doc,
        tweens: &mut tweens,
        now: Millis(0),
    };
    rt.handle(
        handle(1),
        PointerEvent::Move {
            at: Point::new(250.0, 150.0),
        },
        &mut stage,
    );
    stage.tweens.advance(Millis(400), stage.doc, Ease::Linear);
    assert_eq!(get(stage.doc, card, Prop::RotationY), 1.5);
    assert_eq!(get(stage.doc, card, Prop::RotationX), 1.5);

    rt.handle(
        handle(1),
        PointerEvent::Move {
            at: Point::new(700.0, 700.0),
        },
        &mut stage,
    );
    assert_eq!(stage.tweens.len(), 0, "moves outside the card are ignored");
}

#[test]
fn follow_tracks_pointer_with_offset() {
    let (mut doc, cursor) = stage_with_card();
    let mut tweens = TweenSet::default();
    let kind = InteractionKind::Follow(FollowSpec {
        duration: Millis(100),
        ease: Ease::Linear,
        offset: Vec2::new(-20.0, -20.0),
    });
    let mut rt = InteractionRuntime::new(kind, vec![cursor]);
    let mut stage = Stage {
        doc: &mut doc,
        tweens: &mut tweens,
        now: Millis(0),
    };
    rt.handle(
        handle(1),
        PointerEvent::Move {
            at: Point::new(220.0, 120.0),
        },
        &mut stage,
    );
    stage.tweens.advance(Millis(100), stage.doc, Ease::Linear);
    assert_eq!(get(stage.doc, cursor, Prop::X), 200.0);
    assert_eq!(get(stage.doc, cursor, Prop::Y), 100.0);
}

#[test]
fn pause_loop_emits_pause_and_resume() {
    let (mut doc, carousel) = stage_with_card();
    let mut tweens = TweenSet::default();
    let mut rt = InteractionRuntime::new(
        InteractionKind::PauseLoop { target: handle(7) },
        vec![carousel],
    );
    let mut stage = Stage {
        doc: &mut doc,
        tweens: &mut tweens,
        now: Millis(0),
    };
    let on_enter = rt.handle(
        handle(1),
        PointerEvent::Enter { target: carousel },
        &mut stage,
    );
    let on_leave = rt.handle(
        handle(1),
        PointerEvent::Leave { target: carousel },
        &mut stage,
    );
    assert_eq!(on_enter.as_slice(), &[LoopControl::Pause(handle(7))]);
    assert_eq!(on_leave.as_slice(), &[LoopControl::Resume(handle(7))]);
}

#[test]
fn drag_applies_edge_resistance_past_bounds() {
    let (mut doc, track) = stage_with_card();
    let mut tweens = TweenSet::default();
    let mut rt = InteractionRuntime::new(InteractionKind::Drag(drag_spec(vec![])), vec![track]);
    let mut stage = Stage {
        doc: &mut doc,
        tweens: &mut tweens,
        now: Millis(0),
    };
    let start = rt.handle(
        handle(1),
        PointerEvent::DragStart {
            target: track,
            at: Point::new(200.0, 200.0),
        },
        &mut stage,
    );
    assert_eq!(start.as_slice(), &[LoopControl::Pause(handle(9))]);
    assert!(rt.is_dragging());

    stage.now = Millis(100);
    rt.handle(
        handle(1),
        PointerEvent::DragMove {
            at: Point::new(300.0, 200.0),
        },
        &mut stage,
    );
    let x = get(stage.doc, track, Prop::X);
    assert!((x - 35.0).abs() < 1e-9, "100px past max keeps 35%: {x}");

    stage.now = Millis(200);
    let end = rt.handle(handle(1), PointerEvent::DragEnd, &mut stage);
    assert_eq!(end.as_slice(), &[LoopControl::Resume(handle(9))]);
    assert!(!rt.is_dragging());
    stage.tweens.advance(Millis(1000), stage.doc, Ease::Linear);
    assert_eq!(get(stage.doc, track, Prop::X), 0.0, "snaps back inside bounds");
}

#[test]
fn drag_velocity_tilts_followers_and_release_resets_them() {
    let (mut doc, track) = stage_with_card();
    let card = doc.create("card", Rect::new(0.0, 0.0, 50.0, 50.0));
    doc.append(track, card);
    let mut tweens = TweenSet::default();
    let mut rt =
        InteractionRuntime::new(InteractionKind::Drag(drag_spec(vec![card])), vec![track]);
    let mut stage = Stage {
        doc: &mut doc,
        tweens: &mut tweens,
        now: Millis(0),
    };
    rt.handle(
        handle(1),
        PointerEvent::DragStart {
            target: track,
            at: Point::new(200.0, 200.0),
        },
        &mut stage,
    );
    stage.now = Millis(500);
    rt.handle(
        handle(1),
        PointerEvent::DragMove {
            at: Point::new(100.0, 200.0),
        },
        &mut stage,
    );
    // -100px over 0.5s = -200 px/s
    stage.tweens.advance(Millis(1000), stage.doc, Ease::Linear);
    let rot = get(stage.doc, card, Prop::RotationY);
    assert!((rot - -4.0).abs() < 1e-9, "{rot}");

    stage.now = Millis(1000);
    rt.handle(handle(1), PointerEvent::DragEnd, &mut stage);
    stage.tweens.advance(Millis(1800), stage.doc, Ease::Linear);
    assert_eq!(get(stage.doc, card, Prop::RotationY), 0.0);
}

#[test]
fn inverted_drag_bounds_are_rejected() {
    let mut spec = drag_spec(vec![]);
    spec.min_x = 10.0;
    assert!(InteractionKind::Drag(spec).validate().is_err());
}
