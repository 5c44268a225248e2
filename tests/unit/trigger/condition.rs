use super::*;

fn viewport(scroll_y: f64) -> Viewport {
    Viewport {
        width: 1280.0,
        height: 800.0,
        scroll_y,
    }
}

#[test]
fn points_parse_offsets_in_both_directions() {
    let p: TriggerPoint = "top center+=200".parse().unwrap();
    assert_eq!(p, TriggerPoint::new(Edge::Top, Edge::Center).offset(200.0));
    let p: TriggerPoint = "top bottom-=100".parse().unwrap();
    assert_eq!(p, TriggerPoint::new(Edge::Top, Edge::Bottom).offset(-100.0));
    assert_eq!(p.to_string(), "top bottom-=100");
    let p: TriggerPoint = "bottom top".parse().unwrap();
    assert_eq!(p.offset_px, 0.0);
}

#[test]
fn malformed_points_are_rejected() {
    for bad in ["top", "top middle", "top center+200", "top center+=x", "a b c"] {
        assert!(bad.parse::<TriggerPoint>().is_err(), "{bad}");
    }
}

#[test]
fn start_point_fires_when_viewport_line_crosses_element_line() {
    // viewport center+=200 sits at scroll + 600
    let rect = Rect::new(0.0, 1000.0, 1280.0, 1400.0);
    let p: TriggerPoint = "top center+=200".parse().unwrap();
    assert!(!p.reached(rect, &viewport(399.0)));
    assert!(p.reached(rect, &viewport(400.0)));
}

#[test]
fn region_leaves_after_scrolling_past_its_bottom() {
    let rect = Rect::new(0.0, 1000.0, 1280.0, 1400.0);
    let cond = TriggerCondition::scroll("top bottom", ReplayPolicy::ReplayEveryEntry).unwrap();
    assert!(!cond.intersects(rect, &viewport(0.0)));
    assert!(cond.intersects(rect, &viewport(300.0)));
    assert!(cond.intersects(rect, &viewport(1399.0)));
    assert!(!cond.intersects(rect, &viewport(1400.0)));
}

#[test]
fn immediate_triggers_always_intersect() {
    let cond = TriggerCondition::immediate();
    assert!(cond.intersects(Rect::new(0.0, 9000.0, 1.0, 9001.0), &viewport(0.0)));
    assert_eq!(cond.policy, ReplayPolicy::PlayOnce);
}

#[test]
fn toggle_actions_parse_per_crossing() {
    let policy = ReplayPolicy::from_toggle_actions("play none none reverse").unwrap();
    let ReplayPolicy::Toggle(actions) = policy else {
        panic!("expected per-crossing actions, got {policy:?}");
    };
    assert_eq!(actions.on_enter, ToggleAction::Play);
    assert_eq!(actions.on_leave, ToggleAction::None);
    assert_eq!(actions.on_enter_back, ToggleAction::None);
    assert_eq!(actions.on_leave_back, ToggleAction::Reverse);
    assert_eq!(actions.to_string(), "play none none reverse");
    assert!(policy.replays());

    assert!(ReplayPolicy::from_toggle_actions("play none").is_err());
    assert!(ReplayPolicy::from_toggle_actions("play none none explode").is_err());
    assert!(ReplayPolicy::from_toggle_actions("play pause resume reset").is_err());
}

#[test]
fn named_policies_treat_both_directions_alike() {
    use IntersectionChange::*;

    let every = ReplayPolicy::ReplayEveryEntry;
    assert_eq!(every.action(Enter), ToggleAction::Play);
    assert_eq!(every.action(EnterBack), ToggleAction::Play);
    assert_eq!(every.action(Leave), ToggleAction::Reverse);
    assert_eq!(every.action(LeaveBack), ToggleAction::Reverse);

    let once = ReplayPolicy::PlayOnce;
    assert_eq!(once.action(Enter), ToggleAction::Play);
    assert_eq!(once.action(EnterBack), ToggleAction::None);
    assert_eq!(once.action(LeaveBack), ToggleAction::None);
    assert!(!once.replays());

    let reverse = ReplayPolicy::PlayAndReverseOnExit;
    assert_eq!(reverse.action(EnterBack), ToggleAction::None);
    assert_eq!(reverse.action(Leave), ToggleAction::Reverse);
    assert!(!reverse.replays());
}

#[test]
fn zones_split_at_start_and_end_points() {
    let rect = Rect::new(0.0, 1000.0, 1280.0, 1400.0);
    let cond = TriggerCondition::scroll("top bottom", ReplayPolicy::PlayOnce).unwrap();
    assert_eq!(cond.zone(rect, &viewport(199.0)), Zone::Before);
    assert_eq!(cond.zone(rect, &viewport(200.0)), Zone::Active);
    assert_eq!(cond.zone(rect, &viewport(1400.0)), Zone::After);
}

#[test]
fn conditions_deserialize_with_default_end() {
    let cond: TriggerCondition = serde_json::from_str(
        r#"{"start":{"point":"top center+=100"},"policy":"play-and-reverse-on-exit"}"#,
    )
    .unwrap();
    assert_eq!(cond.policy, ReplayPolicy::PlayAndReverseOnExit);
    assert_eq!(cond.end, TriggerPoint::new(Edge::Bottom, Edge::Top));
    let imm: TriggerCondition = serde_json::from_str(r#"{"start":"immediate"}"#).unwrap();
    assert_eq!(imm.start, TriggerStart::Immediate);
}

#[test]
fn toggle_policies_round_trip_through_json() {
    let cond = TriggerCondition::scroll(
        "top center",
        ReplayPolicy::from_toggle_actions("restart none none reset").unwrap(),
    )
    .unwrap();
    let json = serde_json::to_string(&cond).unwrap();
    assert!(json.contains(r#""toggle":"restart none none reset""#), "{json}");
    let back: TriggerCondition = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cond);
}
