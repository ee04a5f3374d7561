use super::*;

fn fade() -> Transition {
    Transition::new(parse_transition_kind(FADE_TRANSITION_ID).unwrap())
}

fn cut() -> Transition {
    Transition::new(parse_transition_kind(CUT_TRANSITION_ID).unwrap())
}

#[test]
fn kind_parsing_normalizes_and_validates() {
    assert_eq!(
        parse_transition_kind(" Fade_Transition ").unwrap().id,
        FADE_TRANSITION_ID
    );
    assert!(parse_transition_kind("").is_err());
    assert!(parse_transition_kind("stinger_transition").is_err());
}

#[test]
fn builtin_table_shape() {
    let kinds = builtin_transition_kinds();
    let cut = kinds.iter().find(|k| k.id == CUT_TRANSITION_ID).unwrap();
    assert!(cut.instant);
    assert!(!cut.configurable);

    let fade = kinds.iter().find(|k| k.id == FADE_TRANSITION_ID).unwrap();
    assert!(!fade.instant);

    let swipe = kinds.iter().find(|k| k.id == SWIPE_TRANSITION_ID).unwrap();
    assert!(swipe.configurable);
}

#[test]
fn set_presents_immediately() {
    let now = Instant::now();
    let mut tr = fade();
    tr.set(Some(SourceId(1)));
    assert!(tr.is_idle());
    assert_eq!(tr.presented(now), Some(SourceId(1)));
    let sample = tr.sample(now);
    assert_eq!(sample.new, Some(SourceId(1)));
    assert_eq!(sample.old, None);
    assert_eq!(sample.progress, 1.0);
}

#[test]
fn cut_kind_ignores_duration() {
    let now = Instant::now();
    let mut tr = cut();
    tr.set(Some(SourceId(1)));
    tr.start(
        TransitionMode::Auto,
        Duration::from_millis(300),
        SourceId(2),
        now,
    );
    assert!(tr.is_idle());
    assert_eq!(tr.presented(now), Some(SourceId(2)));
}

#[test]
fn auto_blend_is_time_bounded_and_stable() {
    let now = Instant::now();
    let mut tr = fade();
    tr.set(Some(SourceId(1)));
    tr.start(
        TransitionMode::Auto,
        Duration::from_millis(300),
        SourceId(2),
        now,
    );
    assert!(!tr.is_idle());

    let mid = now + Duration::from_millis(150);
    let sample = tr.sample(mid);
    assert_eq!(sample.old, Some(SourceId(1)));
    assert_eq!(sample.new, Some(SourceId(2)));
    assert!(sample.progress > 0.4 && sample.progress < 0.6);
    assert_eq!(tr.presented(mid), Some(SourceId(1)));

    let after = now + Duration::from_millis(301);
    let first = tr.sample(after);
    assert_eq!(
        first,
        BlendSample {
            old: None,
            new: Some(SourceId(2)),
            progress: 1.0
        }
    );
    // Steady state: subsequent samples are identical.
    assert_eq!(tr.sample(after + Duration::from_secs(5)), first);
    assert_eq!(tr.presented(after), Some(SourceId(2)));
}

#[test]
fn complete_if_done_settles_exactly_once() {
    let now = Instant::now();
    let mut tr = fade();
    tr.set(Some(SourceId(1)));
    tr.start(
        TransitionMode::Auto,
        Duration::from_millis(100),
        SourceId(2),
        now,
    );

    assert!(!tr.complete_if_done(now + Duration::from_millis(50)));
    assert!(tr.complete_if_done(now + Duration::from_millis(100)));
    assert!(tr.is_idle());
    assert_eq!(tr.presented(now + Duration::from_millis(100)), Some(SourceId(2)));
    assert!(!tr.complete_if_done(now + Duration::from_millis(200)));
}

#[test]
fn start_toward_presented_source_stays_idle() {
    let now = Instant::now();
    let mut tr = fade();
    tr.set(Some(SourceId(1)));
    tr.start(
        TransitionMode::Auto,
        Duration::from_millis(300),
        SourceId(1),
        now,
    );
    assert!(tr.is_idle());
}

#[test]
fn cut_mode_bypasses_interpolation() {
    let now = Instant::now();
    let mut tr = fade();
    tr.set(Some(SourceId(1)));
    tr.start(
        TransitionMode::Cut,
        Duration::from_millis(300),
        SourceId(2),
        now,
    );
    assert!(tr.is_idle());
    assert_eq!(tr.presented(now), Some(SourceId(2)));
}

#[test]
fn reset_returns_to_unassigned() {
    let now = Instant::now();
    let mut tr = fade();
    tr.set(Some(SourceId(1)));
    tr.reset();
    assert!(tr.is_idle());
    assert_eq!(tr.presented(now), None);
}
