use super::*;

use std::time::Duration;

use crate::{
    graph::memory::MemoryGraph,
    studio::quick::QuickTransition,
    transition::model::CUT_TRANSITION_ID,
};

struct Fixture {
    coord: StudioCoordinator<MemoryGraph>,
    a: SceneId,
    b: SceneId,
    c: SceneId,
}

fn fixture() -> Fixture {
    let mut graph = MemoryGraph::new();
    let a = graph.create_scene("A");
    let b = graph.create_scene("B");
    let c = graph.create_scene("C");
    graph.add_source(a).unwrap();
    graph.add_source(c).unwrap();
    Fixture {
        coord: StudioCoordinator::new(graph),
        a,
        b,
        c,
    }
}

#[test]
fn single_output_selection_transitions_directly() {
    let now = Instant::now();
    let mut f = fixture();
    let root_b = f.coord.graph().root_source(f.b).unwrap();

    f.coord.set_current_scene(f.b, true, now);
    assert_eq!(f.coord.program_source(now), Some(root_b));
    assert_eq!(f.coord.current_scene(), Some(f.b));
    // No duplication outside studio mode.
    assert_eq!(f.coord.graph().scene_count(), 3);
}

#[test]
fn unknown_scene_selection_is_a_noop() {
    let now = Instant::now();
    let mut f = fixture();
    f.coord.set_current_scene(f.a, true, now);

    f.coord.set_current_scene(SceneId(999), true, now);
    assert_eq!(f.coord.current_scene(), Some(f.a));
    assert_eq!(
        f.coord.program_source(now),
        f.coord.graph().root_source(f.a)
    );
}

#[test]
fn studio_selection_updates_preview_only() {
    let t0 = Instant::now();
    let mut f = fixture();
    f.coord.set_current_scene(f.a, true, t0);
    f.coord.toggle_studio_mode(t0);
    let program_before = f.coord.program_source(t0);

    f.coord.set_current_scene(f.c, false, t0);
    assert_eq!(f.coord.program_source(t0), program_before);
    assert_eq!(
        f.coord.preview_source(),
        f.coord.graph().root_source(f.c)
    );
    assert_eq!(f.coord.current_scene(), Some(f.c));
}

#[test]
fn studio_round_trip_restores_program() {
    let t0 = Instant::now();
    let mut f = fixture();
    f.coord.set_current_scene(f.a, true, t0);
    let root_a = f.coord.graph().root_source(f.a).unwrap();

    f.coord.toggle_studio_mode(t0);
    assert!(f.coord.is_studio_mode());
    assert_eq!(f.coord.graph().scene_count(), 4);

    f.coord.toggle_studio_mode(t0);
    assert!(!f.coord.is_studio_mode());
    assert_eq!(f.coord.program_source(t0), Some(root_a));
    assert_eq!(f.coord.preview_source(), None);
    // The staged duplicate is torn down.
    assert_eq!(f.coord.graph().scene_count(), 3);
}

#[test]
fn studio_transition_promotes_preview_to_program() {
    let t0 = Instant::now();
    let mut f = fixture();
    f.coord.set_current_scene(f.a, true, t0);
    f.coord.toggle_studio_mode(t0);
    let staged_a = f.coord.staged.unwrap();

    f.coord.set_current_scene(f.c, false, t0);
    f.coord.perform_transition(t0);

    // Mid-blend: program still shows the staged duplicate of A.
    let mid = t0 + Duration::from_millis(100);
    assert_eq!(
        f.coord.program_source(mid),
        f.coord.graph().root_source(staged_a)
    );
    assert!(f.coord.graph().contains(staged_a));

    // After the window the duplicate of C is live and A's duplicate is
    // released on the next pump.
    let after = t0 + Duration::from_millis(301);
    f.coord.tick(after);
    let program = f.coord.program_source(after).unwrap();
    let program_scene = f.coord.graph().scene_of_source(program).unwrap();
    assert_eq!(f.coord.graph().scene_name(program_scene), Some("C (copy)"));
    assert!(!f.coord.graph().contains(staged_a));
    assert_ne!(
        Some(program),
        f.coord.graph().root_source(f.a)
    );
}

#[test]
fn interrupted_take_keeps_the_blending_duplicate_alive() {
    let t0 = Instant::now();
    let mut f = fixture();
    f.coord.set_current_scene(f.a, true, t0);
    f.coord.toggle_studio_mode(t0);
    let entry_dup = f.coord.staged.unwrap();

    f.coord.set_current_scene(f.c, false, t0);
    f.coord.perform_transition(t0);
    let first_dup = f.coord.staged.unwrap();

    // A second take lands while the first blend is still in its window. The
    // new blend keeps fading out of the entry duplicate, so that scene must
    // survive; the interrupted duplicate of C is the unreferenced one.
    let mid = t0 + Duration::from_millis(100);
    f.coord.perform_transition(mid);

    let sample = f.coord.output().sample(mid + Duration::from_millis(10));
    assert_eq!(sample.old, f.coord.graph().root_source(entry_dup));
    assert!(f.coord.graph().contains(entry_dup));
    assert!(!f.coord.graph().contains(first_dup));

    // Once the second window elapses the pump releases the entry duplicate
    // and program lands on the latest duplicate of C.
    let after = mid + Duration::from_millis(301);
    f.coord.tick(after);
    assert!(!f.coord.graph().contains(entry_dup));
    let program = f.coord.program_source(after).unwrap();
    assert_eq!(
        f.coord.graph().scene_of_source(program),
        f.coord.staged
    );
}

#[test]
fn forced_studio_transition_releases_the_retired_duplicate_synchronously() {
    let t0 = Instant::now();
    let mut f = fixture();
    f.coord.set_current_scene(f.a, true, t0);
    f.coord.toggle_studio_mode(t0);
    let staged_a = f.coord.staged.unwrap();

    f.coord.set_current_scene(f.c, false, t0);
    f.coord.transition_to_scene(f.c, true, t0);
    assert!(!f.coord.graph().contains(staged_a));
    assert!(f.coord.retiring.is_none());
}

#[test]
fn quick_selection_out_of_range_changes_nothing() {
    let now = Instant::now();
    let mut f = fixture();
    f.coord.set_current_scene(f.a, true, now);
    let program = f.coord.program_source(now);
    let kind = f.coord.engine().bound_kind();

    f.coord.select_quick(5, now);
    assert_eq!(f.coord.program_source(now), program);
    assert_eq!(f.coord.engine().bound_kind(), kind);
    assert!(!f.coord.is_studio_mode());
}

#[test]
fn quick_selection_applies_preset_kind_and_duration() {
    let now = Instant::now();
    let mut f = fixture();
    f.coord.set_current_scene(f.a, true, now);
    f.coord.quick_transitions_mut().add(QuickTransition {
        name: "Quick cut".to_string(),
        transition: CUT_TRANSITION_ID.to_string(),
        duration_ms: 0,
    });
    f.coord.current_scene = Some(f.b);

    f.coord.select_quick(0, now);
    assert_eq!(f.coord.engine().bound_kind().unwrap().id, CUT_TRANSITION_ID);
    assert_eq!(
        f.coord.program_source(now),
        f.coord.graph().root_source(f.b)
    );
}

#[test]
fn entering_studio_mode_stages_a_private_duplicate() {
    let t0 = Instant::now();
    let mut f = fixture();
    f.coord.set_current_scene(f.a, true, t0);
    let item = f.coord.graph().scene_sources(f.a).unwrap()[0];

    f.coord.toggle_studio_mode(t0);
    let staged = f.coord.staged.unwrap();
    assert_ne!(staged, f.a);
    assert_eq!(f.coord.graph().source_ref_count(item), 2);
    assert_eq!(
        f.coord.preview_source(),
        f.coord.graph().root_source(staged)
    );
    assert_eq!(
        f.coord.program_source(t0),
        f.coord.graph().root_source(staged)
    );
}
