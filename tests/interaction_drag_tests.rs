use chrono::{DateTime, TimeZone, Utc};
use gantt_rs::GanttError;
use gantt_rs::api::{GanttEngine, GanttEngineConfig};
use gantt_rs::core::{RgbColor, TimeDomain, Viewport, WorkEntry};
use gantt_rs::interaction::{DragKind, DragTick, InteractionMode};
use gantt_rs::render::NullRenderer;
use gantt_rs::scene::HitRegion;

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, hour, minute, 0)
        .single()
        .expect("valid time")
}

fn entries() -> Vec<WorkEntry> {
    vec![
        WorkEntry::new("A", at(11, 10), at(17, 10), "type1", "RUNNING", RgbColor::new(1, 2, 3)),
        WorkEntry::new("B", at(19, 10), at(20, 10), "type2", "KILLED", RgbColor::new(4, 5, 6)),
    ]
}

fn engine() -> GanttEngine<NullRenderer> {
    let config = GanttEngineConfig::new(Viewport::new(735, 300));
    GanttEngine::new_at(NullRenderer::default(), config, entries(), at(12, 0))
        .expect("engine init")
}

#[test]
fn move_past_either_domain_edge_is_rejected_and_leaves_entry_unchanged() {
    let mut engine = engine();
    let left = engine.margin().left;
    assert!(
        engine
            .begin_drag(0, DragKind::Move, left + 180.0)
            .expect("begin drag")
    );

    for pointer_x in [0.0, -50.0, 540.0, 700.0, 10.0] {
        let tick = engine.pointer_move(left + pointer_x, 30.0).expect("tick");
        assert_eq!(tick, DragTick::Rejected { entry_index: 0 });
    }
    engine.pointer_up();

    assert_eq!(engine.entries()[0].start_time, at(11, 10));
    assert_eq!(engine.entries()[0].end_time, at(17, 10));
}

#[test]
fn move_keeps_the_original_duration() {
    let mut engine = engine();
    let margin = engine.margin();
    let hit = engine
        .pointer_down(margin.left + 510.0, margin.top + 37.0)
        .expect("pointer down")
        .expect("body of B");
    assert_eq!(hit.entry_index, 1);
    assert_eq!(hit.region, HitRegion::Body);

    let tick = engine
        .pointer_move(margin.left + 400.0, margin.top + 37.0)
        .expect("tick");
    assert_eq!(
        tick,
        DragTick::Committed {
            entry_index: 1,
            start: at(17, 20),
            end: at(18, 20),
        }
    );
    assert_eq!(engine.entries()[0], entries()[0]);

    let bar = engine.scene().bar(1).expect("bar for B");
    assert_eq!(bar.geometry.x, 370.0);
    assert_eq!(bar.geometry.width, 60.0);
    assert!(bar.transition.is_none());
}

#[test]
fn resize_start_cannot_cross_the_end() {
    let mut engine = engine();
    let margin = engine.margin();
    let hit = engine
        .pointer_down(margin.left, margin.top + 5.0)
        .expect("pointer down")
        .expect("left handle of A");
    assert_eq!(hit.region, HitRegion::StartHandle);
    assert_eq!(
        engine.interaction_mode(),
        InteractionMode::Dragging(DragKind::ResizeStart)
    );

    let rejected = engine.pointer_move(margin.left + 400.0, 0.0).expect("tick");
    assert_eq!(rejected, DragTick::Rejected { entry_index: 0 });
    assert_eq!(engine.entries()[0].start_time, at(11, 10));

    let committed = engine.pointer_move(margin.left + 99.6, 0.0).expect("tick");
    assert_eq!(
        committed,
        DragTick::Committed {
            entry_index: 0,
            start: at(12, 50),
            end: at(17, 10),
        }
    );
}

#[test]
fn resize_end_cannot_cross_the_start() {
    let mut engine = engine();
    let left = engine.margin().left;
    engine
        .begin_drag(1, DragKind::ResizeEnd, left + 540.0)
        .expect("begin drag");

    let tick = engine.pointer_move(left + 100.0, 0.0).expect("tick");
    assert_eq!(tick, DragTick::Rejected { entry_index: 1 });
    assert_eq!(engine.entries()[1].end_time, at(20, 10));

    // Exactly onto the start is allowed: a zero-length entry.
    let tick = engine.pointer_move(left + 480.0, 0.0).expect("tick");
    assert_eq!(
        tick,
        DragTick::Committed {
            entry_index: 1,
            start: at(19, 10),
            end: at(19, 10),
        }
    );
}

#[test]
fn gestures_starting_outside_the_time_track_are_ignored() {
    let mut engine = engine();
    let left = engine.margin().left;
    assert!(
        !engine
            .begin_drag(0, DragKind::Move, left - 20.0)
            .expect("begin drag")
    );
    assert!(
        !engine
            .begin_drag(0, DragKind::Move, left + 541.0)
            .expect("begin drag")
    );
    assert_eq!(engine.interaction_mode(), InteractionMode::Idle);
    assert_eq!(
        engine.pointer_move(left + 100.0, 0.0).expect("tick"),
        DragTick::Idle
    );
}

#[test]
fn pointer_down_on_background_opens_no_session() {
    let mut engine = engine();
    let margin = engine.margin();
    let hit = engine
        .pointer_down(margin.left + 200.0, margin.top + 40.0)
        .expect("pointer down");
    assert!(hit.is_none());
    assert!(engine.drag_session().is_none());
}

#[test]
fn bars_outside_a_fixed_domain_cannot_be_grabbed() {
    let entries = vec![
        WorkEntry::new("A", at(1, 0), at(2, 0), "early", "RUNNING", RgbColor::new(1, 2, 3)),
        WorkEntry::new("B", at(10, 0), at(20, 0), "late", "RUNNING", RgbColor::new(4, 5, 6)),
    ];
    let config = GanttEngineConfig::new(Viewport::new(735, 300));
    let mut engine = GanttEngine::new_at(NullRenderer::default(), config, entries, at(12, 0))
        .expect("engine init");
    engine
        .set_time_domain(TimeDomain::new(at(10, 0), at(19, 0)).expect("domain"))
        .expect("set domain");
    engine.redraw_at(None, at(12, 0)).expect("redraw");

    let collapsed = engine.scene().bar(0).expect("bar A");
    assert_eq!(collapsed.geometry.width, 0.0);
    assert!(!collapsed.start_handle.visible);
    assert!(!collapsed.end_handle.visible);

    let margin = engine.margin();
    let hit = engine
        .pointer_down(margin.left + collapsed.geometry.x, margin.top + 5.0)
        .expect("pointer down");
    assert!(hit.is_none());
    assert!(engine.drag_session().is_none());
    assert_eq!(
        engine
            .pointer_move(margin.left + 200.0, margin.top + 5.0)
            .expect("tick"),
        DragTick::Idle
    );
    assert_eq!(engine.entries()[0].start_time, at(1, 0));
    assert_eq!(engine.entries()[0].end_time, at(2, 0));
}

#[test]
fn pointer_up_without_gesture_is_a_no_op() {
    let mut engine = engine();
    assert!(engine.pointer_up().is_none());
}

#[test]
fn invalid_pointer_input_is_reported() {
    let mut engine = engine();
    assert!(matches!(
        engine.pointer_down(f64::NAN, 0.0),
        Err(GanttError::InvalidData(_))
    ));
    assert!(matches!(
        engine.begin_drag(7, DragKind::Move, 200.0),
        Err(GanttError::EntryIndexOutOfRange { index: 7, len: 2 })
    ));
}
