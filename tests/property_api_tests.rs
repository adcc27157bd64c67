use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use gantt_rs::api::{GanttEngine, GanttEngineConfig};
use gantt_rs::core::{RgbColor, TimeDomain, TimeScale, Viewport, WorkEntry};
use gantt_rs::interaction::{DragKind, DragTick};
use gantt_rs::render::NullRenderer;
use proptest::prelude::*;

fn origin() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0)
        .single()
        .expect("valid origin")
}

fn entry(label: &str, start_min: i64, duration_min: i64, category: &str) -> WorkEntry {
    let start = origin() + TimeDelta::minutes(start_min);
    WorkEntry::new(
        label,
        start,
        start + TimeDelta::minutes(duration_min),
        category,
        "RUNNING",
        RgbColor::new(90, 90, 90),
    )
}

fn engine_with(entries: Vec<WorkEntry>) -> GanttEngine<NullRenderer> {
    // 540px time track.
    let config = GanttEngineConfig::new(Viewport::new(735, 300));
    GanttEngine::new_at(NullRenderer::default(), config, entries, origin())
        .expect("engine init")
}

proptest! {
    #[test]
    fn pixel_round_trip_stays_within_one_pixel(
        span_min in 1i64..20_000,
        width in 50.0f64..2_000.0,
        fraction in 0.0f64..=1.0
    ) {
        let start = origin();
        let end = start + TimeDelta::minutes(span_min);
        let scale = TimeScale::new(TimeDomain::new(start, end).expect("domain"), width)
            .expect("scale");
        let span_ms = (span_min * 60_000) as f64;
        let time = start + TimeDelta::milliseconds((span_ms * fraction).round() as i64);

        let back = scale
            .pixel_to_time(scale.time_to_pixel(time))
            .expect("pixel to time");
        let error_ms = (back - time).num_milliseconds().abs() as f64;
        prop_assert!(error_ms <= span_ms / width + 1.0);
    }

    #[test]
    fn fit_domain_matches_entry_extents(
        spans in prop::collection::vec((0i64..10_000, 0i64..600), 1..20)
    ) {
        let entries: Vec<WorkEntry> = spans
            .iter()
            .enumerate()
            .map(|(i, &(start, duration))| entry(&format!("e{i}"), start, duration, "lane"))
            .collect();
        let expected_start = entries.iter().map(|e| e.start_time).min().expect("non-empty");
        let expected_end = entries.iter().map(|e| e.end_time).max().expect("non-empty");

        let engine = engine_with(entries);
        prop_assert_eq!(engine.time_domain().start, expected_start);
        prop_assert_eq!(engine.time_domain().end, expected_end);
    }

    #[test]
    fn resize_ticks_never_invert_bounds(
        kind in prop_oneof![Just(DragKind::ResizeStart), Just(DragKind::ResizeEnd)],
        pointer_xs in prop::collection::vec(-200.0f64..800.0, 1..40)
    ) {
        let mut engine = engine_with(vec![
            entry("x", 120, 120, "x"),
            entry("anchor", 0, 600, "anchor"),
        ]);
        let left = engine.margin().left;
        let grab = match kind {
            DragKind::ResizeStart => 108.0,
            _ => 216.0,
        };
        prop_assert!(engine.begin_drag(0, kind, left + grab).expect("begin drag"));

        for x in pointer_xs {
            engine.pointer_move(left + x, 0.0).expect("tick");
            let entry = &engine.entries()[0];
            prop_assert!(entry.start_time <= entry.end_time);
        }
        engine.pointer_up();
        let entry = &engine.entries()[0];
        prop_assert!(entry.start_time <= entry.end_time);
    }

    #[test]
    fn moves_past_domain_edges_never_commit(
        pointer_xs in prop::collection::vec(
            prop_oneof![-500.0f64..54.0, 487.0f64..1_000.0],
            1..30
        )
    ) {
        // Domain 00:00..10:00 over 540px: 54px per hour, the moved bar is 108px.
        let mut engine = engine_with(vec![
            entry("x", 120, 120, "x"),
            entry("anchor", 0, 600, "anchor"),
        ]);
        let before = engine.entries()[0].clone();
        let left = engine.margin().left;
        prop_assert!(engine.begin_drag(0, DragKind::Move, left + 162.0).expect("begin drag"));

        for x in pointer_xs {
            let tick = engine.pointer_move(left + x, 0.0).expect("tick");
            prop_assert_eq!(tick, DragTick::Rejected { entry_index: 0 });
        }
        engine.pointer_up();
        prop_assert_eq!(&engine.entries()[0], &before);
    }
}
