use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::{EntryStore, TimeScale, WorkEntry};
use crate::error::{GanttError, GanttResult};

use super::{DragKind, DragSession, InteractionMode};

/// Outcome of one pointer-move tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DragTick {
    /// No gesture is active.
    Idle,
    /// The entry now spans `start..=end`.
    Committed {
        entry_index: usize,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    /// The target violated a bound; the entry kept its last valid position.
    Rejected { entry_index: usize },
}

/// Drag state machine: `Idle -> Dragging(kind) -> Idle`.
///
/// Scales and the entry store are passed in by the owner on every call; the
/// controller keeps nothing but the active session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionController {
    session: Option<DragSession>,
}

impl InteractionController {
    #[must_use]
    pub fn mode(&self) -> InteractionMode {
        self.session
            .map_or(InteractionMode::Idle, |session| {
                InteractionMode::Dragging(session.kind)
            })
    }

    #[must_use]
    pub fn session(&self) -> Option<DragSession> {
        self.session
    }

    /// Opens a gesture on `entry_index`.
    ///
    /// Returns `Ok(false)` and stays idle when `pointer_x` lies outside the
    /// scale's pixel range.
    pub fn begin(
        &mut self,
        entry_index: usize,
        kind: DragKind,
        pointer_x: f64,
        time_scale: &TimeScale,
        store: &EntryStore,
    ) -> GanttResult<bool> {
        if !pointer_x.is_finite() {
            return Err(GanttError::InvalidData(
                "pointer position must be finite".to_owned(),
            ));
        }
        let entry = store.get(entry_index)?;
        if !time_scale.contains_pixel(pointer_x) {
            trace!(pointer_x, "ignore drag starting outside the time range");
            return Ok(false);
        }

        if let Some(previous) = self.session {
            debug!(
                entry_index = previous.entry_index,
                "drag session replaced before release"
            );
        }
        self.session = Some(DragSession {
            entry_index,
            kind,
            original_start: entry.start_time,
            original_end: entry.end_time,
        });
        debug!(entry_index, ?kind, "drag start");
        Ok(true)
    }

    /// Processes one pointer-move tick and commits it in place when valid.
    pub fn drag(
        &mut self,
        pointer_x: f64,
        time_scale: &TimeScale,
        store: &mut EntryStore,
    ) -> GanttResult<DragTick> {
        let Some(session) = self.session else {
            return Ok(DragTick::Idle);
        };
        let entry_index = session.entry_index;
        let entry = store.get(entry_index)?;

        match resolve_drag_tick(session, entry, pointer_x, time_scale)? {
            Some((start, end)) => {
                store.set_bounds(entry_index, start, end)?;
                trace!(entry_index, %start, %end, "drag commit");
                Ok(DragTick::Committed {
                    entry_index,
                    start,
                    end,
                })
            }
            None => {
                trace!(entry_index, pointer_x, "drag tick rejected");
                Ok(DragTick::Rejected { entry_index })
            }
        }
    }

    /// Ends the gesture. The last committed tick stands.
    pub fn end(&mut self) -> Option<DragSession> {
        let session = self.session.take();
        if let Some(session) = session {
            debug!(entry_index = session.entry_index, "drag end");
        }
        session
    }
}

/// Computes the bounds a tick would commit, or `None` when the tick must be
/// ignored.
///
/// - `Move` centers the bar on the pointer and keeps the gesture's original
///   duration; both edges must stay strictly inside the domain.
/// - `ResizeStart` / `ResizeEnd` snap the pointer to a whole pixel and refuse
///   to cross the opposite edge.
pub fn resolve_drag_tick(
    session: DragSession,
    entry: &WorkEntry,
    pointer_x: f64,
    time_scale: &TimeScale,
) -> GanttResult<Option<(DateTime<Utc>, DateTime<Utc>)>> {
    if !pointer_x.is_finite() {
        return Err(GanttError::InvalidData(
            "pointer position must be finite".to_owned(),
        ));
    }

    match session.kind {
        DragKind::Move => {
            let width =
                time_scale.time_to_pixel(entry.end_time) - time_scale.time_to_pixel(entry.start_time);
            let new_start = time_scale.pixel_to_time((pointer_x - width / 2.0).floor())?;
            let duration = session.original_end - session.original_start;
            let Some(new_end) = new_start.checked_add_signed(duration) else {
                return Ok(None);
            };
            let domain = time_scale.domain();
            if new_start > domain.start && new_end < domain.end {
                Ok(Some((new_start, new_end)))
            } else {
                Ok(None)
            }
        }
        DragKind::ResizeStart => {
            let new_start = time_scale.pixel_to_time(pointer_x.round())?;
            if new_start <= entry.end_time {
                Ok(Some((new_start, entry.end_time)))
            } else {
                Ok(None)
            }
        }
        DragKind::ResizeEnd => {
            let new_end = time_scale.pixel_to_time(pointer_x.round())?;
            if new_end >= entry.start_time {
                Ok(Some((entry.start_time, new_end)))
            } else {
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::{DragTick, InteractionController};
    use crate::core::{EntryStore, RgbColor, TimeDomain, TimeScale, WorkEntry};
    use crate::interaction::{DragKind, InteractionMode};

    fn at(hour: u32, minute: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2010, 12, 1, hour, minute, 0).unwrap()
    }

    fn fixture() -> (TimeScale, EntryStore) {
        let scale = TimeScale::new(TimeDomain::new(at(10, 0), at(20, 0)).unwrap(), 600.0)
            .expect("scale");
        let store = EntryStore::new(
            vec![WorkEntry::new(
                "a",
                at(12, 0),
                at(14, 0),
                "lane",
                "stat",
                RgbColor::new(1, 2, 3),
            )],
            None,
        )
        .expect("store");
        (scale, store)
    }

    #[test]
    fn move_keeps_duration_and_centers_on_pointer() {
        let (scale, mut store) = fixture();
        let mut controller = InteractionController::default();
        assert!(controller.begin(0, DragKind::Move, 180.0, &scale, &store).unwrap());
        assert_eq!(controller.mode(), InteractionMode::Dragging(DragKind::Move));

        let tick = controller.drag(300.0, &scale, &mut store).unwrap();
        // bar is 120px wide, so its left edge lands at 240px = 14:00
        assert_eq!(
            tick,
            DragTick::Committed {
                entry_index: 0,
                start: at(14, 0),
                end: at(16, 0),
            }
        );
        assert_eq!(store.all()[0].start_time, at(14, 0));
    }

    #[test]
    fn move_to_domain_edge_is_rejected() {
        let (scale, mut store) = fixture();
        let mut controller = InteractionController::default();
        controller.begin(0, DragKind::Move, 180.0, &scale, &store).unwrap();

        assert_eq!(
            controller.drag(60.0, &scale, &mut store).unwrap(),
            DragTick::Rejected { entry_index: 0 }
        );
        assert_eq!(
            controller.drag(590.0, &scale, &mut store).unwrap(),
            DragTick::Rejected { entry_index: 0 }
        );
        assert_eq!(store.all()[0].start_time, at(12, 0));
        assert_eq!(store.all()[0].end_time, at(14, 0));
    }

    #[test]
    fn resize_start_cannot_cross_end() {
        let (scale, mut store) = fixture();
        let mut controller = InteractionController::default();
        controller.begin(0, DragKind::ResizeStart, 120.0, &scale, &store).unwrap();

        assert!(matches!(
            controller.drag(400.0, &scale, &mut store).unwrap(),
            DragTick::Rejected { .. }
        ));
        assert!(matches!(
            controller.drag(240.0, &scale, &mut store).unwrap(),
            DragTick::Committed { .. }
        ));
        assert_eq!(store.all()[0].start_time, at(14, 0));
        assert_eq!(store.all()[0].end_time, at(14, 0));
    }

    #[test]
    fn resize_end_cannot_cross_start() {
        let (scale, mut store) = fixture();
        let mut controller = InteractionController::default();
        controller.begin(0, DragKind::ResizeEnd, 240.0, &scale, &store).unwrap();

        assert!(matches!(
            controller.drag(30.0, &scale, &mut store).unwrap(),
            DragTick::Rejected { .. }
        ));
        assert_eq!(store.all()[0].end_time, at(14, 0));
        controller.drag(359.6, &scale, &mut store).unwrap();
        assert_eq!(store.all()[0].end_time, at(16, 0));
    }

    #[test]
    fn gestures_starting_outside_the_range_are_ignored() {
        let (scale, store) = fixture();
        let mut controller = InteractionController::default();
        assert!(!controller.begin(0, DragKind::Move, -4.0, &scale, &store).unwrap());
        assert!(!controller.begin(0, DragKind::Move, 601.0, &scale, &store).unwrap());
        assert_eq!(controller.mode(), InteractionMode::Idle);
    }

    #[test]
    fn ticks_without_session_are_idle() {
        let (scale, mut store) = fixture();
        let mut controller = InteractionController::default();
        assert_eq!(controller.drag(10.0, &scale, &mut store).unwrap(), DragTick::Idle);
        assert!(controller.end().is_none());
    }
}
