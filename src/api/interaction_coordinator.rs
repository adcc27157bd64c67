use chrono::Utc;
use tracing::{debug, trace};

use crate::core::TimeDomain;
use crate::error::{GanttError, GanttResult};
use crate::extensions::{ContextMenuRequest, GanttEvent};
use crate::interaction::{DragKind, DragSession, DragTick, InteractionMode, ZoomTrigger};
use crate::render::Renderer;
use crate::scene::{HitTarget, RenderSync};

use super::GanttEngine;
use super::validation::validate_pointer;

impl<R: Renderer> GanttEngine<R> {
    #[must_use]
    pub fn interaction_mode(&self) -> InteractionMode {
        self.core.interaction.mode()
    }

    #[must_use]
    pub fn drag_session(&self) -> Option<DragSession> {
        self.core.interaction.session()
    }

    /// Converts surface coordinates into plot coordinates.
    fn to_plot(&self, x: f64, y: f64) -> (f64, f64) {
        let margin = self.core.layout.margin;
        (x - margin.left, y - margin.top)
    }

    /// Starts a gesture on whatever lies under the pointer.
    ///
    /// Returns the hit when a drag session was opened; `None` when nothing
    /// draggable is under the pointer or the pointer is outside the time
    /// track.
    pub fn pointer_down(&mut self, x: f64, y: f64) -> GanttResult<Option<HitTarget>> {
        validate_pointer(x, y)?;
        let (plot_x, plot_y) = self.to_plot(x, y);
        let Some(hit) = self.core.scene.hit_test(plot_x, plot_y) else {
            trace!(plot_x, plot_y, "pointer down on background");
            return Ok(None);
        };

        let started = self.start_session(hit.entry_index, hit.region.drag_kind(), plot_x)?;
        Ok(started.then_some(hit))
    }

    /// Opens a session directly, for hosts doing their own hit-testing.
    /// `x` is in surface coordinates.
    pub fn begin_drag(&mut self, entry_index: usize, kind: DragKind, x: f64) -> GanttResult<bool> {
        validate_pointer(x, 0.0)?;
        let (plot_x, _) = self.to_plot(x, 0.0);
        self.start_session(entry_index, kind, plot_x)
    }

    fn start_session(&mut self, entry_index: usize, kind: DragKind, plot_x: f64) -> GanttResult<bool> {
        let started = self.core.interaction.begin(
            entry_index,
            kind,
            plot_x,
            &self.core.time_scale,
            &self.core.store,
        )?;
        if started {
            self.emit_plugin_event(GanttEvent::DragStarted { entry_index, kind });
        }
        Ok(started)
    }

    /// Processes one pointer-move tick of the active gesture.
    ///
    /// A committed tick edits the entry in place and moves its bar and
    /// handles immediately. Out-of-bounds targets come back as
    /// `DragTick::Rejected` and leave the entry where it was.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> GanttResult<DragTick> {
        validate_pointer(x, y)?;
        let (plot_x, _) = self.to_plot(x, y);
        let tick = self.core.interaction.drag(
            plot_x,
            &self.core.time_scale,
            &mut self.core.store,
        )?;

        if let DragTick::Committed {
            entry_index,
            start,
            end,
        } = tick
        {
            let entry = self.core.store.get(entry_index)?;
            RenderSync::reposition_entry(
                &mut self.core.scene,
                entry_index,
                entry,
                &self.core.time_scale,
            );
            self.emit_plugin_event(GanttEvent::EntryChanged {
                entry_index,
                start,
                end,
            });
        }
        Ok(tick)
    }

    /// Ends the active gesture; the last committed tick stands.
    pub fn pointer_up(&mut self) -> Option<DragSession> {
        let session = self.core.interaction.end()?;
        self.emit_plugin_event(GanttEvent::DragEnded {
            entry_index: session.entry_index,
        });
        Some(session)
    }

    /// Applies a zoom request and redraws.
    ///
    /// Only [`ZoomTrigger::Wheel`] zooms; other triggers return `Ok(None)`
    /// without touching the domain. On success the domain is `Fixed`.
    pub fn wheel(&mut self, trigger: ZoomTrigger, wheel_delta: f64) -> GanttResult<Option<TimeDomain>> {
        if !wheel_delta.is_finite() {
            return Err(GanttError::InvalidData(
                "wheel delta must be finite".to_owned(),
            ));
        }
        if !trigger.zooms() {
            trace!(?trigger, "ignore non-wheel zoom trigger");
            return Ok(None);
        }

        let previous = self.core.domain;
        let zoomed = self.core.domain.zoom(wheel_delta)?;
        if let Err(err) = self.redraw_at(None, Utc::now()) {
            self.core.domain = previous;
            return Err(err);
        }
        Ok(Some(zoomed))
    }

    /// Right-click: opens the registered context menu on the entry under the
    /// pointer, with plot-relative coordinates.
    ///
    /// Returns whether a menu was opened.
    pub fn context_menu(&mut self, x: f64, y: f64) -> GanttResult<bool> {
        validate_pointer(x, y)?;
        let (plot_x, plot_y) = self.to_plot(x, y);
        let Some(hit) = self.core.scene.hit_test(plot_x, plot_y) else {
            return Ok(false);
        };
        let Some(menu) = self.core.context_menu.as_mut() else {
            debug!(entry_index = hit.entry_index, "no context menu registered");
            return Ok(false);
        };

        let entry = self.core.store.get(hit.entry_index)?;
        menu.open(ContextMenuRequest {
            x: plot_x,
            y: plot_y,
            entry_index: hit.entry_index,
            entry,
            items: &self.core.context_menu_items,
        });
        self.emit_plugin_event(GanttEvent::ContextMenuOpened {
            entry_index: hit.entry_index,
        });
        Ok(true)
    }

    /// Advances the scene's animation clock by `delta_ms`.
    ///
    /// Returns whether any bar or axis transition is still running.
    pub fn advance_animations(&mut self, delta_ms: f64) -> GanttResult<bool> {
        self.core.scene.advance(delta_ms)
    }
}
