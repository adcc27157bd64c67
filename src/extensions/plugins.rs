use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{TimeDomain, TimeDomainMode, Viewport};
use crate::interaction::{DragKind, InteractionMode};

/// Read-only state snapshot passed to plugin hooks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PluginContext {
    pub viewport: Viewport,
    pub plot_width: f64,
    pub plot_height: f64,
    pub time_domain: TimeDomain,
    pub time_domain_mode: TimeDomainMode,
    pub entries_len: usize,
    pub lanes_len: usize,
    pub interaction_mode: InteractionMode,
}

/// Event stream exposed to plugins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GanttEvent {
    EntriesReplaced {
        entries_len: usize,
    },
    Redrawn {
        created: usize,
        updated: usize,
        removed: usize,
    },
    DomainChanged {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        mode: TimeDomainMode,
    },
    DragStarted {
        entry_index: usize,
        kind: DragKind,
    },
    EntryChanged {
        entry_index: usize,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    DragEnded {
        entry_index: usize,
    },
    ContextMenuOpened {
        entry_index: usize,
    },
}

/// Extension hook interface.
///
/// Plugins can observe events and read engine context without mutating core
/// internals directly.
pub trait GanttPlugin {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: GanttEvent, context: PluginContext);
}
