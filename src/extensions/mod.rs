//! Hooks for host-side collaborators.
//!
//! Plugins observe engine events; the context menu is the popup widget the
//! engine asks to open on a right-click over an entry. Neither can mutate
//! engine internals.

mod context_menu;
mod plugins;

pub use context_menu::{ContextMenu, ContextMenuRequest};
pub use plugins::{GanttEvent, GanttPlugin, PluginContext};
