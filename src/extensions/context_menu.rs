use crate::core::WorkEntry;

/// Arguments of one context-menu request.
///
/// `x`/`y` are relative to the plot area, matching the coordinates used by
/// the bars themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContextMenuRequest<'a> {
    pub x: f64,
    pub y: f64,
    pub entry_index: usize,
    pub entry: &'a WorkEntry,
    pub items: &'a [String],
}

/// Popup widget opened on a right-click over an entry.
///
/// The widget owns its own show/hide, hover and positioning behavior.
pub trait ContextMenu {
    fn open(&mut self, request: ContextMenuRequest<'_>);
}
