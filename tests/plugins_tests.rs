use std::cell::RefCell;
use std::rc::Rc;

use chrono::{DateTime, TimeZone, Utc};
use gantt_rs::GanttError;
use gantt_rs::api::{GanttEngine, GanttEngineConfig};
use gantt_rs::core::{RgbColor, Viewport, WorkEntry};
use gantt_rs::extensions::{
    ContextMenu, ContextMenuRequest, GanttEvent, GanttPlugin, PluginContext,
};
use gantt_rs::interaction::{DragKind, InteractionMode, ZoomTrigger};
use gantt_rs::render::NullRenderer;

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 4, hour, minute, 0)
        .single()
        .expect("valid time")
}

fn entries() -> Vec<WorkEntry> {
    vec![
        WorkEntry::new("A", at(11, 10), at(17, 10), "type1", "RUNNING", RgbColor::new(1, 2, 3)),
        WorkEntry::new("B", at(19, 10), at(20, 10), "type2", "FAILED", RgbColor::new(4, 5, 6)),
    ]
}

fn engine() -> GanttEngine<NullRenderer> {
    let config = GanttEngineConfig::new(Viewport::new(735, 300));
    GanttEngine::new_at(NullRenderer::default(), config, entries(), at(12, 0))
        .expect("engine init")
}

type EventLog = Rc<RefCell<Vec<(GanttEvent, PluginContext)>>>;

struct RecordingPlugin {
    id: String,
    events: EventLog,
}

impl RecordingPlugin {
    fn new(id: impl Into<String>, events: EventLog) -> Self {
        Self {
            id: id.into(),
            events,
        }
    }
}

impl GanttPlugin for RecordingPlugin {
    fn id(&self) -> &str {
        &self.id
    }

    fn on_event(&mut self, event: GanttEvent, context: PluginContext) {
        self.events.borrow_mut().push((event, context));
    }
}

fn event_kind(event: &GanttEvent) -> &'static str {
    match event {
        GanttEvent::EntriesReplaced { .. } => "entries_replaced",
        GanttEvent::Redrawn { .. } => "redrawn",
        GanttEvent::DomainChanged { .. } => "domain_changed",
        GanttEvent::DragStarted { .. } => "drag_started",
        GanttEvent::EntryChanged { .. } => "entry_changed",
        GanttEvent::DragEnded { .. } => "drag_ended",
        GanttEvent::ContextMenuOpened { .. } => "context_menu",
    }
}

#[derive(Debug, Clone, PartialEq)]
struct MenuCall {
    x: f64,
    y: f64,
    entry_index: usize,
    label: String,
    items: Vec<String>,
}

struct RecordingMenu {
    calls: Rc<RefCell<Vec<MenuCall>>>,
}

impl ContextMenu for RecordingMenu {
    fn open(&mut self, request: ContextMenuRequest<'_>) {
        self.calls.borrow_mut().push(MenuCall {
            x: request.x,
            y: request.y,
            entry_index: request.entry_index,
            label: request.entry.label.clone(),
            items: request.items.to_vec(),
        });
    }
}

#[test]
fn plugin_receives_deterministic_event_sequence() {
    let mut engine = engine();
    let events = EventLog::default();
    engine
        .register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");
    let left = engine.margin().left;

    engine.redraw_at(None, at(12, 0)).expect("redraw");
    engine
        .begin_drag(0, DragKind::ResizeStart, left)
        .expect("begin drag");
    engine.pointer_move(left + 400.0, 0.0).expect("rejected tick");
    engine.pointer_move(left + 100.0, 0.0).expect("committed tick");
    engine.pointer_up();
    engine.wheel(ZoomTrigger::Wheel, 60.0).expect("zoom");
    engine.redraw_at(Some(entries()), at(12, 0)).expect("replace");

    let events = events.borrow();
    let kinds: Vec<&'static str> = events.iter().map(|(event, _)| event_kind(event)).collect();
    assert_eq!(
        kinds,
        vec![
            "redrawn",
            "drag_started",
            "entry_changed",
            "drag_ended",
            "domain_changed",
            "redrawn",
            "entries_replaced",
            "redrawn",
        ]
    );

    let (started, context) = events[1];
    assert_eq!(
        started,
        GanttEvent::DragStarted {
            entry_index: 0,
            kind: DragKind::ResizeStart,
        }
    );
    assert_eq!(
        context.interaction_mode,
        InteractionMode::Dragging(DragKind::ResizeStart)
    );
    assert_eq!(context.plot_width, 540.0);
    assert_eq!(context.entries_len, 2);
    assert_eq!(context.lanes_len, 2);

    assert_eq!(
        events[2].0,
        GanttEvent::EntryChanged {
            entry_index: 0,
            start: at(12, 50),
            end: at(17, 10),
        }
    );
}

#[test]
fn plugin_registry_rejects_empty_and_duplicate_ids() {
    let mut engine = engine();
    let events = EventLog::default();

    assert!(matches!(
        engine.register_plugin(Box::new(RecordingPlugin::new("", events.clone()))),
        Err(GanttError::InvalidData(_))
    ));
    engine
        .register_plugin(Box::new(RecordingPlugin::new("p", events.clone())))
        .expect("register plugin");
    assert!(
        engine
            .register_plugin(Box::new(RecordingPlugin::new("p", events.clone())))
            .is_err()
    );
    assert!(engine.has_plugin("p"));
    assert_eq!(engine.plugin_count(), 1);

    assert!(engine.unregister_plugin("p"));
    assert!(!engine.unregister_plugin("p"));
    assert_eq!(engine.plugin_count(), 0);
}

#[test]
fn context_menu_opens_on_entries_with_plot_coordinates() {
    let mut engine = engine();
    let calls = Rc::new(RefCell::new(Vec::new()));
    let events = EventLog::default();
    assert!(
        engine
            .set_context_menu(Box::new(RecordingMenu {
                calls: calls.clone(),
            }))
            .is_none()
    );
    engine
        .register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");
    let margin = engine.margin();

    assert!(
        engine
            .context_menu(margin.left + 100.0, margin.top + 10.0)
            .expect("context menu")
    );
    assert!(
        !engine
            .context_menu(margin.left + 400.0, margin.top + 10.0)
            .expect("background")
    );

    let calls = calls.borrow();
    assert_eq!(
        *calls,
        vec![MenuCall {
            x: 100.0,
            y: 10.0,
            entry_index: 0,
            label: "A".to_owned(),
            items: vec!["item1".to_owned(), "item2".to_owned()],
        }]
    );
    assert_eq!(
        events.borrow()[0].0,
        GanttEvent::ContextMenuOpened { entry_index: 0 }
    );
}

#[test]
fn context_menu_without_widget_is_a_no_op() {
    let mut engine = engine();
    let margin = engine.margin();
    assert!(
        !engine
            .context_menu(margin.left + 100.0, margin.top + 10.0)
            .expect("context menu")
    );
}

#[test]
fn context_menu_items_are_configurable() {
    let mut engine = engine();
    engine
        .set_context_menu_items(vec!["Restart".to_owned(), "Kill".to_owned()])
        .expect("items");
    assert_eq!(engine.context_menu_items(), ["Restart", "Kill"]);
    assert!(engine.set_context_menu_items(vec![String::new()]).is_err());
}

#[test]
fn replacing_entries_mid_drag_reports_the_drag_as_ended() {
    let mut engine = engine();
    let events = EventLog::default();
    engine
        .register_plugin(Box::new(RecordingPlugin::new("recorder", events.clone())))
        .expect("register plugin");
    let left = engine.margin().left;

    assert!(
        engine
            .begin_drag(1, DragKind::Move, left + 510.0)
            .expect("begin drag")
    );
    engine.redraw_at(Some(entries()), at(12, 0)).expect("replace");
    assert!(engine.drag_session().is_none());

    let events = events.borrow();
    let kinds: Vec<&'static str> = events.iter().map(|(event, _)| event_kind(event)).collect();
    assert_eq!(
        kinds,
        vec!["drag_started", "drag_ended", "entries_replaced", "redrawn"]
    );
    assert_eq!(events[1].0, GanttEvent::DragEnded { entry_index: 1 });
    assert_eq!(events[1].1.interaction_mode, InteractionMode::Idle);
}
