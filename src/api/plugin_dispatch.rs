use crate::error::{GanttError, GanttResult};
use crate::extensions::{ContextMenu, GanttEvent, GanttPlugin, PluginContext};
use crate::render::Renderer;

use super::GanttEngine;

impl<R: Renderer> GanttEngine<R> {
    /// Registers a plugin with a unique identifier.
    pub fn register_plugin(&mut self, plugin: Box<dyn GanttPlugin>) -> GanttResult<()> {
        let plugin_id = plugin.id().to_owned();
        if plugin_id.is_empty() {
            return Err(GanttError::InvalidData(
                "plugin id must not be empty".to_owned(),
            ));
        }
        if self.has_plugin(&plugin_id) {
            return Err(GanttError::InvalidData(format!(
                "plugin with id `{plugin_id}` is already registered"
            )));
        }
        self.core.plugins.push(plugin);
        Ok(())
    }

    /// Unregisters a plugin by id. Returns `true` when removed.
    pub fn unregister_plugin(&mut self, plugin_id: &str) -> bool {
        let before = self.core.plugins.len();
        self.core.plugins.retain(|plugin| plugin.id() != plugin_id);
        self.core.plugins.len() != before
    }

    #[must_use]
    pub fn plugin_count(&self) -> usize {
        self.core.plugins.len()
    }

    #[must_use]
    pub fn has_plugin(&self, plugin_id: &str) -> bool {
        self.core
            .plugins
            .iter()
            .any(|plugin| plugin.id() == plugin_id)
    }

    /// Installs the popup opened by [`GanttEngine::context_menu`], returning
    /// the previous one.
    pub fn set_context_menu(
        &mut self,
        menu: Box<dyn ContextMenu>,
    ) -> Option<Box<dyn ContextMenu>> {
        self.core.context_menu.replace(menu)
    }

    pub fn clear_context_menu(&mut self) -> Option<Box<dyn ContextMenu>> {
        self.core.context_menu.take()
    }

    #[must_use]
    pub fn plugin_context(&self) -> PluginContext {
        PluginContext {
            viewport: self.core.layout.surface,
            plot_width: self.core.time_scale.width(),
            plot_height: self.core.lane_scale.height(),
            time_domain: self.core.domain.domain(),
            time_domain_mode: self.core.domain.mode(),
            entries_len: self.core.store.len(),
            lanes_len: self.core.store.categories().len(),
            interaction_mode: self.core.interaction.mode(),
        }
    }

    pub(super) fn emit_plugin_event(&mut self, event: GanttEvent) {
        if self.core.plugins.is_empty() {
            return;
        }
        let context = self.plugin_context();
        for plugin in &mut self.core.plugins {
            plugin.on_event(event, context);
        }
    }
}
