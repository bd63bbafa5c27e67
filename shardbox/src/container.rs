//! Container implementations for the shard pool.
//!
//! - [`MemoryContainer`] records everything the pool does to it.
//! - [`HtmlContainer`] keeps the equivalent inline styles and renders the
//!   pool as static HTML, the same markup a page builds at runtime.

use std::collections::{BTreeMap, HashMap};

use quick_xml::escape::escape;

use crate::pool::{ShardContainer, ShardHost, ShardSlot, SlotState};

// ============================================================================
// IN-MEMORY
// ============================================================================

/// Container that just remembers its state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MemoryContainer {
    id: String,
    attributes: BTreeMap<String, String>,
    aspect_ratio: Option<String>,
    slots: Vec<ShardSlot>,
}

impl MemoryContainer {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), ..Self::default() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn aspect_ratio(&self) -> Option<&str> {
        self.aspect_ratio.as_deref()
    }

    /// Slot styling as last pushed by the pool.
    pub fn slots(&self) -> &[ShardSlot] {
        &self.slots
    }
}

impl ShardContainer for MemoryContainer {
    fn attach_slot(&mut self, index: usize, slot: &ShardSlot) {
        debug_assert_eq!(index, self.slots.len(), "slots are attached in order");
        self.slots.push(slot.clone());
    }

    fn update_slot(&mut self, index: usize, slot: &ShardSlot) {
        if let Some(existing) = self.slots.get_mut(index) {
            existing.clone_from(slot);
        }
    }

    fn set_data_shard(&mut self, name: &str) {
        self.attributes.insert("data-shard".to_string(), name.to_string());
    }

    fn set_aspect_ratio(&mut self, ratio: &str) {
        self.aspect_ratio = Some(ratio.to_string());
    }
}

/// Host that owns named in-memory containers.
#[derive(Debug, Default)]
pub struct MemoryHost {
    containers: HashMap<String, MemoryContainer>,
}

impl MemoryHost {
    pub fn insert(&mut self, container: MemoryContainer) {
        self.containers.insert(container.id.clone(), container);
    }
}

impl ShardHost for MemoryHost {
    type Container = MemoryContainer;

    fn take_container(&mut self, id: &str) -> Option<MemoryContainer> {
        self.containers.remove(id)
    }
}

// ============================================================================
// HTML
// ============================================================================

/// Container that renders to HTML markup.
///
/// ```text
/// <div id="shard-box" class="shard-box" data-shard="condor" style="aspect-ratio: 68 / 87">
///   <div class="shard-wrapper"><div class="shard" style="..."></div></div>
///   ...
/// </div>
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HtmlContainer {
    id: String,
    data_shard: Option<String>,
    aspect_ratio: Option<String>,
    /// Inline `style` value per slot.
    styles: Vec<String>,
}

impl HtmlContainer {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), ..Self::default() }
    }

    /// Inline style of one slot, if attached.
    pub fn slot_style(&self, index: usize) -> Option<&str> {
        self.styles.get(index).map(String::as_str)
    }

    /// Render the container and all its slots.
    pub fn render(&self) -> String {
        let mut html = format!(r#"<div id="{}" class="shard-box""#, escape(self.id.as_str()));
        if let Some(name) = &self.data_shard {
            html.push_str(&format!(r#" data-shard="{}""#, escape(name.as_str())));
        }
        if let Some(ratio) = &self.aspect_ratio {
            html.push_str(&format!(r#" style="aspect-ratio: {}""#, escape(ratio.as_str())));
        }
        html.push_str(">\n");

        for style in &self.styles {
            html.push_str(&format!(
                "  <div class=\"shard-wrapper\"><div class=\"shard\" style=\"{}\"></div></div>\n",
                escape(style.as_str())
            ));
        }

        html.push_str("</div>\n");
        html
    }
}

/// Inline style for a slot: color and clip path when known, then
/// visibility.
fn slot_style(slot: &ShardSlot) -> String {
    let mut parts = Vec::new();
    if let Some(fill) = &slot.fill {
        parts.push(format!("background-color: {}", fill));
    }
    if let Some(clip) = &slot.clip_path {
        parts.push(format!("-webkit-clip-path: {}", clip));
        parts.push(format!("clip-path: {}", clip));
    }
    let visibility = match slot.state {
        SlotState::Hidden => "hidden",
        SlotState::Visible => "visible",
    };
    parts.push(format!("visibility: {}", visibility));
    parts.join("; ")
}

impl ShardContainer for HtmlContainer {
    fn attach_slot(&mut self, _index: usize, slot: &ShardSlot) {
        self.styles.push(slot_style(slot));
    }

    fn update_slot(&mut self, index: usize, slot: &ShardSlot) {
        if let Some(style) = self.styles.get_mut(index) {
            *style = slot_style(slot);
        }
    }

    fn set_data_shard(&mut self, name: &str) {
        self.data_shard = Some(name.to_string());
    }

    fn set_aspect_ratio(&mut self, ratio: &str) {
        self.aspect_ratio = Some(ratio.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::ShardPool;
    use crate::scene::SceneDescriptor;

    const SCENE: &str = r##"{
  "name": "condor",
  "box": { "x": 0, "y": 0, "w": 68, "h": 87 },
  "shards": {
    "1": { "path": "polygon(0% 100%, 50% 0%, 100% 100%)", "fill": "#2B2B2B" }
  }
}"##;

    #[test]
    fn fresh_slot_style_is_hidden() {
        assert_eq!(slot_style(&ShardSlot::default()), "visibility: hidden");
    }

    #[test]
    fn html_reflects_morph() {
        let scene = SceneDescriptor::from_json(SCENE).unwrap();
        let mut pool = ShardPool::new(2, HtmlContainer::new("shard-box"));
        pool.morph_to(&scene);

        let container = pool.container();
        assert_eq!(
            container.slot_style(0),
            Some(
                "background-color: #2B2B2B; -webkit-clip-path: polygon(0% 100%, 50% 0%, 100% 100%); \
                 clip-path: polygon(0% 100%, 50% 0%, 100% 100%); visibility: visible"
            )
        );
        assert_eq!(container.slot_style(1), Some("visibility: hidden"));

        let html = container.render();
        assert!(html.starts_with(
            r#"<div id="shard-box" class="shard-box" data-shard="condor" style="aspect-ratio: 68 / 87">"#
        ));
        assert_eq!(html.matches("class=\"shard-wrapper\"").count(), 2);
        assert!(html.trim_end().ends_with("</div>"));
    }

    #[test]
    fn html_escapes_attribute_values() {
        let mut container = HtmlContainer::new("box");
        container.set_data_shard(r#"a "quoted" <name>"#);
        let html = container.render();
        assert!(html.contains("data-shard=\"a &quot;quoted&quot; &lt;name&gt;\""));
    }

    #[test]
    fn memory_container_records_state() {
        let mut container = MemoryContainer::new("box");
        container.attach_slot(0, &ShardSlot::default());
        container.set_data_shard("guanaco");
        container.set_aspect_ratio("1 / 2");
        container.update_slot(
            0,
            &ShardSlot { fill: Some("#fff".into()), clip_path: None, state: SlotState::Visible },
        );
        // Out-of-range updates are ignored.
        container.update_slot(9, &ShardSlot::default());

        assert_eq!(container.attribute("data-shard"), Some("guanaco"));
        assert_eq!(container.aspect_ratio(), Some("1 / 2"));
        assert_eq!(container.slots().len(), 1);
        assert!(container.slots()[0].is_visible());
    }

    #[test]
    fn host_hands_out_each_container_once() {
        let mut host = MemoryHost::default();
        host.insert(MemoryContainer::new("a"));
        assert!(host.take_container("a").is_some());
        assert!(host.take_container("a").is_none());
        assert!(host.take_container("b").is_none());
    }
}
