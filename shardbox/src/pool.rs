//! Shard pool - morph a fixed set of slots between scenes.
//!
//! The page never creates or destroys shard elements after start-up.
//! Instead a pool of `capacity` slots is attached to one container, and
//! each morph restyles them: the first `n` slots get the scene's shards
//! (fill + clip path) and become visible, the rest are hidden. Smooth
//! motion comes from CSS transitions on `clip-path` and
//! `background-color`; nothing here computes intermediate frames.
//!
//! ## Rust Lesson #16: Generics + Dependency Injection
//!
//! In JS the morpher calls `document.getElementById('shard-box')`
//! whenever it needs the container. Here the container is a value the
//! pool owns, of any type implementing [`ShardContainer`]. Tests hand in a
//! [`crate::MemoryContainer`]; the CLI hands in an
//! [`crate::HtmlContainer`]. No global state involved.

use serde::Serialize;
use tracing::debug;

use crate::error::{ShardError, ShardResult};
use crate::scene::SceneDescriptor;

/// Container id a page uses unless configured otherwise.
pub const DEFAULT_CONTAINER_ID: &str = "shard-box";

/// Pool size used by the CLI when none is given.
pub const DEFAULT_CAPACITY: usize = 50;

/// Visibility of a pool slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlotState {
    #[default]
    Hidden,
    Visible,
}

/// One reusable shard element.
///
/// Hidden slots keep their last fill and clip path; only visibility
/// changes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShardSlot {
    pub fill: Option<String>,
    pub clip_path: Option<String>,
    pub state: SlotState,
}

impl ShardSlot {
    pub fn is_visible(&self) -> bool {
        self.state == SlotState::Visible
    }
}

/// The visual container slots are attached to.
pub trait ShardContainer {
    /// Attach a newly allocated slot. Called once per slot, in order.
    fn attach_slot(&mut self, index: usize, slot: &ShardSlot);

    /// Push a slot's current styling to the element.
    fn update_slot(&mut self, index: usize, slot: &ShardSlot);

    /// Set the `data-shard` attribute (scene name).
    fn set_data_shard(&mut self, name: &str);

    /// Set the CSS `aspect-ratio`, e.g. `68 / 87`.
    fn set_aspect_ratio(&mut self, ratio: &str);
}

/// The hosting environment that owns containers by id.
pub trait ShardHost {
    type Container: ShardContainer;

    /// Hand over the container with this id, if the host has it.
    fn take_container(&mut self, id: &str) -> Option<Self::Container>;
}

/// What a single morph did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MorphReport {
    pub scene: String,
    /// Slots that now show a shard.
    pub shown: usize,
    /// Slots left hidden.
    pub hidden: usize,
    /// Shards that didn't fit in the pool and were skipped.
    pub dropped: usize,
}

impl MorphReport {
    pub fn is_truncated(&self) -> bool {
        self.dropped > 0
    }
}

/// A fixed-capacity pool of shard slots.
#[derive(Debug)]
pub struct ShardPool<C: ShardContainer> {
    slots: Vec<ShardSlot>,
    container: C,
    current: Option<String>,
}

impl<C: ShardContainer> ShardPool<C> {
    /// Allocate `capacity` hidden slots and attach them to `container`.
    pub fn new(capacity: usize, mut container: C) -> Self {
        let slots = vec![ShardSlot::default(); capacity];
        for (index, slot) in slots.iter().enumerate() {
            container.attach_slot(index, slot);
        }
        debug!(capacity, "created shard pool");

        Self {
            slots,
            container,
            current: None,
        }
    }

    /// Look up the container in `host` and build a pool on it.
    pub fn from_host<H>(host: &mut H, container_id: &str, capacity: usize) -> ShardResult<Self>
    where
        H: ShardHost<Container = C>,
    {
        let container = host
            .take_container(container_id)
            .ok_or_else(|| ShardError::ContainerMissing(container_id.to_string()))?;
        Ok(Self::new(capacity, container))
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[ShardSlot] {
        &self.slots
    }

    pub fn visible_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_visible()).count()
    }

    /// Name of the scene shown by the last morph.
    pub fn current_scene(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    pub fn into_container(self) -> C {
        self.container
    }

    /// Restyle the pool to show `scene`.
    ///
    /// Shards go to slots positionally in ascending key order, not by
    /// key. Shards beyond the pool capacity are skipped rather than
    /// failing the morph; [`MorphReport::dropped`] counts them.
    pub fn morph_to(&mut self, scene: &SceneDescriptor) -> MorphReport {
        self.container.set_data_shard(&scene.name);
        self.container.set_aspect_ratio(&scene.view_box.aspect_ratio());

        let capacity = self.slots.len();
        let mut shown = 0;

        for (index, shard) in scene.shards.values().take(capacity).enumerate() {
            let slot = &mut self.slots[index];
            slot.fill = Some(shard.fill.clone());
            slot.clip_path = Some(shard.path.clone());
            slot.state = SlotState::Visible;
            self.container.update_slot(index, slot);
            shown += 1;
        }

        for index in shown..capacity {
            let slot = &mut self.slots[index];
            slot.state = SlotState::Hidden;
            self.container.update_slot(index, slot);
        }

        let report = MorphReport {
            scene: scene.name.clone(),
            shown,
            hidden: capacity - shown,
            dropped: scene.shards.len().saturating_sub(capacity),
        };

        if report.is_truncated() {
            debug!(scene = %scene.name, dropped = report.dropped, capacity, "scene larger than pool");
        }
        debug!(scene = %scene.name, shown, hidden = report.hidden, "morphed");

        self.current = Some(scene.name.clone());
        report
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{MemoryContainer, MemoryHost};
    use crate::geometry::ViewBox;
    use crate::scene::ShardDescriptor;
    use std::collections::BTreeMap;

    fn scene(name: &str, count: u32, w: f64, h: f64) -> SceneDescriptor {
        let shards: BTreeMap<u32, ShardDescriptor> = (1..=count)
            .map(|key| {
                (
                    key,
                    ShardDescriptor {
                        path: format!("polygon({}% 0%, 100% 100%, 0% 100%)", key),
                        fill: format!("#{:06x}", key),
                    },
                )
            })
            .collect();
        SceneDescriptor {
            name: name.to_string(),
            view_box: ViewBox { x: 0.0, y: 0.0, w, h },
            shards,
        }
    }

    #[test]
    fn new_pool_is_all_hidden() {
        let pool = ShardPool::new(5, MemoryContainer::new("shard-box"));
        assert_eq!(pool.capacity(), 5);
        assert_eq!(pool.visible_count(), 0);
        assert!(pool.slots().iter().all(|s| *s == ShardSlot::default()));
        assert_eq!(pool.container().slots().len(), 5);
        assert_eq!(pool.current_scene(), None);
    }

    #[test]
    fn morph_shows_shards_in_order() {
        let mut pool = ShardPool::new(5, MemoryContainer::new("shard-box"));
        let report = pool.morph_to(&scene("condor", 3, 68.0, 87.0));

        assert_eq!(report, MorphReport { scene: "condor".into(), shown: 3, hidden: 2, dropped: 0 });
        assert_eq!(pool.visible_count(), 3);
        assert_eq!(pool.slots()[0].fill.as_deref(), Some("#000001"));
        assert_eq!(pool.slots()[2].clip_path.as_deref(), Some("polygon(3% 0%, 100% 100%, 0% 100%)"));
        assert_eq!(pool.container().attribute("data-shard"), Some("condor"));
        assert_eq!(pool.container().aspect_ratio(), Some("68 / 87"));
        assert_eq!(pool.current_scene(), Some("condor"));
    }

    #[test]
    fn slots_are_assigned_by_position_not_key() {
        let mut sparse = scene("sparse", 0, 1.0, 1.0);
        sparse.shards.insert(7, ShardDescriptor { path: "polygon()".into(), fill: "#777".into() });
        sparse.shards.insert(3, ShardDescriptor { path: "polygon()".into(), fill: "#333".into() });

        let mut pool = ShardPool::new(4, MemoryContainer::new("shard-box"));
        pool.morph_to(&sparse);

        assert_eq!(pool.slots()[0].fill.as_deref(), Some("#333"));
        assert_eq!(pool.slots()[1].fill.as_deref(), Some("#777"));
        assert_eq!(pool.visible_count(), 2);
    }

    #[test]
    fn smaller_scene_hides_leftover_slots_but_keeps_geometry() {
        let mut pool = ShardPool::new(4, MemoryContainer::new("shard-box"));
        pool.morph_to(&scene("big", 4, 10.0, 10.0));
        let report = pool.morph_to(&scene("small", 1, 20.0, 10.0));

        assert_eq!(report.shown, 1);
        assert_eq!(report.hidden, 3);
        assert_eq!(pool.slots()[3].state, SlotState::Hidden);
        assert_eq!(pool.slots()[3].fill.as_deref(), Some("#000004"));
        assert_eq!(pool.container().slots()[3].state, SlotState::Hidden);
        assert_eq!(pool.container().aspect_ratio(), Some("20 / 10"));
        assert_eq!(pool.container().attribute("data-shard"), Some("small"));
    }

    #[test]
    fn oversized_scene_is_truncated_silently() {
        let mut pool = ShardPool::new(3, MemoryContainer::new("shard-box"));
        let report = pool.morph_to(&scene("huge", 10, 1.0, 1.0));

        assert_eq!(report.shown, 3);
        assert_eq!(report.hidden, 0);
        assert_eq!(report.dropped, 7);
        assert!(report.is_truncated());
        assert!(pool.slots().iter().all(|s| s.is_visible()));
    }

    #[test]
    fn empty_scene_hides_everything() {
        let mut pool = ShardPool::new(3, MemoryContainer::new("shard-box"));
        pool.morph_to(&scene("a", 3, 1.0, 1.0));
        let report = pool.morph_to(&scene("empty", 0, 1.0, 1.0));
        assert_eq!(report.shown, 0);
        assert_eq!(pool.visible_count(), 0);
    }

    #[test]
    fn zero_capacity_pool_drops_everything() {
        let mut pool = ShardPool::new(0, MemoryContainer::new("shard-box"));
        let report = pool.morph_to(&scene("a", 2, 1.0, 1.0));
        assert_eq!(report, MorphReport { scene: "a".into(), shown: 0, hidden: 0, dropped: 2 });
    }

    #[test]
    fn from_host_finds_container() {
        let mut host = MemoryHost::default();
        host.insert(MemoryContainer::new(DEFAULT_CONTAINER_ID));

        let pool = ShardPool::from_host(&mut host, DEFAULT_CONTAINER_ID, 2).unwrap();
        assert_eq!(pool.container().id(), DEFAULT_CONTAINER_ID);
        assert_eq!(pool.into_container().slots().len(), 2);
    }

    #[test]
    fn from_host_reports_missing_container() {
        let mut host = MemoryHost::default();
        let result = ShardPool::from_host(&mut host, DEFAULT_CONTAINER_ID, 2);
        match result {
            Err(ShardError::ContainerMissing(id)) => assert_eq!(id, "shard-box"),
            other => panic!("expected ContainerMissing, got {:?}", other.map(|p| p.capacity())),
        }
    }
}
