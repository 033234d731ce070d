//! Cached entry point for laying out one node.

#[cfg(feature = "layout-trace")]
use pliant_common::LogLevel;
use pliant_style::{Direction, FlexDirection, MeasureMode};
use pliant_tree::{
    CachedMeasurement, LayoutPassReason, LayoutType, MAX_CACHED_MEASUREMENTS, NodeId,
};

use crate::cache::{self, CacheSlot, Lookup};
use crate::pass::LayoutPass;

impl LayoutPass<'_> {
    /// Lay out or measure `node`, reusing a cached result when the
    /// constraints allow it.
    ///
    /// A node is revisited when it is dirty and was not yet laid out in
    /// this generation, or when its owner's direction changed. Returns
    /// whether the layout was computed rather than served from the cache.
    pub(crate) fn layout_node(
        &mut self,
        node: NodeId,
        available_width: f32,
        available_height: f32,
        owner_direction: Direction,
        width_mode: MeasureMode,
        height_mode: MeasureMode,
        owner_width: f32,
        owner_height: f32,
        perform_layout: bool,
        reason: LayoutPassReason,
    ) -> bool {
        self.depth += 1;
        self.stats.max_depth = self.stats.max_depth.max(self.depth);

        let generation = self.generation;
        let point_scale_factor = self.tree.config_of(node).point_scale_factor();
        let current = &mut self.tree[node];
        let need_to_visit_node = (current.is_dirty()
            && current.layout.generation_count != generation)
            || current.layout.last_owner_direction != Some(owner_direction);
        if need_to_visit_node {
            current.layout.next_cached_measurements_index = 0;
            current.layout.cached_layout = CachedMeasurement::default();
        }

        let measure_margins = current.has_measure_func().then(|| {
            let style = current.style();
            (
                style.margin_for_axis(FlexDirection::Row, owner_width),
                style.margin_for_axis(FlexDirection::Column, owner_width),
            )
        });
        let lookup = Lookup {
            available_width,
            available_height,
            width_mode,
            height_mode,
            perform_layout,
        };
        let cached = cache::find(
            &current.layout,
            lookup,
            measure_margins,
            point_scale_factor,
        );

        match cached {
            Some(slot) if !need_to_visit_node => {
                let entry = slot.entry(&current.layout);
                current.layout.measured_dimensions = [entry.computed_width, entry.computed_height];
                if perform_layout {
                    self.stats.cached_layouts += 1;
                } else {
                    self.stats.cached_measures += 1;
                }
                #[cfg(feature = "layout-trace")]
                {
                    let message = format!(
                        "{:depth$}{}.{{[skipped] wm: {width_mode:?}, hm: {height_mode:?}, \
                         aw: {available_width} ah: {available_height} => d: ({}, {}) {}",
                        "",
                        self.depth,
                        entry.computed_width,
                        entry.computed_height,
                        reason.as_str(),
                        depth = self.depth as usize,
                    );
                    self.tree.log(Some(node), LogLevel::Verbose, &message);
                }
            }
            _ => {
                #[cfg(feature = "layout-trace")]
                {
                    let message = format!(
                        "{:depth$}{}.{{{} wm: {width_mode:?}, hm: {height_mode:?}, \
                         aw: {available_width} ah: {available_height} {}",
                        "",
                        self.depth,
                        if need_to_visit_node { "*" } else { "" },
                        reason.as_str(),
                        depth = self.depth as usize,
                    );
                    self.tree.log(Some(node), LogLevel::Verbose, &message);
                }
                self.layout_impl(
                    node,
                    available_width,
                    available_height,
                    owner_direction,
                    width_mode,
                    height_mode,
                    owner_width,
                    owner_height,
                    perform_layout,
                    reason,
                );
                self.tree[node].layout.last_owner_direction = Some(owner_direction);
                if cached.is_none() {
                    self.store(node, lookup);
                }
            }
        }

        let current = &mut self.tree[node];
        if perform_layout {
            current.layout.dimensions = current.layout.measured_dimensions;
            current.set_has_new_layout(true);
            self.tree.set_dirty(node, false);
        }
        self.tree[node].layout.generation_count = generation;

        let kind = match (perform_layout, cached) {
            (true, Some(CacheSlot::Layout)) if !need_to_visit_node => LayoutType::CachedLayout,
            (true, _) => LayoutType::Layout,
            (false, Some(_)) => LayoutType::CachedMeasure,
            (false, None) => LayoutType::Measure,
        };
        self.tree.publish(|events| events.node_layout(node, kind));

        self.depth -= 1;
        need_to_visit_node || cached.is_none()
    }

    /// Record the result just computed for `node` in the cache.
    fn store(&mut self, node: NodeId, lookup: Lookup) {
        let layout = &mut self.tree[node].layout;
        let next = layout.next_cached_measurements_index;
        self.stats.max_measure_cache = self.stats.max_measure_cache.max(next as u32 + 1);
        if next == MAX_CACHED_MEASUREMENTS {
            layout.next_cached_measurements_index = 0;
        }
        let entry = CachedMeasurement {
            available_width: lookup.available_width,
            available_height: lookup.available_height,
            width_mode: lookup.width_mode,
            height_mode: lookup.height_mode,
            computed_width: layout.measured_width(),
            computed_height: layout.measured_height(),
        };
        if lookup.perform_layout {
            layout.cached_layout = entry;
        } else {
            layout.cached_measurements[layout.next_cached_measurements_index] = entry;
            layout.next_cached_measurements_index += 1;
        }
    }
}
