//! Movement domain: ground and wall probes backed by avian2d overlap queries.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::{GameLayer, GroundProbe, ProbeLayout, WallProbe};

/// Overlap-box probes for one mover at one instant.
///
/// Built fresh each frame from the mover's position and facing; the wall
/// sensors are mirrored so the front box is always on the facing side.
pub(crate) struct AvianProbes<'a, 'w, 's> {
    spatial_query: &'a SpatialQuery<'w, 's>,
    layout: &'a ProbeLayout,
    origin: Vec2,
    facing_right: bool,
    ground_filter: SpatialQueryFilter,
    wall_filter: SpatialQueryFilter,
}

impl<'a, 'w, 's> AvianProbes<'a, 'w, 's> {
    pub(crate) fn new(
        spatial_query: &'a SpatialQuery<'w, 's>,
        layout: &'a ProbeLayout,
        origin: Vec2,
        facing_right: bool,
    ) -> Self {
        Self {
            spatial_query,
            layout,
            origin,
            facing_right,
            // Filter to only hit the matching layer (not the player itself)
            ground_filter: SpatialQueryFilter::from_mask(GameLayer::Ground),
            wall_filter: SpatialQueryFilter::from_mask(GameLayer::Wall),
        }
    }

    fn overlaps(&self, offset: Vec2, size: Vec2, filter: &SpatialQueryFilter) -> bool {
        let shape = Collider::rectangle(size.x, size.y);
        !self
            .spatial_query
            .shape_intersections(&shape, self.origin + offset, 0.0, filter)
            .is_empty()
    }

    fn mirrored(&self, offset: Vec2) -> Vec2 {
        if self.facing_right {
            offset
        } else {
            Vec2::new(-offset.x, offset.y)
        }
    }

    fn front_overlap(&self) -> bool {
        let offset = self.mirrored(self.layout.front_wall_offset);
        self.overlaps(offset, self.layout.wall_size, &self.wall_filter)
    }

    fn back_overlap(&self) -> bool {
        let offset = self.mirrored(self.layout.back_wall_offset);
        self.overlaps(offset, self.layout.wall_size, &self.wall_filter)
    }
}

impl GroundProbe for AvianProbes<'_, '_, '_> {
    fn is_grounded(&self) -> bool {
        self.overlaps(
            self.layout.ground_offset,
            self.layout.ground_size,
            &self.ground_filter,
        )
    }
}

impl WallProbe for AvianProbes<'_, '_, '_> {
    fn is_touching_front(&self, facing_right: bool) -> bool {
        facing_right && self.front_overlap()
    }

    fn is_touching_back(&self, facing_right: bool) -> bool {
        !facing_right && self.back_overlap()
    }
}
