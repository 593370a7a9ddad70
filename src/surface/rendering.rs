use std::fmt;

use crate::models::coordinate::Coordinate;
use crate::utils::bounds::BoundingBox;

/// Opaque identifier for a marker drawn by a [`RenderingSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(u64);

impl MarkerHandle {
    pub const fn new(id: u64) -> Self {
        MarkerHandle(id)
    }
}

impl fmt::Display for MarkerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The map widget the core draws on. Gestures flow the other way: whoever
/// owns the surface forwards long-presses and info-window taps to the
/// editing session.
pub trait RenderingSurface {
    fn place_marker(&mut self, coordinate: Coordinate, title: &str, description: &str) -> MarkerHandle;
    fn remove_marker(&mut self, handle: MarkerHandle);
    fn move_camera(&mut self, coordinate: Coordinate, zoom: f32);
    fn fit_bounds(&mut self, bounds: BoundingBox, padding_px: u32);
}

impl<S: RenderingSurface + ?Sized> RenderingSurface for &mut S {
    fn place_marker(&mut self, coordinate: Coordinate, title: &str, description: &str) -> MarkerHandle {
        (**self).place_marker(coordinate, title, description)
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        (**self).remove_marker(handle)
    }

    fn move_camera(&mut self, coordinate: Coordinate, zoom: f32) {
        (**self).move_camera(coordinate, zoom)
    }

    fn fit_bounds(&mut self, bounds: BoundingBox, padding_px: u32) {
        (**self).fit_bounds(bounds, padding_px)
    }
}
