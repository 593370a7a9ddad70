use tracing::{debug, info, warn};

use crate::config::app_config::AppConfig;
use crate::editing::validation::{validate_place_details, ValidationError};
use crate::models::coordinate::Coordinate;
use crate::models::map_collection::MapCollection;
use crate::models::place::Place;
use crate::surface::form::{FormResponse, PlaceForm};
use crate::surface::rendering::{MarkerHandle, RenderingSurface};
use crate::utils::logging::{self, EditingOpType, OperationCategory};

/// What happened to a long-press on the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LongPressOutcome {
    Added(MarkerHandle),
    Cancelled,
    /// The form came back with a blank field; show the message and carry on.
    Rejected(ValidationError),
}

/// Accumulates the places of one new map while the user edits it.
///
/// The session owns the surface it draws markers on. Each pending place is
/// paired with the handle of its marker so that tapping the marker's info
/// window can remove both.
pub struct MapEditingSession<S: RenderingSurface> {
    surface: S,
    pending: Vec<(Place, MarkerHandle)>,
}

impl<S: RenderingSurface> MapEditingSession<S> {
    pub fn new(surface: S) -> Self {
        MapEditingSession {
            surface,
            pending: Vec::new(),
        }
    }

    /// Opens a session with the camera at the configured starting point.
    pub fn start(mut surface: S, config: &AppConfig) -> Self {
        surface.move_camera(config.camera.start, config.camera.start_zoom);
        Self::new(surface)
    }

    #[tracing::instrument(name = "MapEditingSession::on_long_press", skip(self, form))]
    pub fn on_long_press<F: PlaceForm>(&mut self, coordinate: Coordinate, form: &mut F) -> LongPressOutcome {
        let _timing = logging::start_timing("MapEditingSession::on_long_press",
            OperationCategory::Editing { subcategory: EditingOpType::Gesture });

        let (title, description) = match form.request_place_details(coordinate) {
            FormResponse::Confirmed { title, description } => (title, description),
            FormResponse::Cancelled => {
                debug!("marker dialog cancelled");
                return LongPressOutcome::Cancelled;
            }
        };

        if let Err(e) = validate_place_details(&title, &description) {
            warn!(%e, "rejected marker details");
            return LongPressOutcome::Rejected(e);
        }

        let handle = self.surface.place_marker(coordinate, &title, &description);
        self.pending.push((Place::at(title, description, coordinate), handle));
        debug!(%handle, pending = self.pending.len(), "added marker");

        LongPressOutcome::Added(handle)
    }

    /// Removes the place behind `handle`. Unknown handles are ignored.
    #[tracing::instrument(name = "MapEditingSession::on_marker_info_tap", skip(self))]
    pub fn on_marker_info_tap(&mut self, handle: MarkerHandle) -> Option<Place> {
        let _timing = logging::start_timing("MapEditingSession::on_marker_info_tap",
            OperationCategory::Editing { subcategory: EditingOpType::Gesture });

        let Some(index) = self.pending.iter().position(|(_, h)| *h == handle) else {
            debug!(%handle, "tap on unknown marker ignored");
            return None;
        };

        let (place, handle) = self.pending.remove(index);
        self.surface.remove_marker(handle);
        debug!(%handle, pending = self.pending.len(), "removed marker");

        Some(place)
    }

    /// Builds the finished map. Fails without touching the session when no
    /// markers have been placed, so the user can keep editing.
    pub fn commit(&self, title: &str, description: Option<&str>) -> Result<MapCollection, ValidationError> {
        let _timing = logging::start_timing("MapEditingSession::commit",
            OperationCategory::Editing { subcategory: EditingOpType::Commit });

        if self.pending.is_empty() {
            warn!(title, "refusing to save a map without markers");
            return Err(ValidationError::NoMarkers);
        }

        let places = self.pending.iter().map(|(place, _)| place.clone()).collect();
        info!(title, places = self.pending.len(), "committed map");

        Ok(MapCollection::new(title, description.map(str::to_string), places))
    }

    pub fn places(&self) -> impl Iterator<Item = (&Place, MarkerHandle)> + '_ {
        self.pending.iter().map(|(place, handle)| (place, *handle))
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }
}
