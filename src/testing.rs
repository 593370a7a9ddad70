//! Collaborator fakes shared by the unit tests.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::path::PathBuf;

use crate::models::coordinate::Coordinate;
use crate::models::map_collection::MapCollection;
use crate::storage::collection_store::CollectionStore;
use crate::storage::error::StorageError;
use crate::surface::form::{FormResponse, PlaceForm};
use crate::surface::rendering::{MarkerHandle, RenderingSurface};
use crate::utils::bounds::BoundingBox;

#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    PlaceMarker { handle: MarkerHandle, coordinate: Coordinate, title: String, description: String },
    RemoveMarker(MarkerHandle),
    MoveCamera(Coordinate, f32),
    FitBounds(BoundingBox, u32),
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<SurfaceCall>,
    next_id: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_markers(&self) -> Vec<MarkerHandle> {
        let mut live = Vec::new();
        for call in &self.calls {
            match call {
                SurfaceCall::PlaceMarker { handle, .. } => live.push(*handle),
                SurfaceCall::RemoveMarker(handle) => live.retain(|h| h != handle),
                _ => {}
            }
        }
        live
    }
}

impl RenderingSurface for RecordingSurface {
    fn place_marker(&mut self, coordinate: Coordinate, title: &str, description: &str) -> MarkerHandle {
        self.next_id += 1;
        let handle = MarkerHandle::new(self.next_id);
        self.calls.push(SurfaceCall::PlaceMarker {
            handle,
            coordinate,
            title: title.to_string(),
            description: description.to_string(),
        });
        handle
    }

    fn remove_marker(&mut self, handle: MarkerHandle) {
        self.calls.push(SurfaceCall::RemoveMarker(handle));
    }

    fn move_camera(&mut self, coordinate: Coordinate, zoom: f32) {
        self.calls.push(SurfaceCall::MoveCamera(coordinate, zoom));
    }

    fn fit_bounds(&mut self, bounds: BoundingBox, padding_px: u32) {
        self.calls.push(SurfaceCall::FitBounds(bounds, padding_px));
    }
}

/// Answers form requests from a queue; an exhausted queue cancels.
#[derive(Debug, Default)]
pub struct ScriptedForm {
    responses: VecDeque<FormResponse>,
    pub requested_at: Vec<Coordinate>,
}

impl ScriptedForm {
    pub fn confirming(entries: &[(&str, &str)]) -> Self {
        ScriptedForm {
            responses: entries
                .iter()
                .map(|(title, description)| FormResponse::Confirmed {
                    title: title.to_string(),
                    description: description.to_string(),
                })
                .collect(),
            requested_at: Vec::new(),
        }
    }
}

impl PlaceForm for ScriptedForm {
    fn request_place_details(&mut self, coordinate: Coordinate) -> FormResponse {
        self.requested_at.push(coordinate);
        self.responses.pop_front().unwrap_or(FormResponse::Cancelled)
    }
}

/// In-memory store that can be told to fail.
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub saved: RefCell<Option<Vec<MapCollection>>>,
    pub fail_writes: Cell<bool>,
    pub corrupt: Cell<bool>,
    pub save_count: Cell<usize>,
}

impl MemoryStore {
    pub fn with(collections: Vec<MapCollection>) -> Self {
        let store = MemoryStore::default();
        *store.saved.borrow_mut() = Some(collections);
        store
    }

    pub fn snapshot(&self) -> Vec<MapCollection> {
        self.saved.borrow().clone().unwrap_or_default()
    }
}

impl CollectionStore for MemoryStore {
    fn load(&self) -> Result<Vec<MapCollection>, StorageError> {
        if self.corrupt.get() {
            return Err(StorageError::Corrupt {
                path: PathBuf::from("memory"),
                reason: "corrupt for test".to_string(),
            });
        }
        Ok(self.snapshot())
    }

    fn save_all(&self, collections: &[MapCollection]) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Write {
                path: PathBuf::from("memory"),
                source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
            });
        }
        self.save_count.set(self.save_count.get() + 1);
        *self.saved.borrow_mut() = Some(collections.to_vec());
        Ok(())
    }
}
