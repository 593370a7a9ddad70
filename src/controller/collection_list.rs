use std::fmt;

use tracing::{info, warn};

use crate::config::app_config::AppConfig;
use crate::editing::session::MapEditingSession;
use crate::editing::validation::{validate_map_title, ValidationError};
use crate::models::map_collection::MapCollection;
use crate::storage::collection_store::CollectionStore;
use crate::storage::error::StorageError;
use crate::surface::rendering::RenderingSurface;
use crate::utils::bounds::BoundingBox;
use crate::utils::logging::{self, CollectionOpType, OperationCategory};

#[derive(Debug)]
pub enum ControllerError {
    Validation(ValidationError),
    Storage(StorageError),
    /// The caller passed an index that does not exist. Indicates a driving
    /// bug, not a user mistake.
    IndexOutOfRange { index: usize, len: usize },
}

impl fmt::Display for ControllerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControllerError::Validation(e) => write!(f, "{}", e),
            ControllerError::Storage(e) => write!(f, "{}", e),
            ControllerError::IndexOutOfRange { index, len } => {
                write!(f, "No map at index {} (there are {})", index, len)
            }
        }
    }
}

impl std::error::Error for ControllerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ControllerError::Validation(e) => Some(e),
            ControllerError::Storage(e) => Some(e),
            ControllerError::IndexOutOfRange { .. } => None,
        }
    }
}

impl From<ValidationError> for ControllerError {
    fn from(err: ValidationError) -> Self {
        ControllerError::Validation(err)
    }
}

impl From<StorageError> for ControllerError {
    fn from(err: StorageError) -> Self {
        ControllerError::Storage(err)
    }
}

/// Title and description accepted by the "create new map" dialog.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionDraft {
    pub title: String,
    pub description: Option<String>,
}

/// What a row in the map list can ask for.
pub trait ListItemActions {
    type Output;

    fn on_select(&mut self, index: usize) -> Result<Self::Output, ControllerError>;
    fn on_delete(&mut self, index: usize) -> Result<MapCollection, ControllerError>;
}

/// Owns the list of saved maps and the store behind it.
///
/// Every mutation updates the in-memory list first and then rewrites the
/// whole store. If the write fails the in-memory list is kept as the truth
/// and [`persist`](Self::persist) can be used to try again.
pub struct CollectionListController<S: CollectionStore> {
    store: S,
    config: AppConfig,
    collections: Vec<MapCollection>,
    unsaved: bool,
}

impl<S: CollectionStore> CollectionListController<S> {
    pub fn new(store: S, config: AppConfig) -> Self {
        CollectionListController {
            store,
            config,
            collections: Vec::new(),
            unsaved: false,
        }
    }

    /// Loads the saved maps. A corrupt store is returned as an error and the
    /// list stays empty; nothing is written back.
    pub fn initialize(&mut self) -> Result<&[MapCollection], StorageError> {
        let collections = self.store.load()?;
        info!(count = collections.len(), "initialised map list");
        self.collections = collections;
        self.unsaved = false;
        Ok(&self.collections)
    }

    pub fn validate_new_collection(&self, title: &str, description: &str) -> Result<CollectionDraft, ValidationError> {
        validate_map_title(title)?;
        Ok(CollectionDraft {
            title: title.to_string(),
            description: if description.is_empty() { None } else { Some(description.to_string()) },
        })
    }

    #[tracing::instrument(name = "CollectionListController::create_collection", skip(self, session))]
    pub fn create_collection<R: RenderingSurface>(
        &mut self,
        session: &MapEditingSession<R>,
        title: &str,
        description: Option<&str>,
    ) -> Result<&MapCollection, ControllerError> {
        let _timing = logging::start_timing("CollectionListController::create_collection",
            OperationCategory::Collections { subcategory: CollectionOpType::Create });

        validate_map_title(title)?;
        let collection = session.commit(title, description)?;

        self.collections.push(collection);
        info!(count = self.collections.len(), "added map");
        self.save()?;

        let index = self.collections.len() - 1;
        Ok(&self.collections[index])
    }

    #[tracing::instrument(name = "CollectionListController::delete_collection", skip(self))]
    pub fn delete_collection(&mut self, index: usize) -> Result<MapCollection, ControllerError> {
        let _timing = logging::start_timing("CollectionListController::delete_collection",
            OperationCategory::Collections { subcategory: CollectionOpType::Delete });

        self.check_index(index)?;
        let removed = self.collections.remove(index);
        info!(title = removed.title(), remaining = self.collections.len(), "deleted map");

        // The removal stands even if the write fails; `persist` retries it.
        if let Err(e) = self.save() {
            warn!(%e, "deleted map is not yet saved");
            return Err(e.into());
        }
        Ok(removed)
    }

    /// Draws every place of the map on `surface` and frames them.
    #[tracing::instrument(name = "CollectionListController::view_collection", skip(self, surface))]
    pub fn view_collection<R: RenderingSurface>(
        &self,
        index: usize,
        surface: &mut R,
    ) -> Result<&MapCollection, ControllerError> {
        let _timing = logging::start_timing("CollectionListController::view_collection",
            OperationCategory::Collections { subcategory: CollectionOpType::View });

        self.check_index(index)?;
        let collection = &self.collections[index];

        for place in collection.places() {
            surface.place_marker(place.coordinate(), place.title(), place.description());
        }
        if let Some(bounds) = BoundingBox::from_coordinates(collection.coordinates()) {
            surface.fit_bounds(bounds, self.config.camera.fit_padding_px);
        }

        Ok(collection)
    }

    /// Appends already-built maps, e.g. the bundled samples, and saves.
    pub fn extend_collections<I>(&mut self, collections: I) -> Result<usize, StorageError>
    where
        I: IntoIterator<Item = MapCollection>,
    {
        let before = self.collections.len();
        self.collections.extend(collections);
        self.save()?;
        Ok(self.collections.len() - before)
    }

    /// Writes the current list again, e.g. after an earlier save failed.
    pub fn persist(&mut self) -> Result<(), StorageError> {
        self.save()
    }

    pub fn collections(&self) -> &[MapCollection] {
        &self.collections
    }

    pub fn get(&self, index: usize) -> Result<&MapCollection, ControllerError> {
        self.check_index(index)?;
        Ok(&self.collections[index])
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn save(&mut self) -> Result<(), StorageError> {
        match self.store.save_all(&self.collections) {
            Ok(()) => {
                self.unsaved = false;
                Ok(())
            }
            Err(e) => {
                self.unsaved = true;
                warn!(%e, "saving maps failed, keeping changes in memory");
                Err(e)
            }
        }
    }

    fn check_index(&self, index: usize) -> Result<(), ControllerError> {
        if index >= self.collections.len() {
            return Err(ControllerError::IndexOutOfRange { index, len: self.collections.len() });
        }
        Ok(())
    }
}

/// List rows forwarded to a controller paired with the surface a selected
/// map is shown on.
pub struct ListNavigator<'a, S: CollectionStore, R: RenderingSurface> {
    pub controller: &'a mut CollectionListController<S>,
    pub surface: &'a mut R,
}

impl<'a, S: CollectionStore, R: RenderingSurface> ListItemActions for ListNavigator<'a, S, R> {
    type Output = MapCollection;

    fn on_select(&mut self, index: usize) -> Result<MapCollection, ControllerError> {
        self.controller.view_collection(index, &mut *self.surface).cloned()
    }

    fn on_delete(&mut self, index: usize) -> Result<MapCollection, ControllerError> {
        self.controller.delete_collection(index)
    }
}
