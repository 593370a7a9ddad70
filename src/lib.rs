// Main module declarations for mymaps

// Entities
pub mod models {
    pub mod coordinate;
    pub mod place;
    pub mod map_collection;
}

// Persistence
pub mod storage {
    pub mod error;
    pub mod serialization;
    pub mod collection_store;
}

// Marker authoring
pub mod editing {
    pub mod validation;
    pub mod session;
}

// Orchestration
pub mod controller {
    pub mod collection_list;
}

// Collaborators driven by the core
pub mod surface {
    pub mod rendering;
    pub mod form;
    pub mod terminal;
}

// Configuration
pub mod config {
    pub mod constants;
    pub mod app_config;
    pub mod sample_data;
}

// Utility functions
pub mod utils {
    pub mod bounds;
    pub mod logging;
    pub mod csv_export;
}

// CLI interface
pub mod cli {
    pub mod cli;
    pub mod editor;
}

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use crate::controller::collection_list::{CollectionListController, ControllerError, ListItemActions};
pub use crate::editing::session::{LongPressOutcome, MapEditingSession};
pub use crate::editing::validation::ValidationError;
pub use crate::models::coordinate::Coordinate;
pub use crate::models::map_collection::MapCollection;
pub use crate::models::place::Place;
pub use crate::storage::collection_store::{CollectionStore, FileCollectionStore};
pub use crate::storage::error::StorageError;
