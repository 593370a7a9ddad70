// Storage
pub const DEFAULT_DATA_DIR: &str = ".mymaps";
pub const DATA_FILE_NAME: &str = "user_maps.json";
pub const DATA_DIR_ENV_VAR: &str = "MYMAPS_DATA_DIR";

// Camera position when a new map is opened for editing (Silicon Valley)
pub const EDIT_START_LATITUDE: f64 = 37.4;
pub const EDIT_START_LONGITUDE: f64 = -122.1;
pub const EDIT_START_ZOOM: f32 = 10.0;

// Padding around the places when a saved map is framed, in pixels
pub const FIT_BOUNDS_PADDING_PX: u32 = 100;

// Messages shown when user input is rejected
pub const EMPTY_MAP_TITLE_MESSAGE: &str = "Map must have a non-empty title";
pub const EMPTY_PLACE_DETAILS_MESSAGE: &str = "Place must have a non-empty title and description";
pub const NO_MARKERS_MESSAGE: &str = "There must be at least one map marker.";
