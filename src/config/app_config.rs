use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::config::constants::*;
use crate::models::coordinate::Coordinate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    pub start: Coordinate,
    pub start_zoom: f32,
    pub fit_padding_px: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub data_file_name: String,
    pub camera: CameraConfig,
}

impl AppConfig {
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    pub fn data_file_path(&self) -> PathBuf {
        self.data_dir.join(&self.data_file_name)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            data_file_name: DATA_FILE_NAME.to_string(),
            camera: CameraConfig {
                start: Coordinate::new(EDIT_START_LATITUDE, EDIT_START_LONGITUDE),
                start_zoom: EDIT_START_ZOOM,
                fit_padding_px: FIT_BOUNDS_PADDING_PX,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_file_lives_in_data_dir() {
        let config = AppConfig::with_data_dir("/tmp/maps");

        assert_eq!(config.data_file_path(), PathBuf::from("/tmp/maps/user_maps.json"));
        assert_eq!(config.camera.start, Coordinate::new(37.4, -122.1));
        assert_eq!(config.camera.start_zoom, 10.0);
    }
}
