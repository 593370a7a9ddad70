use crate::models::coordinate::Coordinate;

/// A titled, described marker. Fields are private so a `Place` cannot change
/// once it has been created.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    title: String,
    description: String,
    latitude: f64,
    longitude: f64,
}

impl Place {
    pub fn new(title: impl Into<String>, description: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Place {
            title: title.into(),
            description: description.into(),
            latitude,
            longitude,
        }
    }

    pub fn at(title: impl Into<String>, description: impl Into<String>, coordinate: Coordinate) -> Self {
        Self::new(title, description, coordinate.latitude, coordinate.longitude)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}
