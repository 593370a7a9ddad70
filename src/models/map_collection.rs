use crate::models::coordinate::Coordinate;
use crate::models::place::Place;

/// A named group of places, built once and never mutated afterwards.
///
/// The entity does not validate its title or require places; both rules are
/// enforced by the editing session and the controller before a collection is
/// persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct MapCollection {
    title: String,
    description: Option<String>,
    places: Vec<Place>,
}

impl MapCollection {
    pub fn new(title: impl Into<String>, description: Option<String>, places: Vec<Place>) -> Self {
        MapCollection {
            title: title.into(),
            description,
            places,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    pub fn place_count(&self) -> usize {
        self.places.len()
    }

    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> + '_ {
        self.places.iter().map(Place::coordinate)
    }
}
