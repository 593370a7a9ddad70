use crate::models::coordinate::Coordinate;

/// A rectangular area on the globe specified by its southwest and northeast
/// edges in decimal degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    /// Longitude of the west side of the bounding box.
    pub west_longitude: f64,
    /// Latitude of the south side of the bounding box.
    pub south_latitude: f64,
    /// Longitude of the east side of the bounding box.
    pub east_longitude: f64,
    /// Latitude of the north side of the bounding box.
    pub north_latitude: f64,
}

impl BoundingBox {
    pub const fn new(
        west_longitude: f64,
        south_latitude: f64,
        east_longitude: f64,
        north_latitude: f64,
    ) -> Self {
        BoundingBox {
            west_longitude,
            south_latitude,
            east_longitude,
            north_latitude,
        }
    }

    /// Smallest box containing every coordinate, or `None` for an empty input.
    ///
    /// A single coordinate gives a zero-area box. Boxes never wrap across the
    /// antimeridian.
    pub fn from_coordinates<I>(coordinates: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut coordinates = coordinates.into_iter();
        let first = coordinates.next()?;
        let mut bbox = BoundingBox::new(first.longitude, first.latitude, first.longitude, first.latitude);
        for c in coordinates {
            bbox.include(c);
        }
        Some(bbox)
    }

    pub fn include(&mut self, coordinate: Coordinate) {
        self.west_longitude = self.west_longitude.min(coordinate.longitude);
        self.east_longitude = self.east_longitude.max(coordinate.longitude);
        self.south_latitude = self.south_latitude.min(coordinate.latitude);
        self.north_latitude = self.north_latitude.max(coordinate.latitude);
    }

    pub fn contains(&self, coordinate: Coordinate) -> bool {
        (self.west_longitude..=self.east_longitude).contains(&coordinate.longitude)
            && (self.south_latitude..=self.north_latitude).contains(&coordinate.latitude)
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.south_latitude + self.north_latitude) / 2.0,
            (self.west_longitude + self.east_longitude) / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_has_no_box() {
        assert_eq!(BoundingBox::from_coordinates(Vec::new()), None);
    }

    #[test]
    fn single_point_is_degenerate() {
        let bbox = BoundingBox::from_coordinates(vec![Coordinate::new(1.0, 2.0)]).unwrap();

        assert_eq!(bbox, BoundingBox::new(2.0, 1.0, 2.0, 1.0));
        assert_eq!(bbox.center(), Coordinate::new(1.0, 2.0));
    }

    #[test]
    fn covers_all_points() {
        let points = vec![
            Coordinate::new(37.426, -122.163),
            Coordinate::new(37.430, -122.173),
            Coordinate::new(37.444, -122.170),
        ];

        let bbox = BoundingBox::from_coordinates(points.clone()).unwrap();

        assert_eq!(bbox, BoundingBox::new(-122.173, 37.426, -122.163, 37.444));
        assert!(points.into_iter().all(|p| bbox.contains(p)));
        assert!(!bbox.contains(Coordinate::new(0.0, 0.0)));
    }
}
