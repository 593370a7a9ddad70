use crate::models::coordinate::Coordinate;

#[derive(Debug, Clone, PartialEq)]
pub enum FormResponse {
    Confirmed { title: String, description: String },
    Cancelled,
}

/// Dialog that asks the user to describe a new marker.
pub trait PlaceForm {
    fn request_place_details(&mut self, coordinate: Coordinate) -> FormResponse;
}

impl<F: PlaceForm + ?Sized> PlaceForm for &mut F {
    fn request_place_details(&mut self, coordinate: Coordinate) -> FormResponse {
        (**self).request_place_details(coordinate)
    }
}
