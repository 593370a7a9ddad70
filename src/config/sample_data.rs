use crate::models::map_collection::MapCollection;
use crate::models::place::Place;

/// Demo collections for a fresh install.
pub fn sample_collections() -> Vec<MapCollection> {
    vec![
        MapCollection::new(
            "Memories from University",
            Some("Favorite places from my time at Stanford".to_string()),
            vec![
                Place::new("Branner Hall", "Best dorm at Stanford", 37.426, -122.163),
                Place::new("Gates CS building", "Many long nights in this basement", 37.430, -122.173),
                Place::new("Pinkberry", "First date with my wife", 37.444, -122.170),
            ],
        ),
        MapCollection::new(
            "January vacation planning!",
            Some("Places I want to go during vacation".to_string()),
            vec![
                Place::new("Tokyo", "Overnight layover", 35.67, 139.65),
                Place::new("Ranchi", "Family visit + wedding!", 23.34, 85.31),
                Place::new("Singapore", "Inspired by \"Crazy Rich Asians\"", 1.35, 103.82),
            ],
        ),
        MapCollection::new(
            "Singapore travel itinerary",
            Some("Places I want to go in Singapore".to_string()),
            vec![
                Place::new("Gardens by the Bay", "Amazing urban nature park", 1.282, 103.864),
                Place::new("Jurong Bird Park", "Family-friendly park with many varieties of birds", 1.319, 103.706),
                Place::new("Sentosa", "Island resort with panoramic views", 1.249, 103.830),
                Place::new("Botanic Gardens", "One of the world's greatest tropical gardens", 1.3138, 103.8159),
            ],
        ),
        MapCollection::new(
            "My favorite places in the Midwest",
            Some("Places I loved in Wisconsin".to_string()),
            vec![
                Place::new("Chicago", "Urban center of the midwest, the \"Windy City\"", 41.878, -87.630),
                Place::new("Rochester, Michigan", "The best of Detroit suburbia", 42.681, -83.134),
                Place::new("Mackinaw City", "The entrance into the Upper Peninsula", 45.777, -84.727),
                Place::new("Michigan State University", "Home to the Spartans", 42.701, -84.482),
                Place::new("University of Michigan", "Home to the Wolverines", 42.278, -83.738),
            ],
        ),
        MapCollection::new(
            "Restaurants to try",
            Some("I want to eat here".to_string()),
            vec![
                Place::new("Champ's Diner", "Retro diner in Brooklyn", 40.709, -73.941),
                Place::new("Althea", "Chicago upscale dining with an amazing view", 41.895, -87.625),
                Place::new("Shizen", "Elegant sushi in San Francisco", 37.768, -122.422),
                Place::new("Citizen Eatery", "Bright cafe in Austin with a pink rabbit", 30.322, -97.739),
                Place::new("Kati Thai", "Authentic Portland Thai food, served with love", 45.505, -122.635),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_satisfy_persistence_rules() {
        let samples = sample_collections();

        assert_eq!(samples.len(), 5);
        for collection in &samples {
            assert!(!collection.title().trim().is_empty());
            assert!(collection.place_count() > 0);
            for place in collection.places() {
                assert!(!place.title().trim().is_empty());
                assert!(!place.description().trim().is_empty());
            }
        }
    }
}
