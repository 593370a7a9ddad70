//! On-disk format for saved map collections.
//!
//! Entities never derive serde traits themselves. They are converted to the
//! `Serializable*` records below, wrapped in a versioned envelope and written
//! as JSON, so the file layout stays under our control when the entities
//! change.

use serde::{Deserialize, Serialize};

use crate::models::map_collection::MapCollection;
use crate::models::place::Place;
use crate::storage::error::StorageError;

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
pub struct SerializablePlace {
    pub title: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SerializableMapCollection {
    pub title: String,
    pub description: Option<String>,
    pub places: Vec<SerializablePlace>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SerializableCollections {
    pub version: u32,
    pub collections: Vec<SerializableMapCollection>,
}

impl From<&Place> for SerializablePlace {
    fn from(place: &Place) -> Self {
        SerializablePlace {
            title: place.title().to_string(),
            description: place.description().to_string(),
            latitude: place.latitude(),
            longitude: place.longitude(),
        }
    }
}

impl From<SerializablePlace> for Place {
    fn from(record: SerializablePlace) -> Self {
        Place::new(record.title, record.description, record.latitude, record.longitude)
    }
}

impl From<&MapCollection> for SerializableMapCollection {
    fn from(collection: &MapCollection) -> Self {
        SerializableMapCollection {
            title: collection.title().to_string(),
            description: collection.description().map(str::to_string),
            places: collection.places().iter().map(SerializablePlace::from).collect(),
        }
    }
}

impl From<SerializableMapCollection> for MapCollection {
    fn from(record: SerializableMapCollection) -> Self {
        MapCollection::new(
            record.title,
            record.description,
            record.places.into_iter().map(Place::from).collect(),
        )
    }
}

/// Reasons a stored document could not be turned back into collections.
#[derive(Debug)]
pub enum DecodeError {
    Malformed(serde_json::Error),
    UnsupportedVersion(u32),
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::Malformed(e) => write!(f, "malformed document: {}", e),
            DecodeError::UnsupportedVersion(v) => {
                write!(f, "unsupported format version {} (expected {})", v, FORMAT_VERSION)
            }
        }
    }
}

impl std::error::Error for DecodeError {}

pub fn encode(collections: &[MapCollection]) -> Result<String, StorageError> {
    // serde_json turns NaN and infinities into `null`, which would not load back.
    if let Some(bad) = collections
        .iter()
        .flat_map(|c| c.places())
        .find(|p| !p.coordinate().is_finite())
    {
        return Err(StorageError::Encode(<serde_json::Error as serde::ser::Error>::custom(
            format!("place \"{}\" has a non-finite coordinate", bad.title()),
        )));
    }

    let document = SerializableCollections {
        version: FORMAT_VERSION,
        collections: collections.iter().map(SerializableMapCollection::from).collect(),
    };

    Ok(serde_json::to_string_pretty(&document)?)
}

pub fn decode(contents: &str) -> Result<Vec<MapCollection>, DecodeError> {
    let document: SerializableCollections =
        serde_json::from_str(contents).map_err(DecodeError::Malformed)?;

    if document.version != FORMAT_VERSION {
        return Err(DecodeError::UnsupportedVersion(document.version));
    }

    Ok(document.collections.into_iter().map(MapCollection::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_versioned_envelope() {
        let collections = vec![MapCollection::new(
            "Trip",
            Some("desc".to_string()),
            vec![Place::new("A", "d", 1.0, 2.0)],
        )];

        let json = encode(&collections).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["version"], 1);
        assert_eq!(value["collections"][0]["title"], "Trip");
        assert_eq!(value["collections"][0]["description"], "desc");
        assert_eq!(value["collections"][0]["places"][0]["latitude"], 1.0);
        assert_eq!(value["collections"][0]["places"][0]["longitude"], 2.0);
    }

    #[test]
    fn missing_description_is_null() {
        let json = encode(&[MapCollection::new("Untitled", None, vec![])]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value["collections"][0]["description"].is_null());
        assert_eq!(decode(&json).unwrap()[0].description(), None);
    }

    #[test]
    fn preserves_awkward_values() {
        let collections = vec![
            MapCollection::new(
                "Same title",
                Some(String::new()),
                vec![
                    Place::new("Quote \"here\"", "line\nbreak", -89.999999999, 179.123456789012),
                    Place::new("Ünïcødé", "日本", 0.1 + 0.2, -0.0),
                ],
            ),
            MapCollection::new("Same title", None, vec![]),
        ];

        let decoded = decode(&encode(&collections).unwrap()).unwrap();

        assert_eq!(decoded, collections);
    }

    #[test]
    fn rejects_non_finite_coordinates() {
        let collections = vec![MapCollection::new(
            "Broken",
            None,
            vec![Place::new("nan", "nan", f64::NAN, 0.0)],
        )];

        assert!(matches!(encode(&collections), Err(StorageError::Encode(_))));
    }

    #[test]
    fn rejects_unknown_version() {
        let json = r#"{"version": 2, "collections": []}"#;

        assert!(matches!(decode(json), Err(DecodeError::UnsupportedVersion(2))));
    }

    #[test]
    fn rejects_wrong_shape() {
        assert!(matches!(decode("[]"), Err(DecodeError::Malformed(_))));
        assert!(matches!(decode("not json"), Err(DecodeError::Malformed(_))));
        assert!(matches!(
            decode(r#"{"version": 1, "collections": [{"title": "x"}]}"#),
            Err(DecodeError::Malformed(_))
        ));
    }
}
