//! Named places the globe knows about.

use ahash::AHashMap;
use cityglobe_types::geo::GeoPoint2d;
use cityglobe_types::lonlat;
use serde::{Deserialize, Serialize};

use crate::error::GlobeError;

/// A named geographic point with display metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceRecord {
    name: String,
    coordinate: GeoPoint2d,
    city: String,
    state: String,
}

impl PlaceRecord {
    /// Creates a new record.
    pub fn new(
        name: impl Into<String>,
        coordinate: GeoPoint2d,
        city: impl Into<String>,
        state: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            coordinate,
            city: city.into(),
            state: state.into(),
        }
    }

    /// Unique key of the place.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Location of the place.
    pub fn coordinate(&self) -> GeoPoint2d {
        self.coordinate
    }

    /// City the place is in.
    pub fn city(&self) -> &str {
        &self.city
    }

    /// State the place is in.
    pub fn state(&self) -> &str {
        &self.state
    }
}

/// Serialized form of a [`PlaceRecord`], as found in configuration files.
///
/// ```json
/// { "name": "Denver", "coord": [-104.9903, 39.7392], "city": "Denver", "state": "Colorado" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceEntry {
    /// Unique key of the place.
    pub name: String,
    /// `[longitude, latitude]` in degrees.
    pub coord: [f64; 2],
    /// City the place is in.
    pub city: String,
    /// State the place is in.
    pub state: String,
}

impl TryFrom<PlaceEntry> for PlaceRecord {
    type Error = GlobeError;

    fn try_from(entry: PlaceEntry) -> Result<Self, Self::Error> {
        let [lon, lat] = entry.coord;
        let coordinate = GeoPoint2d::try_from_lonlat(lon, lat)?;
        Ok(Self::new(entry.name, coordinate, entry.city, entry.state))
    }
}

impl From<&PlaceRecord> for PlaceEntry {
    fn from(record: &PlaceRecord) -> Self {
        Self {
            name: record.name.clone(),
            coord: record.coordinate.to_lonlat(),
            city: record.city.clone(),
            state: record.state.clone(),
        }
    }
}

/// Ordered, immutable table of places keyed by name.
///
/// Iteration order is the order the records were given in. Lookups are exact and
/// case-sensitive: `"denver"` does not find `"Denver"`.
#[derive(Debug, Clone)]
pub struct LocationRegistry {
    records: Vec<PlaceRecord>,
    index: AHashMap<String, usize>,
}

impl LocationRegistry {
    /// Creates a registry from the given records.
    ///
    /// Fails with [`GlobeError::DuplicatePlace`] if two records share a name.
    pub fn new(records: impl IntoIterator<Item = PlaceRecord>) -> Result<Self, GlobeError> {
        let records: Vec<PlaceRecord> = records.into_iter().collect();
        let mut index = AHashMap::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            if index.insert(record.name.clone(), position).is_some() {
                return Err(GlobeError::DuplicatePlace(record.name.clone()));
            }
        }

        Ok(Self { records, index })
    }

    /// Creates a registry from configuration entries.
    pub fn from_entries(entries: impl IntoIterator<Item = PlaceEntry>) -> Result<Self, GlobeError> {
        let records = entries
            .into_iter()
            .map(PlaceRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(records)
    }

    /// Returns the record stored under `name`.
    pub fn lookup(&self, name: &str) -> Result<&PlaceRecord, GlobeError> {
        self.index
            .get(name)
            .and_then(|&position| self.records.get(position))
            .ok_or_else(|| GlobeError::LocationNotFound(name.to_string()))
    }

    /// Iterates over the records in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &PlaceRecord> + '_ {
        self.records.iter()
    }

    /// All records in registry order.
    pub fn records(&self) -> &[PlaceRecord] {
        &self.records
    }

    /// Number of places.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the registry has no places.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for LocationRegistry {
    /// Front Range and Wyoming cities shown by the demo.
    fn default() -> Self {
        let records = vec![
            PlaceRecord::new("Denver", lonlat!(-104.9903, 39.7392), "Denver", "Colorado"),
            PlaceRecord::new("Cheyenne", lonlat!(-104.8202, 41.1399), "Cheyenne", "Wyoming"),
            PlaceRecord::new("Casper", lonlat!(-106.3131, 42.8666), "Casper", "Wyoming"),
            PlaceRecord::new("Laramie", lonlat!(-105.5911, 41.3114), "Laramie", "Wyoming"),
        ];
        let index = records
            .iter()
            .enumerate()
            .map(|(position, record)| (record.name.clone(), position))
            .collect();

        Self { records, index }
    }
}

impl<'a> IntoIterator for &'a LocationRegistry {
    type Item = &'a PlaceRecord;
    type IntoIter = std::slice::Iter<'a, PlaceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
