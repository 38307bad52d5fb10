//! Static catalog of the Peruvian regional capitals served by the dashboard.
//!
//! The catalog is fixed at compile time: seven cities, one per province,
//! each with hand-picked coordinates. It produces the display labels for the
//! location selector and the label-to-coordinate lookup used to drive a
//! forecast fetch.

use std::collections::HashMap;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
/// Both values are represented as `f64`.
///
/// # Examples
///
/// ```
/// use perucast::LatLon;
///
/// let arequipa = LatLon(-16.40, -71.54);
/// assert_eq!(arequipa.0, -16.40); // Latitude
/// assert_eq!(arequipa.1, -71.54); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// A city entry in the location catalog.
///
/// `(name, province)` pairs are unique within [`CITIES`]; coordinates are
/// fixed constants and never recomputed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    /// City name, e.g. "Trujillo".
    pub name: &'static str,
    /// Province the city belongs to, e.g. "La Libertad".
    pub province: &'static str,
    /// Fixed coordinate used for forecast requests.
    pub coordinate: LatLon,
}

impl City {
    /// Display label in the `"City (Province)"` form used by the selector.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.province)
    }
}

/// The full catalog, in selector order.
pub const CITIES: &[City] = &[
    City {
        name: "Cajamarca",
        province: "Cajamarca",
        coordinate: LatLon(-7.16, -78.52),
    },
    City {
        name: "Abancay",
        province: "Apurimac",
        coordinate: LatLon(-13.63, -72.88),
    },
    City {
        name: "Puerto Maldonado",
        province: "Madre de Dios",
        coordinate: LatLon(-12.60, -69.18),
    },
    City {
        name: "Trujillo",
        province: "La Libertad",
        coordinate: LatLon(-8.12, -79.03),
    },
    City {
        name: "Arequipa",
        province: "Arequipa",
        coordinate: LatLon(-16.40, -71.54),
    },
    City {
        name: "Huaraz",
        province: "Ancash",
        coordinate: LatLon(-9.53, -77.53),
    },
    City {
        name: "Ica",
        province: "Ica",
        coordinate: LatLon(-14.07, -75.73),
    },
];

/// Returns the display labels for every catalog city, in catalog order.
///
/// # Examples
///
/// ```
/// let labels = perucast::catalog::labels();
/// assert_eq!(labels[0], "Cajamarca (Cajamarca)");
/// assert_eq!(labels.len(), 7);
/// ```
pub fn labels() -> Vec<String> {
    CITIES.iter().map(City::label).collect()
}

/// Builds the label-to-coordinate lookup for the whole catalog.
pub fn lookup_table() -> HashMap<String, LatLon> {
    CITIES.iter().map(|c| (c.label(), c.coordinate)).collect()
}

/// Resolves one display label to its coordinate, if the label is known.
pub fn lookup(label: &str) -> Option<LatLon> {
    CITIES.iter().find(|c| c.label() == label).map(|c| c.coordinate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn labels_are_city_paren_province() {
        let labels = labels();
        assert_eq!(labels.len(), CITIES.len());
        assert!(labels.contains(&"Puerto Maldonado (Madre de Dios)".to_string()));
        assert!(labels.contains(&"Huaraz (Ancash)".to_string()));
    }

    #[test]
    fn labels_do_not_collide() {
        let unique: HashSet<String> = labels().into_iter().collect();
        assert_eq!(unique.len(), CITIES.len());
    }

    #[test]
    fn lookup_matches_catalog_coordinates() {
        let coordinate = lookup("Arequipa (Arequipa)").expect("catalog label must resolve");
        assert_eq!(coordinate, LatLon(-16.40, -71.54));
        assert!(lookup("Lima (Lima)").is_none());
    }

    #[test]
    fn lookup_table_covers_every_label() {
        let table = lookup_table();
        for city in CITIES {
            assert_eq!(table.get(&city.label()), Some(&city.coordinate));
        }
    }
}
