//! Parking location model and the built-in demo catalogue

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Reference point user-added locations are scattered around
pub const REFERENCE_POINT: Coordinates = Coordinates {
    lat: 40.7128,
    lng: -74.0060,
};

/// Total width of the jitter window, in degrees
const JITTER_SPAN: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// A random point within half a jitter span of `center` on each axis
    pub fn jittered<R: Rng + ?Sized>(center: Coordinates, rng: &mut R) -> Self {
        Self {
            lat: center.lat + (rng.gen::<f64>() - 0.5) * JITTER_SPAN,
            lng: center.lng + (rng.gen::<f64>() - 0.5) * JITTER_SPAN,
        }
    }
}

/// A parking location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub address: String,
    pub price: f64,
    pub slots: u32,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub reviews: f32,
    #[serde(default)]
    pub features: Vec<String>,
    pub coordinates: Coordinates,
}

/// Caller-supplied fields for a new location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewLocation {
    pub name: String,
    pub address: String,
    pub price: f64,
    pub slots: u32,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub reviews: f32,
    #[serde(default)]
    pub features: Vec<String>,
}

impl NewLocation {
    pub fn into_location(self, id: String, coordinates: Coordinates) -> Location {
        Location {
            id,
            name: self.name,
            address: self.address,
            price: self.price,
            slots: self.slots,
            image: self.image,
            desc: self.desc,
            reviews: self.reviews,
            features: self.features,
            coordinates,
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn seed(
    id: &str,
    name: &str,
    address: &str,
    price: f64,
    slots: u32,
    image: &str,
    desc: &str,
    reviews: f32,
    features: &[&str],
    (lat, lng): (f64, f64),
) -> Location {
    Location {
        id: id.to_string(),
        name: name.to_string(),
        address: address.to_string(),
        price,
        slots,
        image: image.to_string(),
        desc: desc.to_string(),
        reviews,
        features: features.iter().map(|f| f.to_string()).collect(),
        coordinates: Coordinates { lat, lng },
    }
}

/// The demo catalogue bundled with the application
pub fn seed_locations() -> Vec<Location> {
    vec![
        seed(
            "loc_001",
            "Central Plaza Garage",
            "123 Main St, Downtown",
            5.00,
            12,
            "https://images.unsplash.com/photo-1470224114660-3f6686c562eb?q=80&w=600&auto=format&fit=crop",
            "Secure multi-level parking with EV charging stations. Located right next to the Central Business District.",
            4.5,
            &["Covered", "CCTV", "EV Charging", "24/7 Access"],
            (40.7128, -74.0060),
        ),
        seed(
            "loc_002",
            "Mall of ParkEase",
            "456 Market Ave, Westside",
            3.50,
            45,
            "https://images.unsplash.com/photo-1573348722427-f1d6819fdf98?q=80&w=600&auto=format&fit=crop",
            "Direct access to shopping mall. First hour free on weekends. Spacious spots suitable for SUVs.",
            4.2,
            &["Covered", "Disabled Access", "Car Wash"],
            (40.7282, -73.7949),
        ),
        seed(
            "loc_003",
            "Airport Long-Term",
            "789 Airport Blvd",
            12.00,
            8,
            "https://images.unsplash.com/photo-1590674899505-1c5c41949430?q=80&w=600&auto=format&fit=crop",
            "Open-air lot with shuttle service to terminals every 15 minutes. Fenced and guarded.",
            3.8,
            &["Shuttle", "Fenced", "Long Term"],
            (40.6413, -73.7781),
        ),
        seed(
            "loc_004",
            "Stadium Event Parking",
            "101 Sports Way",
            8.00,
            0,
            "https://images.unsplash.com/photo-1506521781263-d8422e82f27a?q=80&w=600&auto=format&fit=crop",
            "Closest parking to the arena. Pre-booking mandatory during events. Tailgating allowed.",
            4.8,
            &["Event Rates", "Open Air", "Lighting"],
            (40.8296, -73.9262),
        ),
        seed(
            "loc_005",
            "Riverside Parking",
            "22 River Rd, Northside",
            4.00,
            20,
            "https://images.unsplash.com/photo-1486406146926-c627a92ad1ab?q=80&w=600&auto=format&fit=crop",
            "Scenic parking spot near the river walk. Perfect for joggers and tourists.",
            4.6,
            &["Scenic", "Paved", "24/7 Access"],
            (40.8000, -74.0000),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_ids_are_unique() {
        let seeds = seed_locations();
        assert_eq!(seeds.len(), 5);
        let mut ids: Vec<_> = seeds.iter().map(|l| l.id.as_str()).collect();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn test_stadium_starts_full() {
        let stadium = seed_locations()
            .into_iter()
            .find(|l| l.id == "loc_004")
            .unwrap();
        assert_eq!(stadium.slots, 0);
    }

    #[test]
    fn test_jitter_stays_near_center() {
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let c = Coordinates::jittered(REFERENCE_POINT, &mut rng);
            assert!((c.lat - REFERENCE_POINT.lat).abs() <= JITTER_SPAN / 2.0 + 1e-9);
            assert!((c.lng - REFERENCE_POINT.lng).abs() <= JITTER_SPAN / 2.0 + 1e-9);
        }
    }
}
