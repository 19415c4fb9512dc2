//! Admin dashboard models

use rand::Rng;
use serde::{Deserialize, Serialize};

/// State of a single parking bay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SlotStatus {
    Free,
    Occupied,
    Reserved,
    Maintenance,
}

impl SlotStatus {
    const ALL: [SlotStatus; 4] = [
        SlotStatus::Free,
        SlotStatus::Occupied,
        SlotStatus::Reserved,
        SlotStatus::Maintenance,
    ];

    /// FREE goes to MAINTENANCE, everything else back to FREE
    pub fn toggled(self) -> Self {
        match self {
            SlotStatus::Free => SlotStatus::Maintenance,
            _ => SlotStatus::Free,
        }
    }

    /// Random status for bay `index` (1-based). Every fifth bay may also be
    /// reserved or under maintenance; the rest are free or occupied.
    pub fn sample<R: Rng + ?Sized>(index: usize, rng: &mut R) -> Self {
        let span = if index % 5 == 0 { 4 } else { 2 };
        Self::ALL[rng.gen_range(0..span)]
    }
}

impl std::str::FromStr for SlotStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "FREE" => Ok(SlotStatus::Free),
            "OCCUPIED" => Ok(SlotStatus::Occupied),
            "RESERVED" => Ok(SlotStatus::Reserved),
            "MAINTENANCE" => Ok(SlotStatus::Maintenance),
            other => Err(format!("Unknown slot status: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: String,
    pub status: SlotStatus,
}

/// Result of flipping a bay in or out of maintenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotToggle {
    pub slot_id: String,
    pub new_status: SlotStatus,
}

/// Dashboard headline numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub revenue: u64,
    /// Percent
    pub occupancy: u8,
    pub active_sessions: u32,
    pub issues: u32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            revenue: 1240,
            occupancy: 76,
            active_sessions: 42,
            issues: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_flips_free_and_maintenance() {
        assert_eq!(SlotStatus::Free.toggled(), SlotStatus::Maintenance);
        assert_eq!(SlotStatus::Maintenance.toggled(), SlotStatus::Free);
        assert_eq!(SlotStatus::Occupied.toggled(), SlotStatus::Free);
    }

    #[test]
    fn test_ordinary_bays_are_free_or_occupied() {
        let mut rng = rand::thread_rng();
        for i in (1..=30).filter(|i| i % 5 != 0) {
            for _ in 0..20 {
                let status = SlotStatus::sample(i, &mut rng);
                assert!(matches!(status, SlotStatus::Free | SlotStatus::Occupied));
            }
        }
    }

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&SlotStatus::Maintenance).unwrap(),
            "\"MAINTENANCE\""
        );
        assert_eq!("free".parse::<SlotStatus>(), Ok(SlotStatus::Free));
        assert!("broken".parse::<SlotStatus>().is_err());
    }
}
