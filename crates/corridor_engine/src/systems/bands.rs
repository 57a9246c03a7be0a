//! Whisker reaction table
//!
//! Maps whisker indices to the movement component they block. A whisker that
//! reports an obstacle closer than the threshold zeroes the offending
//! component of every band it belongs to; movement away from the obstacle is
//! left alone.

use serde::{Deserialize, Serialize};

use crate::render::camera::MovementIntent;

/// Movement component a band constrains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovementAxis {
    /// Along the view direction
    Forward,
    /// Along the camera's right vector
    Strafe,
}

/// Sign of the movement a band forbids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockedSign {
    /// Forbid positive values (forward / rightward)
    Positive,
    /// Forbid negative values (backward / leftward)
    Negative,
}

/// One reaction rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Band {
    /// Label for logs
    pub name: String,
    /// Whisker indices that trigger this band
    pub rays: Vec<usize>,
    /// Constrained movement component
    pub axis: MovementAxis,
    /// Forbidden direction on that component
    pub blocked: BlockedSign,
}

impl Band {
    /// Zero the component if it points into the obstacle; true if changed
    pub fn constrain(&self, intent: &mut MovementIntent) -> bool {
        let component = match self.axis {
            MovementAxis::Forward => &mut intent.forward,
            MovementAxis::Strafe => &mut intent.strafe,
        };
        let offending = match self.blocked {
            BlockedSign::Positive => *component > 0.0,
            BlockedSign::Negative => *component < 0.0,
        };
        if offending {
            *component = 0.0;
        }
        offending
    }
}

/// Ordered set of reaction bands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandTable {
    /// Bands, applied in order
    pub bands: Vec<Band>,
}

impl Default for BandTable {
    fn default() -> Self {
        Self::quadrants(8)
    }
}

impl BandTable {
    /// Front / left / back / right quadrants for a fan of `count` whiskers
    ///
    /// A whisker belongs to every quadrant whose center bearing is within 45
    /// degrees of its own, so diagonals on an 8-ray fan sit in two bands:
    /// front `{7,0,1}`, left `{1,2,3}`, back `{3,4,5}`, right `{5,6,7}`.
    pub fn quadrants(count: usize) -> Self {
        let quadrant = |name: &str, center_deg: f32, axis, blocked| Band {
            name: name.to_string(),
            rays: (0..count)
                .filter(|&i| {
                    let bearing = i as f32 * 360.0 / count as f32;
                    let offset = (bearing - center_deg).rem_euclid(360.0);
                    offset.min(360.0 - offset) <= 45.0 + 1.0e-3
                })
                .collect(),
            axis,
            blocked,
        };

        Self {
            bands: vec![
                quadrant("front", 0.0, MovementAxis::Forward, BlockedSign::Positive),
                quadrant("left", 90.0, MovementAxis::Strafe, BlockedSign::Negative),
                quadrant("back", 180.0, MovementAxis::Forward, BlockedSign::Negative),
                quadrant("right", 270.0, MovementAxis::Strafe, BlockedSign::Positive),
            ],
        }
    }

    /// Bands containing whisker `index`
    pub fn bands_for(&self, index: usize) -> impl Iterator<Item = &Band> + '_ {
        self.bands.iter().filter(move |band| band.rays.contains(&index))
    }

    /// Apply every whisker closer than `threshold`; returns how many bands fired
    pub fn apply(&self, distances: &[f32], threshold: f32, intent: &mut MovementIntent) -> usize {
        let mut corrections = 0;
        for (index, &distance) in distances.iter().enumerate() {
            if distance >= threshold {
                continue;
            }
            for band in self.bands_for(index) {
                if band.constrain(intent) {
                    log::debug!("Whisker {} at {:.2} blocked {} movement", index, distance, band.name);
                    corrections += 1;
                }
            }
        }
        corrections
    }

    /// Reject indices outside a fan of `whisker_count` rays
    pub fn validate(&self, whisker_count: usize) -> Result<(), String> {
        for band in &self.bands {
            if let Some(&index) = band.rays.iter().find(|&&index| index >= whisker_count) {
                return Err(format!(
                    "Band '{}' references whisker {} but only {} whiskers are cast",
                    band.name, index, whisker_count
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rays(table: &BandTable, name: &str) -> Vec<usize> {
        table.bands.iter().find(|b| b.name == name).unwrap().rays.clone()
    }

    #[test]
    fn test_default_table_for_eight_whiskers() {
        let table = BandTable::default();
        assert_eq!(rays(&table, "front"), vec![0, 1, 7]);
        assert_eq!(rays(&table, "left"), vec![1, 2, 3]);
        assert_eq!(rays(&table, "back"), vec![3, 4, 5]);
        assert_eq!(rays(&table, "right"), vec![5, 6, 7]);
    }

    #[test]
    fn test_four_whiskers_get_one_band_each() {
        let table = BandTable::quadrants(4);
        assert_eq!(rays(&table, "front"), vec![0]);
        assert_eq!(rays(&table, "left"), vec![1]);
        assert_eq!(rays(&table, "back"), vec![2]);
        assert_eq!(rays(&table, "right"), vec![3]);
    }

    #[test]
    fn test_wall_ahead_blocks_forward_only() {
        let mut intent = MovementIntent { forward: 2.0, strafe: 1.5 };
        let mut distances = vec![999.0; 8];
        distances[0] = 1.0;

        let fired = BandTable::default().apply(&distances, 17.0, &mut intent);
        assert_eq!(fired, 1);
        assert_eq!(intent, MovementIntent { forward: 0.0, strafe: 1.5 });
    }

    #[test]
    fn test_retreat_from_wall_is_allowed() {
        let mut intent = MovementIntent { forward: -1.25, strafe: 0.0 };
        let mut distances = vec![999.0; 8];
        distances[0] = 1.0;

        assert_eq!(BandTable::default().apply(&distances, 17.0, &mut intent), 0);
        assert_eq!(intent.forward, -1.25);
    }

    #[test]
    fn test_diagonal_whisker_blocks_two_components() {
        // Whisker 1 sits between front and left
        let mut intent = MovementIntent { forward: 2.0, strafe: -1.5 };
        let mut distances = vec![999.0; 8];
        distances[1] = 4.0;

        BandTable::default().apply(&distances, 17.0, &mut intent);
        assert_eq!(intent, MovementIntent { forward: 0.0, strafe: 0.0 });
    }

    #[test]
    fn test_distance_at_threshold_is_ignored() {
        let mut intent = MovementIntent { forward: 2.0, strafe: 0.0 };
        let distances = vec![17.0; 8];
        assert_eq!(BandTable::default().apply(&distances, 17.0, &mut intent), 0);
    }

    #[test]
    fn test_validate_rejects_out_of_range_index() {
        assert!(BandTable::default().validate(8).is_ok());
        assert!(BandTable::default().validate(6).is_err());
    }
}
