//! Three-level drive speed ladder.
//!
//! The driver steps between `Min`, `Med` and `Max` with two buttons. The ladder
//! saturates at both ends and starts at `Med`.

use serde::{Deserialize, Serialize};

/// Speed scale for each ladder rung, each in `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedLevels {
    pub min: f64,
    pub med: f64,
    pub max: f64,
}

impl Default for SpeedLevels {
    fn default() -> Self {
        Self {
            min: 0.25,
            med: 0.5,
            max: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedLevel {
    Min,
    #[default]
    Med,
    Max,
}

impl SpeedLevel {
    pub const fn up(self) -> Self {
        match self {
            SpeedLevel::Min => SpeedLevel::Med,
            SpeedLevel::Med | SpeedLevel::Max => SpeedLevel::Max,
        }
    }

    pub const fn down(self) -> Self {
        match self {
            SpeedLevel::Max => SpeedLevel::Med,
            SpeedLevel::Med | SpeedLevel::Min => SpeedLevel::Min,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedLadder {
    levels: SpeedLevels,
    current: SpeedLevel,
}

impl SpeedLadder {
    /// A ladder at `Med`.
    pub fn new(levels: SpeedLevels) -> Self {
        Self {
            levels,
            current: SpeedLevel::Med,
        }
    }

    /// Restore a ladder from a raw speed scale.
    ///
    /// A value that matches none of the configured levels recovers to `Med`.
    pub fn resume(
        levels: SpeedLevels,
        raw: f64,
    ) -> Self {
        let current = if raw == levels.min {
            SpeedLevel::Min
        } else if raw == levels.med {
            SpeedLevel::Med
        } else if raw == levels.max {
            SpeedLevel::Max
        } else {
            tracing::warn!(raw, "unknown drive speed, recovering to medium");
            SpeedLevel::Med
        };
        Self { levels, current }
    }

    pub fn level(&self) -> SpeedLevel {
        self.current
    }

    /// Active speed scale.
    pub fn scale(&self) -> f64 {
        match self.current {
            SpeedLevel::Min => self.levels.min,
            SpeedLevel::Med => self.levels.med,
            SpeedLevel::Max => self.levels.max,
        }
    }

    /// Apply one cycle's button edges and return the resulting level.
    ///
    /// Pressing both in the same cycle is ignored.
    pub fn update(
        &mut self,
        increase: bool,
        decrease: bool,
    ) -> SpeedLevel {
        let next = match (increase, decrease) {
            (true, false) => self.current.up(),
            (false, true) => self.current.down(),
            (true, true) => {
                tracing::debug!("speed up and down pressed together, ignoring");
                self.current
            }
            (false, false) => self.current,
        };
        if next != self.current {
            tracing::debug!(from = ?self.current, to = ?next, "drive speed changed");
            self.current = next;
        }
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ladder() -> SpeedLadder {
        SpeedLadder::new(SpeedLevels::default())
    }

    #[test]
    fn starts_at_medium() {
        let l = ladder();
        assert_eq!(l.level(), SpeedLevel::Med);
        assert_eq!(l.scale(), 0.5);
    }

    #[test]
    fn up_then_down_returns_to_medium() {
        let mut l = ladder();
        assert_eq!(l.update(true, false), SpeedLevel::Max);
        assert_eq!(l.update(false, true), SpeedLevel::Med);
    }

    #[test]
    fn saturates_at_both_ends() {
        let mut l = ladder();
        l.update(false, true);
        assert_eq!(l.update(false, true), SpeedLevel::Min);
        assert_eq!(l.scale(), 0.25);

        l.update(true, false);
        l.update(true, false);
        assert_eq!(l.update(true, false), SpeedLevel::Max);
        assert_eq!(l.scale(), 1.0);
    }

    #[test]
    fn simultaneous_edges_are_ignored() {
        for start in [0.25, 0.5, 1.0] {
            let mut l = SpeedLadder::resume(SpeedLevels::default(), start);
            let before = l.level();
            assert_eq!(l.update(true, true), before);
        }
    }

    #[test]
    fn no_edges_is_a_no_op() {
        let mut l = ladder();
        assert_eq!(l.update(false, false), SpeedLevel::Med);
    }

    #[test]
    fn unknown_raw_speed_recovers_to_medium() {
        let l = SpeedLadder::resume(SpeedLevels::default(), 0.8);
        assert_eq!(l.level(), SpeedLevel::Med);
        let l = SpeedLadder::resume(SpeedLevels::default(), 0.25);
        assert_eq!(l.level(), SpeedLevel::Min);
    }
}
