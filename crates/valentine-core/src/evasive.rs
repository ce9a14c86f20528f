//! State machine behind the "No" button that runs away from the pointer.

use crate::constants::{DODGE_MARGIN_PX, DODGE_MIN_OFFSET_PX};
use rand::Rng;

/// Tooltips shown when the attempt counter reaches these values.
pub const MILESTONES: [(u32, &str); 4] = [
    (4, "Think twice ♥"),
    (8, "Still no? 💔"),
    (12, "I'll wait forever... ⏳"),
    (16, "Please? 🥺"),
];

/// What the page should do after one dodge.
#[derive(Clone, Debug, PartialEq)]
pub struct Dodge {
    pub left: f64,
    pub top: f64,
    pub label: Option<String>,
    pub tooltip: Option<&'static str>,
}

#[derive(Clone, Debug, Default)]
pub struct EvasiveButton {
    attempts: u32,
}

impl EvasiveButton {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Register a hover/click/touch attempt and pick the next position and
    /// label. The button never gives up; labels cycle forever.
    pub fn dodge<R: Rng + ?Sized>(
        &mut self,
        viewport: (f64, f64),
        button: (f64, f64),
        teases: &[String],
        rng: &mut R,
    ) -> Dodge {
        let (left, top) = random_position(viewport, button, rng);
        self.attempts += 1;
        let label = tease_for(self.attempts, teases).map(str::to_string);
        Dodge {
            left,
            top,
            label,
            tooltip: milestone_for(self.attempts),
        }
    }
}

/// Tease shown after `attempts` dodges.
pub fn tease_for(attempts: u32, teases: &[String]) -> Option<&str> {
    if teases.is_empty() {
        return None;
    }
    Some(teases[attempts as usize % teases.len()].as_str())
}

pub fn milestone_for(attempts: u32) -> Option<&'static str> {
    MILESTONES
        .iter()
        .find(|(at, _)| *at == attempts)
        .map(|(_, msg)| *msg)
}

/// Random top-left corner keeping the button on screen with a margin.
pub fn random_position<R: Rng + ?Sized>(
    viewport: (f64, f64),
    button: (f64, f64),
    rng: &mut R,
) -> (f64, f64) {
    let max_x = (viewport.0 - button.0 - DODGE_MARGIN_PX).max(0.0);
    let max_y = (viewport.1 - button.1 - DODGE_MARGIN_PX).max(0.0);
    let x = (rng.gen::<f64>() * max_x).max(DODGE_MIN_OFFSET_PX);
    let y = (rng.gen::<f64>() * max_y).max(DODGE_MIN_OFFSET_PX);
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn teases() -> Vec<String> {
        ["a", "b", "c"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn labels_cycle_through_teases() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut b = EvasiveButton::new();
        let labels: Vec<String> = (0..4)
            .map(|_| b.dodge((800.0, 600.0), (100.0, 40.0), &teases(), &mut rng).label.unwrap())
            .collect();
        assert_eq!(labels, vec!["b", "c", "a", "b"]);
        assert_eq!(b.attempts(), 4);
    }

    #[test]
    fn milestones_fire_once_each() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut b = EvasiveButton::new();
        let tips: Vec<(u32, &str)> = (0..20)
            .filter_map(|_| {
                let d = b.dodge((800.0, 600.0), (100.0, 40.0), &teases(), &mut rng);
                d.tooltip.map(|t| (b.attempts(), t))
            })
            .collect();
        assert_eq!(tips, MILESTONES.to_vec());
    }

    #[test]
    fn position_stays_inside_margins() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let (x, y) = random_position((800.0, 600.0), (100.0, 40.0), &mut rng);
            assert!((DODGE_MIN_OFFSET_PX..=660.0).contains(&x));
            assert!((DODGE_MIN_OFFSET_PX..=520.0).contains(&y));
        }
    }

    #[test]
    fn tiny_viewport_clamps_to_min_offset() {
        let mut rng = StepRng::new(u64::MAX, 0);
        let (x, y) = random_position((50.0, 50.0), (100.0, 40.0), &mut rng);
        assert_eq!((x, y), (DODGE_MIN_OFFSET_PX, DODGE_MIN_OFFSET_PX));
    }

    #[test]
    fn no_teases_means_no_label() {
        let mut rng = StdRng::seed_from_u64(1);
        let d = EvasiveButton::new().dodge((800.0, 600.0), (100.0, 40.0), &[], &mut rng);
        assert_eq!(d.label, None);
    }
}
