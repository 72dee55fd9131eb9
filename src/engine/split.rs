use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct InteractionSplit {
    pub volume: f64,
    pub offered_to_ai: f64,
    pub autonomous: f64,
    pub escalated: f64,
    pub direct_to_human: f64,
    pub to_human: f64,
}

impl InteractionSplit {
    pub fn new(volume: f64, handling_percentage: f64, autonomy_percentage: f64) -> Self {
        let handling = handling_percentage / 100.0;
        let autonomy = autonomy_percentage / 100.0;
        let offered_to_ai = volume * handling;
        let autonomous = offered_to_ai * autonomy;
        let escalated = offered_to_ai * (1.0 - autonomy);
        let direct_to_human = volume * (1.0 - handling);
        Self {
            volume,
            offered_to_ai,
            autonomous,
            escalated,
            direct_to_human,
            to_human: escalated + direct_to_human,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::InteractionSplit;

    #[test]
    fn splits_between_ai_and_humans() {
        let split = InteractionSplit::new(300.0, 80.0, 75.0);
        assert!((split.offered_to_ai - 240.0).abs() < 1e-9);
        assert!((split.autonomous - 180.0).abs() < 1e-9);
        assert!((split.escalated - 60.0).abs() < 1e-9);
        assert!((split.direct_to_human - 60.0).abs() < 1e-9);
        assert!((split.to_human - 120.0).abs() < 1e-9);
    }

    #[test]
    fn zero_handling_sends_everything_to_humans() {
        let split = InteractionSplit::new(700.0, 0.0, 85.0);
        assert_eq!(split.offered_to_ai, 0.0);
        assert_eq!(split.autonomous, 0.0);
        assert_eq!(split.to_human, 700.0);
    }

    #[test]
    fn full_handling_and_autonomy_leaves_nothing_for_humans() {
        let split = InteractionSplit::new(700.0, 100.0, 100.0);
        assert_eq!(split.to_human, 0.0);
        assert_eq!(split.autonomous, 700.0);
    }
}
