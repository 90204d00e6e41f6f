use crate::core::ScorePolicy;

/// Lowest score tick; zero has no tick.
pub const SCORE_AXIS_FLOOR: i64 = 1;

/// Fixed score axis: one tick per integer from 1 to the policy maximum and a
/// visible range of `[1, max + 1]`, independent of the plotted data.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreAxis {
    pub ticks: Vec<i64>,
    pub range_start: f64,
    pub range_end: f64,
}

impl ScoreAxis {
    #[must_use]
    pub fn for_policy(policy: ScorePolicy) -> Self {
        let max = policy.max();
        // A policy topping out below the floor still gets a one-unit range.
        let range_end = (max + 1).max(SCORE_AXIS_FLOOR + 1);
        Self {
            ticks: (SCORE_AXIS_FLOOR..=max).collect(),
            range_start: SCORE_AXIS_FLOOR as f64,
            range_end: range_end as f64,
        }
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.range_start..=self.range_end).contains(&value)
    }
}
