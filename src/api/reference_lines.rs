use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceLineKind {
    Mean,
    UpperMargin,
    LowerMargin,
}

/// Horizontal reference line at a score value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceLine {
    pub kind: ReferenceLineKind,
    pub value: f64,
    pub label: String,
}

/// Shaded band between the lower and upper margin lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceZone {
    pub lower: f64,
    pub upper: f64,
}

/// Mean line plus the optional margin lines and zone around it.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceLines {
    pub lines: SmallVec<[ReferenceLine; 3]>,
    pub zone: Option<ReferenceZone>,
}

impl ReferenceLines {
    #[must_use]
    pub fn line(&self, kind: ReferenceLineKind) -> Option<&ReferenceLine> {
        self.lines.iter().find(|line| line.kind == kind)
    }

    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.lines.iter().map(|line| line.value).collect()
    }
}

/// Resolves reference lines for a mean and safety margin.
///
/// Without a mean nothing is drawn, whatever the margin. A margin of zero or
/// less keeps only the mean line.
#[must_use]
pub fn resolve_reference_lines(mean: Option<f64>, margin: Option<f64>) -> Option<ReferenceLines> {
    let mean = mean?;
    let mut lines = SmallVec::new();
    lines.push(ReferenceLine {
        kind: ReferenceLineKind::Mean,
        value: mean,
        label: format!("Mean ({})", format_mean(mean)),
    });

    let zone = match margin {
        Some(margin) if margin > 0.0 => {
            let upper = mean + margin;
            let lower = mean - margin;
            lines.push(ReferenceLine {
                kind: ReferenceLineKind::UpperMargin,
                value: upper,
                label: format!("Upper margin ({upper:.1})"),
            });
            lines.push(ReferenceLine {
                kind: ReferenceLineKind::LowerMargin,
                value: lower,
                label: format!("Lower margin ({lower:.1})"),
            });
            Some(ReferenceZone { lower, upper })
        }
        _ => None,
    };

    Some(ReferenceLines { lines, zone })
}

/// Whole means keep one decimal (`8.0`); others print as-is (`8.25`).
fn format_mean(mean: f64) -> String {
    if mean.fract() == 0.0 {
        format!("{mean:.1}")
    } else {
        format!("{mean}")
    }
}

#[cfg(test)]
mod tests {
    use super::format_mean;

    #[test]
    fn mean_label_keeps_significant_digits() {
        assert_eq!(format_mean(8.0), "8.0");
        assert_eq!(format_mean(8.5), "8.5");
        assert_eq!(format_mean(8.25), "8.25");
        assert_eq!(format_mean(-2.0), "-2.0");
    }
}
