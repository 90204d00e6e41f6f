use serde::{Deserialize, Serialize};

use crate::core::{ScorePolicy, Viewport};
use crate::error::{ChartError, ChartResult};

/// Safety margin an interactive form starts with.
pub const SESSION_DEFAULT_SAFETY_MARGIN: f64 = 2.0;

/// Display configuration for one chart render.
///
/// Every field is optional. Empty titles/labels fall back to computed
/// defaults, an absent mean disables all reference lines, and an absent or
/// empty palette selects the default sequential palette.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub title: Option<String>,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub reference_mean: Option<f64>,
    pub safety_margin: Option<f64>,
    pub palette: Option<Vec<String>>,
    pub viewport: Viewport,
}

impl ChartConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial state of the interactive form: mean at the default score,
    /// margin of 2 and Portuguese labels.
    #[must_use]
    pub fn session_defaults(policy: ScorePolicy) -> Self {
        Self {
            title: Some("Perfil de Scores".to_owned()),
            x_label: Some("Subtestes de Inteligência".to_owned()),
            y_label: Some(format!(
                "Scores Ponderados ({}-{})",
                policy.min(),
                policy.max()
            )),
            reference_mean: Some(policy.default_score() as f64),
            safety_margin: Some(SESSION_DEFAULT_SAFETY_MARGIN),
            palette: None,
            viewport: Viewport::default(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn with_axis_labels(
        mut self,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
    ) -> Self {
        self.x_label = Some(x_label.into());
        self.y_label = Some(y_label.into());
        self
    }

    #[must_use]
    pub fn with_reference_mean(mut self, mean: f64) -> Self {
        self.reference_mean = Some(mean);
        self
    }

    #[must_use]
    pub fn with_safety_margin(mut self, margin: f64) -> Self {
        self.safety_margin = Some(margin);
        self
    }

    #[must_use]
    pub fn with_palette<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.palette = Some(colors.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the palette from comma-separated text such as `"#1f77b4, #ff7f0e"`.
    #[must_use]
    pub fn with_palette_text(mut self, text: &str) -> Self {
        self.palette = parse_palette_text(text);
        self
    }

    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if self.reference_mean.is_some_and(|mean| !mean.is_finite()) {
            return Err(ChartError::InvalidConfig(
                "reference mean must be finite".to_owned(),
            ));
        }
        if self
            .safety_margin
            .is_some_and(|margin| !margin.is_finite() || margin < 0.0)
        {
            return Err(ChartError::InvalidConfig(
                "safety margin must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Non-empty custom palette entries, if any.
    #[must_use]
    pub fn custom_palette(&self) -> Option<&[String]> {
        self.palette.as_deref().filter(|colors| !colors.is_empty())
    }
}

/// Splits comma-separated palette text, trimming entries and dropping empties.
///
/// Returns `None` when no entry remains.
#[must_use]
pub fn parse_palette_text(text: &str) -> Option<Vec<String>> {
    let colors: Vec<String> = text
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect();
    (!colors.is_empty()).then_some(colors)
}

/// Returns `value` when it holds non-whitespace text, else `fallback`.
pub(super) fn non_empty_or(value: Option<&str>, fallback: impl FnOnce() -> String) -> String {
    match value {
        Some(text) if !text.trim().is_empty() => text.to_owned(),
        _ => fallback(),
    }
}
