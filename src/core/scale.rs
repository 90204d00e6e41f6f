use crate::core::types::PixelSpan;
use crate::error::{ChartError, ChartResult};

/// Linear map from a value domain onto a pixel span.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    pub fn domain_to_pixel(self, value: f64, span: PixelSpan) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        Ok(span.start + normalized * (span.end - span.start))
    }

    /// Same as `domain_to_pixel`, with the value first clamped into the domain.
    pub fn clamped_domain_to_pixel(self, value: f64, span: PixelSpan) -> ChartResult<f64> {
        let (low, high) = if self.domain_start <= self.domain_end {
            (self.domain_start, self.domain_end)
        } else {
            (self.domain_end, self.domain_start)
        };
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }
        self.domain_to_pixel(value.clamp(low, high), span)
    }
}

/// Evenly sized slots for categorical x positions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandScale {
    count: usize,
    span: PixelSpan,
}

impl BandScale {
    pub fn new(count: usize, span: PixelSpan) -> ChartResult<Self> {
        if count == 0 {
            return Err(ChartError::InvalidData(
                "band scale needs at least one category".to_owned(),
            ));
        }
        if !span.start.is_finite() || !span.end.is_finite() || span.end <= span.start {
            return Err(ChartError::InvalidData(
                "band scale span must be finite and increasing".to_owned(),
            ));
        }
        Ok(Self { count, span })
    }

    #[must_use]
    pub fn step_px(self) -> f64 {
        self.span.length() / self.count as f64
    }

    #[must_use]
    pub fn center_px(self, index: usize) -> f64 {
        self.span.start + (index as f64 + 0.5) * self.step_px()
    }
}
