use serde::{Deserialize, Serialize};

/// Paint layers of one chart, listed bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CanvasLayerKind {
    Background,
    Grid,
    ReferenceZone,
    Bars,
    ReferenceLines,
    Annotations,
    Axis,
    Legend,
}

impl CanvasLayerKind {
    pub const CANONICAL_ORDER: [Self; 8] = [
        Self::Background,
        Self::Grid,
        Self::ReferenceZone,
        Self::Bars,
        Self::ReferenceLines,
        Self::Annotations,
        Self::Axis,
        Self::Legend,
    ];

    #[must_use]
    pub fn paint_index(self) -> usize {
        Self::CANONICAL_ORDER
            .iter()
            .position(|kind| *kind == self)
            .unwrap_or(0)
    }
}
