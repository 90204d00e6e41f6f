pub mod scale;
pub mod score;
pub mod subtests;
pub mod table;
pub mod types;

pub use scale::{BandScale, LinearScale};
pub use score::{
    DEFAULT_SCORE, MAX_SCORE, MIN_SCORE, POLICY_SCORE_LIMIT, RawScore, ScorePolicy,
    ValidatedScore, validate,
};
pub use subtests::{GroupColumn, INDEX_SUBTESTS, QI_SUBTESTS, SubtestDefinition, TableVariant};
pub use table::{
    NamedScores, ResultRow, ResultTable, build_index_table, build_qi_table, build_table,
};
pub use types::{PixelSpan, Viewport};
