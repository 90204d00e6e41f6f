use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// One subtest slot of a table layout.
///
/// Position in the owning list is the x-axis order, and the group tag is
/// assigned by position rather than derived from the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubtestDefinition {
    pub internal_name: &'static str,
    pub display_label: &'static str,
    pub group_label: &'static str,
    /// Older field names still accepted on input.
    pub legacy_names: &'static [&'static str],
}

impl SubtestDefinition {
    const fn with_legacy_names(mut self, legacy_names: &'static [&'static str]) -> Self {
        self.legacy_names = legacy_names;
        self
    }

    /// Canonical name first, then legacy spellings.
    pub fn accepted_names(&self) -> impl Iterator<Item = &'static str> {
        std::iter::once(self.internal_name).chain(self.legacy_names.iter().copied())
    }
}

const fn subtest(
    internal_name: &'static str,
    display_label: &'static str,
    group_label: &'static str,
) -> SubtestDefinition {
    SubtestDefinition {
        internal_name,
        display_label,
        group_label,
        legacy_names: &[],
    }
}

pub const QI_VERBAL: &str = "QI Verbal";
pub const QI_EXECUTIVO: &str = "QI Executivo";

pub const QI_SUBTESTS: [SubtestDefinition; 13] = [
    subtest("Vocabulario", "Vocabulário", QI_VERBAL),
    subtest("Semelhancas", "Semelhanças", QI_VERBAL),
    subtest("Aritmetica", "Aritmética", QI_VERBAL),
    subtest("Digitos", "Dígitos", QI_VERBAL),
    subtest("Informacao", "Informação", QI_VERBAL),
    subtest("Compreensao", "Compreensão", QI_VERBAL),
    subtest(
        "Sequencia_de_Numeros_e_Letras",
        "Sequência de Números e Letras",
        QI_VERBAL,
    ),
    subtest("Completar_Figuras", "Completar Figuras", QI_EXECUTIVO),
    subtest("Codigos", "Códigos", QI_EXECUTIVO).with_legacy_names(&["Cadigos"]),
    subtest("Cubos", "Cubos", QI_EXECUTIVO),
    subtest("Raciocinio_Matricial", "Raciocínio Matricial", QI_EXECUTIVO),
    subtest("Arranjo_de_Figuras", "Arranjo de Figuras", QI_EXECUTIVO),
    subtest("Procurar_Simbolos", "Procurar Símbolos", QI_EXECUTIVO)
        .with_legacy_names(&["Porcurar_Símbolos"]),
];

pub const INDEX_SUBTESTS: [SubtestDefinition; 11] = [
    subtest("Vocabulario", "Vocabulário", "ICV"),
    subtest("Semelhancas", "Semelhanças", "ICV"),
    subtest("Informacao", "Informação", "ICV"),
    subtest("Completar_Figuras", "Completar Figuras", "IOP"),
    subtest("Cubos", "Cubos", "IOP"),
    subtest("Raciocinio_Matricial", "Raciocínio Matricial", "IOP"),
    subtest("Aritmetica", "Aritmética", "IMO"),
    subtest("Digitos", "Dígitos", "IMO"),
    subtest("Seq_Numeros_Letras", "Seq. Números Letras", "IMO"),
    subtest("Codigos", "Códigos", "IVP"),
    subtest("Procurar_Simbolos", "Procurar Símbolos", "IVP"),
];

/// Categorical column a table is grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GroupColumn {
    /// "QI Verbal" / "QI Executivo".
    QiCategory,
    /// "ICV" / "IOP" / "IMO" / "IVP".
    FactorialIndex,
}

impl GroupColumn {
    /// Human label for the grouping dimension, used in legends and titles.
    #[must_use]
    pub fn grouping_label(self) -> &'static str {
        match self {
            Self::QiCategory => "QI Category",
            Self::FactorialIndex => "Factorial Indices",
        }
    }

    #[must_use]
    pub fn column_name(self) -> &'static str {
        match self {
            Self::QiCategory => "QI",
            Self::FactorialIndex => "Índice",
        }
    }
}

/// The two canonical table layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableVariant {
    Qi,
    Index,
}

impl TableVariant {
    #[must_use]
    pub fn subtests(self) -> &'static [SubtestDefinition] {
        match self {
            Self::Qi => &QI_SUBTESTS,
            Self::Index => &INDEX_SUBTESTS,
        }
    }

    #[must_use]
    pub fn group_column(self) -> GroupColumn {
        match self {
            Self::Qi => GroupColumn::QiCategory,
            Self::Index => GroupColumn::FactorialIndex,
        }
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Qi => "QI (Verbal/Executivo)",
            Self::Index => "Índice (ICV/IOP/IMO/IVP)",
        }
    }

    /// PNG file name offered for export, e.g. `Scores_QI_QI (Verbal-Executivo).png`.
    #[must_use]
    pub fn export_file_name(self) -> String {
        format!("Scores_QI_{}.png", self.display_name().replace('/', "-"))
    }

    #[must_use]
    pub fn accepts_field(self, internal_name: &str) -> bool {
        self.subtests()
            .iter()
            .any(|definition| definition.accepted_names().any(|name| name == internal_name))
    }

    /// Resolves a variant from a short name (`qi`, `index`) or its display name.
    pub fn from_name(name: &str) -> ChartResult<Self> {
        let normalized = name.trim();
        for variant in [Self::Qi, Self::Index] {
            if normalized.eq_ignore_ascii_case(variant.short_name())
                || normalized == variant.display_name()
            {
                return Ok(variant);
            }
        }
        Err(ChartError::InvalidConfig(format!(
            "unknown table variant `{normalized}`"
        )))
    }

    #[must_use]
    pub fn short_name(self) -> &'static str {
        match self {
            Self::Qi => "qi",
            Self::Index => "index",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{INDEX_SUBTESTS, QI_SUBTESTS, TableVariant};

    #[test]
    fn internal_names_are_unique_per_layout() {
        for subtests in [&QI_SUBTESTS[..], &INDEX_SUBTESTS[..]] {
            for (i, a) in subtests.iter().enumerate() {
                for b in &subtests[i + 1..] {
                    assert_ne!(a.internal_name, b.internal_name);
                }
            }
        }
    }

    #[test]
    fn legacy_qi_names_are_accepted_only_by_the_qi_layout() {
        assert!(TableVariant::Qi.accepts_field("Cadigos"));
        assert!(TableVariant::Qi.accepts_field("Porcurar_Símbolos"));
        assert!(!TableVariant::Index.accepts_field("Cadigos"));
        assert!(TableVariant::Index.accepts_field("Codigos"));
    }

    #[test]
    fn variant_names_resolve() {
        assert_eq!(TableVariant::from_name("qi").ok(), Some(TableVariant::Qi));
        assert_eq!(TableVariant::from_name(" INDEX ").ok(), Some(TableVariant::Index));
        assert_eq!(
            TableVariant::from_name("Índice (ICV/IOP/IMO/IVP)").ok(),
            Some(TableVariant::Index)
        );
        assert!(TableVariant::from_name("wais").is_err());
    }
}
