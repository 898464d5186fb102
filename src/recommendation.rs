//! Label to recommendation lookup.
//!
//! The service's label vocabulary is open: anything not in [`TABLE`] maps to
//! [`Recommendation::Undetermined`].

use crate::config::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Recommendation {
    OutdoorSafe,
    LimitExertion,
    StayIndoors,
    Undetermined,
}

/// Known labels, lowercase.
pub const TABLE: &[(&str, Recommendation)] = &[
    ("buena", Recommendation::OutdoorSafe),
    ("moderada", Recommendation::LimitExertion),
    ("dañina", Recommendation::StayIndoors),
];

impl Recommendation {
    pub fn for_label(label: &str) -> Self {
        let label = label.to_lowercase();
        TABLE
            .iter()
            .find(|(known, _)| *known == label)
            .map(|(_, recommendation)| *recommendation)
            .unwrap_or(Recommendation::Undetermined)
    }

    pub fn text(self, language: Language) -> &'static str {
        match (self, language) {
            (Recommendation::OutdoorSafe, Language::En) => "outdoor activity is safe",
            (Recommendation::LimitExertion, Language::En) => {
                "avoid strenuous activity if respiratory-sensitive"
            }
            (Recommendation::StayIndoors, Language::En) => "stay indoors, avoid outdoor activity",
            (Recommendation::Undetermined, Language::En) => {
                "no precise recommendation could be determined"
            }
            (Recommendation::OutdoorSafe, Language::Es) => {
                "🌿 Puedes realizar actividades al aire libre sin preocupación."
            }
            (Recommendation::LimitExertion, Language::Es) => {
                "⚠️ Evita esfuerzos físicos si tienes problemas respiratorios."
            }
            (Recommendation::StayIndoors, Language::Es) => {
                "🏠 Permanece en casa si es posible y evita actividades al aire libre."
            }
            (Recommendation::Undetermined, Language::Es) => {
                "❓ No se pudo determinar una recomendación precisa."
            }
        }
    }
}
