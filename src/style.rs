use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The closed set of rewrite styles.
///
/// Ordering of `ALL` is the canonical presentation order; it also matches
/// the lexicographic order the storage layer uses when listing a prompt's
/// variants.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Concise,
    Detailed,
    Creative,
    Analytical,
}

/// Guidance entry handed to callers so a host can drive its own rewrite.
#[derive(Debug, Clone, Serialize)]
pub struct StyleGuidance {
    pub style: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub instruction: &'static str,
}

impl Style {
    pub const ALL: [Style; 4] = [
        Style::Concise,
        Style::Detailed,
        Style::Creative,
        Style::Analytical,
    ];

    /// Look up a style by its wire key. Unknown keys yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        key.parse().ok()
    }

    pub fn key(self) -> &'static str {
        match self {
            Style::Concise => "concise",
            Style::Detailed => "detailed",
            Style::Creative => "creative",
            Style::Analytical => "analytical",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Style::Concise => "Concise",
            Style::Detailed => "Detailed",
            Style::Creative => "Creative",
            Style::Analytical => "Analytical",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Style::Concise => "Shorter and more direct",
            Style::Detailed => "Expanded with context and specifics",
            Style::Creative => "Encourages imaginative responses",
            Style::Analytical => "Structured for logical output",
        }
    }

    /// Rewrite instruction embedded in the refinement prompt.
    pub fn instruction(self) -> &'static str {
        match self {
            Style::Concise => {
                "Rewrite to be shorter and more direct. Remove unnecessary words. \
                 Keep the core intent clear."
            }
            Style::Detailed => {
                "Expand with more context and specificity. Add relevant details, \
                 constraints, and format preferences."
            }
            Style::Creative => {
                "Rewrite to encourage more imaginative responses. Add elements that \
                 invite novel approaches."
            }
            Style::Analytical => {
                "Restructure for systematic, logical responses. Break down into \
                 clear steps with good structure."
            }
        }
    }

    /// Accent token for hosts that color-code styles.
    pub fn accent(self) -> &'static str {
        match self {
            Style::Concise => "blue",
            Style::Detailed => "purple",
            Style::Creative => "orange",
            Style::Analytical => "green",
        }
    }

    pub fn guidance(self) -> StyleGuidance {
        StyleGuidance {
            style: self.key(),
            name: self.display_name(),
            description: self.description(),
            instruction: self.instruction(),
        }
    }
}

/// Guidance entries for every known style, in canonical order.
pub fn all_guidance() -> Vec<StyleGuidance> {
    Style::ALL.iter().map(|style| style.guidance()).collect()
}
