use serde::{Deserialize, Serialize};

/// Lifecycle stage of a project.
///
/// The backend stores status as unconstrained text. Anything outside the
/// known set is kept verbatim in [`ProjectStatus::Unknown`]; a `null` column
/// becomes an empty `Unknown`.
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum ProjectStatus {
    #[default]
    Operational,
    UnderConstruction,
    Planned,
    Completed,
    Unknown(String),
}

impl ProjectStatus {
    pub const KNOWN: [ProjectStatus; 4] = [
        Self::Operational,
        Self::UnderConstruction,
        Self::Planned,
        Self::Completed,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Operational => "Operational",
            Self::UnderConstruction => "Under Construction",
            Self::Planned => "Planned",
            Self::Completed => "Completed",
            Self::Unknown(raw) => raw,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }

    /// CSS modifier for the status badge.
    pub fn badge_class(&self) -> &'static str {
        match self {
            Self::Operational => "badge-operational",
            Self::Completed => "badge-completed",
            Self::UnderConstruction | Self::Planned => "badge-pipeline",
            Self::Unknown(_) => "badge-unknown",
        }
    }
}

impl From<String> for ProjectStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Operational" => Self::Operational,
            "Under Construction" => Self::UnderConstruction,
            "Planned" => Self::Planned,
            "Completed" => Self::Completed,
            _ => Self::Unknown(s),
        }
    }
}

impl From<Option<String>> for ProjectStatus {
    fn from(s: Option<String>) -> Self {
        s.map_or_else(|| Self::Unknown(String::new()), Self::from)
    }
}

impl From<ProjectStatus> for String {
    fn from(status: ProjectStatus) -> Self {
        match status {
            ProjectStatus::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl PartialEq<&str> for ProjectStatus {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = String;

    /// Strict parse: only the known set is accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::from(s.to_string()) {
            Self::Unknown(_) => Err(format!("invalid project status: {}", s)),
            known => Ok(known),
        }
    }
}
