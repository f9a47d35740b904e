//! Render modes

use serde::{Deserialize, Serialize};
use tracing::debug;

/// What happens to tokens with no value in the dictionary
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Unresolved tokens become a highlighted placeholder naming the key
    #[default]
    Preview,
    /// Unresolved tokens are left exactly as authored
    Final,
}

impl std::str::FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "RenderMode::from_str: called");
        match s.to_lowercase().as_str() {
            "preview" => {
                debug!("RenderMode::from_str: matched Preview");
                Ok(Self::Preview)
            }
            "final" | "print" => {
                debug!("RenderMode::from_str: matched Final");
                Ok(Self::Final)
            }
            _ => {
                debug!(%s, "RenderMode::from_str: unknown mode");
                Err(format!("Unknown render mode: {}. Use: preview or final", s))
            }
        }
    }
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Preview => write!(f, "preview"),
            Self::Final => write!(f, "final"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("preview".parse::<RenderMode>(), Ok(RenderMode::Preview));
        assert_eq!("FINAL".parse::<RenderMode>(), Ok(RenderMode::Final));
        assert_eq!("print".parse::<RenderMode>(), Ok(RenderMode::Final));
        assert!("draft".parse::<RenderMode>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for mode in [RenderMode::Preview, RenderMode::Final] {
            assert_eq!(mode.to_string().parse::<RenderMode>(), Ok(mode));
        }
    }
}
