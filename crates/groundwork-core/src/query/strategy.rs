use serde::{Deserialize, Serialize};

/// How a query's candidates are fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalStrategy {
    None,
    Dense,
    Sparse,
    Hybrid,
    Hyde,
    MultiHop,
}

impl RetrievalStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Dense => "dense",
            Self::Sparse => "sparse",
            Self::Hybrid => "hybrid",
            Self::Hyde => "hyde",
            Self::MultiHop => "multi_hop",
        }
    }

    /// Parse a strategy name. Unknown names resolve to `Hybrid`.
    pub fn parse_lenient(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "none" => Self::None,
            "dense" => Self::Dense,
            "sparse" => Self::Sparse,
            "hybrid" => Self::Hybrid,
            "hyde" => Self::Hyde,
            "multi_hop" | "multihop" | "multi-hop" => Self::MultiHop,
            _ => Self::Hybrid,
        }
    }
}

impl std::fmt::Display for RetrievalStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_strategy_is_hybrid() {
        assert_eq!(RetrievalStrategy::parse_lenient("bm42"), RetrievalStrategy::Hybrid);
        assert_eq!(RetrievalStrategy::parse_lenient(" Dense "), RetrievalStrategy::Dense);
        assert_eq!(RetrievalStrategy::parse_lenient("multi_hop"), RetrievalStrategy::MultiHop);
    }
}
