#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Settings shared by every search a [Pathfinder](crate::pathfinder::Pathfinder) runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchConfig {
    /// Enables the four diagonal steps in addition to the cardinal ones.
    #[cfg_attr(feature = "serde", serde(default))]
    pub allow_diagonal: bool,

    /// Gives up with no path once this many cells have been expanded. Unbounded when [None].
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_expansions: Option<usize>,
}

impl SearchConfig {
    pub fn new(allow_diagonal: bool) -> SearchConfig {
        SearchConfig {
            allow_diagonal,
            max_expansions: None,
        }
    }

    pub fn with_diagonal(mut self, allow_diagonal: bool) -> SearchConfig {
        self.allow_diagonal = allow_diagonal;
        self
    }

    pub fn with_max_expansions(mut self, max_expansions: usize) -> SearchConfig {
        self.max_expansions = Some(max_expansions);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder() {
        let config = SearchConfig::default();
        assert!(!config.allow_diagonal);
        assert_eq!(config.max_expansions, None);
        let config = SearchConfig::new(false)
            .with_diagonal(true)
            .with_max_expansions(10);
        assert_eq!(
            config,
            SearchConfig {
                allow_diagonal: true,
                max_expansions: Some(10)
            }
        );
    }
}
