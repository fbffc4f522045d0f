//! Test Classes
//!
//! The fixed set of input shapes the harness measures. A class names both the
//! generator that produced an input and the measurement table its rows land in.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input-shape scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TestClass {
    /// Ascending run, step 1
    Sorted,
    /// Descending run, step 1
    ReverseSorted,
    /// Sorted prefix followed by random values
    PartiallySorted,
    /// Distinct random values
    Random,
    /// Distinct random values plus one large outlier
    RandomWithOutliers,
}

impl TestClass {
    /// All classes in execution order
    pub const ALL: [TestClass; 5] = [
        TestClass::Sorted,
        TestClass::ReverseSorted,
        TestClass::PartiallySorted,
        TestClass::Random,
        TestClass::RandomWithOutliers,
    ];

    /// Stable table name; also the measurement file stem.
    pub fn table_name(self) -> &'static str {
        match self {
            TestClass::Sorted => "Correctly-Sorted",
            TestClass::ReverseSorted => "Reverse-Sorted",
            TestClass::PartiallySorted => "Partial-Sorted",
            TestClass::Random => "Random-Sorted",
            TestClass::RandomWithOutliers => "Random-Outliers",
        }
    }

    /// Class whose table name equals `name`, ignoring ASCII case.
    ///
    /// Case-insensitive filesystems map such names onto the same file.
    pub fn from_table_name(name: &str) -> Option<TestClass> {
        TestClass::ALL
            .into_iter()
            .find(|class| class.table_name().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for TestClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table_name())
    }
}

/// Error returned when a string names no known test class
#[derive(Debug, Clone, Error)]
#[error("Unknown test class: {0}")]
pub struct ParseTestClassError(pub String);

impl std::str::FromStr for TestClass {
    type Err = ParseTestClassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        TestClass::from_table_name(wanted)
            .or_else(|| match wanted.to_lowercase().as_str() {
                "sorted" => Some(TestClass::Sorted),
                "reverse-sorted" | "reverse" => Some(TestClass::ReverseSorted),
                "partially-sorted" | "partial" => Some(TestClass::PartiallySorted),
                "random" => Some(TestClass::Random),
                "random-with-outliers" | "outliers" => Some(TestClass::RandomWithOutliers),
                _ => None,
            })
            .ok_or_else(|| ParseTestClassError(wanted.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_names_are_unique() {
        let mut names: Vec<_> = TestClass::ALL.iter().map(|c| c.table_name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), TestClass::ALL.len());
    }

    #[test]
    fn test_parse_table_name_and_alias() {
        assert_eq!(
            "Random-Outliers".parse::<TestClass>().unwrap(),
            TestClass::RandomWithOutliers
        );
        assert_eq!("partial".parse::<TestClass>().unwrap(), TestClass::PartiallySorted);
        assert!("bogo".parse::<TestClass>().is_err());
    }

    #[test]
    fn test_from_table_name_ignores_case() {
        assert_eq!(
            TestClass::from_table_name("reverse-SORTED"),
            Some(TestClass::ReverseSorted)
        );
        assert_eq!(TestClass::from_table_name("Results"), None);
        assert_eq!(TestClass::from_table_name("reverse"), None);
    }
}
