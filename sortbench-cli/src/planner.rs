//! Trial Planner
//!
//! Selects the test classes a run covers.
//!
//! Filtering: regex pattern matched against each class's table name.
//!
//! Ordering: classes keep their declaration order, so tables are filled and
//! summarized in the same sequence on every run.

use regex::Regex;
use sortbench_corpus::TestClass;

/// Test classes selected for a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionPlan {
    /// Ordered list of classes to run
    pub classes: Vec<TestClass>,
}

impl ExecutionPlan {
    /// Whether the filter matched nothing
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Build execution plan from the given classes
pub fn build_plan(
    classes: impl IntoIterator<Item = TestClass>,
    filter: Option<&Regex>,
) -> ExecutionPlan {
    let classes = classes
        .into_iter()
        .filter(|class| filter.is_none_or(|re| re.is_match(class.table_name())))
        .collect();

    ExecutionPlan { classes }
}
