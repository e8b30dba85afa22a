use serde::{Deserialize, Serialize};
use std::fmt;

/// A recoverable issue found while processing one template.
///
/// Problems are reports, not errors: they accumulate across a whole batch
/// and are printed together once every template has been attempted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateProblem {
    /// Display name of the template being processed
    pub template: String,

    /// Tag name of the element the problem was found on
    pub element: Option<String>,

    /// Attribute the problem was found in
    pub attribute: Option<String>,

    /// Human-readable message
    pub message: String,
}

impl fmt::Display for TemplateProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.template)?;
        if let Some(element) = &self.element {
            write!(f, ": <{}>", element)?;
        }
        if let Some(attribute) = &self.attribute {
            write!(f, " [{}]", attribute)?;
        }
        write!(f, ": {}", self.message)
    }
}

/// Batch-wide accumulator for recoverable template problems.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProblemLog {
    problems: Vec<TemplateProblem>,
}

impl ProblemLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, problem: TemplateProblem) {
        self.problems.push(problem);
    }

    pub fn problem(&mut self, template: impl Into<String>, message: impl Into<String>) {
        self.report(TemplateProblem {
            template: template.into(),
            element: None,
            attribute: None,
            message: message.into(),
        });
    }

    pub fn problem_with_element(
        &mut self,
        template: impl Into<String>,
        element: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.report(TemplateProblem {
            template: template.into(),
            element: Some(element.into()),
            attribute: None,
            message: message.into(),
        });
    }

    pub fn problem_with_attribute(
        &mut self,
        template: impl Into<String>,
        element: impl Into<String>,
        attribute: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.report(TemplateProblem {
            template: template.into(),
            element: Some(element.into()),
            attribute: Some(attribute.into()),
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.problems.is_empty()
    }

    pub fn len(&self) -> usize {
        self.problems.len()
    }

    pub fn problems(&self) -> &[TemplateProblem] {
        &self.problems
    }

    pub fn into_problems(self) -> Vec<TemplateProblem> {
        self.problems
    }

    /// The aggregated report the batch driver prints on failure.
    pub fn to_report(&self) -> String {
        self.problems
            .iter()
            .map(|problem| problem.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
