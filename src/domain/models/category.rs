use serde_derive::Deserialize;
use serde_derive::Serialize;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumIter,
    EnumVariantNames,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CodeAnalysisCategory {
    Explanation,
    Bugs,
    Optimization,
    Tests,
    Resources,
}

impl CodeAnalysisCategory {
    pub fn parse(text: &str) -> Option<CodeAnalysisCategory> {
        let text = text.trim().to_lowercase();
        return CodeAnalysisCategory::iter().find(|e| return e.to_string() == text);
    }

    /// Task specific instruction embedded in the system prompt.
    pub fn instruction(&self) -> &'static str {
        match self {
            CodeAnalysisCategory::Explanation => {
                return "Explain clearly what this code does and how it is structured."
            }
            CodeAnalysisCategory::Bugs => {
                return "Point out likely bugs, security vulnerabilities, and logic errors."
            }
            CodeAnalysisCategory::Optimization => {
                return "Suggest performance optimizations and better coding practices."
            }
            CodeAnalysisCategory::Tests => {
                return "Write thorough test cases or unit tests for this code."
            }
            CodeAnalysisCategory::Resources => {
                return "List documentation and learning resources for the concepts this code uses."
            }
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CodeAnalysisCategory::Explanation => return "Explanation",
            CodeAnalysisCategory::Bugs => return "Bugs",
            CodeAnalysisCategory::Optimization => return "Optimization",
            CodeAnalysisCategory::Tests => return "Tests",
            CodeAnalysisCategory::Resources => return "Resources",
        }
    }
}
