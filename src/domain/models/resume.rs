#[cfg(test)]
#[path = "resume_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;
use serde_json::json;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

use super::AnalysisError;

/// Resume lists that can be copied out as a single line.
#[derive(Copy, Clone, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ResumeSection {
    Keywords,
    Skills,
}

impl ResumeSection {
    pub fn parse(text: &str) -> Option<ResumeSection> {
        return ResumeSection::iter().find(|e| return e.to_string() == text);
    }
}

/// Structured evaluation of a resume. Every field is required on the wire;
/// lists may be empty.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeAnalysisResult {
    /// Overall score from 1 to 10.
    pub score: f64,
    /// ATS compatibility from 0 to 100.
    pub ats_compatibility: f64,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub keyword_suggestions: Vec<String>,
    pub improvement_recommendations: Vec<String>,
    pub suggested_skills: Vec<String>,
    pub summary: String,
}

impl ResumeAnalysisResult {
    /// Strictly decodes gateway output. Missing fields, wrong types, non JSON
    /// bodies and non finite scores are all rejected.
    pub fn parse(text: &str) -> Result<ResumeAnalysisResult, AnalysisError> {
        if text.trim().is_empty() {
            return Err(AnalysisError::MalformedResponse(
                "gateway returned an empty body".to_string(),
            ));
        }

        let res: ResumeAnalysisResult = serde_json::from_str(text)?;
        if !res.score.is_finite() || !res.ats_compatibility.is_finite() {
            return Err(AnalysisError::MalformedResponse(
                "score and atsCompatibility must be finite numbers".to_string(),
            ));
        }

        return Ok(res);
    }

    /// Items of `section` joined with ", ", ready for the clipboard.
    pub fn section_text(&self, section: ResumeSection) -> String {
        match section {
            ResumeSection::Keywords => return self.keyword_suggestions.join(", "),
            ResumeSection::Skills => return self.suggested_skills.join(", "),
        }
    }

    /// Response schema handed to the gateway alongside the prompt.
    pub fn schema() -> serde_json::Value {
        let string_list = json!({ "type": "ARRAY", "items": { "type": "STRING" } });

        return json!({
            "type": "OBJECT",
            "properties": {
                "score": {
                    "type": "NUMBER",
                    "description": "Overall resume score from 1 to 10"
                },
                "atsCompatibility": {
                    "type": "NUMBER",
                    "description": "ATS compatibility score from 0 to 100"
                },
                "strengths": string_list,
                "weaknesses": string_list,
                "keywordSuggestions": string_list,
                "improvementRecommendations": string_list,
                "suggestedSkills": string_list,
                "summary": {
                    "type": "STRING",
                    "description": "A short executive summary of how effective the resume is"
                }
            },
            "required": [
                "score",
                "atsCompatibility",
                "strengths",
                "weaknesses",
                "keywordSuggestions",
                "improvementRecommendations",
                "suggestedSkills",
                "summary"
            ]
        });
    }
}
