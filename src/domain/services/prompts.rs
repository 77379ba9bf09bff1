#[cfg(test)]
#[path = "prompts_test.rs"]
mod tests;

use crate::domain::models::CodeAnalysisCategory;
use crate::domain::models::Language;

pub const CODE_ANALYSIS_FALLBACK: &str = "No analysis could be generated.";
pub const TUTOR_FALLBACK: &str = "I'm having trouble responding right now. Please try again.";

pub const RESUME_SYSTEM_PROMPT: &str = "You are an HR professional and career coach with deep knowledge of Applicant Tracking Systems (ATS). Give a thorough, honest, and actionable evaluation of the candidate's resume. Reply with structured JSON only.";

pub fn resume_prompt(resume_text: &str, target_role: &str) -> String {
    let role = target_role.trim();
    let mut subject = "Evaluate the following resume".to_string();
    if !role.is_empty() {
        subject = format!("{subject} for the target role of {role}");
    }

    return format!("{subject}. Give a detailed evaluation.\n\nResume:\n{resume_text}");
}

fn fenced(code: &str, language: Language) -> String {
    return format!("```{language}\n{code}\n```");
}

pub fn code_prompt(code: &str, language: Language) -> String {
    return format!("Code ({language}):\n\n{}", fenced(code, language));
}

pub fn code_system_instruction(category: CodeAnalysisCategory) -> String {
    return format!(
        "You are an experienced software engineer and mentor. {} Format the response as Markdown.",
        category.instruction()
    );
}

pub fn tutor_system_instruction(code: &str, language: Language) -> String {
    return format!(
        "You are a patient programming tutor helping a student with their {language} code:\n\n{}\n\nFocus on explaining the logic and suggesting improvements.",
        fenced(code, language)
    );
}
