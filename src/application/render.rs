#[cfg(test)]
#[path = "render_test.rs"]
mod tests;

use owo_colors::OwoColorize;
use owo_colors::Stream;

use crate::domain::models::ChatMessage;
use crate::domain::models::ChatRole;
use crate::domain::models::CodeAnalysisCategory;
use crate::domain::models::ResumeAnalysisResult;
use crate::domain::models::SlotState;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScoreTier {
    High,
    Medium,
    Low,
}

impl ScoreTier {
    pub fn from_score(score: f64) -> ScoreTier {
        if score >= 8.0 {
            return ScoreTier::High;
        }
        if score >= 5.0 {
            return ScoreTier::Medium;
        }

        return ScoreTier::Low;
    }
}

fn paint_tier(text: &str, tier: ScoreTier) -> String {
    match tier {
        ScoreTier::High => {
            return text
                .if_supports_color(Stream::Stdout, |t| return t.green())
                .to_string()
        }
        ScoreTier::Medium => {
            return text
                .if_supports_color(Stream::Stdout, |t| return t.yellow())
                .to_string()
        }
        ScoreTier::Low => {
            return text
                .if_supports_color(Stream::Stdout, |t| return t.red())
                .to_string()
        }
    }
}

fn heading(text: &str) -> String {
    return text
        .if_supports_color(Stream::Stdout, |t| return t.bold())
        .to_string();
}

fn bullets(title: &str, items: &[String]) -> String {
    let mut lines = vec![heading(title)];
    if items.is_empty() {
        lines.push("- (none)".to_string());
    }
    for item in items {
        lines.push(format!("- {item}"));
    }

    return lines.join("\n");
}

pub fn error(message: &str) -> String {
    return message
        .if_supports_color(Stream::Stderr, |t| return t.red())
        .to_string();
}

pub fn resume(res: &ResumeAnalysisResult) -> String {
    let score = paint_tier(
        &format!("{}/10", res.score),
        ScoreTier::from_score(res.score),
    );

    let plan = res
        .improvement_recommendations
        .iter()
        .enumerate()
        .map(|(idx, rec)| return format!("{}. {rec}", idx + 1))
        .collect::<Vec<String>>();

    let mut sections = vec![
        format!(
            "{} {score}    {} {}%",
            heading("Score:"),
            heading("ATS compatibility:"),
            res.ats_compatibility
        ),
        format!("{}\n{}", heading("Executive summary"), res.summary),
        bullets("Strengths", &res.strengths),
        bullets("Weaknesses", &res.weaknesses),
        bullets("Keyword suggestions", &res.keyword_suggestions),
        bullets("Suggested skills", &res.suggested_skills),
    ];

    if plan.is_empty() {
        sections.push(format!("{}\n- (none)", heading("Improvement plan")));
    } else {
        sections.push(format!("{}\n{}", heading("Improvement plan"), plan.join("\n")));
    }

    return sections.join("\n\n");
}

pub fn category_result(category: CodeAnalysisCategory, state: &SlotState<String>) -> String {
    let title = heading(&format!("## {}", category.title()));
    match state {
        SlotState::Idle => return format!("{title}\nNothing to analyze, the code is empty."),
        SlotState::Loading => return format!("{title}\nStill running..."),
        SlotState::Succeeded(text) => return format!("{title}\n{text}"),
        SlotState::Failed(message) => return format!("{title}\n{}", error(message)),
    }
}

pub fn chat_message(message: &ChatMessage) -> String {
    match message.role {
        ChatRole::User => return format!("{} {}", heading("you:"), message.content),
        ChatRole::Assistant => return format!("{} {}", heading("tutor:"), message.content),
    }
}
