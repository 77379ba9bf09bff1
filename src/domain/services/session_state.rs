#[cfg(test)]
#[path = "session_state_test.rs"]
mod tests;

use std::collections::HashMap;

use strum::IntoEnumIterator;

use super::Orchestrator;
use crate::domain::models::AnalysisError;
use crate::domain::models::ChatMessage;
use crate::domain::models::ChatRole;
use crate::domain::models::ChatTranscript;
use crate::domain::models::CodeAnalysisCategory;
use crate::domain::models::Language;
use crate::domain::models::ResumeAnalysisResult;
use crate::domain::models::Slot;
use crate::domain::models::SlotState;

pub const RESUME_ERROR: &str = "Failed to analyze resume. Please try again.";
pub const CODE_ANALYSIS_ERROR: &str = "Error running analysis. Please try again.";
pub const TUTOR_ERROR: &str = "There was an error connecting to the tutor.";

/// In memory state for the resume view. Lives as long as the view does.
#[derive(Default)]
pub struct ResumeSession {
    slot: Slot<ResumeAnalysisResult>,
}

impl ResumeSession {
    pub fn state(&self) -> &SlotState<ResumeAnalysisResult> {
        return self.slot.state();
    }

    pub fn begin(&mut self, resume_text: &str) -> bool {
        return self.slot.trigger(resume_text);
    }

    pub fn complete(&mut self, res: Result<ResumeAnalysisResult, AnalysisError>) {
        match res {
            Ok(analysis) => self.slot.succeed(analysis),
            Err(err) => {
                tracing::error!(error = %err, "Resume analysis failed");
                self.slot.fail(RESUME_ERROR);
            }
        }
    }

    /// Runs one analysis cycle. A blank resume, or one already in flight,
    /// leaves the state as it was.
    pub async fn analyze(
        &mut self,
        orchestrator: &Orchestrator,
        resume_text: &str,
        target_role: &str,
    ) -> &SlotState<ResumeAnalysisResult> {
        if !self.begin(resume_text) {
            return self.state();
        }

        let res = orchestrator.evaluate_resume(resume_text, target_role).await;
        self.complete(res);

        return self.state();
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum LatestOutput {
    Chat,
    Analysis(CodeAnalysisCategory),
}

/// In memory state for one (code, language) pair: a slot per analysis
/// category, and the tutoring transcript with its own slot.
pub struct CodeSession {
    code: String,
    language: Language,
    results: HashMap<CodeAnalysisCategory, Slot<String>>,
    transcript: ChatTranscript,
    chat: Slot<String>,
    latest: Option<LatestOutput>,
}

impl CodeSession {
    pub fn new(code: &str, language: Language) -> CodeSession {
        return CodeSession {
            code: code.to_string(),
            language,
            results: CodeAnalysisCategory::iter()
                .map(|category| return (category, Slot::default()))
                .collect(),
            transcript: ChatTranscript::default(),
            chat: Slot::default(),
            latest: None,
        };
    }

    pub fn language(&self) -> Language {
        return self.language;
    }

    /// Switches to a new code buffer. Results and transcript belong to the
    /// old pair, so they are dropped whenever either side changes.
    pub fn set_context(&mut self, code: &str, language: Language) {
        if self.code == code && self.language == language {
            return;
        }

        *self = CodeSession::new(code, language);
    }

    pub fn result(&self, category: CodeAnalysisCategory) -> &SlotState<String> {
        return self.results[&category].state();
    }

    pub fn begin_analysis(&mut self, category: CodeAnalysisCategory) -> bool {
        let code = &self.code;
        return self.results.entry(category).or_default().trigger(code);
    }

    pub fn complete_analysis(
        &mut self,
        category: CodeAnalysisCategory,
        res: Result<String, AnalysisError>,
    ) {
        let slot = self.results.entry(category).or_default();
        if !slot.is_loading() {
            tracing::warn!(category = %category, "ignoring analysis without a request in flight");
            return;
        }

        match res {
            Ok(text) => {
                slot.succeed(text);
                self.latest = Some(LatestOutput::Analysis(category));
            }
            Err(err) => {
                tracing::error!(error = %err, category = %category, "Code analysis failed");
                slot.fail(CODE_ANALYSIS_ERROR);
            }
        }
    }

    /// Runs the analysis for one category. Other categories are untouched.
    pub async fn analyze(
        &mut self,
        orchestrator: &Orchestrator,
        category: CodeAnalysisCategory,
    ) -> &SlotState<String> {
        if !self.begin_analysis(category) {
            return self.result(category);
        }

        let res = orchestrator
            .analyze_code(&self.code, self.language, category)
            .await;
        self.complete_analysis(category, res);

        return self.result(category);
    }

    pub fn transcript(&self) -> &ChatTranscript {
        return &self.transcript;
    }

    pub fn clear_transcript(&mut self) {
        self.transcript.clear();
        self.chat.reset();
        if self.latest == Some(LatestOutput::Chat) {
            self.latest = None;
        }
    }

    /// Text of the most recent successful tutor reply or category analysis,
    /// whichever resolved last. `None` once that slot has been re-triggered
    /// without succeeding again.
    pub fn latest_output(&self) -> Option<&str> {
        let slot = match self.latest? {
            LatestOutput::Chat => &self.chat,
            LatestOutput::Analysis(category) => self.results.get(&category)?,
        };

        return slot.result().map(|text| return text.as_str());
    }

    pub fn chat_state(&self) -> &SlotState<String> {
        return self.chat.state();
    }

    pub fn begin_turn(&mut self, user_input: &str) -> bool {
        return self.chat.trigger(user_input);
    }

    /// Appends both sides of a resolved turn. Nothing is appended while the
    /// turn is still in flight.
    pub fn complete_turn(&mut self, user_input: &str, res: Result<String, AnalysisError>) {
        if !self.chat.is_loading() {
            tracing::warn!("ignoring tutor reply without a turn in flight");
            return;
        }

        self.transcript.push(ChatMessage::new(ChatRole::User, user_input));

        match res {
            Ok(reply) => {
                self.transcript.push(ChatMessage::new(ChatRole::Assistant, &reply));
                self.chat.succeed(reply);
                self.latest = Some(LatestOutput::Chat);
            }
            Err(err) => {
                tracing::error!(error = %err, "Tutor turn failed");
                self.transcript.push(ChatMessage::new(ChatRole::Assistant, TUTOR_ERROR));
                self.chat.fail(TUTOR_ERROR);
            }
        }
    }

    pub async fn send(
        &mut self,
        orchestrator: &Orchestrator,
        user_input: &str,
    ) -> &SlotState<String> {
        if !self.begin_turn(user_input) {
            return self.chat_state();
        }

        let res = orchestrator
            .send_turn(&self.code, self.language, &self.transcript, user_input)
            .await;
        self.complete_turn(user_input, res);

        return self.chat_state();
    }
}
