#[cfg(test)]
#[path = "orchestrator_test.rs"]
mod tests;

use super::prompts;
use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AnalysisError;
use crate::domain::models::ChatSession;
use crate::domain::models::ChatTranscript;
use crate::domain::models::CodeAnalysisCategory;
use crate::domain::models::GatewayBox;
use crate::domain::models::GatewayName;
use crate::domain::models::GenerateRequest;
use crate::domain::models::Language;
use crate::domain::models::ResumeAnalysisResult;
use crate::infrastructure::gateways::GatewayManager;

/// Builds task specific requests, sends them through the gateway, and turns
/// whatever comes back into either a typed value or an `AnalysisError`.
/// Requests are never retried.
pub struct Orchestrator {
    gateway: GatewayBox,
    resume_model: String,
    code_model: String,
}

impl Orchestrator {
    pub fn new(gateway: GatewayBox, resume_model: &str, code_model: &str) -> Orchestrator {
        return Orchestrator {
            gateway,
            resume_model: resume_model.to_string(),
            code_model: code_model.to_string(),
        };
    }

    /// Builds the orchestrator from loaded config. A missing credential is
    /// fatal.
    pub fn from_config() -> Result<Orchestrator, AnalysisError> {
        let gateway_name = Config::get(ConfigKey::Gateway);
        let name = GatewayName::parse(gateway_name.to_string()).ok_or_else(|| {
            return AnalysisError::Configuration(format!("Unknown gateway '{gateway_name}'"));
        })?;

        if name == GatewayName::Gemini {
            Config::require(ConfigKey::GeminiToken)?;
        }

        let gateway = GatewayManager::get(name)
            .map_err(|err| return AnalysisError::Configuration(err.to_string()))?;

        return Ok(Orchestrator::new(
            gateway,
            &Config::get(ConfigKey::ResumeModel),
            &Config::get(ConfigKey::CodeModel),
        ));
    }

    pub fn gateway(&self) -> &GatewayBox {
        return &self.gateway;
    }

    pub async fn evaluate_resume(
        &self,
        resume_text: &str,
        target_role: &str,
    ) -> Result<ResumeAnalysisResult, AnalysisError> {
        let req = GenerateRequest {
            model: self.resume_model.to_string(),
            prompt: prompts::resume_prompt(resume_text, target_role),
            system_instruction: prompts::RESUME_SYSTEM_PROMPT.to_string(),
            response_schema: Some(ResumeAnalysisResult::schema()),
        };

        let res = self.gateway.generate(req).await?;
        let analysis = ResumeAnalysisResult::parse(&res.text);
        if let Err(err) = &analysis {
            tracing::error!(error = %err, "Resume analysis did not match the requested schema");
        }

        return analysis;
    }

    pub async fn analyze_code(
        &self,
        code: &str,
        language: Language,
        category: CodeAnalysisCategory,
    ) -> Result<String, AnalysisError> {
        let req = GenerateRequest {
            model: self.code_model.to_string(),
            prompt: prompts::code_prompt(code, language),
            system_instruction: prompts::code_system_instruction(category),
            response_schema: None,
        };

        let res = self.gateway.generate(req).await?;
        if res.text.trim().is_empty() {
            tracing::warn!(category = %category, "Gateway returned an empty code analysis");
            return Ok(prompts::CODE_ANALYSIS_FALLBACK.to_string());
        }

        return Ok(res.text);
    }

    /// Sends one tutoring turn. `history` is the transcript as it stood
    /// before `user_input`; the caller appends both sides once this resolves.
    pub async fn send_turn(
        &self,
        code: &str,
        language: Language,
        history: &ChatTranscript,
        user_input: &str,
    ) -> Result<String, AnalysisError> {
        let chat = ChatSession::new(
            &self.code_model,
            &prompts::tutor_system_instruction(code, language),
            history.to_gateway_history(),
        );

        let res = self.gateway.send_message(&chat, user_input).await?;
        if res.text.trim().is_empty() {
            tracing::warn!("Gateway returned an empty tutor reply");
            return Ok(prompts::TUTOR_FALLBACK.to_string());
        }

        return Ok(res.text);
    }
}
