#[cfg(test)]
#[path = "gemini_test.rs"]
mod tests;

use std::time::Duration;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::ChatSession;
use crate::domain::models::Gateway;
use crate::domain::models::GatewayName;
use crate::domain::models::GatewayResponse;
use crate::domain::models::GatewayRole;
use crate::domain::models::GenerateRequest;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Model {
    name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ModelListResponse {
    #[serde(default)]
    models: Vec<Model>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<GatewayRole>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn new(role: Option<GatewayRole>, text: &str) -> Content {
        return Content {
            role,
            parts: vec![Part {
                text: text.to_string(),
            }],
        };
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate. Blocked or empty replies
    /// come back as an empty string.
    fn text(&self) -> String {
        return self
            .candidates
            .first()
            .and_then(|candidate| return candidate.content.as_ref())
            .map(|content| {
                return content
                    .parts
                    .iter()
                    .map(|part| return part.text.as_str())
                    .collect::<String>();
            })
            .unwrap_or_default();
    }
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

pub struct Gemini {
    url: String,
    token: String,
    timeout: String,
}

impl Default for Gemini {
    fn default() -> Gemini {
        return Gemini {
            url: Config::get(ConfigKey::GeminiURL),
            token: Config::get(ConfigKey::GeminiToken),
            timeout: Config::get(ConfigKey::GatewayHealthCheckTimeout),
        };
    }
}

impl Gemini {
    fn model_path(model: &str) -> String {
        if model.starts_with("models/") {
            return model.to_string();
        }

        return format!("models/{model}");
    }

    async fn post_generate(
        &self,
        model: &str,
        req: &GenerateContentRequest,
    ) -> Result<GatewayResponse> {
        let res = reqwest::Client::new()
            .post(format!(
                "{url}/v1beta/{model}:generateContent?key={key}",
                url = self.url,
                model = Gemini::model_path(model),
                key = self.token,
            ))
            .json(req)
            .send()
            .await?;

        let status = res.status().as_u16();
        if !res.status().is_success() {
            let body = res.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| return e.error.message)
                .unwrap_or(body);

            tracing::error!(
                status = status,
                error_message = %message,
                "Failed to make generate request to Gemini"
            );
            bail!(format!(
                "Failed to make generate request to Gemini, {status}: {message}"
            ));
        }

        let body = res.json::<GenerateContentResponse>().await?;
        let text = body.text();
        tracing::debug!(
            model = model,
            length = text.len(),
            "Gemini generate request succeeded"
        );

        return Ok(GatewayResponse { text });
    }
}

#[async_trait]
impl Gateway for Gemini {
    fn name(&self) -> GatewayName {
        return GatewayName::Gemini;
    }

    #[allow(clippy::implicit_return)]
    async fn health_check(&self) -> Result<()> {
        if self.url.is_empty() {
            bail!("Gemini URL is not defined");
        }
        if self.token.is_empty() {
            bail!("Gemini token is not defined");
        }

        let res = reqwest::Client::new()
            .get(format!(
                "{url}/v1beta/models?key={key}",
                url = self.url,
                key = self.token
            ))
            .timeout(Duration::from_millis(self.timeout.parse::<u64>()?))
            .send()
            .await;

        let res = match res {
            Ok(res) => res,
            Err(err) => {
                tracing::error!(error = ?err, "Gemini is not reachable");
                bail!("Gemini is not reachable");
            }
        };

        let status = res.status().as_u16();
        if status >= 400 {
            tracing::error!(status = status, "Gemini health check failed");
            bail!("Gemini health check failed");
        }

        return Ok(());
    }

    #[allow(clippy::implicit_return)]
    async fn list_models(&self) -> Result<Vec<String>> {
        let res = reqwest::Client::new()
            .get(format!(
                "{url}/v1beta/models?key={key}",
                url = self.url,
                key = self.token
            ))
            .send()
            .await?
            .json::<ModelListResponse>()
            .await?;

        let mut models: Vec<String> = res
            .models
            .iter()
            .filter(|model| {
                return model
                    .supported_generation_methods
                    .contains(&"generateContent".to_string());
            })
            .map(|model| {
                return model.name.trim_start_matches("models/").to_string();
            })
            .collect();

        models.sort();

        return Ok(models);
    }

    #[allow(clippy::implicit_return)]
    async fn generate(&self, request: GenerateRequest) -> Result<GatewayResponse> {
        let generation_config = request.response_schema.map(|schema| {
            return GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: schema,
            };
        });

        let req = GenerateContentRequest {
            contents: vec![Content::new(Some(GatewayRole::User), &request.prompt)],
            system_instruction: Some(Content::new(None, &request.system_instruction)),
            generation_config,
        };

        return self.post_generate(&request.model, &req).await;
    }

    #[allow(clippy::implicit_return)]
    async fn send_message(&self, chat: &ChatSession, text: &str) -> Result<GatewayResponse> {
        let mut contents = chat
            .history
            .iter()
            .map(|turn| return Content::new(Some(turn.role), &turn.text))
            .collect::<Vec<Content>>();
        contents.push(Content::new(Some(GatewayRole::User), text));

        let req = GenerateContentRequest {
            contents,
            system_instruction: Some(Content::new(None, &chat.system_instruction)),
            generation_config: None,
        };

        return self.post_generate(&chat.model, &req).await;
    }
}
