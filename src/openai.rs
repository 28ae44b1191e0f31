//! An OpenAI-compatible HTTP implementation of [RecipeModel].

use crate::config::OpenAiConfig;
use crate::generator::{GenerateError, RecipeModel};
use log::debug;
use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize, Debug)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize, Debug)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize, Debug)]
struct ChatReply {
    content: Option<String>,
}

#[derive(Serialize, Debug)]
struct ImageRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    size: &'a str,
    quality: &'a str,
    n: u32,
}

#[derive(Deserialize, Debug)]
struct ImageResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Deserialize, Debug)]
struct ImageData {
    url: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize, Debug)]
struct ErrorBody {
    message: String,
}

/// Talks to the chat completion and image generation endpoints
pub struct OpenAiClient {
    http: Client,
    api_key: String,
    config: OpenAiConfig,
}

impl OpenAiClient {
    pub fn new<S: ToString>(config: OpenAiConfig, api_key: S) -> OpenAiClient {
        OpenAiClient {
            http: Client::new(),
            api_key: api_key.to_string(),
            config,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// Fetch the bytes behind `url`, such as a generated image
    pub fn download(&self, url: &str) -> Result<Vec<u8>, GenerateError> {
        let response = check(self.http.get(url).send()?)?;
        Ok(response.bytes()?.to_vec())
    }
}

/// Turn non-2xx responses into [GenerateError::Api], preferring the API's own message
fn check(response: Response) -> Result<Response, GenerateError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(GenerateError::Api {
        status: status.as_u16(),
        message: api_message(&body),
    })
}

fn api_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => body.trim().to_string(),
    }
}

impl RecipeModel for OpenAiClient {
    fn complete(&self, system: &str, user: &str) -> Result<String, GenerateError> {
        let request = ChatRequest {
            model: &self.config.recipe_model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };
        debug!("requesting recipe from {}", request.model);

        let response = self
            .http
            .post(self.endpoint("chat/completions"))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()?;
        let reply: ChatResponse = check(response)?.json()?;
        reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(GenerateError::EmptyResponse)
    }

    fn illustrate(&self, prompt: &str) -> Result<String, GenerateError> {
        let request = ImageRequest {
            model: &self.config.image_model,
            prompt,
            size: &self.config.image_size,
            quality: &self.config.image_quality,
            n: 1,
        };
        debug!("requesting {} image from {}", request.size, request.model);

        let response = self
            .http
            .post(self.endpoint("images/generations"))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()?;
        let reply: ImageResponse = check(response)?.json()?;
        reply
            .data
            .into_iter()
            .next()
            .and_then(|image| image.url)
            .ok_or(GenerateError::EmptyResponse)
    }
}
