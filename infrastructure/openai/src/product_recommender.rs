use async_trait::async_trait;
use serde_json::json;

use business::domain::cart::value_objects::ProductId;
use business::domain::recommendation::errors::RecommendationError;
use business::domain::recommendation::model::BrowsedProduct;
use business::domain::recommendation::services::ProductRecommenderService;

use crate::client::OpenAIClient;

const SYSTEM_PROMPT: &str = r#"You are the shopping assistant of Bazar, an online store in Mozambique.
Recommend catalog products a shopper is likely to want next, based on what they browsed.

Rules:
- Never recommend a product the shopper already browsed
- Prefer products from related categories at a similar price (prices are in MZN)
- Order from best to worst match

Return ONLY a valid JSON array of product ids, no additional text."#;

pub struct ProductRecommenderOpenAI {
    client: OpenAIClient,
}

impl ProductRecommenderOpenAI {
    pub fn new(client: OpenAIClient) -> Self {
        Self { client }
    }

    fn build_prompt(history: &[BrowsedProduct], preferences: Option<&str>, limit: usize) -> String {
        let browsed = history
            .iter()
            .map(|p| {
                let category = p.category.as_deref().unwrap_or("sem categoria");
                match &p.description {
                    Some(description) => format!(
                        "- [id:{}] {} ({}, {}): {}",
                        p.id, p.name, category, p.price, description
                    ),
                    None => format!("- [id:{}] {} ({}, {})", p.id, p.name, category, p.price),
                }
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"The shopper browsed these products:
{}

Shopper preferences: {}

Return up to {} product ids, for example ["id-1", "id-2"]."#,
            browsed,
            preferences.unwrap_or("none given"),
            limit
        )
    }

    /// Reads the first JSON array in the reply. Entries may be plain ids or
    /// objects carrying an `id` field.
    fn parse_response(content: &str) -> Result<Vec<ProductId>, RecommendationError> {
        let json_str = regex::Regex::new(r"\[[\s\S]*\]")
            .ok()
            .and_then(|re| re.find(content))
            .map(|m| m.as_str())
            .ok_or(RecommendationError::InvalidReply)?;

        let parsed: Vec<serde_json::Value> =
            serde_json::from_str(json_str).map_err(|_| RecommendationError::InvalidReply)?;

        Ok(parsed
            .iter()
            .filter_map(|entry| {
                let id = match entry {
                    serde_json::Value::String(id) => id.as_str(),
                    other => other.get("id")?.as_str()?,
                };
                ProductId::new(id).ok()
            })
            .collect())
    }
}

#[async_trait]
impl ProductRecommenderService for ProductRecommenderOpenAI {
    async fn recommend(
        &self,
        history: &[BrowsedProduct],
        preferences: Option<String>,
        limit: usize,
    ) -> Result<Vec<ProductId>, RecommendationError> {
        if history.is_empty() {
            return Ok(vec![]);
        }

        let prompt = Self::build_prompt(history, preferences.as_deref(), limit);

        let body = json!({
            "model": self.client.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": prompt},
            ],
            "temperature": 0.4,
            "max_tokens": 500,
        });

        let response = self
            .client
            .client
            .post(self.client.chat_completions_url())
            .header("Content-Type", "application/json")
            .header("Authorization", self.client.auth_header())
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("OpenAI request failed: {}", e);
                RecommendationError::GenerationFailed
            })?;

        if !response.status().is_success() {
            tracing::error!("OpenAI answered with status {}", response.status());
            return Err(RecommendationError::GenerationFailed);
        }

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|_| RecommendationError::GenerationFailed)?;

        let content = data["choices"]
            .as_array()
            .and_then(|choices| choices.first())
            .and_then(|choice| choice["message"]["content"].as_str())
            .ok_or(RecommendationError::GenerationFailed)?;

        Self::parse_response(content)
    }
}
