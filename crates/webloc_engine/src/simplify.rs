use std::time::Duration;

use serde_json::{json, Value};

use crate::ServiceError;

/// Shortens a batch of names. The response carries one slot per request slot;
/// a `None` slot means the service gave nothing usable for that name.
#[async_trait::async_trait]
pub trait SimplificationService: Send + Sync {
    async fn simplify_batch(&self, names: &[String]) -> Result<Vec<Option<String>>, ServiceError>;
}

#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub endpoint: String,
    pub model: String,
    pub api_key: String,
    pub request_timeout: Duration,
    pub referer: String,
    pub title: String,
}

impl ServiceSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: "https://openrouter.ai/api/v1/chat/completions".to_string(),
            model: "deepseek/deepseek-chat-v3-0324:free".to_string(),
            api_key: api_key.into(),
            request_timeout: Duration::from_secs(60),
            referer: "https://github.com/".to_string(),
            title: "Filename Simplifier".to_string(),
        }
    }
}

const PROMPT_HEADER: &str = "\
Simplify each of the following file names. Remove redundant or unrelated text \
such as channel names, site branding, clickbait and view counts, but keep the \
main subject. A name that is already short may be returned unchanged.

Examples:
- '1泊2日で行ける！超弾丸香港ひとり旅！ガチで楽しすぎたww' -> '1泊2日で行ける！超弾丸香港ひとり旅！'
- '香港中文大学文物馆藏陶瓷精选展 康熙青花重器「万寿尊」领衔 | 近期展览 | THE VALUE | 艺术新闻' -> '香港中文大学文物馆藏陶瓷精选展，「万寿尊」领衔'
- '【全站首发】【深圳地铁】究极跳号？大鹏通铁路？深惠城际大鹏支线及深圳地铁32号线葵涌站探访实录' -> '深惠城际大鹏支线及深圳地铁32号线葵涌站探访实录'

Reply with a JSON object {\"results\": [...]} whose list holds one entry per \
name, in the same order, each shaped {\"original\": \"...\", \"simplified\": \"...\"}.

Names:
";

pub fn build_prompt(names: &[String]) -> String {
    let mut prompt = PROMPT_HEADER.to_string();
    for name in names {
        prompt.push_str("- ");
        prompt.push_str(name);
        prompt.push('\n');
    }
    prompt
}

/// Chat-completion client for OpenRouter-compatible endpoints.
#[derive(Debug, Clone)]
pub struct OpenRouterSimplifier {
    settings: ServiceSettings,
    client: reqwest::Client,
}

impl OpenRouterSimplifier {
    pub fn new(settings: ServiceSettings) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| ServiceError::Transport(err.to_string()))?;
        Ok(Self { settings, client })
    }
}

#[async_trait::async_trait]
impl SimplificationService for OpenRouterSimplifier {
    async fn simplify_batch(&self, names: &[String]) -> Result<Vec<Option<String>>, ServiceError> {
        let body = json!({
            "model": self.settings.model,
            "messages": [
                {"role": "user", "content": build_prompt(names)}
            ],
            "response_format": {"type": "json_object"}
        });

        let response = self
            .client
            .post(&self.settings.endpoint)
            .bearer_auth(&self.settings.api_key)
            .header("HTTP-Referer", self.settings.referer.as_str())
            .header("X-Title", self.settings.title.as_str())
            .json(&body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: Value = response.json().await.map_err(map_reqwest_error)?;
        let content = envelope["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| ServiceError::MalformedResponse("missing message content".into()))?;
        parse_simplified(content, names.len())
    }
}

/// Matches the service reply back to request slots by position.
///
/// The reply must be JSON holding a list, either bare or under any key of an
/// object. Entries may be strings or objects with a `simplified` field; extra
/// entries are dropped and missing ones become `None`.
pub fn parse_simplified(content: &str, expected: usize) -> Result<Vec<Option<String>>, ServiceError> {
    let cleaned = strip_fences(content);
    let value: Value = serde_json::from_str(cleaned)
        .map_err(|err| ServiceError::MalformedResponse(err.to_string()))?;

    let entries = match &value {
        Value::Array(items) => items,
        Value::Object(map) => map
            .values()
            .find_map(Value::as_array)
            .ok_or_else(|| ServiceError::MalformedResponse("no list in reply".into()))?,
        _ => return Err(ServiceError::MalformedResponse("reply is not a list".into())),
    };

    Ok((0..expected)
        .map(|i| entries.get(i).and_then(entry_text))
        .collect())
}

fn entry_text(entry: &Value) -> Option<String> {
    let text = match entry {
        Value::String(s) => s.as_str(),
        Value::Object(map) => map.get("simplified")?.as_str()?,
        _ => return None,
    };
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn strip_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let trimmed = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix("```").unwrap_or(trimmed);
    trimmed.trim()
}

fn map_reqwest_error(err: reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        return ServiceError::Timeout;
    }
    if err.is_decode() {
        return ServiceError::MalformedResponse(err.to_string());
    }
    ServiceError::Transport(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_lists_each_name() {
        let prompt = build_prompt(&["One".to_string(), "Two".to_string()]);
        assert!(prompt.ends_with("- One\n- Two\n"));
    }

    #[test]
    fn fenced_object_reply_is_parsed() {
        let reply = "```json\n{\"results\": [{\"original\": \"a\", \"simplified\": \"A\"}, \"B\"]}\n```";
        let parsed = parse_simplified(reply, 2).unwrap();
        assert_eq!(parsed, vec![Some("A".to_string()), Some("B".to_string())]);
    }

    #[test]
    fn short_reply_pads_with_none() {
        let parsed = parse_simplified(r#"["a", "b"]"#, 3).unwrap();
        assert_eq!(parsed, vec![Some("a".into()), Some("b".into()), None]);
    }

    #[test]
    fn malformed_entries_become_none() {
        let parsed = parse_simplified(r#"[{"simplified": ""}, 7, {"other": "x"}, "ok"]"#, 4).unwrap();
        assert_eq!(parsed, vec![None, None, None, Some("ok".into())]);
    }

    #[test]
    fn non_json_reply_is_request_failure() {
        assert!(matches!(
            parse_simplified("sorry, I cannot help", 1),
            Err(ServiceError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_simplified(r#"{"note": "nothing"}"#, 1),
            Err(ServiceError::MalformedResponse(_))
        ));
    }
}
