//! Keyword deriver: free-text interests to maps search keywords

use serde_json::json;
use std::sync::Arc;
use tracing::debug;

use crate::agent::prompts::{PromptTemplate, KEYWORDS_TEMPLATE};
use crate::agent::provider::{complete, LlmProvider};
use crate::error::{Error, Result};

/// Asks the model for search keywords
#[derive(Clone)]
pub struct KeywordDeriver {
    llm: Arc<dyn LlmProvider>,
    template: Arc<PromptTemplate>,
}

impl KeywordDeriver {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Result<Self> {
        Ok(KeywordDeriver {
            llm,
            template: Arc::new(PromptTemplate::new("keywords", KEYWORDS_TEMPLATE)?),
        })
    }

    pub async fn derive(&self, interests: &str) -> Result<Vec<String>> {
        let interests = interests.trim();
        if interests.is_empty() {
            return Err(Error::InvalidInput("Interests must not be empty".to_string()));
        }

        let prompt = self.template.render(&json!({ "interests": interests }))?;
        let reply = complete(self.llm.as_ref(), &prompt).await?;
        let keywords = parse_keywords(&reply);
        debug!("Derived keywords {:?} from {:?}", keywords, interests);

        if keywords.is_empty() {
            return Err(Error::NoWaypointsFound(format!(
                "no search keywords could be derived from {:?}",
                interests
            )));
        }
        Ok(keywords)
    }
}

/// Drops a leading `1.` or `2)` list marker
fn strip_numbering(item: &str) -> &str {
    let rest = item.trim_start_matches(|c: char| c.is_ascii_digit());
    if rest.len() == item.len() {
        return item;
    }
    match rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
        Some(rest) => rest,
        None => item,
    }
}

/// Accepts a JSON array of strings, or a comma/newline separated list with
/// optional quotes, brackets, bullets and numbering.
pub fn parse_keywords(reply: &str) -> Vec<String> {
    let reply = reply.trim();

    if let Ok(list) = serde_json::from_str::<Vec<String>>(reply) {
        return list
            .into_iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect();
    }

    reply
        .split(|c| c == ',' || c == '\n')
        .map(|k| {
            let k = k.trim().trim_start_matches(|c: char| c == '-' || c == '*' || c == '•');
            strip_numbering(k.trim())
                .trim_matches(|c: char| c == '[' || c == ']' || c == '"' || c == '\'' || c.is_whitespace())
                .to_string()
        })
        .filter(|k| !k.is_empty())
        .collect()
}
