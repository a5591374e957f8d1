use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::RuleTableError;
use crate::models::Rule;

pub const FALLBACK_RESPONSE: &str = "I understand your question about farming. As your AI assistant, I can help with crop management, pest control, weather advice, and farming techniques. Could you provide more specific details about your farming challenge?";

/// First-match keyword classification. Rules are tried in slice order and the
/// first rule with any trigger contained in the lower-cased input wins.
pub fn classify<'a>(input: &str, rules: &'a [Rule], default_response: &'a str) -> &'a str {
    match first_match(&input.to_lowercase(), rules) {
        Some(rule) => rule.response.as_str(),
        None => default_response,
    }
}

fn first_match<'a>(lower: &str, rules: &'a [Rule]) -> Option<&'a Rule> {
    rules.iter().find(|rule| contains_any(lower, &rule.triggers))
}

fn contains_any<S: AsRef<str>>(input: &str, needles: &[S]) -> bool {
    needles.iter().any(|needle| input.contains(needle.as_ref()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification<'a> {
    pub rule: Option<&'a Rule>,
    pub response: &'a str,
}

impl Classification<'_> {
    pub fn rule_id(&self) -> Option<&str> {
        self.rule.map(|rule| rule.id.as_str())
    }

    pub fn is_fallback(&self) -> bool {
        self.rule.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRuleTable")]
pub struct RuleTable {
    pub default_response: String,
    pub rules: Vec<Rule>,
}

/// Rule-table file contents before trigger normalisation.
#[derive(Deserialize)]
struct RawRuleTable {
    default_response: String,
    rules: Vec<Rule>,
}

impl TryFrom<RawRuleTable> for RuleTable {
    type Error = RuleTableError;

    fn try_from(raw: RawRuleTable) -> Result<Self, Self::Error> {
        Self::new(raw.rules, raw.default_response)
    }
}

impl RuleTable {
    /// Builds a table, lower-casing triggers and rejecting entries that would
    /// match everything or could never match.
    pub fn new(
        rules: Vec<Rule>,
        default_response: impl Into<String>,
    ) -> Result<Self, RuleTableError> {
        let mut seen = HashSet::new();
        let mut normalized = Vec::with_capacity(rules.len());

        for mut rule in rules {
            if !seen.insert(rule.id.clone()) {
                return Err(RuleTableError::DuplicateRuleId(rule.id));
            }
            if rule.triggers.is_empty() {
                return Err(RuleTableError::NoTriggers(rule.id));
            }

            rule.triggers = rule
                .triggers
                .iter()
                .map(|trigger| trigger.trim().to_lowercase())
                .collect();

            if rule.triggers.iter().any(String::is_empty) {
                return Err(RuleTableError::EmptyTrigger(rule.id));
            }

            normalized.push(rule);
        }

        Ok(Self {
            default_response: default_response.into(),
            rules: normalized,
        })
    }

    pub fn from_json_str(raw: &str) -> Result<Self, RuleTableError> {
        let parsed: RawRuleTable = serde_json::from_str(raw)?;
        Self::try_from(parsed)
    }

    /// The Krishi Mitra chatbot table, in its original priority order.
    pub fn krishi() -> Self {
        Self {
            default_response: FALLBACK_RESPONSE.to_string(),
            rules: vec![
                Rule::new(
                    "pest_disease",
                    &["pest", "disease"],
                    "For pest control, I recommend integrated pest management (IPM). Can you describe the symptoms you're seeing? Also, consider using neem oil as a natural pesticide. Would you like me to suggest specific treatments based on your crop type?",
                ),
                Rule::new(
                    "weather",
                    &["weather", "rain"],
                    "Based on current weather patterns in Kerala, expect moderate rainfall this week. This is good for most crops, but ensure proper drainage for root vegetables. Would you like specific weather recommendations for your crops?",
                ),
                Rule::new(
                    "fertilizer",
                    &["fertilizer", "nutrition"],
                    "For organic farming, I recommend a balanced NPK ratio. Consider using compost and vermicompost. The specific fertilizer depends on your crop and soil condition. What crops are you growing?",
                ),
                Rule::new(
                    "tomato",
                    &["tomato"],
                    "Tomatoes need well-drained soil and regular watering. Plant spacing should be 60×45 cm. Watch out for early blight and use copper-based fungicides if needed. Are you growing them in the field or greenhouse?",
                ),
                Rule::new(
                    "rice",
                    &["rice", "paddy"],
                    "Rice cultivation requires flooding technique. Ensure proper leveling of fields and maintain 2-3 inches of water. Transplant 25-30 day old seedlings. Which variety are you planning to grow?",
                ),
            ],
        }
    }

    pub fn classify(&self, input: &str) -> &str {
        classify(input, &self.rules, &self.default_response)
    }

    pub fn classify_detailed(&self, input: &str) -> Classification<'_> {
        let rule = first_match(&input.to_lowercase(), &self.rules);
        Classification {
            rule,
            response: rule.map_or(self.default_response.as_str(), |rule| rule.response.as_str()),
        }
    }

    pub fn rule(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.id == id)
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::krishi()
    }
}
