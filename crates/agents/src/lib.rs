use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use krishi_core::catalog::{
    self, CropInfo, CropPrices, CurrentWeather, Equipment, EquipmentKind, EquipmentSort,
    ForecastDay, Scheme, SchemeStatus, SoilReading,
};
use krishi_core::{
    Availability, ChatMessage, Labour, NewCropPlan, NewLabour, NewPost, ProfileUpdate, RuleTable,
    ValidationError,
};
use krishi_observability::{AppMetrics, MetricsSnapshot};
use krishi_storage::{AppState, ConversationRepository, FarmRecordRepository};
use serde::Serialize;
use tracing::{info, instrument, warn};

pub const DEFAULT_HISTORY_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy)]
pub struct AssistantConfig {
    pub history_limit: usize,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

/// Reads a JSON rule table, or returns the built-in one when no path is set.
pub fn load_rule_table(path: Option<&Path>) -> Result<RuleTable> {
    let Some(path) = path else {
        return Ok(RuleTable::krishi());
    };

    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed reading rule table {}", path.display()))?;
    let table = RuleTable::from_json_str(&raw)
        .with_context(|| format!("invalid rule table {}", path.display()))?;

    info!(path = %path.display(), rules = table.rules.len(), "custom rule table loaded");
    Ok(table)
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub reply_text: String,
    pub rule_id: Option<String>,
    pub fallback: bool,
    pub user_message: ChatMessage,
    pub bot_message: ChatMessage,
    pub transcript_len: usize,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct WeatherReport {
    pub current: &'static CurrentWeather,
    pub forecast: &'static [ForecastDay],
}

#[derive(Clone)]
pub struct KrishiAssistant<S>
where
    S: ConversationRepository + FarmRecordRepository,
{
    rules: Arc<RuleTable>,
    store: Arc<S>,
    metrics: Arc<AppMetrics>,
    config: AssistantConfig,
}

impl<S> KrishiAssistant<S>
where
    S: ConversationRepository + FarmRecordRepository,
{
    pub fn new(
        rules: Arc<RuleTable>,
        store: Arc<S>,
        metrics: Arc<AppMetrics>,
        config: AssistantConfig,
    ) -> Self {
        Self {
            rules,
            store,
            metrics,
            config,
        }
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn state(&self) -> Arc<AppState> {
        self.store.snapshot()
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Answers the latest message only; earlier turns never affect the reply.
    /// Blank input is ignored and leaves the transcript unchanged.
    #[instrument(skip(self, text))]
    pub fn handle_chat(&self, text: &str) -> Option<ChatReply> {
        if text.trim().is_empty() {
            return None;
        }

        let started = Instant::now();
        self.metrics.inc_chat_request();

        let classification = self.rules.classify_detailed(text);
        if classification.is_fallback() {
            self.metrics.inc_fallback();
        } else {
            self.metrics.inc_rule_hit();
        }

        let user_message = ChatMessage::user(text);
        let bot_message = ChatMessage::bot(classification.response);
        let state = self.store.append_messages(
            vec![user_message.clone(), bot_message.clone()],
            self.config.history_limit,
        );

        self.metrics.observe_latency(started.elapsed());
        info!(
            rule = classification.rule_id().unwrap_or("fallback"),
            transcript = state.transcript.len(),
            "chat handled"
        );

        Some(ChatReply {
            reply_text: classification.response.to_string(),
            rule_id: classification.rule_id().map(ToString::to_string),
            fallback: classification.is_fallback(),
            user_message,
            bot_message,
            transcript_len: state.transcript.len(),
        })
    }

    pub fn crops(&self, category: Option<&str>) -> Vec<&'static CropInfo> {
        match category {
            Some(category) => catalog::crops_by_category(category),
            None => catalog::crops().iter().collect(),
        }
    }

    pub fn crop(&self, id: &str) -> Option<&'static CropInfo> {
        catalog::crop_by_id(id)
    }

    pub fn equipment(
        &self,
        kind: Option<EquipmentKind>,
        sort: EquipmentSort,
    ) -> Vec<&'static Equipment> {
        catalog::list_equipment(kind, sort)
    }

    pub fn schemes(&self, status: Option<SchemeStatus>) -> Vec<&'static Scheme> {
        match status {
            Some(status) => catalog::schemes_by_status(status),
            None => catalog::schemes().iter().collect(),
        }
    }

    pub fn weather(&self) -> WeatherReport {
        WeatherReport {
            current: catalog::current_weather(),
            forecast: catalog::forecast(),
        }
    }

    /// All tracked crops, or just the one named. An unknown crop yields nothing.
    pub fn market_prices(&self, crop: Option<&str>) -> Vec<&'static CropPrices> {
        match crop {
            Some(crop) => catalog::market_prices_for(crop).into_iter().collect(),
            None => catalog::market_prices().iter().collect(),
        }
    }

    pub fn soil_analysis(&self) -> &'static [SoilReading] {
        catalog::soil_analysis()
    }

    pub fn search_labour(&self, term: &str, availability: Option<Availability>) -> Vec<Labour> {
        self.store
            .snapshot()
            .search_labour(term, availability)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn add_labour(&self, form: NewLabour) -> Result<Arc<AppState>> {
        self.record("add_labour", self.store.add_labour(form))
    }

    pub fn set_labour_availability(
        &self,
        id: &str,
        availability: Availability,
    ) -> Result<Arc<AppState>> {
        self.record(
            "set_labour_availability",
            self.store.set_labour_availability(id, availability),
        )
    }

    pub fn add_crop_plan(&self, form: NewCropPlan) -> Result<Arc<AppState>> {
        self.record("add_crop_plan", self.store.add_crop_plan(form))
    }

    pub fn remove_crop_plan(&self, id: &str) -> Result<Arc<AppState>> {
        self.record("remove_crop_plan", self.store.remove_crop_plan(id))
    }

    pub fn update_profile(&self, update: ProfileUpdate) -> Result<Arc<AppState>> {
        self.record("update_profile", self.store.update_profile(update))
    }

    pub fn add_post(&self, form: NewPost) -> Result<Arc<AppState>> {
        self.record("add_post", self.store.add_post(form))
    }

    pub fn toggle_like(&self, post_id: &str) -> Result<Arc<AppState>> {
        self.record("toggle_like", self.store.toggle_like(post_id))
    }

    fn record(
        &self,
        operation: &'static str,
        outcome: std::result::Result<Arc<AppState>, ValidationError>,
    ) -> Result<Arc<AppState>> {
        match outcome {
            Ok(state) => {
                self.metrics.inc_state_update();
                info!(operation, "state updated");
                Ok(state)
            }
            Err(err) => {
                self.metrics.inc_rejected_submission();
                warn!(operation, error = %err, "submission rejected");
                Err(err).with_context(|| format!("{operation} rejected"))
            }
        }
    }
}
