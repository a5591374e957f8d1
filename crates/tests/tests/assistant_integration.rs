use std::io::Write;
use std::sync::Arc;
use std::thread;

use krishi_agents::{load_rule_table, AssistantConfig, KrishiAssistant};
use krishi_core::{
    Availability, NewCropPlan, NewLabour, ProfileUpdate, RuleTable, Sender, ValidationError,
    FALLBACK_RESPONSE, GREETING,
};
use krishi_observability::AppMetrics;
use krishi_storage::MemoryStore;
use serde_json::json;

fn assistant_with(rules: RuleTable, history_limit: usize) -> KrishiAssistant<MemoryStore> {
    KrishiAssistant::new(
        Arc::new(rules),
        Arc::new(MemoryStore::new()),
        AppMetrics::shared(),
        AssistantConfig { history_limit },
    )
}

fn assistant() -> KrishiAssistant<MemoryStore> {
    assistant_with(RuleTable::krishi(), 100)
}

#[test]
fn conversation_starts_with_greeting_and_records_both_sides() {
    let assistant = assistant();
    let reply = assistant
        .handle_chat("Heavy RAIN expected?")
        .expect("non-blank input gets a reply");

    assert_eq!(reply.rule_id.as_deref(), Some("weather"));
    assert!(reply.reply_text.contains("Kerala"));

    let state = assistant.state();
    let senders = state
        .transcript
        .iter()
        .map(|m| m.sender)
        .collect::<Vec<_>>();
    assert_eq!(senders, vec![Sender::Bot, Sender::User, Sender::Bot]);
    assert_eq!(state.transcript[0].content, GREETING);
    assert_eq!(state.transcript[1].content, "Heavy RAIN expected?");
    assert_eq!(state.transcript[2].content, reply.reply_text);
}

#[test]
fn priority_follows_table_order() {
    let assistant = assistant();
    let cases = [
        ("tomato weather", Some("weather")),
        ("rice fertilizer", Some("fertilizer")),
        ("disease in my paddy", Some("pest_disease")),
        ("Paddy transplanting", Some("rice")),
        ("I need help with my carrot", None),
    ];

    for (input, expected) in cases {
        let reply = assistant.handle_chat(input).unwrap();
        assert_eq!(reply.rule_id.as_deref(), expected, "input: {input}");
    }

    let metrics = assistant.metrics();
    assert_eq!(metrics.chat_requests_total, 5);
    assert_eq!(metrics.rule_hits_total, 4);
    assert_eq!(metrics.fallback_total, 1);
}

#[test]
fn fallback_reply_is_the_default_template() {
    let assistant = assistant();
    let reply = assistant.handle_chat("coconut yield").unwrap();
    assert!(reply.fallback);
    assert_eq!(reply.reply_text, FALLBACK_RESPONSE);
}

#[test]
fn history_limit_drops_oldest_messages() {
    let assistant = assistant_with(RuleTable::krishi(), 4);
    for text in ["pest", "rain", "tomato"] {
        assistant.handle_chat(text).unwrap();
    }

    let state = assistant.state();
    assert_eq!(state.transcript.len(), 4);
    assert_eq!(state.transcript[0].content, "rain");
    assert!(state.transcript.iter().all(|m| m.content != GREETING));
}

#[test]
fn custom_rule_table_file_replaces_builtin_rules() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let table = json!({
        "default_response": "Ask the Krishi Bhavan office.",
        "rules": [
            { "id": "coconut", "triggers": ["Coconut", "copra"], "response": "Apply potash before monsoon." },
            { "id": "pest_disease", "triggers": ["pest"], "response": "Try neem oil." }
        ]
    });
    write!(file, "{table}").unwrap();

    let rules = load_rule_table(Some(file.path())).unwrap();
    let assistant = assistant_with(rules, 100);

    assert_eq!(
        assistant.handle_chat("COPRA drying pests").unwrap().rule_id.as_deref(),
        Some("coconut")
    );
    assert_eq!(
        assistant.handle_chat("tomato").unwrap().reply_text,
        "Ask the Krishi Bhavan office."
    );
}

#[test]
fn malformed_rule_table_file_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{ "default_response": "x", "rules": [{{ "id": "all", "triggers": [""], "response": "y" }}] }}"#
    )
    .unwrap();

    let err = load_rule_table(Some(file.path())).unwrap_err();
    assert!(format!("{err:#}").contains("empty trigger"));
}

#[test]
fn labour_roster_round_trip() {
    let assistant = assistant();

    let state = assistant
        .add_labour(NewLabour {
            name: "Joseph Mathew".to_string(),
            mobile_number: "9000012345".to_string(),
            availability: Some(Availability::NotAvailable),
            skills: "Pruning, Grafting".to_string(),
            experience: "3 years".to_string(),
            daily_wage: "650".to_string(),
        })
        .unwrap();
    let added = state.labour.last().unwrap().clone();

    let found = assistant.search_labour("joseph", Some(Availability::NotAvailable));
    assert_eq!(found, vec![added.clone()]);

    assistant
        .set_labour_availability(&added.id, Availability::Available)
        .unwrap();
    assert_eq!(
        assistant.search_labour("9000012345", Some(Availability::Available)).len(),
        1
    );

    let err = assistant.add_labour(NewLabour::default()).unwrap_err();
    assert!(err.downcast_ref::<ValidationError>().is_some());

    let metrics = assistant.metrics();
    assert_eq!(metrics.state_updates_total, 2);
    assert_eq!(metrics.rejected_submissions_total, 1);
}

#[test]
fn crop_plans_and_profile_updates() {
    let assistant = assistant();
    let state = assistant
        .add_crop_plan(NewCropPlan {
            crop: "Ginger".to_string(),
            area_acres: 0.5,
            yield_outlook: Some("Good".to_string()),
        })
        .unwrap();
    assert_eq!(state.crop_plans.len(), 4);

    let state = assistant
        .update_profile(ProfileUpdate {
            primary_crops: Some(vec!["Rice".to_string(), "Ginger".to_string()]),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(state.profile.primary_crops, vec!["Rice", "Ginger"]);
    assert_eq!(state.profile.location, "Thrissur, Kerala");
}

#[test]
fn catalog_lookups_through_assistant() {
    let assistant = assistant();
    assert_eq!(assistant.crops(None).len(), 7);
    assert_eq!(assistant.crops(Some("vegetables")).len(), 6);
    assert_eq!(assistant.crop("rice").map(|c| c.irrigation), Some("Continuous flooding"));
    assert_eq!(assistant.schemes(None).len(), 6);
}

#[test]
fn weather_prices_and_soil_reports_serialize() {
    let assistant = assistant();

    let weather = serde_json::to_value(assistant.weather()).unwrap();
    assert_eq!(weather["current"]["humidity_pct"], 75);
    assert_eq!(weather["forecast"][2]["condition"], "Moderate Rain");

    let prices = serde_json::to_value(assistant.market_prices(Some("pepper"))).unwrap();
    assert_eq!(prices[0]["points"][1]["trend"], "down");

    let soil = serde_json::to_value(assistant.soil_analysis()).unwrap();
    assert_eq!(soil[1]["nutrient"], "nitrogen");
    assert_eq!(soil[1]["status"], "low");
}

#[test]
fn wage_with_trailing_text_keeps_its_number() {
    let assistant = assistant();
    let state = assistant
        .add_labour(NewLabour {
            name: "Suma".to_string(),
            mobile_number: "9000054321".to_string(),
            daily_wage: "550/day".to_string(),
            ..Default::default()
        })
        .unwrap();

    assert_eq!(state.labour.last().map(|l| l.daily_wage), Some(550.0));
}

#[test]
fn chat_transcript_keeps_original_spacing() {
    let assistant = assistant();
    assistant.handle_chat("  pest   on  pepper ").unwrap();
    assert_eq!(assistant.state().transcript[1].content, "  pest   on  pepper ");
}

#[test]
fn concurrent_chats_share_one_rule_table() {
    let assistant = assistant();
    let handles = (0..4)
        .map(|_| {
            let assistant = assistant.clone();
            thread::spawn(move || {
                for _ in 0..10 {
                    let reply = assistant.handle_chat("fertilizer for coconut").unwrap();
                    assert_eq!(reply.rule_id.as_deref(), Some("fertilizer"));
                }
            })
        })
        .collect::<Vec<_>>();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(assistant.metrics().chat_requests_total, 40);
    assert_eq!(assistant.state().transcript.len(), 81);
}
