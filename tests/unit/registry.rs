//! Model registry and identifier parsing.

use tokviz::backend::anthropic::{self, AnthropicCounter, RemoteOptions};
use tokviz::backend::registry::{resolve, supported_models};
use tokviz::backend::{Backend, BackendSettings, ModelId};
use tokviz::core::TokvizError;

#[test]
fn supported_models_are_listed_in_registry_order() {
    assert_eq!(
        supported_models(),
        ["gpt4", "gpt3.5", "gpt5", "gpt5-mini", "gpt5-nano", "claude", "llama", "llama3"]
    );
}

#[test]
fn every_supported_name_parses() {
    for name in supported_models() {
        let id: ModelId = name.parse().unwrap();
        assert_eq!(id.as_str(), name);
        assert_eq!(id.to_string(), name);
    }
}

#[test]
fn resolve_rejects_the_first_unknown_name() {
    let err = resolve(&["gpt4", "gpt6", "nope"]).unwrap_err();
    match err {
        TokvizError::UnknownModel {
            name,
            suggestion,
        } => {
            assert_eq!(name, "gpt6");
            assert!(suggestion.is_some());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn gpt_family_builds_without_network_or_files() {
    let settings = BackendSettings::default();
    for name in ["gpt4", "gpt3.5", "gpt5", "gpt5-mini", "gpt5-nano"] {
        let id: ModelId = name.parse().unwrap();
        let backend = id.build(&settings).unwrap();
        assert!(backend.supports_token_ids(), "{name}");
        assert!(backend.supports_decoding(), "{name}");
    }
}

#[test]
fn claude_counter_has_no_token_ids() {
    let counter =
        AnthropicCounter::new(anthropic::DEFAULT_MODEL, "test-key", RemoteOptions::default()).unwrap();
    assert!(!counter.supports_token_ids());
    assert!(!counter.supports_decoding());
    assert_eq!(counter.name(), format!("Claude ({})", anthropic::DEFAULT_MODEL));
}
