//! Loading the content bank (vocabulary/grammar/speaking overrides) from TOML.
//!
//! See `ContentConfig` for the expected schema. Everything is optional; the
//! built-in seeds cover whatever the config leaves out.

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::Difficulty;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct ContentConfig {
  #[serde(default)]
  pub vocabulary: Vec<VocabCfg>,
  #[serde(default)]
  pub grammar: Vec<GrammarCfg>,
  #[serde(default)]
  pub speaking: Vec<SpeakingCfg>,
}

/// Vocabulary entry accepted in TOML. `level` is 1-based; entries for the
/// same level are played in file order.
#[derive(Clone, Debug, Deserialize)]
pub struct VocabCfg {
  pub level: u32,
  pub word: String,
  pub meaning: String,
  pub options: Vec<String>,
  pub correct: String,
  #[serde(default)] pub difficulty: Option<Difficulty>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct GrammarCfg {
  #[serde(default)] pub id: Option<String>,
  pub sentence: String,
  pub options: Vec<String>,
  pub correct_answer: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SpeakingCfg {
  #[serde(default)] pub id: Option<String>,
  pub text: String,
  #[serde(default)] pub tip: String,
  #[serde(default = "default_speaking_difficulty")] pub difficulty: String,
  #[serde(default)] pub category: String,
}

fn default_speaking_difficulty() -> String {
  "Beginner".into()
}

/// Attempt to load `ContentConfig` from CONTENT_CONFIG_PATH.
/// On any parsing/IO error, returns None and the built-ins are used alone.
pub fn load_content_config_from_env() -> Option<ContentConfig> {
  let path = std::env::var("CONTENT_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<ContentConfig>(&s) {
      Ok(cfg) => {
        info!(target: "lingua_core", %path, "Loaded content config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "lingua_core", %path, error = %e, "Failed to parse TOML content config");
        None
      }
    },
    Err(e) => {
      error!(target: "lingua_core", %path, error = %e, "Failed to read TOML content config file");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_a_minimal_bank() {
    let cfg: ContentConfig = toml::from_str(
      r#"
      [[vocabulary]]
      level = 1
      word = "Succinct"
      meaning = "Briefly and clearly expressed"
      options = ["Brief", "Long", "Vague", "Loud"]
      correct = "Brief"

      [[grammar]]
      sentence = "He ___ home early."
      options = ["go", "went", "gone", "going"]
      correct_answer = "went"
      "#,
    )
    .expect("config should parse");

    assert_eq!(cfg.vocabulary.len(), 1);
    assert_eq!(cfg.vocabulary[0].level, 1);
    assert!(cfg.vocabulary[0].difficulty.is_none());
    assert_eq!(cfg.grammar.len(), 1);
    assert!(cfg.grammar[0].id.is_none());
    assert!(cfg.speaking.is_empty());
  }
}
