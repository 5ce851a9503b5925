//! Built-in content bank: vocabulary levels, grammar questions, speaking
//! exercises, and the daily-challenge pools. Guarantees the app is usable
//! without any external content config.

use crate::domain::{
  ChallengeRequirements, Difficulty, GrammarQuestion, SpeakingExercise, VocabWord,
};

fn word(word: &str, meaning: &str, options: [&str; 4], correct: &str, difficulty: Difficulty) -> VocabWord {
  VocabWord {
    word: word.into(),
    meaning: meaning.into(),
    options: options.iter().map(|s| s.to_string()).collect(),
    correct: correct.into(),
    difficulty,
  }
}

/// The three built-in vocabulary levels (easy, medium, hard), five words each.
pub fn vocabulary_levels() -> Vec<Vec<VocabWord>> {
  use Difficulty::*;
  vec![
    vec![
      word("Ephemeral", "Lasting for a very short time", ["Short", "Permanent", "Colorful", "Strong"], "Short", Easy),
      word("Ubiquitous", "Present everywhere", ["Rare", "Everywhere", "Beautiful", "Dangerous"], "Everywhere", Easy),
      word("Pristine", "In its original condition; unspoiled", ["Polluted", "New", "Worn", "Dirty"], "New", Easy),
      word("Lucid", "Expressed clearly; easy to understand", ["Confusing", "Clear", "Obscure", "Dull"], "Clear", Easy),
      word("Amiable", "Having a friendly and pleasant manner", ["Hostile", "Friendly", "Sad", "Rude"], "Friendly", Easy),
    ],
    vec![
      word("Pernicious", "Harmful in a gradual way", ["Harmless", "Helpful", "Harmful", "Joyful"], "Harmful", Medium),
      word("Sagacious", "Having good judgment", ["Wise", "Foolish", "Forgetful", "Hasty"], "Wise", Medium),
      word("Ambiguous", "Open to more than one interpretation", ["Clear", "Confusing", "Doubtful", "Precise"], "Confusing", Medium),
      word("Tenacious", "Holding firmly; persistent", ["Weak", "Persistent", "Lazy", "Flexible"], "Persistent", Medium),
      word("Astute", "Having the ability to accurately assess situations", ["Clueless", "Shrewd", "Ignorant", "Foolish"], "Shrewd", Medium),
    ],
    vec![
      word("Obfuscate", "To make unclear", ["Clarify", "Obscure", "Lighten", "Sharpen"], "Obscure", Hard),
      word("Magnanimous", "Generous or forgiving", ["Selfish", "Generous", "Mean", "Stingy"], "Generous", Hard),
      word("Cacophony", "A harsh, discordant mixture of sounds", ["Melody", "Harmony", "Noise", "Silence"], "Noise", Hard),
      word("Pusillanimous", "Lacking courage or resolution; timid", ["Brave", "Timid", "Assertive", "Confident"], "Timid", Hard),
      word("Enervate", "To cause someone to feel drained of energy", ["Energize", "Weaken", "Strengthen", "Refresh"], "Weaken", Hard),
    ],
  ]
}

/// Built-in fill-in-the-blank grammar questions.
pub fn grammar_questions() -> Vec<GrammarQuestion> {
  vec![
    GrammarQuestion {
      id: "g1".into(),
      sentence: "She ___ to the store yesterday.".into(),
      options: vec!["go".into(), "goes".into(), "went".into(), "gone".into()],
      correct_answer: "went".into(),
    },
    GrammarQuestion {
      id: "g2".into(),
      sentence: "If I ___ rich, I would travel the world.".into(),
      options: vec!["am".into(), "were".into(), "was".into(), "be".into()],
      correct_answer: "were".into(),
    },
    GrammarQuestion {
      id: "g3".into(),
      sentence: "They ___ studying English for two years.".into(),
      options: vec!["has been".into(), "have been".into(), "are".into(), "were".into()],
      correct_answer: "have been".into(),
    },
  ]
}

/// Built-in speaking prompts for the practice placeholder.
pub fn speaking_exercises() -> Vec<SpeakingExercise> {
  vec![
    SpeakingExercise {
      id: "s1".into(),
      text: "The weather is beautiful today".into(),
      tip: "Focus on clear pronunciation of 'weather' and 'beautiful'.".into(),
      difficulty: "Beginner".into(),
      category: "Small Talk".into(),
    },
    SpeakingExercise {
      id: "s2".into(),
      text: "I would like to order a coffee, please.".into(),
      tip: "Emphasize the 'would' sound and maintain a polite tone.".into(),
      difficulty: "Beginner".into(),
      category: "Restaurant".into(),
    },
    SpeakingExercise {
      id: "s3".into(),
      text: "Could you please tell me how to get to the train station?".into(),
      tip: "Practice rising intonation for questions.".into(),
      difficulty: "Intermediate".into(),
      category: "Directions".into(),
    },
  ]
}

/// One candidate for the daily-challenge generator.
#[derive(Clone, Debug)]
pub struct ChallengePoolEntry {
  pub title: &'static str,
  pub description: &'static str,
  pub requirements: ChallengeRequirements,
}

const fn pool_entry(title: &'static str, description: &'static str, total: u32) -> ChallengePoolEntry {
  ChallengePoolEntry { title, description, requirements: ChallengeRequirements { total, completed: 0 } }
}

pub const VOCABULARY_POOL: &[ChallengePoolEntry] = &[
  pool_entry("Word Master", "Learn and memorize 5 new vocabulary words", 5),
  pool_entry("Synonym Challenge", "Match 10 words with their synonyms", 10),
  pool_entry("Vocabulary Quiz", "Complete a vocabulary quiz with 15 questions", 15),
];

pub const GRAMMAR_POOL: &[ChallengePoolEntry] = &[
  pool_entry("Tense Perfect", "Practice verb tenses with 10 exercises", 10),
  pool_entry("Article Master", "Complete exercises about articles (a, an, the)", 8),
  pool_entry("Preposition Pro", "Master prepositions with practical exercises", 12),
];

pub const SPEAKING_POOL: &[ChallengePoolEntry] = &[
  pool_entry("Pronunciation Practice", "Record yourself pronouncing difficult words", 5),
  pool_entry("Conversation Simulation", "Complete a simulated conversation exercise", 1),
  pool_entry("Tongue Twisters", "Practice pronunciation with tongue twisters", 3),
];
