//! Core assembly: content catalog, session manager, progress trackers, and
//! the remote API client, built the same way on every app start.

use std::sync::Arc;

use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::api::RemoteApi;
use crate::challenges;
use crate::config::{load_content_config_from_env, ContentConfig};
use crate::domain::{DailyChallenge, Difficulty, GrammarQuestion, SpeakingExercise, VocabWord};
use crate::game::{GrammarQuiz, SpeakingPractice, VocabularyTask};
use crate::seeds;
use crate::session::{Navigator, SessionManager};
use crate::store::KeyValueStore;
use crate::tracker::{ProgressTracker, LEARNED_ITEMS_KEY, STUDY_LIST_KEY};
use crate::util::Clock;

/// Static game content the engines are built from. Config entries extend the
/// built-in seeds; the seeds are always present so the app works offline and
/// unconfigured.
pub struct Catalog {
    pub vocabulary_levels: Vec<Vec<VocabWord>>,
    pub grammar_questions: Vec<GrammarQuestion>,
    pub speaking_exercises: Vec<SpeakingExercise>,
}

fn level_default_difficulty(level: u32) -> Difficulty {
    match level {
        1 => Difficulty::Easy,
        2 => Difficulty::Medium,
        _ => Difficulty::Hard,
    }
}

fn build_catalog(cfg: Option<ContentConfig>) -> Catalog {
    let mut vocabulary_levels = seeds::vocabulary_levels();
    let mut grammar_questions = seeds::grammar_questions();
    let mut speaking_exercises = seeds::speaking_exercises();

    if let Some(cfg) = cfg {
        for vc in cfg.vocabulary {
            // Bank entries must name a 1-based level and list the correct
            // option among the choices.
            if vc.level == 0 || !vc.options.contains(&vc.correct) {
                error!(target: "lingua_core", word = %vc.word, level = vc.level, "Skipping bank word: invalid level or options.");
                continue;
            }
            let idx = vc.level as usize - 1;
            if vocabulary_levels.len() <= idx {
                vocabulary_levels.resize_with(idx + 1, Vec::new);
            }
            let difficulty = vc.difficulty.unwrap_or_else(|| level_default_difficulty(vc.level));
            vocabulary_levels[idx].push(VocabWord {
                word: vc.word,
                meaning: vc.meaning,
                options: vc.options,
                correct: vc.correct,
                difficulty,
            });
        }

        for gc in cfg.grammar {
            if !gc.options.contains(&gc.correct_answer) {
                error!(target: "lingua_core", sentence = %gc.sentence, "Skipping bank question: answer not among options.");
                continue;
            }
            grammar_questions.push(GrammarQuestion {
                id: gc.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                sentence: gc.sentence,
                options: gc.options,
                correct_answer: gc.correct_answer,
            });
        }

        for sc in cfg.speaking {
            speaking_exercises.push(SpeakingExercise {
                id: sc.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
                text: sc.text,
                tip: sc.tip,
                difficulty: sc.difficulty,
                category: sc.category,
            });
        }
    }

    // A config can leave gaps (words only at level 5, say); empty levels
    // would stall the vocabulary run.
    vocabulary_levels.retain(|l| !l.is_empty());

    Catalog { vocabulary_levels, grammar_questions, speaking_exercises }
}

/// The app's long-lived core: one instance per process, engines spawned per
/// screen mount.
pub struct AppCore {
    pub session: SessionManager,
    pub study_list: ProgressTracker,
    pub learned_items: ProgressTracker,
    pub api: Option<RemoteApi>,
    catalog: Catalog,
    clock: Arc<dyn Clock>,
}

impl AppCore {
    /// Build the core from env: load the content config, merge the seeds,
    /// wire the session manager and trackers. Call `hydrate` before first use.
    #[instrument(level = "info", skip_all)]
    pub fn new(
        secure_store: Arc<dyn KeyValueStore>,
        app_store: Arc<dyn KeyValueStore>,
        navigator: Arc<dyn Navigator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let catalog = build_catalog(load_content_config_from_env());
        for (i, level) in catalog.vocabulary_levels.iter().enumerate() {
            info!(target: "lingua_core", level = i + 1, words = level.len(), "Startup vocabulary inventory");
        }
        info!(
            target: "lingua_core",
            grammar = catalog.grammar_questions.len(),
            speaking = catalog.speaking_exercises.len(),
            "Startup content inventory"
        );

        let api = match RemoteApi::from_env() {
            Ok(api) => {
                info!(target: "lingua_core", base_url = %api.base_url, "Remote API client ready");
                Some(api)
            }
            Err(e) => {
                warn!(target: "lingua_core", error = %e, "Remote API client unavailable; running offline");
                None
            }
        };

        let session =
            SessionManager::new(secure_store, app_store.clone(), navigator, clock.clone());
        let study_list = ProgressTracker::new(app_store.clone(), STUDY_LIST_KEY, clock.clone());
        let learned_items = ProgressTracker::new(app_store, LEARNED_ITEMS_KEY, clock.clone());

        Self { session, study_list, learned_items, api, catalog, clock }
    }

    /// One-time startup read of both tracked collections.
    pub async fn hydrate(&self) {
        self.study_list.hydrate().await;
        self.learned_items.hydrate().await;
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    // Per-screen engine constructors: fresh run state on each mount.

    pub fn vocabulary_task(&self) -> VocabularyTask {
        VocabularyTask::new(self.catalog.vocabulary_levels.clone())
    }

    pub fn grammar_quiz(&self) -> GrammarQuiz {
        GrammarQuiz::new(self.catalog.grammar_questions.clone())
    }

    pub fn speaking_practice(&self) -> SpeakingPractice {
        SpeakingPractice::new(self.catalog.speaking_exercises.clone())
    }

    pub fn daily_challenges(&self) -> Vec<DailyChallenge> {
        challenges::generate_daily(&*self.clock)
    }
}
