//! Mini-game scoring engines: the daily vocabulary task, the grammar quiz,
//! and the speaking-practice placeholder.
//!
//! Run state is ephemeral (created on screen mount, dropped on unmount); only
//! the terminal completion record is persisted, under a per-challenge key.

use rand::seq::SliceRandom;

use crate::domain::{CompletionRecord, GrammarQuestion, Route, SpeakingExercise, VocabWord};
use crate::error::{CoreError, CoreResult};
use crate::store::KeyValueStore;
use crate::util::Clock;

pub const DAILY_VOCABULARY_PROGRESS_KEY: &str = "dailyVocabularyProgress";
pub const GRAMMAR_PROGRESS_KEY: &str = "grammarProgress";

/// What a correct answer advanced the run to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    NextWord,
    NextLevel,
    Completed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct {
        advanced: Advance,
        /// Set at the celebrated streak lengths (3 and 5).
        streak_milestone: Option<u32>,
    },
    Incorrect {
        /// True when this was the second mistake and the whole run was reset.
        run_reset: bool,
    },
    /// The run already reached its terminal state; the answer was ignored.
    AlreadyCompleted,
}

/// Multiple-choice vocabulary run over leveled word lists.
///
/// Scoring: a correct answer is worth `2 * level` points, halved to
/// `1 * level` when the hint was used on that word. Streak resets on any
/// mistake; two mistakes within a level reset the entire run.
pub struct VocabularyTask {
    levels: Vec<Vec<VocabWord>>,
    score: u32,
    streak: u32,
    level: u32, // 1-based
    word_index: usize,
    mistakes: u32,
    hint_used: bool,
    completed: bool,
}

impl VocabularyTask {
    /// The assembly in `state` guarantees non-empty levels by falling back to
    /// the built-in bank.
    ///
    /// # Panics
    /// Panics when `levels` is empty or contains an empty word list.
    pub fn new(levels: Vec<Vec<VocabWord>>) -> Self {
        assert!(
            !levels.is_empty() && levels.iter().all(|l| !l.is_empty()),
            "vocabulary task needs at least one level with at least one word"
        );
        Self {
            levels,
            score: 0,
            streak: 0,
            level: 1,
            word_index: 0,
            mistakes: 0,
            hint_used: false,
            completed: false,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn word_index(&self) -> usize {
        self.word_index
    }

    pub fn mistakes(&self) -> u32 {
        self.mistakes
    }

    pub fn hint_used(&self) -> bool {
        self.hint_used
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn words_in_level(&self) -> usize {
        self.levels[self.level as usize - 1].len()
    }

    /// The word being presented, or None once the run is completed.
    pub fn current_word(&self) -> Option<&VocabWord> {
        if self.completed {
            return None;
        }
        self.levels[self.level as usize - 1].get(self.word_index)
    }

    /// Answer options in randomized display order.
    pub fn shuffled_options(&self) -> Vec<String> {
        let mut options = match self.current_word() {
            Some(w) => w.options.clone(),
            None => return Vec::new(),
        };
        options.shuffle(&mut rand::thread_rng());
        options
    }

    pub fn answer(&mut self, selected: &str) -> AnswerOutcome {
        let Some(word) = self.current_word() else {
            return AnswerOutcome::AlreadyCompleted;
        };

        if selected != word.correct {
            self.streak = 0;
            self.mistakes += 1;
            if self.mistakes == 2 {
                self.reset();
                return AnswerOutcome::Incorrect { run_reset: true };
            }
            return AnswerOutcome::Incorrect { run_reset: false };
        }

        self.mistakes = 0;
        self.score += if self.hint_used { 1 } else { 2 } * self.level;
        self.streak += 1;
        self.hint_used = false;

        let milestone = matches!(self.streak, 3 | 5).then_some(self.streak);
        let advanced = if self.word_index + 1 < self.words_in_level() {
            self.word_index += 1;
            Advance::NextWord
        } else if (self.level as usize) < self.levels.len() {
            self.level += 1;
            self.word_index = 0;
            Advance::NextLevel
        } else {
            self.completed = true;
            Advance::Completed
        };

        AnswerOutcome::Correct { advanced, streak_milestone: milestone }
    }

    /// Reveal the current word's meaning for a 1-point penalty (floored at 0).
    /// Usable once per word; returns None when already used or completed.
    pub fn use_hint(&mut self) -> Option<String> {
        if self.hint_used {
            return None;
        }
        let meaning = self.current_word()?.meaning.clone();
        self.hint_used = true;
        self.score = self.score.saturating_sub(1);
        Some(meaning)
    }

    /// Back to initial state: score 0, level 1, streak 0.
    pub fn reset(&mut self) {
        self.score = 0;
        self.streak = 0;
        self.level = 1;
        self.word_index = 0;
        self.mistakes = 0;
        self.hint_used = false;
        self.completed = false;
    }

    /// Persist the terminal completion record and signal navigation back to
    /// the challenge list. Only valid once the run is completed.
    pub async fn finish(&self, store: &dyn KeyValueStore, clock: &dyn Clock) -> CoreResult<Route> {
        if !self.completed {
            return Err(CoreError::NotFound("no completed run to record".into()));
        }
        let record = CompletionRecord {
            score: self.score,
            completed_at: clock.now(),
            best_streak: Some(self.streak),
            completed: true,
        };
        let payload = serde_json::to_string(&record)
            .map_err(|e| CoreError::StoreIo(e.to_string()))?;
        store.set(DAILY_VOCABULARY_PROGRESS_KEY, &payload).await?;
        Ok(Route::Challenges { completed_challenge_id: "1".into() })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GrammarOutcome {
    pub correct: bool,
    pub finished: bool,
}

/// Fill-in-the-blank quiz: one point per correct answer, no penalties,
/// terminal after the last question.
pub struct GrammarQuiz {
    questions: Vec<GrammarQuestion>,
    current: usize,
    score: u32,
    finished: bool,
}

impl GrammarQuiz {
    /// # Panics
    /// Panics when `questions` is empty.
    pub fn new(questions: Vec<GrammarQuestion>) -> Self {
        assert!(!questions.is_empty(), "grammar quiz needs at least one question");
        Self { questions, current: 0, score: 0, finished: false }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn question_number(&self) -> usize {
        self.current + 1
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn current_question(&self) -> Option<&GrammarQuestion> {
        if self.finished {
            return None;
        }
        self.questions.get(self.current)
    }

    pub fn answer(&mut self, selected: &str) -> GrammarOutcome {
        let Some(question) = self.current_question() else {
            return GrammarOutcome { correct: false, finished: true };
        };
        let correct = selected == question.correct_answer;
        if correct {
            self.score += 1;
        }
        if self.current + 1 < self.questions.len() {
            self.current += 1;
        } else {
            self.finished = true;
        }
        GrammarOutcome { correct, finished: self.finished }
    }

    pub async fn finish(&self, store: &dyn KeyValueStore, clock: &dyn Clock) -> CoreResult<Route> {
        if !self.finished {
            return Err(CoreError::NotFound("no completed run to record".into()));
        }
        let record = CompletionRecord {
            score: self.score,
            completed_at: clock.now(),
            best_streak: None,
            completed: true,
        };
        let payload = serde_json::to_string(&record)
            .map_err(|e| CoreError::StoreIo(e.to_string()))?;
        store.set(GRAMMAR_PROGRESS_KEY, &payload).await?;
        Ok(Route::Challenges { completed_challenge_id: "2".into() })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpeakingAdvance {
    Next,
    /// Last exercise passed; the list wrapped back to the start.
    Restarted,
}

/// Speaking practice placeholder: fixed prompt list, canned feedback.
/// Real pronunciation analysis is an external service this core does not call.
pub struct SpeakingPractice {
    exercises: Vec<SpeakingExercise>,
    current: usize,
    feedback: Option<String>,
}

impl SpeakingPractice {
    /// # Panics
    /// Panics when `exercises` is empty.
    pub fn new(exercises: Vec<SpeakingExercise>) -> Self {
        assert!(!exercises.is_empty(), "speaking practice needs at least one exercise");
        Self { exercises, current: 0, feedback: None }
    }

    pub fn current_exercise(&self) -> &SpeakingExercise {
        &self.exercises[self.current]
    }

    pub fn exercise_number(&self) -> usize {
        self.current + 1
    }

    pub fn exercise_count(&self) -> usize {
        self.exercises.len()
    }

    pub fn progress_fraction(&self) -> f32 {
        (self.current + 1) as f32 / self.exercises.len() as f32
    }

    pub fn feedback(&self) -> Option<&str> {
        self.feedback.as_deref()
    }

    /// Placeholder "analysis": always encouraging.
    pub fn record_attempt(&mut self) -> &str {
        self.feedback = Some("Good job! Keep practicing to improve pronunciation.".into());
        self.feedback.as_deref().unwrap()
    }

    pub fn next(&mut self) -> SpeakingAdvance {
        self.feedback = None;
        if self.current + 1 < self.exercises.len() {
            self.current += 1;
            SpeakingAdvance::Next
        } else {
            self.current = 0;
            SpeakingAdvance::Restarted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeds;
    use crate::store::{KeyValueStore, MemoryStore};
    use crate::util::SystemClock;

    fn task() -> VocabularyTask {
        VocabularyTask::new(seeds::vocabulary_levels())
    }

    fn correct_answer(task: &VocabularyTask) -> String {
        task.current_word().unwrap().correct.clone()
    }

    fn wrong_answer(task: &VocabularyTask) -> String {
        let word = task.current_word().unwrap();
        word.options
            .iter()
            .find(|o| **o != word.correct)
            .unwrap()
            .clone()
    }

    #[test]
    #[should_panic(expected = "at least one level")]
    fn empty_levels_are_rejected_at_construction() {
        VocabularyTask::new(Vec::new());
    }

    #[test]
    #[should_panic(expected = "at least one word")]
    fn a_level_without_words_is_rejected_at_construction() {
        VocabularyTask::new(vec![Vec::new()]);
    }

    #[test]
    fn starts_at_initial_state() {
        let t = task();
        assert_eq!((t.score(), t.streak(), t.level()), (0, 0, 1));
        assert_eq!(t.word_index(), 0);
        assert!(!t.is_completed());
    }

    #[test]
    fn correct_answer_without_hint_scores_double_level() {
        let mut t = task();
        let outcome = t.answer(&correct_answer(&t));
        assert_eq!(
            outcome,
            AnswerOutcome::Correct { advanced: Advance::NextWord, streak_milestone: None }
        );
        assert_eq!(t.score(), 2);
        assert_eq!(t.streak(), 1);
    }

    #[test]
    fn hint_halves_the_reward_and_is_single_use() {
        let mut t = task();
        let meaning = t.use_hint().expect("first hint is available");
        assert_eq!(meaning, "Lasting for a very short time");
        assert!(t.use_hint().is_none());

        // Score floored at 0 by the penalty, then 1 * level for the answer.
        t.answer(&correct_answer(&t));
        assert_eq!(t.score(), 1);
    }

    #[test]
    fn hint_becomes_available_again_on_the_next_word() {
        let mut t = task();
        t.use_hint().unwrap();
        t.answer(&correct_answer(&t));
        assert!(!t.hint_used());
        assert!(t.use_hint().is_some());
    }

    #[test]
    fn one_mistake_breaks_the_streak_only() {
        let mut t = task();
        t.answer(&correct_answer(&t));
        let outcome = t.answer(&wrong_answer(&t));
        assert_eq!(outcome, AnswerOutcome::Incorrect { run_reset: false });
        assert_eq!(t.streak(), 0);
        assert_eq!(t.score(), 2); // score is kept
        assert_eq!(t.mistakes(), 1);
    }

    #[test]
    fn two_mistakes_reset_the_whole_run() {
        let mut t = task();
        t.answer(&correct_answer(&t));
        t.answer(&correct_answer(&t));
        t.answer(&wrong_answer(&t));
        let outcome = t.answer(&wrong_answer(&t));
        assert_eq!(outcome, AnswerOutcome::Incorrect { run_reset: true });
        assert_eq!((t.score(), t.streak(), t.level()), (0, 0, 1));
        assert_eq!(t.word_index(), 0);
        assert_eq!(t.mistakes(), 0);
    }

    #[test]
    fn a_correct_answer_clears_accumulated_mistakes() {
        let mut t = task();
        t.answer(&wrong_answer(&t));
        t.answer(&correct_answer(&t));
        // A later single mistake must not trigger the two-mistake reset.
        let outcome = t.answer(&wrong_answer(&t));
        assert_eq!(outcome, AnswerOutcome::Incorrect { run_reset: false });
    }

    #[test]
    fn streak_milestones_fire_at_three_and_five() {
        let mut t = task();
        let mut milestones = Vec::new();
        for _ in 0..5 {
            if let AnswerOutcome::Correct { streak_milestone: Some(n), .. } =
                t.answer(&correct_answer(&t))
            {
                milestones.push(n);
            }
        }
        assert_eq!(milestones, vec![3, 5]);
    }

    #[tokio::test]
    async fn perfect_run_completes_and_persists_the_record() {
        let mut t = task();
        let mut last = None;
        while !t.is_completed() {
            last = Some(t.answer(&correct_answer(&t)));
        }
        assert_eq!(
            last,
            Some(AnswerOutcome::Correct { advanced: Advance::Completed, streak_milestone: None })
        );
        // 5 words per level at 2 points * level: 10 + 20 + 30.
        assert_eq!(t.score(), 60);
        assert_eq!(t.streak(), 15);
        assert!(t.current_word().is_none());
        assert_eq!(t.answer("anything"), AnswerOutcome::AlreadyCompleted);

        let store = MemoryStore::new();
        let route = t.finish(&store, &SystemClock).await.unwrap();
        assert_eq!(route, Route::Challenges { completed_challenge_id: "1".into() });

        let raw = store.get(DAILY_VOCABULARY_PROGRESS_KEY).await.unwrap().unwrap();
        let record: CompletionRecord = serde_json::from_str(&raw).unwrap();
        assert_eq!(record.score, 60);
        assert_eq!(record.best_streak, Some(15));
        assert!(record.completed);
    }

    #[tokio::test]
    async fn finish_before_completion_is_rejected() {
        let t = task();
        let store = MemoryStore::new();
        assert!(t.finish(&store, &SystemClock).await.is_err());
        assert_eq!(store.get(DAILY_VOCABULARY_PROGRESS_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn grammar_quiz_counts_correct_answers_and_persists() {
        let mut quiz = GrammarQuiz::new(seeds::grammar_questions());
        assert_eq!(quiz.question_number(), 1);

        let answers = ["went", "was", "have been"]; // second one is wrong
        let mut last = GrammarOutcome { correct: false, finished: false };
        for a in answers {
            last = quiz.answer(a);
        }
        assert!(last.finished);
        assert_eq!(quiz.score(), 2);
        assert!(quiz.current_question().is_none());

        let store = MemoryStore::new();
        let route = quiz.finish(&store, &SystemClock).await.unwrap();
        assert_eq!(route, Route::Challenges { completed_challenge_id: "2".into() });

        let raw = store.get(GRAMMAR_PROGRESS_KEY).await.unwrap().unwrap();
        let record: CompletionRecord = serde_json::from_str(&raw).unwrap();
        assert_eq!(record.score, 2);
        assert_eq!(record.best_streak, None);
    }

    #[test]
    fn speaking_practice_advances_and_wraps() {
        let mut practice = SpeakingPractice::new(seeds::speaking_exercises());
        assert_eq!(practice.exercise_number(), 1);
        assert!(practice.feedback().is_none());

        practice.record_attempt();
        assert!(practice.feedback().is_some());

        assert_eq!(practice.next(), SpeakingAdvance::Next);
        assert!(practice.feedback().is_none());
        assert_eq!(practice.next(), SpeakingAdvance::Next);
        assert_eq!(practice.next(), SpeakingAdvance::Restarted);
        assert_eq!(practice.exercise_number(), 1);
        assert!((practice.progress_fraction() - 1.0 / 3.0).abs() < f32::EPSILON);
    }
}
