use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

use crate::cards::{AnswerCard, DeckFile, PromptCard};
use crate::errors::ConfigError;

/// Pool sizes, for display only.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct DeckStats {
    pub prompt_count: usize,
    pub answer_count: usize,
}

/// A fixed pool of prompt and answer cards. Draws are uniform random
/// samples with replacement, so a card may reappear across draws.
#[derive(Debug)]
pub struct CardDeck {
    prompts: Vec<PromptCard>,
    answers: Vec<AnswerCard>,
    rng: ChaCha20Rng,
}

impl CardDeck {
    /// Builds a deck seeded from the OS. Both pools must be non-empty.
    pub fn new(prompts: Vec<PromptCard>, answers: Vec<AnswerCard>) -> Result<Self, ConfigError> {
        Self::build(prompts, answers, ChaCha20Rng::from_os_rng())
    }

    /// Builds a deck with a fixed seed so draws are reproducible.
    pub fn with_seed(
        prompts: Vec<PromptCard>,
        answers: Vec<AnswerCard>,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::build(prompts, answers, ChaCha20Rng::seed_from_u64(seed))
    }

    /// Parses a JSON deck file (`promptCards` / `answerCards` pools).
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let file: DeckFile =
            serde_json::from_str(raw).map_err(|e| ConfigError::BadDeckFile(e.to_string()))?;
        Self::new(file.prompt_cards, file.answer_cards)
    }

    fn build(
        prompts: Vec<PromptCard>,
        answers: Vec<AnswerCard>,
        rng: ChaCha20Rng,
    ) -> Result<Self, ConfigError> {
        if prompts.is_empty() {
            return Err(ConfigError::EmptyPromptPool);
        }
        if answers.is_empty() {
            return Err(ConfigError::EmptyAnswerPool);
        }
        Ok(Self {
            prompts,
            answers,
            rng,
        })
    }

    pub fn draw_prompt(&mut self) -> PromptCard {
        let i = self.rng.random_range(0..self.prompts.len());
        self.prompts[i].clone()
    }

    pub fn draw_answer(&mut self) -> AnswerCard {
        let i = self.rng.random_range(0..self.answers.len());
        self.answers[i].clone()
    }

    pub fn stats(&self) -> DeckStats {
        DeckStats {
            prompt_count: self.prompts.len(),
            answer_count: self.answers.len(),
        }
    }
}
