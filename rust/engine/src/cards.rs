use serde::{Deserialize, Serialize};

/// A prompt card: the fill-in-the-blank text plus how many answer cards
/// it takes to complete it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PromptCard {
    /// Prompt text shown to every player at round start
    pub text: String,
    /// Number of answer cards a play must contain
    #[serde(default = "default_pick")]
    pub pick: usize,
}

fn default_pick() -> usize {
    1
}

/// An answer card a player holds in their hand and plays toward a prompt.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerCard(pub String);

impl AnswerCard {
    pub fn text(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AnswerCard {
    fn from(text: &str) -> Self {
        AnswerCard(text.to_string())
    }
}

impl std::fmt::Display for AnswerCard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// On-disk deck shape: two flat, unweighted pools.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckFile {
    pub prompt_cards: Vec<PromptCard>,
    pub answer_cards: Vec<AnswerCard>,
}
