//! Curated dance-move knowledge base.
//!
//! Each move renders to one plain-text chunk; the retrieval collaborator
//! indexes these chunks and returns the most relevant ones per question.

use serde::{Deserialize, Serialize};

/// Number of chunks retrieved per question.
pub const RETRIEVAL_K: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DanceMove {
    pub name: String,
    pub category: String,
    pub style: String,
    pub description: String,
    pub tips: Vec<String>,
    pub difficulty: String,
    pub common_mistakes: Vec<String>,
    pub evaluation_criteria: Vec<String>,
}

impl DanceMove {
    /// Text chunk handed to the retrieval index.
    pub fn to_chunk(&self) -> String {
        format!(
            "Dance move: {}\nCategory: {}\nStyle: {}\nDescription: {}\nTips: {}\nCommon mistakes: {}\nDifficulty: {}\nEvaluation criteria: {}\n",
            self.name,
            self.category,
            self.style,
            self.description,
            self.tips.join(", "),
            self.common_mistakes.join(", "),
            self.difficulty,
            self.evaluation_criteria.join(", "),
        )
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

/// Built-in hip-hop move catalog.
pub fn default_moves() -> Vec<DanceMove> {
    vec![
        DanceMove {
            name: "Toprock".to_string(),
            category: "Footwork".to_string(),
            style: "Breaking".to_string(),
            description: "Standing opening steps of a breaking set.".to_string(),
            tips: strings(&[
                "Keep your balance",
                "Move your feet with the rhythm",
                "Support the groove with your arms",
            ]),
            difficulty: "Intermediate".to_string(),
            common_mistakes: strings(&[
                "Overcomplicated step order",
                "Losing balance",
                "Weak arm movement",
            ]),
            evaluation_criteria: strings(&["Rhythm Match", "Foot Precision", "Balance"]),
        },
        DanceMove {
            name: "Six-Step".to_string(),
            category: "Footwork".to_string(),
            style: "Breaking".to_string(),
            description: "Foundational six-step breaking move performed on the floor.".to_string(),
            tips: strings(&[
                "Keep each step clean",
                "Hold your hand position",
                "Distribute your body weight",
            ]),
            difficulty: "Hard".to_string(),
            common_mistakes: strings(&["Mixing up the step count", "Losing control at speed"]),
            evaluation_criteria: strings(&["Timing", "Smooth Transition", "Floor Control"]),
        },
    ]
}

/// Chunks for the whole catalog, in catalog order.
pub fn knowledge_chunks(moves: &[DanceMove]) -> Vec<String> {
    moves.iter().map(DanceMove::to_chunk).collect()
}
