//! Coaching feedback through injected text-generation and retrieval services.
//!
//! The crate ships no network client. Callers provide a [`TextGenerator`]
//! (and a [`Retriever`] for knowledge questions); any failure they report is
//! logged and surfaced as [`CoachError::ExternalService`], whose user-facing
//! message is generic.

use std::fmt;

use crate::config::ComparisonConfig;
use crate::error::{log_coach_error, CoachError};
use crate::pose::{JointAngleSchema, Point2};

use super::comparison::{compare_poses, PoseAssessment};
use super::knowledge::RETRIEVAL_K;

/// Praise returned when every joint matches the reference.
pub const PERFECT_POSE_FEEDBACK: &str =
    "Perfect! You nailed the position, no corrections needed. Great work!";

/// Failure reported by an external collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationFailure {
    pub reason: String,
}

impl GenerationFailure {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for GenerationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reason)
    }
}

impl std::error::Error for GenerationFailure {}

/// Short natural-language completion service.
pub trait TextGenerator {
    fn generate(&self, prompt: &str) -> Result<String, GenerationFailure>;
}

/// Similarity search over the indexed knowledge chunks.
pub trait Retriever {
    fn retrieve(&self, query: &str, k: usize) -> Result<Vec<String>, GenerationFailure>;
}

pub fn chat_prompt(message: &str) -> String {
    format!(
        "You are a dance instructor talking with a student. The student's message: '{}'.\n\
         Reply briefly and encouragingly, in at most 2 sentences.\n",
        message
    )
}

pub fn pose_prompt(joint_label: &str, user_angle: f64, reference_angle: f64) -> String {
    format!(
        "You are a dance instructor. The student's and the reference's {joint} angles are below.\n\
         Focusing on this difference, give one clear and motivating correction.\n\
         Keep the answer to 1-2 sentences.\n\n\
         Student {joint} angle: {user:.2} degrees\n\
         Reference {joint} angle: {reference:.2} degrees\n",
        joint = joint_label,
        user = user_angle,
        reference = reference_angle,
    )
}

pub fn retrieval_prompt(context: &[String], question: &str) -> String {
    format!(
        "You are a dance instructor. Use the context below to answer the user's question briefly and clearly.\n\
         If the context has no clear answer, reply \"I don't know about that.\"\n\n\
         ---\nContext:\n{}\n---\nQuestion: {}\n",
        context.join("\n\n"),
        question
    )
}

/// Coaching front end over an injected text generator.
pub struct Coach<G> {
    generator: G,
    schema: JointAngleSchema,
    config: ComparisonConfig,
}

impl<G: TextGenerator> Coach<G> {
    pub fn new(generator: G, schema: JointAngleSchema, config: ComparisonConfig) -> Self {
        Self {
            generator,
            schema,
            config,
        }
    }

    fn generate(&self, prompt: &str, context: &str) -> Result<String, CoachError> {
        self.generator.generate(prompt).map_err(|failure| {
            let err = CoachError::ExternalService {
                service: "text-generation",
                reason: failure.reason,
            };
            log_coach_error(&err, context);
            err
        })
    }

    /// Short motivating reply to a free-form message.
    pub fn chat(&self, message: &str) -> Result<String, CoachError> {
        if message.trim().is_empty() {
            return Err(CoachError::MissingField { field: "message" });
        }
        self.generate(&chat_prompt(message), "chat")
    }

    /// Corrective feedback for the worst-matching joint.
    ///
    /// Perfect matches return [`PERFECT_POSE_FEEDBACK`] without calling the
    /// generator.
    pub fn pose_feedback<P: Point2>(&self, user: &[P], reference: &[P]) -> Result<String, CoachError> {
        match compare_poses(user, reference, &self.schema, &self.config)? {
            PoseAssessment::Perfect => Ok(PERFECT_POSE_FEEDBACK.to_string()),
            PoseAssessment::Correction {
                label,
                user_angle,
                reference_angle,
                ..
            } => self.generate(&pose_prompt(&label, user_angle, reference_angle), "pose_feedback"),
        }
    }

    /// Answer a question from retrieved knowledge chunks.
    pub fn answer<R: Retriever>(&self, query: &str, retriever: &R) -> Result<String, CoachError> {
        if query.trim().is_empty() {
            return Err(CoachError::MissingField { field: "query" });
        }
        let context = retriever.retrieve(query, RETRIEVAL_K).map_err(|failure| {
            let err = CoachError::ExternalService {
                service: "retrieval",
                reason: failure.reason,
            };
            log_coach_error(&err, "answer");
            err
        })?;
        self.generate(&retrieval_prompt(&context, query), "answer")
    }
}
