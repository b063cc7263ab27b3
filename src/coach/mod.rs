// Coach module - live feedback against a reference pose
//
// comparison: joint-angle comparison of a user pose against the reference
// feedback: prompts plus the text-generation / retrieval service seams
// knowledge: dance-move catalog rendered into retrieval chunks

pub mod comparison;
pub mod feedback;
pub mod knowledge;

pub use comparison::{compare_poses, joint_differences, pose_similarity, JointDifference, PoseAssessment};
pub use feedback::{
    Coach, GenerationFailure, Retriever, TextGenerator, PERFECT_POSE_FEEDBACK,
};
pub use knowledge::{default_moves, knowledge_chunks, DanceMove};
