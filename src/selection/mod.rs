// Selection module - reference segment extraction from recorded performances
//
// The pipeline for one recording:
// 1. scoring: instability score per frame transition
// 2. window: lowest-sum window over the transition scores
// 3. selector: ReferenceWindowSelector ties both together and slices frames
// 4. batch: discovers recordings in a directory and writes the segments

pub mod batch;
pub mod scoring;
pub mod selector;
pub mod window;

pub use batch::{
    extract_one, process_directory, BatchReport, RecordingCatalog, RecordingMetadata,
    RecordingOutcome,
};
pub use selector::{ReferenceSegment, ReferenceWindowSelector};
pub use window::{find_min_window, WindowSelection};
