pub(crate) mod buffer;
pub mod cues;
pub mod matching;
pub mod report;
pub mod script_prep;
pub mod segmentation;
pub mod width;
pub mod word_cues;
