//! A small educational quiz for children: a fixed, hand-authored
//! question set played one question at a time, with scoring, feedback
//! messages and sound cues.

pub mod quiz;
