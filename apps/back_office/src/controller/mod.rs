//! Controller layer: events coming back from the worker and the dispatch
//! helper from UI actions to the command queue.

pub mod events;
pub mod orchestration;
