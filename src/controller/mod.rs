//! Filter/Search Controller
//!
//! Event-driven state machine over the committed filter state.

mod list_controller;


pub use list_controller::{ListHandle, ListPhase, ListSnapshot, SEARCH_DEBOUNCE};
