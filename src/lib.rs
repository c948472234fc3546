//! Scroll-to-unlock Terms of Service consent gate.
//!
//! A host checkbox stays disabled until the user opens the terms modal, scrolls
//! its content to the bottom, ticks the modal's approval checkbox and confirms.
//! The host UI is reached only through the traits in [`handles`].

pub mod config;
#[cfg(feature = "gui")]
pub mod egui_view;
pub mod error;
pub mod gate;
pub mod handles;
pub mod logger;
pub mod memory;
pub mod settle;
pub mod tos_text;

pub use error::{ConfigurationError, ConfirmationError};
pub use gate::{
    Approval, ConsentGate, GateConfig, GatePhase, GateState, MeasureOutcome, MeasureTicket,
    ScrollOutcome,
};
pub use handles::{CheckboxHandle, ContentHandle, GateView, ScrollGeometry, ScrollPanel};
