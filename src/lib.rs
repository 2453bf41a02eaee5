//! Historical date-span parsing engine.
//!
//! Turns free-text date expressions from Wikipedia prose ("c. 450 BC",
//! "11th–14th centuries", "(China, 1600–1046 BC)") into a comparable
//! [`Span`]. A caller picks an [`Orchestrator`] for the kind of page the
//! text came from and hands it a fragment plus the page's year and era.

pub mod batch;
pub mod calendar;
pub mod catalog;
pub mod config;
pub mod era;
pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod scanner;
pub mod strategy;
pub mod weight;

pub use catalog::{StrategyId, build};
pub use error::{Error, Result};
pub use orchestrator::{Orchestrator, OrchestratorKind};
pub use span_types::{PageContext, Precision, Span, SpanRecord};
pub use strategy::Strategy;
