//! ReplyFlow automation core
//!
//! Keyword-triggered auto-replies for comments and direct messages.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    AUTOMATION REGISTRY                        │
//! │                                                              │
//! │   create / update / delete ──► RwLock<Vec<AutomationRule>>   │
//! │                                        │                     │
//! │   (message, channel) ──► matcher ◄─────┘                     │
//! │                              │                               │
//! │                              ▼                               │
//! │                  Option<reply> (first match wins)            │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The registry never talks to the network, disk or cache. Callers hand it
//! plain rule records and get plain replies back.

#![warn(missing_docs)]

pub mod error;
pub mod matcher;
pub mod model;
pub mod registry;
pub mod seed;

pub use error::{AutomationError, AutomationResult};
pub use matcher::RuleMatch;
pub use model::*;
pub use registry::{AutomationRegistry, RuleFilter, RuleStatus};
