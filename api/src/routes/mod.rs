//! API Routes

pub mod health;
pub mod automations;
pub mod evaluate;
pub mod webhooks;
