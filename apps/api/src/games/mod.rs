// Games API: today's listing, rate-limited refresh, cached recaps.
// Upstream data comes through live_data::GameFeed; recaps through llm_client::RecapWriter.

pub mod handlers;
pub mod listing;
pub mod models;
pub mod service;
