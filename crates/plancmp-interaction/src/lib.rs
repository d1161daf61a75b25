//! Remote model integrations for plan-compare.

pub mod ai21_api_client;

pub use ai21_api_client::Ai21ApiClient;
