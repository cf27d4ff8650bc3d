pub mod app;
pub mod config;
pub mod errors;
pub mod gateway;
pub mod handlers;
pub mod models;
pub mod period;
pub mod session;
pub mod state;
pub mod stats;
pub mod store;
pub mod ui;

#[cfg(test)]
mod testing;

pub use app::router;
pub use config::Config;
pub use gateway::{ApiGateway, HttpGateway, StaticToken, TokenProvider};
pub use session::PlanSession;
pub use state::AppState;
pub use store::RecordStore;
