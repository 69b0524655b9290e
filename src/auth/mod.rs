pub mod manager;
pub mod oauth;
pub mod routes;

pub use manager::TokenManager;
pub use oauth::OauthClient;
