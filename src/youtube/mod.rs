pub mod client;
pub mod error;

pub use client::YouTubeClient;
pub use error::YtError;
