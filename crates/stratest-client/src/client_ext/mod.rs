pub mod api;

pub use reqwest::Client;
