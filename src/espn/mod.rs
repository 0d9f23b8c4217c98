pub mod client;
pub mod cookies;
pub mod models;
pub mod parse;

pub use client::EspnClient;
pub use cookies::{decode_cookie, extract_cookies};
pub use parse::parse_league;
