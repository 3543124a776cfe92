pub mod client;
pub mod quiz;
pub mod response;
pub mod review;
pub mod secrets;

pub use client::{ensure_client, test_configured_api_key};
pub use quiz::request_quiz;
pub use response::{NormalizedQuiz, normalize};
pub use review::request_quiz_review;
pub use secrets::{clear_api_key, store_api_key};
