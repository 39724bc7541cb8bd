pub mod api_client;
pub mod clock;
pub mod feed;
pub mod projection;
pub mod sources;
