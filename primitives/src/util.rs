pub use self::api::ApiUrl;

pub mod api;
pub mod logging;
