pub mod oauth;
pub mod payload;
pub mod traits;
pub mod twitter;

pub use traits::PostSource;
#[cfg(test)]
pub use traits::MockPostSource;
pub use twitter::TwitterClient;
