pub mod oauth2;

pub use oauth2::TokenProvider;
