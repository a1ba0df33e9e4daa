pub mod auth;
pub mod mail;
pub mod password;

pub use auth::AuthService;
pub use mail::MailClient;
