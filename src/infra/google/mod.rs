pub mod auth;
pub mod sheets_client;

pub use auth::ServiceAccountAuth;
pub use sheets_client::DriveSheetsClient;
