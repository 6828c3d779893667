pub mod http;
pub mod traits;
pub mod types;

#[cfg(test)]
pub mod fake;

pub use http::HttpBackend;
pub use traits::RecipeBackend;
pub use types::{
    ApiError, Credentials, GenerateRequest, GenerateResponse, PantryUpdate, PasswordChange,
    Registration,
};
