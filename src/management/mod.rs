mod auth;
mod token;

pub use auth::AuthFlow;
pub use auth::AuthState;
pub use auth::CallbackQuery;
pub use token::FileTokenStore;
pub use token::MemoryTokenStore;
pub use token::TokenStore;
