pub mod refresh_token;
pub mod user;

pub use refresh_token::PostgresRefreshTokenStore;
pub use user::PostgresUserRepository;
