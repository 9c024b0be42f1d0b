//! Business-rule gates that sit between callers and repositories.

pub mod login;

pub use login::LoginUseCase;
