pub mod authority;
pub mod factory;
pub mod validator;

pub use authority::{AuthorityClient, AuthorityError};
pub use factory::build_token_validator;
pub use validator::{TokenCheck, TokenValidator};
