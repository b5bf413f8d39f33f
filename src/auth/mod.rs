//! User accounts, password handling and cookie based sessions.

mod cookie;
mod email;
mod log_in;
mod log_out;
mod middleware;
mod password;
mod redirect;
mod register_user;
mod token;
mod user;

pub(crate) use cookie::{
    DEFAULT_COOKIE_DURATION, get_token_from_cookies, invalidate_auth_cookie, set_auth_cookie,
};
pub use email::{Email, MAX_EMAIL_LENGTH};
pub use log_in::{get_log_in_page, post_log_in};
pub use log_out::get_log_out;
pub use middleware::{auth_guard, auth_guard_hx};
pub use password::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH, PasswordHash, ValidatedPassword};
pub use redirect::{build_log_in_redirect_url, normalize_redirect_url};
pub use register_user::{get_register_page, register_user};
pub(crate) use token::Token;
pub use user::{User, UserID, create_user, create_user_table, get_user_by_email, get_user_by_id};

#[cfg(test)]
pub(crate) use cookie::COOKIE_TOKEN;

#[cfg(test)]
pub use middleware::AuthState;

#[cfg(test)]
pub use user::count_users;
