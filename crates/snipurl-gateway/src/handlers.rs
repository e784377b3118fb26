pub mod admin;
pub mod health;
pub mod redirect;
pub mod url;

pub use self::admin::{admin_list_urls_handler, verify_password_handler};
pub use self::health::health_handler;
pub use self::redirect::redirect_handler;
pub use self::url::{list_urls_handler, shorten_handler};
