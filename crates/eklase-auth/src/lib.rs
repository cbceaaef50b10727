//! Authentication for the e-klase family portal
//!
//! The portal only offers an HTML login form. [`Authenticator::login`] posts
//! it, answers the profile-selection page some family accounts get, and
//! decides success from the final redirect URL. Cookies set along the way
//! live in the HTTP client's jar.

mod error;
mod form;
mod login;

pub use error::{AuthError, AuthResult};
pub use form::{ExtractedForm, FormExtractor, RegexFormExtractor};
pub use login::{
    is_logged_in, needs_profile_selection, Authenticator, LoginPage, LoginTransport, LOGIN_PATH,
    LOGIN_SUCCESS_MARKER, PROFILE_SELECTION_MARKER,
};

/// Production portal settings
pub mod portal {
    /// Portal root
    pub const BASE_URL: &str = "https://my.e-klase.lv";

    /// Requests without a browser User-Agent are rejected
    pub const USER_AGENT: &str =
        "Mozilla/5.0 (X11; Linux x86_64; rv:146.0) Gecko/20100101 Firefox/146.0";
}
