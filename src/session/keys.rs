//! Storage keys shared with the web front end.

pub const USERNAME: &str = "username";
pub const USER_EMAIL: &str = "userEmail";
pub const IS_LOGGED_IN: &str = "isLoggedIn";
pub const IS_ADMIN: &str = "isAdmin";
pub const TOKEN: &str = "token";
pub const USER_PROFILE: &str = "userProfile";
pub const ACCOUNT_LAST_ITEM: &str = "account_last_item";
pub const SIDEBAR_OPEN: &str = "sidebarOpen";
pub const NEWSLETTER_POPUP_SEEN: &str = "newsletter_popup_seen";
pub const PREFERENCE_PREFIX: &str = "pref_";
pub const FAVORITES_PREFIX: &str = "favorites_";

/// Keys owned by a login; cleared on logout.
pub const LOGIN_KEYS: &[&str] = &[USERNAME, USER_EMAIL, IS_LOGGED_IN, IS_ADMIN, TOKEN, USER_PROFILE];

pub fn preference(name: &str) -> String {
    format!("{PREFERENCE_PREFIX}{name}")
}

pub fn favorites(username: &str) -> String {
    format!("{FAVORITES_PREFIX}{username}")
}
