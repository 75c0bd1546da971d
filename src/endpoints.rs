//! The API endpoint URIs.

/// The root route which redirects to the payments page.
pub const ROOT: &str = "/";
/// The page showing the monthly payment summary.
pub const PAYMENTS_VIEW: &str = "/payments";
/// The page for viewing and editing the user's bank details.
pub const BANK_DETAILS_VIEW: &str = "/bank-details";
/// The route for getting the registration page.
pub const REGISTER_VIEW: &str = "/register";
/// The route for getting the log in page.
pub const LOG_IN_VIEW: &str = "/log_in";

/// The route for logging in a user.
pub const LOG_IN_API: &str = "/api/log_in";
/// The route for the client to log out the current user.
pub const LOG_OUT: &str = "/api/log_out";
/// The route to register users.
pub const USERS: &str = "/api/users";
/// The route to save (create or update) the user's bank details.
pub const SAVE_BANK_DETAILS: &str = "/api/bank-details";
/// The route to delete the user's bank details.
pub const DELETE_BANK_DETAILS: &str = "/api/bank-details";
