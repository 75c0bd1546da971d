//! Defines functions for handling user authentication with cookies.

use axum_extra::extract::{
    PrivateCookieJar,
    cookie::{Cookie, SameSite},
};
use time::{
    Duration, OffsetDateTime, format_description::BorrowedFormatItem, macros::format_description,
};

use crate::{Error, user::UserID};

pub(crate) const COOKIE_USER_ID: &str = "user_id";
pub(crate) const COOKIE_EXPIRY: &str = "expiry";
/// The default duration for which auth cookies are valid.
pub(crate) const DEFAULT_COOKIE_DURATION: Duration = Duration::minutes(30);

const DATE_TIME_FORMAT: &[BorrowedFormatItem] = format_description!(
    "[year]-[month]-[day] [hour]:[minute]:[second] [offset_hour sign:mandatory]:[offset_minute]"
);

/// Add an auth cookie to the cookie jar, indicating that a user is logged in and authenticated.
///
/// Sets the expiry of the cookie to `duration` from the current time.
///
/// Returns the cookie jar with the cookie added.
///
/// # Errors
///
/// Returns a [time::error::Format] if the expiry time cannot be formatted.
pub(crate) fn set_auth_cookie(
    jar: PrivateCookieJar,
    user_id: UserID,
    duration: Duration,
) -> Result<PrivateCookieJar, time::error::Format> {
    let expiry = OffsetDateTime::now_utc() + duration;
    // Use format instead of to_string to avoid errors at midnight when the hour is printed as
    // a single digit when [DATE_TIME_FORMAT] expects two digits.
    let expiry_string = expiry.format(DATE_TIME_FORMAT)?;

    Ok(jar
        .add(
            Cookie::build((COOKIE_USER_ID, user_id.as_i64().to_string()))
                .expires(expiry)
                .http_only(true)
                .same_site(SameSite::Strict)
                .secure(true),
        )
        .add(
            Cookie::build((COOKIE_EXPIRY, expiry_string))
                .expires(expiry)
                .http_only(true)
                .same_site(SameSite::Strict)
                .secure(true),
        ))
}

/// Set the auth cookie to an invalid value and set its max age to zero, which should delete the cookie on the client side.
pub(crate) fn invalidate_auth_cookie(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.add(
        Cookie::build((COOKIE_USER_ID, "deleted"))
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
    .add(
        Cookie::build((COOKIE_EXPIRY, "deleted"))
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .http_only(true)
            .same_site(SameSite::Strict)
            .secure(true),
    )
}

/// Get the ID of the logged in user from the private cookie jar.
///
/// # Errors
///
/// Returns:
/// - [Error::CookieMissing] if the user ID or expiry cookie is not in the jar.
/// - [Error::InvalidDateFormat] if the expiry cookie cannot be parsed.
/// - [Error::InvalidCredentials] if the cookies have expired or the user ID is
///   not a valid integer.
pub(crate) fn get_user_id_from_auth_cookie(jar: &PrivateCookieJar) -> Result<UserID, Error> {
    let expiry_cookie = jar.get(COOKIE_EXPIRY).ok_or(Error::CookieMissing)?;
    let expiry = OffsetDateTime::parse(expiry_cookie.value(), DATE_TIME_FORMAT).map_err(|error| {
        Error::InvalidDateFormat(error.to_string(), expiry_cookie.value().to_owned())
    })?;

    if expiry < OffsetDateTime::now_utc() {
        return Err(Error::InvalidCredentials);
    }

    let user_id_cookie = jar.get(COOKIE_USER_ID).ok_or(Error::CookieMissing)?;
    let user_id = user_id_cookie
        .value()
        .parse::<i64>()
        .map_err(|_| Error::InvalidCredentials)?;

    Ok(UserID::new(user_id))
}

#[cfg(test)]
mod auth_cookie_tests {
    use axum_extra::extract::{PrivateCookieJar, cookie::Key};
    use sha2::{Digest, Sha512};
    use time::Duration;

    use crate::{Error, user::UserID};

    use super::{
        DEFAULT_COOKIE_DURATION, get_user_id_from_auth_cookie, invalidate_auth_cookie,
        set_auth_cookie,
    };

    fn get_jar() -> PrivateCookieJar {
        let key = Key::from(&Sha512::digest("42"));
        PrivateCookieJar::new(key)
    }

    #[test]
    fn set_then_get_round_trips_user_id() {
        let jar = set_auth_cookie(get_jar(), UserID::new(123), DEFAULT_COOKIE_DURATION)
            .expect("Could not set auth cookie");

        let user_id = get_user_id_from_auth_cookie(&jar);

        assert_eq!(user_id, Ok(UserID::new(123)));
    }

    #[test]
    fn get_fails_on_empty_jar() {
        let user_id = get_user_id_from_auth_cookie(&get_jar());

        assert_eq!(user_id, Err(Error::CookieMissing));
    }

    #[test]
    fn get_fails_on_expired_cookie() {
        let jar = set_auth_cookie(get_jar(), UserID::new(123), Duration::minutes(-5))
            .expect("Could not set auth cookie");

        let user_id = get_user_id_from_auth_cookie(&jar);

        assert_eq!(user_id, Err(Error::InvalidCredentials));
    }

    #[test]
    fn invalidated_cookie_is_rejected() {
        let jar = set_auth_cookie(get_jar(), UserID::new(123), DEFAULT_COOKIE_DURATION)
            .expect("Could not set auth cookie");

        let jar = invalidate_auth_cookie(jar);

        assert!(get_user_id_from_auth_cookie(&jar).is_err());
    }
}
