//! Names of the headers stepwise sets or reads itself.
//!
//! Header names are matched case-insensitively by [`crate::Response::get_header`], but they are
//! sent exactly as configured, so these constants use the conventional capitalization.

#![allow(non_upper_case_globals)]

macro_rules! standard_headers {
    (
        $(
            $(#[$docs:meta])*
            ($konst:ident, $upcase:ident, $name:literal);
        )+
    ) => {
        $(
            $(#[$docs])*
            pub const $upcase: &str = $name;
        )+

        $(
            $(#[$docs])*
            pub const $konst: &str = $name;
        )+
    }
}

standard_headers! {
    /// Content types the client understands. Seeded on every client by default.
    (Accept, ACCEPT, "Accept");

    /// Credentials for the target resource.
    (Authorization, AUTHORIZATION, "Authorization");

    /// Media type of the request or response body. Seeded on every client by default.
    (ContentType, CONTENT_TYPE, "Content-Type");

    /// Identifies the client software.
    (UserAgent, USER_AGENT, "User-Agent");
}

/// Default value of [`ACCEPT`] on a newly built client.
pub const DEFAULT_ACCEPT: &str = "application/json, text/plain";

/// Default value of [`CONTENT_TYPE`] on a newly built client.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";
