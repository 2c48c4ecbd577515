//! Classify curl errors from an FTP session into fetch error kinds.

use super::ErrorKind;

/// `CURLE_FTP_WEIRD_PASS_REPLY`: server answered PASS with an unexpected code.
const FTP_WEIRD_PASS_REPLY: i32 = 11;
/// `CURLE_FTP_COULDNT_RETR_FILE`: RETR rejected (older libcurl for a 550).
const FTP_COULDNT_RETR_FILE: i32 = 19;
/// `CURLE_REMOTE_FILE_NOT_FOUND`: SIZE or RETR answered 550.
const REMOTE_FILE_NOT_FOUND: i32 = 78;

/// Classify a curl error for an anonymous FTP retrieval.
///
/// A CWD into a missing directory surfaces as `remote_access_denied`, which
/// is reported as `NotFound` alongside a rejected RETR.
///
/// An unsupported protocol (libcurl built without FTP) falls through to
/// `Other`: it is a transport failure, not a bad endpoint.
pub fn classify_curl_error(e: &curl::Error) -> ErrorKind {
    let code = e.code() as i32;
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_operation_timedout()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
        || e.is_partial_file()
    {
        return ErrorKind::Connection;
    }
    if e.is_login_denied() || code == FTP_WEIRD_PASS_REPLY {
        return ErrorKind::Authentication;
    }
    if code == REMOTE_FILE_NOT_FOUND
        || code == FTP_COULDNT_RETR_FILE
        || e.is_remote_access_denied()
    {
        return ErrorKind::NotFound;
    }
    if e.is_write_error() {
        return ErrorKind::Io;
    }
    if e.is_url_malformed() {
        return ErrorKind::InvalidInput;
    }
    ErrorKind::Other
}
