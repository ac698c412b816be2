use crate::error::RcookieError;

/// Exit status when a run completes but nothing was inserted
pub const EXIT_NOTHING_INSERTED: i32 = 1;

pub fn exit_code_for_error(err: &RcookieError) -> i32 {
    match err {
        RcookieError::InvalidUrl(_) => 3,
        RcookieError::Config(_) => 2,
        RcookieError::PermissionDenied(_) | RcookieError::FileNotFound(_) => 37,
        RcookieError::Io(_) => 23,
        RcookieError::Json(_) => 26,
        RcookieError::MalformedJar { .. } => 65,
        RcookieError::StoreRejected(_) => 73,
        RcookieError::NoCookies(_) => EXIT_NOTHING_INSERTED,
    }
}

#[cfg(test)]
mod tests {
    use super::exit_code_for_error;
    use crate::error::RcookieError;

    #[test]
    fn exit_code_maps_invalid_url() {
        let err = RcookieError::InvalidUrl("bad".to_string());
        assert_eq!(exit_code_for_error(&err), 3);
    }

    #[test]
    fn exit_code_maps_malformed_jar() {
        let err = RcookieError::MalformedJar {
            line: 2,
            reason: "short".to_string(),
        };
        assert_eq!(exit_code_for_error(&err), 65);
    }
}
