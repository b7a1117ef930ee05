#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// websms status code (`statusCode` in the response body).
///
/// This value is preserved as-is even when the code is unknown to this crate.
pub struct StatusCode(i32);

impl StatusCode {
    /// JSON key used by websms (`statusCode`).
    pub const FIELD: &'static str = "statusCode";

    /// Construct a status code from its integer representation.
    pub fn new(code: i32) -> Self {
        Self(code)
    }

    /// Get the integer code as provided by websms.
    pub fn as_i32(self) -> i32 {
        self.0
    }

    /// Map this code to a known status code variant, if one exists.
    pub fn known(self) -> Option<KnownStatusCode> {
        KnownStatusCode::from_code(self.0)
    }

    /// Classify this code into the outcome the client acts on.
    pub fn outcome(self) -> Outcome {
        classify(self.0)
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// How the client treats a response status code.
pub enum Outcome {
    /// The request was accepted (sent or queued).
    Success,
    /// Credentials, account or source IP were rejected.
    NotAuthorized,
    /// The request content was rejected.
    InvalidRequest,
    /// websms failed internally or is unavailable.
    ServiceError,
    /// The code is not part of the documented table.
    UnknownStatus,
}

/// Classify a raw websms status code. Codes absent from the table map to
/// [`Outcome::UnknownStatus`].
pub fn classify(code: i32) -> Outcome {
    KnownStatusCode::from_code(code).map_or(Outcome::UnknownStatus, KnownStatusCode::outcome)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Status codes documented by websms.
///
/// Unknown codes are preserved as [`StatusCode`] and return `None` from [`KnownStatusCode::from_code`].
pub enum KnownStatusCode {
    Ok,
    OkQueued,
    InvalidCredentials,
    InvalidRecipient,
    InvalidSender,
    InvalidMessageType,
    InvalidClientMessageId,
    InvalidText,
    MessageLimitExceeded,
    UnauthorizedIp,
    InvalidMessagePriority,
    InvalidCallbackUrl,
    ParameterMissing,
    InvalidAccount,
    AccessDenied,
    ThrottlingSpammingIp,
    ThrottlingTooManyRecipients,
    MaxSmsPerMessageExceeded,
    InvalidMessageSegment,
    RecipientsBlacklisted,
    InvalidAttachment,
    InvalidContentCategory,
    InternalError,
    ServiceUnavailable,
}

impl KnownStatusCode {
    /// Convert a raw websms integer code into a known variant.
    pub fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            2000 => Self::Ok,
            2001 => Self::OkQueued,
            4001 => Self::InvalidCredentials,
            4002 => Self::InvalidRecipient,
            4003 => Self::InvalidSender,
            4004 => Self::InvalidMessageType,
            4008 => Self::InvalidClientMessageId,
            4009 => Self::InvalidText,
            4013 => Self::MessageLimitExceeded,
            4014 => Self::UnauthorizedIp,
            4015 => Self::InvalidMessagePriority,
            4016 => Self::InvalidCallbackUrl,
            4019 => Self::ParameterMissing,
            4021 => Self::InvalidAccount,
            4022 => Self::AccessDenied,
            4023 => Self::ThrottlingSpammingIp,
            4025 => Self::ThrottlingTooManyRecipients,
            4026 => Self::MaxSmsPerMessageExceeded,
            4027 => Self::InvalidMessageSegment,
            4031 => Self::RecipientsBlacklisted,
            4034 => Self::InvalidAttachment,
            4040 => Self::InvalidContentCategory,
            5000 => Self::InternalError,
            5003 => Self::ServiceUnavailable,
            _ => return None,
        })
    }

    /// The integer code websms uses for this variant.
    pub fn code(self) -> i32 {
        match self {
            Self::Ok => 2000,
            Self::OkQueued => 2001,
            Self::InvalidCredentials => 4001,
            Self::InvalidRecipient => 4002,
            Self::InvalidSender => 4003,
            Self::InvalidMessageType => 4004,
            Self::InvalidClientMessageId => 4008,
            Self::InvalidText => 4009,
            Self::MessageLimitExceeded => 4013,
            Self::UnauthorizedIp => 4014,
            Self::InvalidMessagePriority => 4015,
            Self::InvalidCallbackUrl => 4016,
            Self::ParameterMissing => 4019,
            Self::InvalidAccount => 4021,
            Self::AccessDenied => 4022,
            Self::ThrottlingSpammingIp => 4023,
            Self::ThrottlingTooManyRecipients => 4025,
            Self::MaxSmsPerMessageExceeded => 4026,
            Self::InvalidMessageSegment => 4027,
            Self::RecipientsBlacklisted => 4031,
            Self::InvalidAttachment => 4034,
            Self::InvalidContentCategory => 4040,
            Self::InternalError => 5000,
            Self::ServiceUnavailable => 5003,
        }
    }

    pub fn outcome(self) -> Outcome {
        match self {
            Self::Ok | Self::OkQueued => Outcome::Success,
            Self::InvalidCredentials
            | Self::UnauthorizedIp
            | Self::InvalidAccount
            | Self::AccessDenied => Outcome::NotAuthorized,
            Self::InvalidRecipient
            | Self::InvalidSender
            | Self::InvalidMessageType
            | Self::InvalidClientMessageId
            | Self::InvalidText
            | Self::MessageLimitExceeded
            | Self::InvalidMessagePriority
            | Self::InvalidCallbackUrl
            | Self::ParameterMissing
            | Self::ThrottlingSpammingIp
            | Self::ThrottlingTooManyRecipients
            | Self::MaxSmsPerMessageExceeded
            | Self::InvalidMessageSegment
            | Self::RecipientsBlacklisted
            | Self::InvalidAttachment
            | Self::InvalidContentCategory => Outcome::InvalidRequest,
            Self::InternalError | Self::ServiceUnavailable => Outcome::ServiceError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENTED: [(i32, Outcome); 24] = [
        (2000, Outcome::Success),
        (2001, Outcome::Success),
        (4001, Outcome::NotAuthorized),
        (4002, Outcome::InvalidRequest),
        (4003, Outcome::InvalidRequest),
        (4004, Outcome::InvalidRequest),
        (4008, Outcome::InvalidRequest),
        (4009, Outcome::InvalidRequest),
        (4013, Outcome::InvalidRequest),
        (4014, Outcome::NotAuthorized),
        (4015, Outcome::InvalidRequest),
        (4016, Outcome::InvalidRequest),
        (4019, Outcome::InvalidRequest),
        (4021, Outcome::NotAuthorized),
        (4022, Outcome::NotAuthorized),
        (4023, Outcome::InvalidRequest),
        (4025, Outcome::InvalidRequest),
        (4026, Outcome::InvalidRequest),
        (4027, Outcome::InvalidRequest),
        (4031, Outcome::InvalidRequest),
        (4034, Outcome::InvalidRequest),
        (4040, Outcome::InvalidRequest),
        (5000, Outcome::ServiceError),
        (5003, Outcome::ServiceError),
    ];

    #[test]
    fn documented_codes_classify_as_listed() {
        for (code, expected) in DOCUMENTED {
            assert_eq!(classify(code), expected, "code {code}");
            assert_eq!(StatusCode::new(code).outcome(), expected, "code {code}");
        }
    }

    #[test]
    fn codes_outside_the_table_are_unknown() {
        let documented: Vec<i32> = DOCUMENTED.iter().map(|(code, _)| *code).collect();
        for code in (-10..6000).filter(|code| !documented.contains(code)) {
            assert_eq!(classify(code), Outcome::UnknownStatus, "code {code}");
        }
        assert_eq!(classify(i32::MAX), Outcome::UnknownStatus);
        assert_eq!(classify(i32::MIN), Outcome::UnknownStatus);
    }

    #[test]
    fn known_codes_round_trip_through_their_integer() {
        for (code, _) in DOCUMENTED {
            let known = KnownStatusCode::from_code(code).unwrap();
            assert_eq!(known.code(), code);
        }
        assert_eq!(StatusCode::new(9999).known(), None);
    }

    #[test]
    fn status_code_displays_the_raw_integer() {
        assert_eq!(StatusCode::new(4002).to_string(), "4002");
    }
}
