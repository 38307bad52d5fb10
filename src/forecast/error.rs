use reqwest::StatusCode;
use thiserror::Error;

/// Failure taxonomy for one forecast fetch.
///
/// Each variant is the machine-readable classification of what went wrong;
/// [`FetchError::user_message`] provides the operator-facing diagnostic for
/// the same failure. Every failure is terminal for the current interaction;
/// nothing here is retried.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Credentials are missing or unusable before any network call.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The provider rejected the API key (HTTP 401/403).
    #[error("Provider rejected the credentials (status {status})")]
    Authorization { status: StatusCode },

    /// The provider's rate or usage limit was reached (HTTP 429).
    #[error("Provider usage quota exceeded")]
    QuotaExceeded,

    /// Provider-side failure (HTTP 5xx).
    #[error("Provider unavailable (status {status})")]
    ProviderUnavailable { status: StatusCode },

    /// Any other HTTP error status.
    #[error("HTTP request failed for {url} with status {status}")]
    Status { url: String, status: StatusCode },

    /// Transport-level failure that is not a connectivity problem.
    #[error("Request failed for {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The request never reached the provider (DNS, timeout, refused).
    #[error("Could not reach the provider")]
    Connectivity(#[source] reqwest::Error),

    /// HTTP succeeded but the body is not the expected payload structure.
    #[error("Response body is not a valid forecast payload")]
    Decode(#[source] reqwest::Error),

    /// HTTP succeeded and the body parsed, but it carries an embedded
    /// provider error.
    #[error("Provider reported an error: {message}")]
    ProviderBusiness { message: String },
}

impl FetchError {
    /// Human-readable diagnostic surfaced to the operator/user, distinct
    /// from the machine-readable variant.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Configuration { .. } => {
                "System error: the API key is missing. Configure it before fetching.".to_string()
            }
            FetchError::Authorization { .. } => {
                "Authorization error: the API key is invalid or unauthorized.".to_string()
            }
            FetchError::QuotaExceeded => {
                "Quota exceeded: the daily API limit has been reached. Please try again later."
                    .to_string()
            }
            FetchError::ProviderUnavailable { status } => format!(
                "Server error: Meteoblue services are currently unavailable (status {status})."
            ),
            FetchError::Status { .. } | FetchError::Transport { .. } => {
                format!("Request error: something went wrong: {self}")
            }
            FetchError::Connectivity(_) => {
                "Connection error: unable to reach the API. Check your internet connection."
                    .to_string()
            }
            FetchError::Decode(_) => {
                "Data error: received invalid data format from the API.".to_string()
            }
            FetchError::ProviderBusiness { message } => format!("API message: {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_messages_differ_per_failure_kind() {
        let quota = FetchError::QuotaExceeded;
        let auth = FetchError::Authorization {
            status: StatusCode::FORBIDDEN,
        };
        let business = FetchError::ProviderBusiness {
            message: "invalid package".to_string(),
        };

        assert!(quota.user_message().contains("Quota exceeded"));
        assert!(auth.user_message().contains("Authorization error"));
        assert!(business.user_message().contains("invalid package"));
        assert_ne!(quota.user_message(), auth.user_message());
    }

    #[test]
    fn user_message_is_not_the_debug_form() {
        let err = FetchError::QuotaExceeded;
        assert_ne!(err.user_message(), format!("{err:?}"));
    }
}
