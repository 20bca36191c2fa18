use thiserror::Error;

use crate::vendor::requests::assistant::RunStatus;

/// Failures talking to the upstream provider.
#[derive(Debug, Error)]
pub enum VendorError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: u16,
        body: String,
    },

    #[error("image response carried neither url nor b64_json")]
    EmptyImage,

    #[error("invalid base64 image payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// Why a turn could not produce a reply. Callers only ever see one fixed message,
/// the variants exist for logging.
#[derive(Debug, Error)]
pub enum TurnError {
    #[error("transport error: {0}")]
    Transport(#[from] VendorError),

    #[error("run ended with status {0}")]
    JobEnded(RunStatus),

    #[error("run still pending after {attempts} polls")]
    Timeout { attempts: u32 },
}
