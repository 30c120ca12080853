/// Failures talking to the reasoning oracle (transport, auth, empty replies).
#[derive(Debug, thiserror::Error)]
pub enum OracleError {
    #[error("oracle transport failed: {reason}")]
    Transport { reason: String },

    #[error("oracle returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("oracle returned no choices")]
    EmptyReply,
}

/// The oracle answered, but the reply did not match the expected schema.
#[derive(Debug, thiserror::Error)]
pub enum OracleFormatError {
    #[error("reply is not a valid `{schema}` document: {reason}")]
    InvalidJson { schema: String, reason: String },

    #[error("unknown memory event `{event}`")]
    UnknownEvent { event: String },
}
