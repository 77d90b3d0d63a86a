use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    /// A tree path grew past the bounded code width
    #[error("Code for byte {byte:#04x} would need {bits} bits, more than a code can hold")]
    UnrepresentableCode { byte: u8, bits: usize },

    #[error("Byte {byte:#04x} has no code in the table")]
    UnknownSymbol { byte: u8 },

    /// The payload bit count does not fit the 4-byte length field
    #[error("Payload of {bits} bits does not fit in the container")]
    PayloadTooLarge { bits: usize },

    #[error("Malformed container at byte {offset}: {reason}")]
    MalformedContainer { offset: usize, reason: String },

    /// The bit stream ended in the middle of a code
    #[error("Corrupt payload: {pending_bits} trailing bits match no code")]
    CorruptPayload { pending_bits: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CodecError {
    pub fn malformed(offset: usize, reason: impl Into<String>) -> Self {
        CodecError::MalformedContainer { offset, reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, CodecError>;
