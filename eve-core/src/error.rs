//! Coprocessor command errors

use crate::payload::PayloadError;

/// Errors from issuing coprocessor commands
///
/// A full FIFO is not an error: it is reported as
/// [`Delivery::GaveUp`](crate::fifo::Delivery::GaveUp).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The bus transport failed
    Transport(E),
    /// String payload exceeds [`MAX_PAYLOAD_BYTES`](crate::payload::MAX_PAYLOAD_BYTES)
    PayloadTooLarge,
}

impl<E> From<PayloadError> for Error<E> {
    fn from(err: PayloadError) -> Self {
        match err {
            PayloadError::TooLarge => Error::PayloadTooLarge,
        }
    }
}
