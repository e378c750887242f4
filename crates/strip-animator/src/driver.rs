//! LED strip transmitter abstraction
//!
//! Provides a trait-based abstraction for strip output,
//! allowing the animation engine to be hardware-agnostic.

use core::fmt::Debug;

use crate::color::Rgb;

/// Frame sink for an N-pixel strip
///
/// Implement this trait to support different hardware platforms.
/// `transmit` resolves once the frame is physically flushed. The engine
/// bounds the wait with its own timeout, which can only fire at an await
/// point: implementations must suspend while the hardware flushes and
/// never busy-wait inside `transmit`.
#[allow(async_fn_in_trait)]
pub trait StripTransmitter<const N: usize> {
    type Error: Debug;

    /// Submit a complete frame and wait until it is on the wire
    async fn transmit(&mut self, frame: &[Rgb; N]) -> Result<(), Self::Error>;
}

impl<T: StripTransmitter<N>, const N: usize> StripTransmitter<N> for &mut T {
    type Error = T::Error;

    async fn transmit(&mut self, frame: &[Rgb; N]) -> Result<(), Self::Error> {
        (**self).transmit(frame).await
    }
}
