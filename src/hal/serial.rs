//! Byte transport the console is attached to.

/// Serial port as seen by the console worker
pub trait Transport {
    /// Platform-specific error type
    type Error: core::fmt::Debug;

    /// Read available bytes without blocking.
    ///
    /// `Ok(0)` means nothing has arrived yet; it is not an error.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Write the whole slice, blocking until the driver accepted it.
    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        (**self).read(buf)
    }

    fn write_all(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write_all(data)
    }
}
