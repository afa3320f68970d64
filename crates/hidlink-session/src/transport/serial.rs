//! Production serial transport backed by the `serialport` crate.

use std::io::Write;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::BaudRate;
use crate::transport::{LinkError, LinkTransport};

/// Write timeout applied to the open port. The protocol never blocks on the
/// receiver (there is nothing to read), so a stuck write means the device is
/// gone and the error should surface quickly.
const WRITE_TIMEOUT: Duration = Duration::from_millis(500);

/// A serial port speaking the HID line protocol.
pub struct SerialTransport {
    path: String,
    port: Box<dyn serialport::SerialPort>,
}

impl SerialTransport {
    /// Opens `path` at the given baud rate.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Open`] when the device cannot be opened (absent,
    /// busy, or permission denied).
    pub fn open(path: &str, baud: BaudRate) -> Result<SerialTransport, LinkError> {
        let port = serialport::new(path, baud.as_u32())
            .timeout(WRITE_TIMEOUT)
            .open()
            .map_err(|source| LinkError::Open {
                path: path.to_string(),
                source,
            })?;
        info!(path, %baud, "serial link opened");
        Ok(SerialTransport {
            path: path.to_string(),
            port,
        })
    }
}

impl LinkTransport for SerialTransport {
    fn configure(&mut self, baud: BaudRate) -> Result<(), LinkError> {
        self.port
            .set_baud_rate(baud.as_u32())
            .map_err(LinkError::Configure)?;
        debug!(path = %self.path, %baud, "serial link reconfigured");
        Ok(())
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<(), LinkError> {
        self.port.write_all(bytes)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), LinkError> {
        self.port.flush()?;
        Ok(())
    }
}
