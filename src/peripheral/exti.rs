//! Edge Interrupt Controller
//!
//! Binds one external interrupt line to a pin, arms it for a rising or
//! falling edge and dispatches a registered handler each time the edge
//! fires.
//!
//! Configuration is a type-state chain:
//!
//! ```text
//! EdgeInterrupt::route(line, pin) ─► enable(edge) ─► on_triggered(handler)
//!      (routed, masked)             (EnabledLine)        (ArmedLine)
//! ```
//!
//! The edge future of the underlying [`Wait`] implementation resolves once
//! the interrupt has fired and its pending bit has been cleared, so a stale
//! pending flag never dispatches the handler twice. Handlers run to
//! completion between edges; they must not block.

use embedded_hal::digital::Error as _;
use embedded_hal_async::digital::Wait;

use crate::config::EXTI_LINE_COUNT;
use crate::types::{Edge, Error, SenseResult};

/// External interrupt line routed to a pin, still masked
pub struct EdgeInterrupt<W> {
    line: u8,
    pin: W,
}

impl<W: Wait> EdgeInterrupt<W> {
    /// Bind `line` to the pin with number `pin_number`
    ///
    /// # Errors
    ///
    /// Returns [`Error::LineOutOfRange`] for lines above 15 and
    /// [`Error::LineMismatch`] when the line index differs from the pin
    /// number (line n only serves pin n of any port).
    pub fn route(line: u8, pin_number: u8, pin: W) -> SenseResult<Self> {
        if line >= EXTI_LINE_COUNT {
            return Err(Error::LineOutOfRange(line));
        }
        if line != pin_number {
            return Err(Error::LineMismatch {
                line,
                pin: pin_number,
            });
        }
        Ok(Self { line, pin })
    }

    /// Line index
    #[must_use]
    pub const fn line(&self) -> u8 {
        self.line
    }

    /// Select the trigger edge and unmask the line
    pub fn enable(self, edge: Edge) -> EnabledLine<W> {
        debug!("exti: line {} armed on {} edge", self.line, edge);
        EnabledLine {
            line: self.line,
            edge,
            pin: self.pin,
        }
    }
}

/// Unmasked interrupt line with its trigger edge selected
pub struct EnabledLine<W> {
    line: u8,
    edge: Edge,
    pin: W,
}

impl<W: Wait> EnabledLine<W> {
    /// Line index
    #[must_use]
    pub const fn line(&self) -> u8 {
        self.line
    }

    /// Trigger edge
    #[must_use]
    pub const fn edge(&self) -> Edge {
        self.edge
    }

    /// Register the handler invoked on every edge
    pub fn on_triggered<H: FnMut()>(self, handler: H) -> ArmedLine<W, H> {
        ArmedLine {
            line: self.line,
            edge: self.edge,
            pin: self.pin,
            handler,
            dispatched: 0,
        }
    }
}

/// Interrupt line with a registered handler
pub struct ArmedLine<W, H> {
    line: u8,
    edge: Edge,
    pin: W,
    handler: H,
    dispatched: u32,
}

impl<W: Wait, H: FnMut()> ArmedLine<W, H> {
    /// Wait for the next edge and invoke the handler once
    ///
    /// # Errors
    ///
    /// Returns [`Error::Edge`] if waiting on the pin fails; the handler is
    /// not invoked in that case.
    pub async fn next(&mut self) -> SenseResult<()> {
        let waited = match self.edge {
            Edge::Falling => self.pin.wait_for_falling_edge().await,
            Edge::Rising => self.pin.wait_for_rising_edge().await,
        };
        waited.map_err(|e| Error::Edge(e.kind()))?;

        self.dispatched = self.dispatched.wrapping_add(1);
        trace!("exti: line {} fired ({})", self.line, self.dispatched);
        (self.handler)();
        Ok(())
    }

    /// Dispatch edges forever
    ///
    /// Only returns if waiting on the pin fails.
    pub async fn run(mut self) -> Error {
        loop {
            if let Err(e) = self.next().await {
                error!("exti: line {} stopped: {}", self.line, e);
                return e;
            }
        }
    }

    /// Number of times the handler has been invoked
    #[must_use]
    pub const fn dispatched(&self) -> u32 {
        self.dispatched
    }

    /// Line index
    #[must_use]
    pub const fn line(&self) -> u8 {
        self.line
    }

    /// Drop the handler and release the pin
    pub fn release(self) -> W {
        self.pin
    }
}
