//! GPIO interrupt abstractions
//!
//! Provides the trait an interrupt handler uses to acknowledge the external
//! line that fired.

/// External interrupt line
///
/// The platform invokes the handler once per physical edge (plus contact
/// bounce). Clearing the pending flag is the handler's responsibility; if it
/// is left set the handler re-enters immediately on return.
pub trait EdgeInterrupt {
    /// Clear the pending flag for this line
    fn clear_pending(&mut self);

    /// Check whether the line has a pending interrupt
    fn is_pending(&self) -> bool;
}

impl<T: EdgeInterrupt + ?Sized> EdgeInterrupt for &mut T {
    fn clear_pending(&mut self) {
        (**self).clear_pending()
    }

    fn is_pending(&self) -> bool {
        (**self).is_pending()
    }
}
