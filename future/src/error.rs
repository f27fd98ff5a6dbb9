use std::error::Error;
use std::fmt;

/// Returned by [`Resolver::resolve`](crate::Resolver::resolve) under
/// [`ResolvePolicy::Reject`](crate::ResolvePolicy::Reject) when the Deferred
/// already holds a value. Carries the rejected value back to the caller.
pub struct AlreadySettled<T>(pub T);

impl<T> AlreadySettled<T> {
    #[must_use]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for AlreadySettled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AlreadySettled").finish_non_exhaustive()
    }
}

impl<T> fmt::Display for AlreadySettled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("deferred value was already settled")
    }
}

impl<T> Error for AlreadySettled<T> {}
