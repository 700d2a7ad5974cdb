/// Serializes video submissions.
///
/// At most one submission is in flight. A request made while one is in
/// flight is parked, and a later request replaces the parked one; the
/// in-flight submission always runs to completion. When it resolves, the
/// parked request (if any) becomes the next in-flight one.
#[derive(Debug, Default)]
pub struct SubmissionQueue {
    in_flight: Option<String>,
    pending: Option<String>,
}

impl SubmissionQueue {
    /// Returns the reference to issue now, or `None` if it was parked.
    pub fn request(&mut self, reference: String) -> Option<String> {
        if self.in_flight.is_some() {
            if let Some(replaced) = self.pending.replace(reference) {
                tracing::debug!(replaced = %replaced, "pending_submission_replaced");
            }
            return None;
        }

        self.in_flight = Some(reference.clone());
        Some(reference)
    }

    /// Mark the in-flight submission as fully resolved. Returns the parked
    /// reference to issue next, if any.
    pub fn resolve(&mut self) -> Option<String> {
        self.in_flight = self.pending.take();
        self.in_flight.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn in_flight(&self) -> Option<&str> {
        self.in_flight.as_deref()
    }

    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }
}
