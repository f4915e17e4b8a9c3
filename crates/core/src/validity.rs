//! Validity Windows

use jiff::Timestamp;

use crate::errors::{IneligibleRedemption, ValidationError};

/// Period during which a code may be redeemed.
///
/// `starts_at` is inclusive and `ends_at` exclusive; either side may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ValidityWindow {
    starts_at: Option<Timestamp>,
    ends_at: Option<Timestamp>,
}

impl ValidityWindow {
    /// A window that is always open
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            starts_at: None,
            ends_at: None,
        }
    }

    /// Create a window from optional bounds.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyValidityWindow`] if both bounds are set and `starts_at`
    /// is not strictly before `ends_at`.
    pub fn new(
        starts_at: Option<Timestamp>,
        ends_at: Option<Timestamp>,
    ) -> Result<Self, ValidationError> {
        if let (Some(starts_at), Some(ends_at)) = (starts_at, ends_at)
            && starts_at >= ends_at
        {
            return Err(ValidationError::EmptyValidityWindow { starts_at, ends_at });
        }

        Ok(Self { starts_at, ends_at })
    }

    /// Window opening at `starts_at` and never closing
    #[must_use]
    pub const fn starting(starts_at: Timestamp) -> Self {
        Self {
            starts_at: Some(starts_at),
            ends_at: None,
        }
    }

    /// Window open until `ends_at`
    #[must_use]
    pub const fn ending(ends_at: Timestamp) -> Self {
        Self {
            starts_at: None,
            ends_at: Some(ends_at),
        }
    }

    /// Inclusive start
    pub const fn starts_at(&self) -> Option<Timestamp> {
        self.starts_at
    }

    /// Exclusive end
    pub const fn ends_at(&self) -> Option<Timestamp> {
        self.ends_at
    }

    /// Check that `at` falls inside the window.
    ///
    /// # Errors
    ///
    /// Returns [`IneligibleRedemption::NotYetActive`] before the window opens and
    /// [`IneligibleRedemption::Expired`] once it has closed.
    pub fn check(&self, at: Timestamp) -> Result<(), IneligibleRedemption> {
        if let Some(starts_at) = self.starts_at
            && at < starts_at
        {
            return Err(IneligibleRedemption::NotYetActive { starts_at });
        }

        if let Some(ends_at) = self.ends_at
            && at >= ends_at
        {
            return Err(IneligibleRedemption::Expired { ends_at });
        }

        Ok(())
    }

    /// Whether `at` falls inside the window
    pub fn contains(&self, at: Timestamp) -> bool {
        self.check(at).is_ok()
    }
}
