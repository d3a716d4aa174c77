use serde::{Deserialize, Serialize};

/// An uncommitted booking held in the client's context between category
/// selection and payment. The price is frozen here at draft time and is
/// what gets persisted at commit, regardless of later catalog changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub category_key: String,
    pub vehicle_name: String,
    pub rental_descriptor: String,
    pub price: i64,
}

/// Where a client is in the reservation flow. Derived from the session
/// context rather than stored, so context and state can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    Anonymous,
    Identified,
    Ticketed,
    DraftingBooking,
    Booked,
}

/// Per-client ephemeral context. One per session token; lifecycle is
/// owned by the caller, there is no expiry in the core.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub renter_id: Option<i64>,
    pub has_ticket: bool,
    pub draft: Option<BookingDraft>,
    pub booking_code: Option<String>,
}

impl SessionContext {
    pub fn state(&self) -> FlowState {
        if self.renter_id.is_none() {
            FlowState::Anonymous
        } else if !self.has_ticket {
            FlowState::Identified
        } else if self.booking_code.is_some() {
            FlowState::Booked
        } else if self.draft.is_some() {
            FlowState::DraftingBooking
        } else {
            FlowState::Ticketed
        }
    }

    /// Drop the draft and booking code, returning to Ticketed. The entry
    /// ticket persists across a full booking cycle, permitting repeat
    /// bookings.
    pub fn clear_booking(&mut self) {
        self.draft = None;
        self.booking_code = None;
    }

    /// Drop everything, returning to Anonymous.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
