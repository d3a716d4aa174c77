use serde::Serialize;

use crate::session::FlowState;

/// The step a client is routed to when an operation is attempted out of
/// order. These are labels for the caller to route on, not failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredStep {
    Identify,
    PurchaseTicket,
    BrowseCatalog,
    Dashboard,
}

impl RequiredStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequiredStep::Identify => "identify",
            RequiredStep::PurchaseTicket => "purchase_ticket",
            RequiredStep::BrowseCatalog => "browse_catalog",
            RequiredStep::Dashboard => "dashboard",
        }
    }
}

/// Gated workflow operations. Identify, register, logout and the catalog
/// read are ungated and do not appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    PurchaseTicket,
    StartDraft,
    CommitBooking,
    Confirm,
    Finish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    Proceed,
    RouteTo(RequiredStep),
}

/// The transition table. Out-of-order operations route the client to the
/// step they are missing instead of aborting the session; the flow is
/// self-healing by construction.
pub fn gate(state: FlowState, op: Operation) -> Gate {
    use FlowState::*;
    use Operation::*;

    match (state, op) {
        // Nothing is allowed before identity is established.
        (Anonymous, _) => Gate::RouteTo(RequiredStep::Identify),

        // Identified but not ticketed: the entry ticket comes first.
        (Identified, PurchaseTicket) => Gate::Proceed,
        (Identified, _) => Gate::RouteTo(RequiredStep::PurchaseTicket),

        // A second ticket purchase is pointless; send them back.
        (Ticketed | DraftingBooking | Booked, PurchaseTicket) => {
            Gate::RouteTo(RequiredStep::Dashboard)
        }

        // Drafts may be started or restarted any time after ticketing.
        (Ticketed | DraftingBooking | Booked, StartDraft) => Gate::Proceed,

        // Committing requires a draft in hand.
        (Ticketed, CommitBooking) => Gate::RouteTo(RequiredStep::BrowseCatalog),
        (DraftingBooking, CommitBooking) => Gate::Proceed,
        (Booked, CommitBooking) => Gate::RouteTo(RequiredStep::Dashboard),

        // Confirmation requires a committed booking.
        (Ticketed | DraftingBooking, Confirm) => Gate::RouteTo(RequiredStep::Dashboard),
        (Booked, Confirm) => Gate::Proceed,

        // Finishing is a clear; harmless from any identified state.
        (Ticketed | DraftingBooking | Booked, Finish) => Gate::Proceed,
    }
}
