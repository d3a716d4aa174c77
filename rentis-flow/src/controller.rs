use std::sync::Arc;

use rentis_catalog::{quote, Catalog, CatalogError, Category, PricingError, RentalSelection};
use rentis_core::model::{Booking, NewBooking, NewRenter, Renter};
use rentis_core::repository::{BookingRepository, RenterRepository, RepoError, TicketRepository};

use crate::session::{BookingDraft, SessionContext};
use crate::transitions::{gate, Gate, Operation, RequiredStep};

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    /// Precondition not met; the caller routes the client to the named
    /// step. Never a session-aborting failure.
    #[error("Redirect to required step: {}", .0.as_str())]
    Redirect(RequiredStep),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Storage unavailable; fatal for the current operation, no retry.
    #[error("Storage failure: {0}")]
    Store(RepoError),
}

/// Outcome of an identify attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifyOutcome {
    /// An existing renter was adopted. If a ticket was already on file
    /// the client resumes directly in Ticketed.
    Resumed { ticketed: bool },
    /// No renter matches the contact number; registration is required
    /// before identify can succeed.
    NeedsRegistration,
}

/// Drives the reservation workflow: checks per-client state against the
/// transition table, prices selections through the catalog, and commits
/// entities through the repositories before advancing state.
pub struct FlowController {
    catalog: Arc<Catalog>,
    renters: Arc<dyn RenterRepository>,
    tickets: Arc<dyn TicketRepository>,
    bookings: Arc<dyn BookingRepository>,
    entry_ticket_amount: i64,
}

impl FlowController {
    pub fn new(
        catalog: Arc<Catalog>,
        renters: Arc<dyn RenterRepository>,
        tickets: Arc<dyn TicketRepository>,
        bookings: Arc<dyn BookingRepository>,
        entry_ticket_amount: i64,
    ) -> Self {
        Self {
            catalog,
            renters,
            tickets,
            bookings,
            entry_ticket_amount,
        }
    }

    fn check(&self, ctx: &SessionContext, op: Operation) -> Result<(), FlowError> {
        match gate(ctx.state(), op) {
            Gate::Proceed => Ok(()),
            Gate::RouteTo(step) => {
                tracing::debug!(state = ?ctx.state(), ?op, routed_to = step.as_str(), "operation gated");
                Err(FlowError::Redirect(step))
            }
        }
    }

    /// Look up an existing renter by contact number and adopt the
    /// identity. A renter with an entry ticket on file resumes straight
    /// to Ticketed.
    pub async fn identify(
        &self,
        ctx: &mut SessionContext,
        phone: &str,
    ) -> Result<IdentifyOutcome, FlowError> {
        let renter = match self
            .renters
            .find_by_phone(phone)
            .await
            .map_err(FlowError::Store)?
        {
            Some(r) => r,
            None => return Ok(IdentifyOutcome::NeedsRegistration),
        };

        let ticket = self
            .tickets
            .find_for_renter(renter.id)
            .await
            .map_err(FlowError::Store)?;

        ctx.clear();
        ctx.renter_id = Some(renter.id);
        ctx.has_ticket = ticket.is_some();

        tracing::info!(renter_id = renter.id, ticketed = ctx.has_ticket, "identity resumed");
        Ok(IdentifyOutcome::Resumed {
            ticketed: ctx.has_ticket,
        })
    }

    /// Create a new renter and adopt the identity, landing in Identified
    /// with no ticket.
    pub async fn register(
        &self,
        ctx: &mut SessionContext,
        renter: &NewRenter,
    ) -> Result<i64, FlowError> {
        if renter.full_name.trim().is_empty() {
            return Err(FlowError::Validation("Name is required".to_string()));
        }
        if renter.phone.trim().is_empty() {
            return Err(FlowError::Validation("Contact number is required".to_string()));
        }
        if renter.license_number.trim().is_empty() {
            return Err(FlowError::Validation("License number is required".to_string()));
        }

        let id = self.renters.create(renter).await.map_err(FlowError::Store)?;

        ctx.clear();
        ctx.renter_id = Some(id);

        tracing::info!(renter_id = id, "renter registered");
        Ok(id)
    }

    /// Purchase the mandatory entry ticket at the fixed admission fee.
    /// Only valid from Identified.
    pub async fn purchase_entry_ticket(
        &self,
        ctx: &mut SessionContext,
        payment_method: &str,
    ) -> Result<String, FlowError> {
        self.check(ctx, Operation::PurchaseTicket)?;
        let renter_id = match ctx.renter_id {
            Some(id) => id,
            None => return Err(FlowError::Redirect(RequiredStep::Identify)),
        };

        let code = self
            .tickets
            .create(renter_id, self.entry_ticket_amount, payment_method)
            .await
            .map_err(FlowError::Store)?;

        ctx.has_ticket = true;
        tracing::info!(renter_id, %code, "entry ticket issued");
        Ok(code)
    }

    pub fn entry_ticket_amount(&self) -> i64 {
        self.entry_ticket_amount
    }

    /// The renter record behind the current session, for the dashboard.
    pub async fn current_renter(&self, ctx: &SessionContext) -> Result<Option<Renter>, FlowError> {
        match ctx.renter_id {
            Some(id) => self.renters.get(id).await.map_err(FlowError::Store),
            None => Err(FlowError::Redirect(RequiredStep::Identify)),
        }
    }

    /// Categories in display order. Ungated read.
    pub fn list_catalog(&self) -> &[Category] {
        self.catalog.categories()
    }

    /// Validate the requested category and vehicle, price the selection,
    /// and hold the result as an uncommitted draft in the context. The
    /// price is frozen here; commit never reprices.
    pub async fn start_booking_draft(
        &self,
        ctx: &mut SessionContext,
        category_key: &str,
        vehicle_name: &str,
        selection: RentalSelection,
    ) -> Result<BookingDraft, FlowError> {
        self.check(ctx, Operation::StartDraft)?;

        let category = self.catalog.get(category_key)?;
        if !category.has_vehicle(vehicle_name) {
            return Err(CatalogError::UnknownVehicle {
                category: category_key.to_string(),
                vehicle: vehicle_name.to_string(),
            }
            .into());
        }

        let priced = quote(category, selection)?;
        let draft = BookingDraft {
            category_key: category.key.to_string(),
            vehicle_name: vehicle_name.to_string(),
            rental_descriptor: priced.descriptor,
            price: priced.amount,
        };

        // Restarting a draft supersedes any prior committed-booking code
        // held in the context.
        ctx.booking_code = None;
        ctx.draft = Some(draft.clone());
        Ok(draft)
    }

    /// Persist the draft as a Booking, using the draft's frozen price.
    /// Only valid from DraftingBooking with a draft in hand.
    pub async fn commit_booking(
        &self,
        ctx: &mut SessionContext,
        payment_method: &str,
    ) -> Result<String, FlowError> {
        self.check(ctx, Operation::CommitBooking)?;
        let (renter_id, draft) = match (ctx.renter_id, ctx.draft.as_ref()) {
            (Some(id), Some(d)) => (id, d.clone()),
            (None, _) => return Err(FlowError::Redirect(RequiredStep::Identify)),
            (_, None) => return Err(FlowError::Redirect(RequiredStep::BrowseCatalog)),
        };

        let booking = NewBooking {
            renter_id,
            category_key: draft.category_key,
            vehicle_name: draft.vehicle_name,
            rental_descriptor: draft.rental_descriptor,
            price: draft.price,
            payment_method: payment_method.to_string(),
        };

        let code = self
            .bookings
            .create(&booking)
            .await
            .map_err(FlowError::Store)?;

        ctx.booking_code = Some(code.clone());
        tracing::info!(renter_id, %code, price = booking.price, "booking committed");
        Ok(code)
    }

    /// Retrieve the committed booking by (code, renter) pair. A failed
    /// lookup clears the stale code so the client falls back to the prior
    /// state instead of erroring.
    pub async fn get_confirmation(
        &self,
        ctx: &mut SessionContext,
    ) -> Result<Option<Booking>, FlowError> {
        self.check(ctx, Operation::Confirm)?;
        let (renter_id, code) = match (ctx.renter_id, ctx.booking_code.as_ref()) {
            (Some(id), Some(c)) => (id, c.clone()),
            (None, _) => return Err(FlowError::Redirect(RequiredStep::Identify)),
            (_, None) => return Err(FlowError::Redirect(RequiredStep::Dashboard)),
        };

        let booking = self
            .bookings
            .find_by_code(&code, renter_id)
            .await
            .map_err(FlowError::Store)?;

        if booking.is_none() {
            tracing::warn!(renter_id, %code, "confirmation lookup missed; clearing stale code");
            ctx.booking_code = None;
        }
        Ok(booking)
    }

    /// Clear the draft and booking code, returning the client to
    /// Ticketed. The ticket survives, permitting repeat bookings.
    pub fn finish_booking(&self, ctx: &mut SessionContext) -> Result<(), FlowError> {
        self.check(ctx, Operation::Finish)?;
        ctx.clear_booking();
        Ok(())
    }

    /// Clear the entire context, returning the client to Anonymous.
    pub fn logout(&self, ctx: &mut SessionContext) {
        ctx.clear();
    }
}
