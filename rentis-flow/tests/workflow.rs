use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use rentis_catalog::{Catalog, RentalSelection};
use rentis_core::codes::{external_code, BOOKING_PREFIX, TICKET_PREFIX};
use rentis_core::model::{
    Booking, BookingStatus, EntryTicket, NewBooking, NewRenter, Renter,
};
use rentis_core::repository::{
    BookingRepository, RenterRepository, RepoError, TicketRepository,
};
use rentis_flow::{
    FlowController, FlowError, FlowState, IdentifyOutcome, RequiredStep, SessionContext,
};

/// In-memory stand-in for the SQLite store.
#[derive(Default)]
struct MemStore {
    renters: Mutex<Vec<Renter>>,
    tickets: Mutex<Vec<EntryTicket>>,
    bookings: Mutex<Vec<Booking>>,
}

#[async_trait]
impl RenterRepository for MemStore {
    async fn create(&self, renter: &NewRenter) -> Result<i64, RepoError> {
        let mut renters = self.renters.lock().unwrap();
        let id = renters.len() as i64 + 1;
        renters.push(Renter {
            id,
            full_name: renter.full_name.clone(),
            phone: renter.phone.clone(),
            id_number: renter.id_number.clone(),
            license_number: renter.license_number.clone(),
            gender: renter.gender.clone(),
            address: renter.address.clone(),
            latitude: renter.latitude,
            longitude: renter.longitude,
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Renter>, RepoError> {
        // First match by id, as the store does
        Ok(self
            .renters
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.phone == phone)
            .cloned())
    }

    async fn get(&self, id: i64) -> Result<Option<Renter>, RepoError> {
        Ok(self
            .renters
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }
}

#[async_trait]
impl TicketRepository for MemStore {
    async fn create(
        &self,
        renter_id: i64,
        amount: i64,
        payment_method: &str,
    ) -> Result<String, RepoError> {
        let mut tickets = self.tickets.lock().unwrap();
        let code = external_code(TICKET_PREFIX);
        let id = tickets.len() as i64 + 1;
        tickets.push(EntryTicket {
            id,
            renter_id,
            code: code.clone(),
            amount,
            payment_method: payment_method.to_string(),
            purchased_at: Utc::now(),
        });
        Ok(code)
    }

    async fn find_for_renter(&self, renter_id: i64) -> Result<Option<EntryTicket>, RepoError> {
        Ok(self
            .tickets
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.renter_id == renter_id)
            .cloned())
    }
}

#[async_trait]
impl BookingRepository for MemStore {
    async fn create(&self, booking: &NewBooking) -> Result<String, RepoError> {
        let mut bookings = self.bookings.lock().unwrap();
        let code = external_code(BOOKING_PREFIX);
        let id = bookings.len() as i64 + 1;
        bookings.push(Booking {
            id,
            renter_id: booking.renter_id,
            code: code.clone(),
            category_key: booking.category_key.clone(),
            vehicle_name: booking.vehicle_name.clone(),
            rental_descriptor: booking.rental_descriptor.clone(),
            price: booking.price,
            payment_method: booking.payment_method.clone(),
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
        });
        Ok(code)
    }

    async fn find_by_code(
        &self,
        code: &str,
        renter_id: i64,
    ) -> Result<Option<Booking>, RepoError> {
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .find(|b| b.code == code && b.renter_id == renter_id)
            .cloned())
    }
}

fn controller(store: &Arc<MemStore>) -> FlowController {
    FlowController::new(
        Arc::new(Catalog::standard()),
        store.clone(),
        store.clone(),
        store.clone(),
        150,
    )
}

fn sample_renter(phone: &str) -> NewRenter {
    NewRenter {
        full_name: "Asha Kamat".to_string(),
        phone: phone.to_string(),
        id_number: "4521 8876 9034".to_string(),
        license_number: "GA05 20210001234".to_string(),
        gender: "female".to_string(),
        address: "Panaji, Goa".to_string(),
        latitude: Some(15.4909),
        longitude: Some(73.8278),
    }
}

#[tokio::test]
async fn anonymous_draft_is_routed_to_identify() {
    let store = Arc::new(MemStore::default());
    let flow = controller(&store);
    let mut ctx = SessionContext::default();

    let err = flow
        .start_booking_draft(&mut ctx, "hatchbacks", "Maruti Swift", RentalSelection::TwentyFourHour)
        .await
        .unwrap_err();
    assert!(matches!(err, FlowError::Redirect(RequiredStep::Identify)));

    // Nothing reached the store
    assert!(store.bookings.lock().unwrap().is_empty());
    assert_eq!(ctx.state(), FlowState::Anonymous);

    let err = flow.current_renter(&ctx).await.unwrap_err();
    assert!(matches!(err, FlowError::Redirect(RequiredStep::Identify)));

    // Finishing goes through the same gate as everything else
    let err = flow.finish_booking(&mut ctx).unwrap_err();
    assert!(matches!(err, FlowError::Redirect(RequiredStep::Identify)));
}

#[tokio::test]
async fn register_then_identify_then_ticket() {
    let store = Arc::new(MemStore::default());
    let flow = controller(&store);
    let mut ctx = SessionContext::default();

    // Unknown number: registration required
    let outcome = flow.identify(&mut ctx, "9822012345").await.unwrap();
    assert_eq!(outcome, IdentifyOutcome::NeedsRegistration);
    assert_eq!(ctx.state(), FlowState::Anonymous);

    flow.register(&mut ctx, &sample_renter("9822012345"))
        .await
        .unwrap();
    assert_eq!(ctx.state(), FlowState::Identified);

    let renter = flow.current_renter(&ctx).await.unwrap().unwrap();
    assert_eq!(renter.full_name, "Asha Kamat");
    assert_eq!(renter.phone, "9822012345");

    // Re-identify resumes without a ticket
    let outcome = flow.identify(&mut ctx, "9822012345").await.unwrap();
    assert_eq!(outcome, IdentifyOutcome::Resumed { ticketed: false });
    assert_eq!(ctx.state(), FlowState::Identified);

    let code = flow.purchase_entry_ticket(&mut ctx, "upi").await.unwrap();
    assert!(code.starts_with("TKT-"));
    assert_eq!(ctx.state(), FlowState::Ticketed);

    let ticket = store.tickets.lock().unwrap()[0].clone();
    assert_eq!(ticket.amount, 150);
    assert_eq!(ticket.payment_method, "upi");

    // A fresh session with the same number resumes straight to Ticketed
    let mut ctx2 = SessionContext::default();
    let outcome = flow.identify(&mut ctx2, "9822012345").await.unwrap();
    assert_eq!(outcome, IdentifyOutcome::Resumed { ticketed: true });
    assert_eq!(ctx2.state(), FlowState::Ticketed);
}

#[tokio::test]
async fn register_rejects_blank_fields() {
    let store = Arc::new(MemStore::default());
    let flow = controller(&store);
    let mut ctx = SessionContext::default();

    let mut renter = sample_renter("9822012345");
    renter.full_name = "  ".to_string();
    let err = flow.register(&mut ctx, &renter).await.unwrap_err();
    assert!(matches!(err, FlowError::Validation(_)));
    assert!(store.renters.lock().unwrap().is_empty());
}

async fn ticketed_session(flow: &FlowController, phone: &str) -> SessionContext {
    let mut ctx = SessionContext::default();
    flow.register(&mut ctx, &sample_renter(phone)).await.unwrap();
    flow.purchase_entry_ticket(&mut ctx, "card").await.unwrap();
    ctx
}

#[tokio::test]
async fn draft_prices_hatchback_slab() {
    let store = Arc::new(MemStore::default());
    let flow = controller(&store);
    let mut ctx = ticketed_session(&flow, "9822012345").await;

    let draft = flow
        .start_booking_draft(&mut ctx, "hatchbacks", "Maruti Swift", RentalSelection::TwentyFourHour)
        .await
        .unwrap();
    assert_eq!(draft.price, 1300);
    assert_eq!(draft.rental_descriptor, "24 Hours");
    assert_eq!(ctx.state(), FlowState::DraftingBooking);
}

#[tokio::test]
async fn draft_prices_minibus_per_day() {
    let store = Arc::new(MemStore::default());
    let flow = controller(&store);
    let mut ctx = ticketed_session(&flow, "9822012345").await;

    let draft = flow
        .start_booking_draft(
            &mut ctx,
            "minibus",
            "Force Traveller 12-Seater",
            RentalSelection::Days(3),
        )
        .await
        .unwrap();
    assert_eq!(draft.price, 3300);
    assert_eq!(draft.rental_descriptor, "3 day(s)");
}

#[tokio::test]
async fn draft_rejects_bad_catalog_references() {
    let store = Arc::new(MemStore::default());
    let flow = controller(&store);
    let mut ctx = ticketed_session(&flow, "9822012345").await;

    let err = flow
        .start_booking_draft(&mut ctx, "helicopters", "Bell 407", RentalSelection::Days(1))
        .await
        .unwrap_err();
    assert!(matches!(err, FlowError::Catalog(_)));

    let err = flow
        .start_booking_draft(&mut ctx, "hatchbacks", "Honda City", RentalSelection::TwelveHour)
        .await
        .unwrap_err();
    assert!(matches!(err, FlowError::Catalog(_)));

    let err = flow
        .start_booking_draft(
            &mut ctx,
            "minibus",
            "Force Traveller 12-Seater",
            RentalSelection::Days(0),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, FlowError::Pricing(_)));

    // Failed drafts leave no draft behind
    assert_eq!(ctx.state(), FlowState::Ticketed);
}

#[tokio::test]
async fn commit_without_draft_is_routed_to_catalog() {
    let store = Arc::new(MemStore::default());
    let flow = controller(&store);
    let mut ctx = ticketed_session(&flow, "9822012345").await;

    let err = flow.commit_booking(&mut ctx, "upi").await.unwrap_err();
    assert!(matches!(
        err,
        FlowError::Redirect(RequiredStep::BrowseCatalog)
    ));
    assert!(store.bookings.lock().unwrap().is_empty());
}

#[tokio::test]
async fn commit_uses_the_frozen_draft_price() {
    let store = Arc::new(MemStore::default());
    let flow = controller(&store);
    let mut ctx = ticketed_session(&flow, "9822012345").await;

    flow.start_booking_draft(&mut ctx, "hatchbacks", "Maruti Swift", RentalSelection::TwentyFourHour)
        .await
        .unwrap();

    // Simulate a catalog price change landing between draft and commit:
    // whatever is in the draft is what gets persisted.
    ctx.draft.as_mut().unwrap().price = 999;

    flow.commit_booking(&mut ctx, "upi").await.unwrap();
    assert_eq!(store.bookings.lock().unwrap()[0].price, 999);
}

#[tokio::test]
async fn commit_confirm_finish_cycle() {
    let store = Arc::new(MemStore::default());
    let flow = controller(&store);
    let mut ctx = ticketed_session(&flow, "9822012345").await;

    let draft = flow
        .start_booking_draft(&mut ctx, "sedans", "Honda City", RentalSelection::TwelveHour)
        .await
        .unwrap();

    let code = flow.commit_booking(&mut ctx, "card").await.unwrap();
    assert!(code.starts_with("BKG-"));
    assert_eq!(ctx.state(), FlowState::Booked);

    let booking = flow.get_confirmation(&mut ctx).await.unwrap().unwrap();
    assert_eq!(booking.code, code);
    assert_eq!(booking.category_key, draft.category_key);
    assert_eq!(booking.vehicle_name, draft.vehicle_name);
    assert_eq!(booking.rental_descriptor, draft.rental_descriptor);
    assert_eq!(booking.price, draft.price);
    assert_eq!(booking.status, BookingStatus::Confirmed);

    flow.finish_booking(&mut ctx).unwrap();
    assert_eq!(ctx.state(), FlowState::Ticketed);

    // Repeat bookings are permitted after finishing
    flow.start_booking_draft(&mut ctx, "suvs", "Mahindra Thar", RentalSelection::TwentyFourHour)
        .await
        .unwrap();
    assert_eq!(ctx.state(), FlowState::DraftingBooking);

    flow.logout(&mut ctx);
    assert_eq!(ctx.state(), FlowState::Anonymous);
}

#[tokio::test]
async fn confirmation_is_scoped_to_the_owning_renter() {
    let store = Arc::new(MemStore::default());
    let flow = controller(&store);

    let mut ctx_a = ticketed_session(&flow, "9822012345").await;
    flow.start_booking_draft(&mut ctx_a, "bikes", "Yamaha FZ-S", RentalSelection::TwelveHour)
        .await
        .unwrap();
    let code = flow.commit_booking(&mut ctx_a, "cash").await.unwrap();

    // A second renter presenting the first renter's code
    let mut ctx_b = ticketed_session(&flow, "9822099999").await;
    ctx_b.draft = ctx_a.draft.clone();
    ctx_b.booking_code = Some(code);

    let confirmation = flow.get_confirmation(&mut ctx_b).await.unwrap();
    assert!(confirmation.is_none());
    // The stale code is dropped so the session falls back a step
    assert!(ctx_b.booking_code.is_none());

    // The owner still sees the booking
    let confirmation = flow.get_confirmation(&mut ctx_a).await.unwrap();
    assert!(confirmation.is_some());
}

#[tokio::test]
async fn second_ticket_purchase_is_routed_to_dashboard() {
    let store = Arc::new(MemStore::default());
    let flow = controller(&store);
    let mut ctx = ticketed_session(&flow, "9822012345").await;

    let err = flow.purchase_entry_ticket(&mut ctx, "upi").await.unwrap_err();
    assert!(matches!(err, FlowError::Redirect(RequiredStep::Dashboard)));
    assert_eq!(store.tickets.lock().unwrap().len(), 1);
}
