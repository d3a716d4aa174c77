pub mod controller;
pub mod session;
pub mod transitions;

pub use controller::{FlowController, FlowError, IdentifyOutcome};
pub use session::{BookingDraft, FlowState, SessionContext};
pub use transitions::{gate, Gate, Operation, RequiredStep};
