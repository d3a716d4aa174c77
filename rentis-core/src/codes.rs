use rand::Rng;

/// Alphabet for external codes: uppercase alphanumerics minus the
/// ambiguous 0/O/1/I. 32 symbols, 8 positions, ~1.1e12 combinations;
/// collisions are negligible at this scale and are not checked against
/// existing rows (the store's UNIQUE column backstops the assumption).
const CODE_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const CODE_LEN: usize = 8;

pub const TICKET_PREFIX: &str = "TKT";
pub const BOOKING_PREFIX: &str = "BKG";

/// Generate a short human-shareable code, e.g. `BKG-7XKQ2MNE`. Distinct
/// from the internal row id.
pub fn external_code(prefix: &str) -> String {
    let mut rng = rand::thread_rng();
    let body: String = (0..CODE_LEN)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect();
    format!("{}-{}", prefix, body)
}
