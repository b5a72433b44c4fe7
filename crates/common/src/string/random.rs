use rand::Rng;

const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// A string of `length` characters drawn uniformly from `[0-9a-z]`.
///
/// ```
/// use rand::{rngs::StdRng, SeedableRng};
/// use extkit_common::string::generate_random_string;
///
/// let mut rng = StdRng::seed_from_u64(1);
/// let token = generate_random_string(12, &mut rng);
/// assert_eq!(token.len(), 12);
/// ```
pub fn generate_random_string<R: Rng + ?Sized>(length: usize, rng: &mut R) -> String {
    (0..length)
        .map(|_| char::from(ALPHABET[rng.gen_range(0..ALPHABET.len())]))
        .collect()
}
