//! Uniformly distributed instants between two bounds.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use rand::Rng;

use super::bounds::{saturating_add, TickClock};
use crate::error::ExtensionError;

/// Pick an instant in `[from, to]`.
///
/// Computes `from + u * (to - from)` with `u` drawn from `[0, 1)` on the
/// supplied generator. Float rounding can land on `to` itself, so both bounds
/// are inclusive. The result keeps `from`'s offset.
///
/// # Errors
///
/// Returns `ExtensionError::InvalidRange` if `to` is earlier than `from`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use rand::{rngs::StdRng, SeedableRng};
/// use extkit_common::datetime::random_between;
///
/// let from = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let to = NaiveDate::from_ymd_opt(2020, 1, 31).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let mut rng = StdRng::seed_from_u64(7);
///
/// let picked = random_between(from, to, &mut rng).unwrap();
/// assert!(from <= picked && picked <= to);
/// ```
pub fn random_between<T, R>(from: T, to: T, rng: &mut R) -> Result<T, ExtensionError>
where
    T: RandomInstant,
    R: Rng + ?Sized,
{
    let span = to.utc_ticks() - from.utc_ticks();
    if span < 0 {
        return Err(ExtensionError::invalid_range(
            "random_between requires `to` to be on or after `from`",
        ));
    }
    if span == 0 {
        return Ok(from);
    }

    let fraction: f64 = rng.gen();
    let step = ((span as f64) * fraction) as i128;
    Ok(saturating_add(from, step.clamp(0, span)))
}

/// Instant types accepted by [`random_between`].
pub trait RandomInstant: TickClock {}

impl RandomInstant for NaiveDateTime {}
impl RandomInstant for DateTime<FixedOffset> {}
