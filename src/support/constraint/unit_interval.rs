use std::cmp::Ordering;

use uom::si::{f64::Ratio, ratio::ratio};

use super::{Constrained, Constraint, ConstraintError};

/// Supplies 0 and 1 for types used in the closed unit interval [0, 1].
///
/// Implement this trait for your type `T` if you want to use it with
/// `Constrained<T, UnitInterval>`. Implementations should ensure that
/// `zero() ≤ one()` under the type's `PartialOrd` so the interval is
/// well-formed.
pub trait UnitBounds: PartialOrd {
    fn zero() -> Self;
    fn one() -> Self;
}

impl UnitBounds for f64 {
    fn zero() -> Self {
        0.0
    }
    fn one() -> Self {
        1.0
    }
}

impl UnitBounds for Ratio {
    fn zero() -> Self {
        Ratio::new::<ratio>(0.0)
    }
    fn one() -> Self {
        Ratio::new::<ratio>(1.0)
    }
}

/// Marker type enforcing that a value lies in the closed unit interval:
/// `0 ≤ x ≤ 1`.
///
/// A mole fraction is only physically meaningful inside this interval;
/// the mixture core checks incoming mole fractions against this marker
/// and reports violations as advisories.
///
/// # Examples
///
/// ```
/// use poremix::support::constraint::UnitInterval;
///
/// let x = UnitInterval::new(0.209).unwrap();
/// assert_eq!(x.into_inner(), 0.209);
///
/// assert!(UnitInterval::new(-0.0001).is_err());
/// assert!(UnitInterval::new(1.0001).is_err());
/// assert!(UnitInterval::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnitInterval;

impl UnitInterval {
    /// Constructs `Constrained<T, UnitInterval>` if 0 ≤ value ≤ 1.
    ///
    /// # Errors
    ///
    /// Fails if the value is outside the closed unit interval:
    ///
    /// - [`ConstraintError::BelowMinimum`] if less than zero.
    /// - [`ConstraintError::AboveMaximum`] if greater than one.
    /// - [`ConstraintError::NotANumber`] if comparison is undefined
    ///   (e.g., NaN).
    pub fn new<T: UnitBounds>(value: T) -> Result<Constrained<T, UnitInterval>, ConstraintError> {
        Constrained::<T, UnitInterval>::new(value)
    }
}

impl<T: UnitBounds> Constraint<T> for UnitInterval {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match (value.partial_cmp(&T::zero()), value.partial_cmp(&T::one())) {
            (None, _) | (_, None) => Err(ConstraintError::NotANumber),
            (Some(Ordering::Less), _) => Err(ConstraintError::BelowMinimum),
            (_, Some(Ordering::Greater)) => Err(ConstraintError::AboveMaximum),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::ratio::percent;

    #[test]
    fn accepts_the_closed_interval() {
        assert!(UnitInterval::new(0.0).is_ok());
        assert!(UnitInterval::new(0.5).is_ok());
        assert!(UnitInterval::new(1.0).is_ok());
    }

    #[test]
    fn rejects_values_outside_the_interval() {
        assert_eq!(
            UnitInterval::new(-0.1).unwrap_err(),
            ConstraintError::BelowMinimum
        );
        assert_eq!(
            UnitInterval::new(1.1).unwrap_err(),
            ConstraintError::AboveMaximum
        );
        assert_eq!(
            UnitInterval::new(f64::NAN).unwrap_err(),
            ConstraintError::NotANumber
        );
    }

    #[test]
    fn ratios() {
        let r = Ratio::new::<percent>(42.0);
        assert_eq!(UnitInterval::new(r).unwrap().as_ref(), &r);
        assert!(UnitInterval::new(Ratio::new::<percent>(120.0)).is_err());
    }
}
