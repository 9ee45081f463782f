use std::cmp::Ordering;

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is non-negative (zero or greater).
///
/// The mixture core checks concentrations against this marker; a
/// concentration can never be physically negative, but a violation is
/// downgraded to an advisory rather than an error during incremental
/// setup.
///
/// # Examples
///
/// ```
/// use poremix::support::constraint::NonNegative;
///
/// let c = NonNegative::new(55.5).unwrap();
/// assert_eq!(c.into_inner(), 55.5);
///
/// assert!(NonNegative::new(-7.0).is_err());
/// assert!(NonNegative::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct NonNegative;

impl NonNegative {
    /// Constructs a [`Constrained<T, NonNegative>`] if the value is
    /// non-negative.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is negative or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, NonNegative>, ConstraintError> {
        Constrained::<T, NonNegative>::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for NonNegative {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater | Ordering::Equal) => Ok(()),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{f64::MolarConcentration, molar_concentration::mole_per_cubic_meter};

    #[test]
    fn floats() {
        assert!(Constrained::<f64, NonNegative>::new(2.0).is_ok());
        assert!(NonNegative::new(0.0).is_ok());
        assert!(NonNegative::new(-2.0).is_err());
        assert!(NonNegative::new(f64::NAN).is_err());
    }

    #[test]
    fn molar_concentrations() {
        let c = MolarConcentration::new::<mole_per_cubic_meter>(40.9);
        assert!(NonNegative::new(c).is_ok());

        let c = MolarConcentration::new::<mole_per_cubic_meter>(-1.0);
        assert!(NonNegative::new(c).is_err());
    }
}
