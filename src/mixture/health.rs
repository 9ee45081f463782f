use std::fmt;

use crate::phase::{ElementKind, PropKey};

use super::Mixture;

/// The result of a composition audit.
///
/// Lists the pore indices whose aggregate mole fraction falls short of or
/// exceeds unity. A healthy mixture has both lists empty. Unset (`NaN`)
/// aggregates are neither low nor high; they simply have no composition
/// yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MixtureHealth {
    /// Pore indices where the mole fractions sum to less than 1.0.
    pub too_low: Vec<usize>,
    /// Pore indices where the mole fractions sum to more than 1.0.
    pub too_high: Vec<usize>,
}

impl MixtureHealth {
    /// Reports whether the composition sums to unity everywhere it is set.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.too_low.is_empty() && self.too_high.is_empty()
    }
}

impl fmt::Display for MixtureHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_healthy() {
            f.write_str("composition sums to unity in all pores")
        } else {
            write!(
                f,
                "mole fraction too low in {} pores, too high in {} pores",
                self.too_low.len(),
                self.too_high.len()
            )
        }
    }
}

impl Mixture {
    /// Audits the mixture's composition.
    ///
    /// Recomputes the aggregate pore mole fraction and reports every pore
    /// where it differs from unity. Purely diagnostic: this never fails
    /// and changes nothing except the refreshed aggregate.
    pub fn check_health(&mut self) -> MixtureHealth {
        self.recompute_aggregate(ElementKind::Pore);
        let mut health = MixtureHealth::default();
        if let Ok(all) = self.store.get(&PropKey::mole_fraction_all(ElementKind::Pore)) {
            for (i, total) in all.iter().enumerate() {
                if *total < 1.0 {
                    health.too_low.push(i);
                } else if *total > 1.0 {
                    health.too_high.push(i);
                }
            }
        }
        health
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mixture::test_support::{air_fixture, equilibrate_air, NUM_PORES};

    const PORE: ElementKind = ElementKind::Pore;

    #[test]
    fn balanced_compositions_are_healthy() {
        let (_, mut mix) = air_fixture();
        equilibrate_air(&mut mix);
        let health = mix.check_health();
        assert!(health.is_healthy());
        assert_eq!(health, MixtureHealth::default());
    }

    #[test]
    fn over_specified_compositions_report_every_pore() {
        let (_, mut mix) = air_fixture();
        for name in ["pure_N2", "pure_O2"] {
            mix.set_mole_fraction(PORE, name, 0.6).unwrap();
        }
        for name in ["pure_H2", "pure_CO2"] {
            mix.set_mole_fraction(PORE, name, 0.0).unwrap();
        }

        let health = mix.check_health();
        assert!(health.too_low.is_empty());
        assert_eq!(health.too_high, (0..NUM_PORES).collect::<Vec<_>>());
    }

    #[test]
    fn under_specified_compositions_report_every_pore() {
        let (_, mut mix) = air_fixture();
        for name in ["pure_N2", "pure_O2", "pure_H2", "pure_CO2"] {
            mix.set_mole_fraction(PORE, name, 0.125).unwrap();
        }

        let health = mix.check_health();
        assert_eq!(health.too_low, (0..NUM_PORES).collect::<Vec<_>>());
        assert!(health.too_high.is_empty());
    }

    #[test]
    fn unset_compositions_are_not_flagged() {
        let (_, mut mix) = air_fixture();
        // All mole fractions are still NaN, so the aggregate is NaN and
        // neither list fills up.
        assert!(mix.check_health().is_healthy());
    }
}
