use uom::si::{
    f64::{MolarConcentration, Ratio},
    molar_concentration::mole_per_cubic_meter,
    ratio::ratio,
};

use crate::phase::{ElementKind, ElementValues, PropKey, is_unset};
use crate::support::constraint::{Constraint, NonNegative, UnitInterval};

use super::{Advisory, Mixture, MixtureError};

/// Composition reconciliation: mole fractions, concentrations, and the
/// aggregate.
impl Mixture {
    /// Specifies the mole fraction of one component in each element.
    ///
    /// A scalar is broadcast to every element instance. Other components'
    /// mole fractions and all concentrations are left untouched; by
    /// contrast, [`Mixture::set_concentration`] resets every mole
    /// fraction. Values outside `[0, 1]` are accepted but reported as an
    /// [`Advisory`]. The aggregate mole fraction is recomputed afterward.
    ///
    /// # Errors
    ///
    /// Returns [`MixtureError::NotInProject`] / [`MixtureError::NotInMixture`]
    /// for an unknown component, or a wrapped
    /// [`StoreError::LengthMismatch`](crate::phase::StoreError::LengthMismatch)
    /// for an array of the wrong length.
    pub fn set_mole_fraction(
        &mut self,
        element: ElementKind,
        component: &str,
        values: impl Into<ElementValues>,
    ) -> Result<(), MixtureError> {
        self.require_member(component)?;
        let values = values.into().materialize(self.store.count(element));

        let out_of_range = values
            .iter()
            .filter(|v| !v.is_nan() && UnitInterval::check(*v).is_err())
            .count();
        if out_of_range > 0 {
            self.advise(Advisory::MoleFractionOutOfRange {
                component: component.to_string(),
                element,
                count: out_of_range,
            });
        }

        self.store
            .set(PropKey::mole_fraction_of(element, component), values)?;
        self.recompute_aggregate(element);
        Ok(())
    }

    /// Specifies the concentration of one component in each element.
    ///
    /// A scalar is broadcast to every element instance. Once a
    /// concentration is set it is authoritative: every component's mole
    /// fraction for this element kind is reset to unset so stale values
    /// cannot linger, and a reconciliation call derives fresh ones.
    /// Negative concentrations are accepted but reported as an
    /// [`Advisory`].
    ///
    /// # Errors
    ///
    /// Returns [`MixtureError::NotInProject`] / [`MixtureError::NotInMixture`]
    /// for an unknown component, or a wrapped
    /// [`StoreError::LengthMismatch`](crate::phase::StoreError::LengthMismatch)
    /// for an array of the wrong length.
    pub fn set_concentration(
        &mut self,
        element: ElementKind,
        component: &str,
        values: impl Into<ElementValues>,
    ) -> Result<(), MixtureError> {
        self.require_member(component)?;
        let values = values.into().materialize(self.store.count(element));

        let negative = values
            .iter()
            .filter(|v| !v.is_nan() && NonNegative::check(*v).is_err())
            .count();
        if negative > 0 {
            self.advise(Advisory::NegativeConcentration {
                component: component.to_string(),
                element,
                count: negative,
            });
        }

        self.store
            .set(PropKey::concentration_of(element, component), values)?;
        for name in &self.components {
            self.store
                .set_unset(PropKey::mole_fraction_of(element, name.as_str()));
        }
        Ok(())
    }

    /// Sets a uniform mole fraction from a dimensionless ratio.
    ///
    /// Convenience wrapper over [`Mixture::set_mole_fraction`] for callers
    /// working in SI quantities.
    ///
    /// # Errors
    ///
    /// As [`Mixture::set_mole_fraction`].
    pub fn set_uniform_mole_fraction(
        &mut self,
        element: ElementKind,
        component: &str,
        fraction: Ratio,
    ) -> Result<(), MixtureError> {
        self.set_mole_fraction(element, component, fraction.get::<ratio>())
    }

    /// Sets a uniform concentration from an SI molar concentration.
    ///
    /// Convenience wrapper over [`Mixture::set_concentration`]; the value
    /// is stored in `mol/m³`.
    ///
    /// # Errors
    ///
    /// As [`Mixture::set_concentration`].
    pub fn set_uniform_concentration(
        &mut self,
        element: ElementKind,
        component: &str,
        concentration: MolarConcentration,
    ) -> Result<(), MixtureError> {
        self.set_concentration(
            element,
            component,
            concentration.get::<mole_per_cubic_meter>(),
        )
    }

    /// Adjusts mole fractions so the composition sums to unity, solving
    /// for a single free component when possible.
    ///
    /// If `released` names a component, its mole fraction is marked unset
    /// first. When exactly one component is then unset, its mole fraction
    /// is back-solved as one minus the sum of the others. Otherwise every
    /// mole fraction is derived from the stored concentrations instead,
    /// as in [`Mixture::update_from_concentrations`]. The aggregate is
    /// recomputed afterward in either case.
    ///
    /// # Errors
    ///
    /// Returns [`MixtureError::NotInProject`] / [`MixtureError::NotInMixture`]
    /// for an unknown released component, and
    /// [`MixtureError::InsufficientConcentrationData`] when the
    /// concentration fallback needs a concentration that was never set.
    pub fn update_from_free_component(
        &mut self,
        element: ElementKind,
        released: Option<&str>,
    ) -> Result<(), MixtureError> {
        if let Some(name) = released {
            self.require_member(name)?;
            self.store
                .set_unset(PropKey::mole_fraction_of(element, name));
        }

        let unset: Vec<String> = self
            .components
            .iter()
            .filter(|name| {
                match self.store.get(&PropKey::mole_fraction_of(element, name.as_str())) {
                    Ok(values) => is_unset(values),
                    Err(_) => true,
                }
            })
            .cloned()
            .collect();

        if let [free] = unset.as_slice() {
            let mut solved = vec![1.0; self.store.count(element)];
            for name in &self.components {
                if name == free {
                    continue;
                }
                let fractions = self.store.get(&PropKey::mole_fraction_of(element, name.as_str()))?;
                for (s, x) in solved.iter_mut().zip(fractions) {
                    *s -= x;
                }
            }
            self.store
                .set(PropKey::mole_fraction_of(element, free.as_str()), solved)?;
        } else {
            // Zero or several components free: composition is only
            // recoverable from concentrations.
            self.normalize_concentrations(element)?;
        }

        self.recompute_aggregate(element);
        Ok(())
    }

    /// Derives every mole fraction from the stored concentrations.
    ///
    /// The total molar density is the element-wise sum of all component
    /// concentrations, and each mole fraction is the component's
    /// concentration divided by that total. The aggregate is recomputed
    /// afterward.
    ///
    /// # Errors
    ///
    /// Returns [`MixtureError::InsufficientConcentrationData`] if any
    /// registered component has no stored concentration array.
    pub fn update_from_concentrations(
        &mut self,
        element: ElementKind,
    ) -> Result<(), MixtureError> {
        self.normalize_concentrations(element)?;
        self.recompute_aggregate(element);
        Ok(())
    }

    /// Recomputes the aggregate mole fraction for one element kind.
    ///
    /// The aggregate is the element-wise sum over all registered
    /// components' mole-fraction arrays; components without an array
    /// contribute nothing, so with no contributions the aggregate is
    /// zero everywhere.
    pub fn recompute_aggregate(&mut self, element: ElementKind) {
        let mut total = vec![0.0; self.store.count(element)];
        for name in &self.components {
            if let Ok(fractions) = self.store.get(&PropKey::mole_fraction_of(element, name.as_str())) {
                for (t, x) in total.iter_mut().zip(fractions) {
                    *t += x;
                }
            }
        }
        self.store
            .insert_sized(PropKey::mole_fraction_all(element), total);
    }

    fn normalize_concentrations(&mut self, element: ElementKind) -> Result<(), MixtureError> {
        let mut total = vec![0.0; self.store.count(element)];
        let mut concentrations: Vec<(String, Vec<f64>)> = Vec::new();
        for name in &self.components {
            let values = self
                .store
                .get(&PropKey::concentration_of(element, name.as_str()))
                .map_err(|_| MixtureError::InsufficientConcentrationData {
                    component: name.clone(),
                })?
                .to_vec();
            for (t, c) in total.iter_mut().zip(&values) {
                *t += c;
            }
            concentrations.push((name.clone(), values));
        }
        for (name, values) in concentrations {
            let fractions: Vec<f64> = values.iter().zip(&total).map(|(c, t)| c / t).collect();
            self.store
                .set(PropKey::mole_fraction_of(element, name), fractions)?;
        }
        Ok(())
    }
}
