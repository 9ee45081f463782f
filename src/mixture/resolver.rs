use std::collections::BTreeSet;

use crate::phase::{ElementKind, ElementValues, PropKey, StoreError};

use super::{Mixture, MixtureError};

/// Key resolution: direct, delegated, and interleaved lookups.
impl Mixture {
    /// Resolves a property key against the mixture.
    ///
    /// Lookup proceeds in three stages:
    ///
    /// 1. An array stored directly on the mixture is returned as-is.
    /// 2. A key qualified by a registered component's name is forwarded to
    ///    that component, stripped of the qualifier.
    /// 3. An unqualified key is computed by [`Mixture::interleave`].
    ///
    /// Takes `&mut self` because a derived read refreshes the aggregate
    /// mole fraction lazily before blending.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::KeyNotFound`] (wrapped) when no stage can
    /// serve the key, [`MixtureError::CompositionNotNormalized`] when a
    /// blend is requested of an unnormalized composition, and
    /// [`MixtureError::NotInProject`] when a registered component has
    /// vanished from the namespace.
    pub fn get(&mut self, key: &PropKey) -> Result<Vec<f64>, MixtureError> {
        if let Ok(values) = self.store.get(key) {
            return Ok(values.to_vec());
        }

        if let Some(name) = key.component_name() {
            if self.components.contains(name) {
                let component = self.project.resolve(name)?;
                return match component.get(&key.unqualified()) {
                    Ok(values) => Ok(values),
                    // Report the key as asked for, not the stripped form.
                    Err(StoreError::KeyNotFound(_)) => {
                        Err(StoreError::KeyNotFound(key.clone()).into())
                    }
                    Err(err) => Err(err.into()),
                };
            }
        }

        if key.qualifier().is_none() {
            match self.interleave(key.element(), key.property()) {
                Ok(values) => return Ok(values),
                // Interleaving is best-effort: a component missing the
                // property degrades to whatever the bare key lookup
                // yields.
                Err(MixtureError::MissingComponentProperty { .. }) => {}
                Err(err) => return Err(err),
            }
        }

        self.store
            .get(key)
            .map(<[f64]>::to_vec)
            .map_err(MixtureError::from)
    }

    /// Parses a dotted key and resolves it; see [`Mixture::get`].
    ///
    /// # Errors
    ///
    /// As [`Mixture::get`], plus [`MixtureError::InvalidKey`] for a
    /// malformed key string.
    pub fn get_dotted(&mut self, key: &str) -> Result<Vec<f64>, MixtureError> {
        let key: PropKey = key.parse()?;
        self.get(&key)
    }

    /// Stores an array on the mixture itself.
    ///
    /// A key that delegation would serve from a component must not be
    /// shadowed: if the qualifier names a registered component that
    /// carries the unqualified property, and the mixture has no direct
    /// override yet, the write is rejected.
    ///
    /// # Errors
    ///
    /// Returns [`MixtureError::AlreadyOwnedByComponent`] for a rejected
    /// shadow write, [`StoreError::LengthMismatch`] (wrapped) for an array
    /// of the wrong length.
    pub fn set(
        &mut self,
        key: PropKey,
        values: impl Into<ElementValues>,
    ) -> Result<(), MixtureError> {
        if !self.store.contains(&key) {
            if let Some(name) = key.component_name() {
                if self.components.contains(name) {
                    let component = self.project.resolve(name)?;
                    let unqualified = key.unqualified();
                    if component.props().contains(&unqualified) {
                        return Err(MixtureError::AlreadyOwnedByComponent { key });
                    }
                }
            }
        }
        let values = values.into().materialize(self.store.count(key.element()));
        self.store.set(key, values)?;
        Ok(())
    }

    /// Lists the property keys visible on the mixture, sorted.
    ///
    /// With `deep = false`, only directly stored keys are returned. With
    /// `deep = true`, every component's own properties are additionally
    /// listed, each qualified by the component's name.
    ///
    /// # Errors
    ///
    /// Returns [`MixtureError::NotInProject`] if a registered component
    /// has vanished from the namespace (deep listing only).
    pub fn props(&self, deep: bool) -> Result<BTreeSet<PropKey>, MixtureError> {
        let mut keys: BTreeSet<PropKey> = self.store.keys().cloned().collect();
        if deep {
            for (name, component) in self.components()? {
                for prop in component.props() {
                    keys.insert(prop.qualified_by(name.clone()));
                }
            }
        }
        Ok(keys)
    }

    /// Computes a derived property as a composition-weighted blend.
    ///
    /// The blend is the element-wise sum over all components of the
    /// component's property array times its mole fraction. The aggregate
    /// mole fraction must equal 1.0 in every element instance; if it does
    /// not, the aggregate is recomputed once and a persisting mismatch is
    /// a hard error, because a blend weighted by a non-unity composition
    /// is physically meaningless.
    ///
    /// # Errors
    ///
    /// Returns [`MixtureError::CompositionNotNormalized`] when the
    /// composition does not sum to unity,
    /// [`MixtureError::MissingComponentProperty`] when a component lacks
    /// the property or has no mole-fraction array for this element kind,
    /// [`StoreError::LengthMismatch`] (wrapped) when a component's array
    /// is sized for a different network, and
    /// [`MixtureError::NotInProject`] when a component has vanished from
    /// the namespace.
    pub fn interleave(
        &mut self,
        element: ElementKind,
        property: &str,
    ) -> Result<Vec<f64>, MixtureError> {
        let all = PropKey::mole_fraction_all(element);
        let normalized = |values: &[f64]| values.iter().all(|v| *v == 1.0);
        let needs_refresh = match self.store.get(&all) {
            Ok(values) => !normalized(values),
            Err(_) => true,
        };
        if needs_refresh {
            self.recompute_aggregate(element);
            if !normalized(self.store.get(&all)?) {
                return Err(MixtureError::CompositionNotNormalized { element });
            }
        }

        let mut blended = vec![0.0; self.store.count(element)];
        let prop_key = PropKey::new(element, property);
        for name in &self.components {
            let component = self.project.resolve(name)?;
            let values =
                component
                    .get(&prop_key)
                    .map_err(|_| MixtureError::MissingComponentProperty {
                        component: name.clone(),
                        key: prop_key.clone(),
                    })?;
            if values.len() != blended.len() {
                return Err(StoreError::LengthMismatch {
                    key: prop_key,
                    expected: blended.len(),
                    got: values.len(),
                }
                .into());
            }
            // A component with no stored mole fraction for this element
            // kind cannot be weighted, so the blend is as unavailable as
            // if the property itself were absent.
            let fractions = self
                .store
                .get(&PropKey::mole_fraction_of(element, name.as_str()))
                .map_err(|_| MixtureError::MissingComponentProperty {
                    component: name.clone(),
                    key: prop_key.clone(),
                })?;
            for ((b, v), x) in blended.iter_mut().zip(&values).zip(fractions) {
                *b += v * x;
            }
        }
        Ok(blended)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mixture::test_support::{air_fixture, equilibrate_air, NUM_PORES};
    use crate::phase::PurePhase;

    #[test]
    fn direct_keys_win_over_everything() {
        let (_, mut mix) = air_fixture();
        let key = PropKey::new(ElementKind::Pore, "temperature");
        mix.set(key.clone(), 353.0).unwrap();
        assert_eq!(mix.get(&key).unwrap(), vec![353.0; NUM_PORES]);
    }

    #[test]
    fn component_qualified_keys_delegate() {
        let (project, mut mix) = air_fixture();
        let on_mixture = PropKey::component(ElementKind::Pore, "molecular_weight", "pure_O2");
        let on_component = PropKey::new(ElementKind::Pore, "molecular_weight");

        let expected = project
            .resolve("pure_O2")
            .unwrap()
            .get(&on_component)
            .unwrap();
        assert_eq!(mix.get(&on_mixture).unwrap(), expected);
    }

    #[test]
    fn delegation_requires_a_registered_component() {
        let (_, mut mix) = air_fixture();
        let key = PropKey::component(ElementKind::Pore, "molecular_weight", "pure_He");
        assert!(matches!(
            mix.get(&key).unwrap_err(),
            MixtureError::Store(StoreError::KeyNotFound(_))
        ));
    }

    #[test]
    fn interleaved_reads_blend_by_mole_fraction() {
        let (_, mut mix) = air_fixture();
        equilibrate_air(&mut mix);

        let mw = mix
            .get(&PropKey::new(ElementKind::Pore, "molecular_weight"))
            .unwrap();
        // 0.75 * N2 + 0.25 * O2, H2 and CO2 at zero.
        let expected = 0.75 * 0.028 + 0.25 * 0.032;
        assert!(mw.iter().all(|v| (v - expected).abs() < 1e-12));
    }

    #[test]
    fn interleaving_rejects_unnormalized_composition() {
        let (_, mut mix) = air_fixture();
        mix.set_mole_fraction(ElementKind::Pore, "pure_N2", 0.9)
            .unwrap();
        mix.set_mole_fraction(ElementKind::Pore, "pure_O2", 0.0)
            .unwrap();
        mix.set_mole_fraction(ElementKind::Pore, "pure_H2", 0.0)
            .unwrap();
        mix.set_mole_fraction(ElementKind::Pore, "pure_CO2", 0.0)
            .unwrap();

        let err = mix
            .get(&PropKey::new(ElementKind::Pore, "molecular_weight"))
            .unwrap_err();
        assert_eq!(
            err,
            MixtureError::CompositionNotNormalized {
                element: ElementKind::Pore
            }
        );
    }

    #[test]
    fn missing_component_property_degrades_to_not_found() {
        let (_, mut mix) = air_fixture();
        equilibrate_air(&mut mix);

        // No component carries `pore.surface_tension`.
        let key = PropKey::new(ElementKind::Pore, "surface_tension");
        assert_eq!(
            mix.get(&key).unwrap_err(),
            MixtureError::Store(StoreError::KeyNotFound(key))
        );
    }

    #[test]
    fn partially_composed_throats_degrade_to_not_found() {
        let (_, mut mix) = air_fixture();
        // Only N2 gets a throat mole fraction; the aggregate still sums
        // to unity because the other components contribute no array.
        mix.set_mole_fraction(ElementKind::Throat, "pure_N2", 1.0)
            .unwrap();

        let key = PropKey::new(ElementKind::Throat, "molecular_weight");
        assert_eq!(
            mix.get(&key).unwrap_err(),
            MixtureError::Store(StoreError::KeyNotFound(key))
        );
    }

    #[test]
    fn mis_sized_component_arrays_are_rejected() {
        let (project, mut mix) = air_fixture();
        let mut stub = PurePhase::new("pure_He", 4, 0);
        stub.set(PropKey::new(ElementKind::Pore, "molecular_weight"), 0.004)
            .unwrap();
        let stub = project.register(stub);
        mix.add_component(stub.as_ref()).unwrap();

        equilibrate_air(&mut mix);
        mix.set_mole_fraction(ElementKind::Pore, "pure_He", 0.0)
            .unwrap();

        assert!(matches!(
            mix.get(&PropKey::new(ElementKind::Pore, "molecular_weight"))
                .unwrap_err(),
            MixtureError::Store(StoreError::LengthMismatch {
                expected: NUM_PORES,
                got: 4,
                ..
            })
        ));
    }

    #[test]
    fn component_owned_keys_cannot_be_shadowed() {
        let (_, mut mix) = air_fixture();
        let key = PropKey::component(ElementKind::Pore, "molecular_weight", "pure_N2");
        assert_eq!(
            mix.set(key.clone(), 0.044).unwrap_err(),
            MixtureError::AlreadyOwnedByComponent { key }
        );
    }

    #[test]
    fn mixture_local_component_keys_stay_writable() {
        let (_, mut mix) = air_fixture();
        // Concentration input is mixture-local: components do not carry it.
        let key = PropKey::concentration_of(ElementKind::Pore, "pure_N2");
        mix.set(key.clone(), 40.9).unwrap();
        assert_eq!(mix.get(&key).unwrap(), vec![40.9; NUM_PORES]);
    }

    #[test]
    fn deep_props_include_component_properties() {
        let (_, mut mix) = air_fixture();
        mix.set(PropKey::new(ElementKind::Pore, "temperature"), 293.0)
            .unwrap();

        let shallow = mix.props(false).unwrap();
        let deep = mix.props(true).unwrap();

        assert!(deep.len() > shallow.len());
        assert!(shallow.iter().all(|key| deep.contains(key)));
        assert!(deep.contains(&PropKey::component(
            ElementKind::Pore,
            "molecular_weight",
            "pure_CO2"
        )));
    }

    #[test]
    fn dotted_lookups_parse_and_resolve() {
        let (_, mut mix) = air_fixture();
        equilibrate_air(&mut mix);
        let direct = mix
            .get(&PropKey::component(
                ElementKind::Pore,
                "molecular_weight",
                "pure_N2",
            ))
            .unwrap();
        assert_eq!(mix.get_dotted("pore.molecular_weight.pure_N2").unwrap(), direct);
    }
}
