use std::collections::BTreeMap;
use std::rc::Rc;

use crate::phase::{ElementKind, Phase, PropKey};

use super::{Mixture, MixtureError};

/// Component registry: which pure phases constitute the mixture.
impl Mixture {
    /// Adds a component to the mixture.
    ///
    /// Adding is idempotent: a component that is already registered is
    /// left untouched. A newly registered component has its pore mole
    /// fraction seeded unset (`NaN`) unless an array for it already
    /// exists.
    ///
    /// # Errors
    ///
    /// Returns [`MixtureError::NotInProject`] if the component is not
    /// registered in the project namespace.
    pub fn add_component(&mut self, component: &dyn Phase) -> Result<(), MixtureError> {
        let name = component.name();
        self.project.resolve(name)?;
        if self.components.insert(name.to_string()) {
            let key = PropKey::mole_fraction_of(ElementKind::Pore, name);
            if !self.store.contains(&key) {
                self.store.set_unset(key);
            }
        }
        Ok(())
    }

    /// Adds several components at once; see [`Mixture::add_component`].
    ///
    /// # Errors
    ///
    /// Fails on the first component not registered in the project;
    /// components before it remain added.
    pub fn add_components<'a>(
        &mut self,
        components: impl IntoIterator<Item = &'a dyn Phase>,
    ) -> Result<(), MixtureError> {
        for component in components {
            self.add_component(component)?;
        }
        Ok(())
    }

    /// Removes a component and every array stored for it.
    ///
    /// All keys qualified by the component's name are deleted from the
    /// mixture and the aggregate mole fraction is reset to unset, since
    /// the previous total no longer reflects the remaining components.
    ///
    /// # Errors
    ///
    /// Returns [`MixtureError::NotInMixture`] if the component is not
    /// currently registered.
    pub fn remove_component(&mut self, name: &str) -> Result<(), MixtureError> {
        if !self.components.remove(name) {
            return Err(MixtureError::NotInMixture {
                name: name.to_string(),
            });
        }
        let stale: Vec<PropKey> = self
            .store
            .keys()
            .filter(|key| key.component_name() == Some(name))
            .cloned()
            .collect();
        for key in stale {
            self.store.remove(&key);
        }
        for element in [ElementKind::Pore, ElementKind::Throat] {
            let all = PropKey::mole_fraction_all(element);
            if self.store.contains(&all) {
                self.store.set_unset(all);
            }
        }
        Ok(())
    }

    /// Removes several components at once; see [`Mixture::remove_component`].
    ///
    /// # Errors
    ///
    /// Fails on the first name not registered in the mixture; components
    /// before it remain removed.
    pub fn remove_components<'a>(
        &mut self,
        names: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), MixtureError> {
        for name in names {
            self.remove_component(name)?;
        }
        Ok(())
    }

    /// Returns the live component objects, keyed by name.
    ///
    /// Components are re-resolved through the project on every call, so a
    /// stale object is never returned.
    ///
    /// # Errors
    ///
    /// Returns [`MixtureError::NotInProject`] if a registered component
    /// has since been removed from the project.
    pub fn components(&self) -> Result<BTreeMap<String, Rc<dyn Phase>>, MixtureError> {
        self.components
            .iter()
            .map(|name| Ok((name.clone(), self.project.resolve(name)?)))
            .collect()
    }

    /// The names of the registered components, sorted.
    #[must_use]
    pub fn component_names(&self) -> Vec<&str> {
        self.components.iter().map(String::as_str).collect()
    }

    /// Reports whether a component with the given name is registered.
    #[must_use]
    pub fn contains_component(&self, name: &str) -> bool {
        self.components.contains(name)
    }

    /// Resolves a component that an operation is about to act on.
    ///
    /// Checks project membership before mixture membership, so a name
    /// unknown to the project reports [`MixtureError::NotInProject`] even
    /// when it is also absent from the mixture.
    pub(crate) fn require_member(&self, name: &str) -> Result<Rc<dyn Phase>, MixtureError> {
        let phase = self.project.resolve(name)?;
        if !self.components.contains(name) {
            return Err(MixtureError::NotInMixture {
                name: name.to_string(),
            });
        }
        Ok(phase)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mixture::test_support::{air_fixture, NUM_PORES};
    use crate::phase::{NotInProjectError, PurePhase};

    #[test]
    fn adding_is_deduplicated_by_name() {
        let (project, mut mix) = air_fixture();
        let n2 = project.resolve("pure_N2").unwrap();
        mix.add_component(n2.as_ref()).unwrap();
        assert_eq!(
            mix.component_names(),
            vec!["pure_CO2", "pure_H2", "pure_N2", "pure_O2"]
        );
    }

    #[test]
    fn adding_seeds_an_unset_mole_fraction() {
        let (_, mix) = air_fixture();
        let key = PropKey::mole_fraction_of(ElementKind::Pore, "pure_N2");
        let values = mix.store().get(&key).unwrap();
        assert_eq!(values.len(), NUM_PORES);
        assert!(values.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn unregistered_phases_cannot_be_added() {
        let (_project, mut mix) = air_fixture();
        let stranger = PurePhase::new("stranger", NUM_PORES, 0);
        let err = mix.add_component(&stranger).unwrap_err();
        assert_eq!(
            err,
            MixtureError::NotInProject(NotInProjectError("stranger".to_string()))
        );
    }

    #[test]
    fn removal_deletes_every_component_key() {
        let (_, mut mix) = air_fixture();
        mix.set_mole_fraction(ElementKind::Pore, "pure_N2", 0.5)
            .unwrap();
        mix.set_concentration(ElementKind::Pore, "pure_N2", 2.0)
            .unwrap();

        mix.remove_component("pure_N2").unwrap();

        assert!(!mix.contains_component("pure_N2"));
        assert!(
            mix.store()
                .keys()
                .all(|key| key.component_name() != Some("pure_N2"))
        );
        let all = mix
            .store()
            .get(&PropKey::mole_fraction_all(ElementKind::Pore))
            .unwrap();
        assert!(all.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn removing_an_unknown_component_fails() {
        let (_, mut mix) = air_fixture();
        assert_eq!(
            mix.remove_component("pure_He").unwrap_err(),
            MixtureError::NotInMixture {
                name: "pure_He".to_string()
            }
        );
    }

    #[test]
    fn components_resolve_live_objects() {
        let (project, mix) = air_fixture();
        let components = mix.components().unwrap();
        assert_eq!(components.len(), 4);
        assert_eq!(components["pure_O2"].name(), "pure_O2");

        // A component dropped from the project is reported, not returned
        // stale.
        project.deregister("pure_O2");
        assert!(matches!(
            mix.components().unwrap_err(),
            MixtureError::NotInProject(_)
        ));
    }
}
