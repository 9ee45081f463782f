use std::rc::Rc;

use crate::phase::{ElementKind, Project, PropKey, PurePhase};

use super::Mixture;

pub(super) const NUM_PORES: usize = 8;
pub(super) const NUM_THROATS: usize = 11;

fn gas(project: &Rc<Project>, name: &str, molecular_weight: f64) {
    let mut phase = PurePhase::new(name, NUM_PORES, NUM_THROATS);
    phase
        .set(
            PropKey::new(ElementKind::Pore, "molecular_weight"),
            molecular_weight,
        )
        .unwrap();
    phase
        .set(
            PropKey::new(ElementKind::Throat, "molecular_weight"),
            molecular_weight,
        )
        .unwrap();
    project.register(phase);
}

/// An air-like four-gas mixture with all mole fractions still unset.
pub(super) fn air_fixture() -> (Rc<Project>, Mixture) {
    let project = Project::new();
    gas(&project, "pure_N2", 0.028);
    gas(&project, "pure_O2", 0.032);
    gas(&project, "pure_H2", 0.002);
    gas(&project, "pure_CO2", 0.044);

    let mut mixture = Mixture::new("air_mixture", &project, NUM_PORES, NUM_THROATS);
    for name in ["pure_N2", "pure_O2", "pure_H2", "pure_CO2"] {
        let phase = project.resolve(name).unwrap();
        mixture.add_component(phase.as_ref()).unwrap();
    }
    (project, mixture)
}

/// Gives the fixture a composition that sums to unity exactly:
/// N2 0.75, O2 0.25, H2 and CO2 zero.
pub(super) fn equilibrate_air(mixture: &mut Mixture) {
    let pore = ElementKind::Pore;
    mixture.set_mole_fraction(pore, "pure_N2", 0.75).unwrap();
    mixture.set_mole_fraction(pore, "pure_O2", 0.25).unwrap();
    mixture.set_mole_fraction(pore, "pure_H2", 0.0).unwrap();
    mixture.set_mole_fraction(pore, "pure_CO2", 0.0).unwrap();
}
