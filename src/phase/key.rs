use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Property name under which composition mole fractions are stored.
pub(crate) const MOLE_FRACTION: &str = "mole_fraction";

/// Property name under which composition concentrations are stored.
pub(crate) const CONCENTRATION: &str = "concentration";

/// The kind of network element a per-element array is defined over.
///
/// Every stored array has exactly one value per element instance of its
/// kind, so an array's length is fixed by the network's pore or throat
/// count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementKind {
    Pore,
    Throat,
}

impl ElementKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Pore => "pore",
            Self::Throat => "throat",
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The optional trailing segment of a property key.
///
/// A qualifier scopes a property to the composition machinery: `All` marks
/// the aggregate over all components, while `Component` names the pure
/// phase a value belongs to.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Qualifier {
    /// The aggregate over all components (the literal segment `all`).
    All,
    /// A value belonging to the named component.
    Component(String),
}

impl Qualifier {
    /// Returns the component name, or `None` for [`Qualifier::All`].
    #[must_use]
    pub fn component(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::Component(name) => Some(name),
        }
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Component(name) => f.write_str(name),
        }
    }
}

/// A typed property key: `<element>.<property>[.<qualifier>]`.
///
/// Keys identify every per-element array a phase stores. The element
/// selects the array length, the property names the physical quantity
/// (e.g. `density`, `mole_fraction`), and the optional qualifier scopes
/// the value to a component or to the aggregate.
///
/// Keys order and compare by their dotted form, and convert to and from
/// it via [`Display`](fmt::Display) and [`FromStr`]:
///
/// ```
/// use poremix::phase::{ElementKind, PropKey};
///
/// let key: PropKey = "pore.mole_fraction.water".parse().unwrap();
/// assert_eq!(key.element(), ElementKind::Pore);
/// assert_eq!(key.property(), "mole_fraction");
/// assert_eq!(key.component_name(), Some("water"));
/// assert_eq!(key.to_string(), "pore.mole_fraction.water");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PropKey {
    element: ElementKind,
    property: String,
    qualifier: Option<Qualifier>,
}

impl PropKey {
    /// Creates an unqualified key for the given element and property.
    pub fn new(element: ElementKind, property: impl Into<String>) -> Self {
        Self {
            element,
            property: property.into(),
            qualifier: None,
        }
    }

    /// Creates a key qualified by a component name.
    pub fn component(
        element: ElementKind,
        property: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            element,
            property: property.into(),
            qualifier: Some(Qualifier::Component(name.into())),
        }
    }

    /// Creates a key for the aggregate over all components.
    pub fn aggregate(element: ElementKind, property: impl Into<String>) -> Self {
        Self {
            element,
            property: property.into(),
            qualifier: Some(Qualifier::All),
        }
    }

    /// The mole fraction key for one component.
    pub(crate) fn mole_fraction_of(element: ElementKind, name: impl Into<String>) -> Self {
        Self::component(element, MOLE_FRACTION, name)
    }

    /// The aggregate mole fraction key (`<element>.mole_fraction.all`).
    pub(crate) fn mole_fraction_all(element: ElementKind) -> Self {
        Self::aggregate(element, MOLE_FRACTION)
    }

    /// The concentration key for one component.
    pub(crate) fn concentration_of(element: ElementKind, name: impl Into<String>) -> Self {
        Self::component(element, CONCENTRATION, name)
    }

    #[must_use]
    pub fn element(&self) -> ElementKind {
        self.element
    }

    #[must_use]
    pub fn property(&self) -> &str {
        &self.property
    }

    #[must_use]
    pub fn qualifier(&self) -> Option<&Qualifier> {
        self.qualifier.as_ref()
    }

    /// Returns the component name from the qualifier, if there is one.
    #[must_use]
    pub fn component_name(&self) -> Option<&str> {
        self.qualifier.as_ref().and_then(Qualifier::component)
    }

    /// Returns the same key with the qualifier stripped.
    ///
    /// Delegated lookups use this to translate a component-qualified key on
    /// the mixture into the component's own key.
    #[must_use]
    pub fn unqualified(&self) -> Self {
        Self {
            element: self.element,
            property: self.property.clone(),
            qualifier: None,
        }
    }

    /// Returns the same key qualified by the given component name.
    #[must_use]
    pub fn qualified_by(&self, name: impl Into<String>) -> Self {
        Self {
            element: self.element,
            property: self.property.clone(),
            qualifier: Some(Qualifier::Component(name.into())),
        }
    }
}

impl fmt::Display for PropKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.element, self.property)?;
        if let Some(qualifier) = &self.qualifier {
            write!(f, ".{qualifier}")?;
        }
        Ok(())
    }
}

/// An error returned when parsing a dotted key string fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseKeyError {
    #[error("unknown element kind: {0:?} (expected `pore` or `throat`)")]
    UnknownElement(String),
    #[error("key {0:?} has no property segment")]
    MissingProperty(String),
    #[error("key {0:?} contains an empty segment")]
    EmptySegment(String),
}

impl FromStr for PropKey {
    type Err = ParseKeyError;

    /// Parses `<element>.<property>[.<qualifier>]`.
    ///
    /// The first segment is the element kind and, when three or more
    /// segments are present, the last is the qualifier; everything in
    /// between is the property name (which may itself contain dots).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<&str> = s.split('.').collect();
        if segments.iter().any(|seg| seg.is_empty()) {
            return Err(ParseKeyError::EmptySegment(s.to_string()));
        }

        let element = match segments[0] {
            "pore" => ElementKind::Pore,
            "throat" => ElementKind::Throat,
            other => return Err(ParseKeyError::UnknownElement(other.to_string())),
        };

        match segments.as_slice() {
            [] | [_] => Err(ParseKeyError::MissingProperty(s.to_string())),
            [_, property] => Ok(Self::new(element, *property)),
            [_, middle @ .., last] => {
                let qualifier = match *last {
                    "all" => Qualifier::All,
                    name => Qualifier::Component(name.to_string()),
                };
                Ok(Self {
                    element,
                    property: middle.join("."),
                    qualifier: Some(qualifier),
                })
            }
        }
    }
}
