/// Per-element input values accepted by composition setters.
///
/// Callers may pass either one value for every element instance or a full
/// per-element array; scalars are broadcast to the element count when the
/// values are materialized.
///
/// `From` conversions let setters accept plain numbers and vectors:
///
/// ```
/// use poremix::phase::ElementValues;
///
/// let uniform: ElementValues = 0.21.into();
/// assert_eq!(uniform.materialize(3), vec![0.21, 0.21, 0.21]);
///
/// let each: ElementValues = vec![0.1, 0.2, 0.7].into();
/// assert_eq!(each.materialize(3), vec![0.1, 0.2, 0.7]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ElementValues {
    /// One value applied to every element instance.
    Uniform(f64),
    /// One value per element instance.
    PerElement(Vec<f64>),
}

impl ElementValues {
    /// Expands into a full-length array for `count` element instances.
    ///
    /// A per-element array is returned as-is; length checking against the
    /// network is the property store's concern.
    #[must_use]
    pub fn materialize(self, count: usize) -> Vec<f64> {
        match self {
            Self::Uniform(value) => vec![value; count],
            Self::PerElement(values) => values,
        }
    }

}

impl From<f64> for ElementValues {
    fn from(value: f64) -> Self {
        Self::Uniform(value)
    }
}

impl From<Vec<f64>> for ElementValues {
    fn from(values: Vec<f64>) -> Self {
        Self::PerElement(values)
    }
}

impl From<&[f64]> for ElementValues {
    fn from(values: &[f64]) -> Self {
        Self::PerElement(values.to_vec())
    }
}
