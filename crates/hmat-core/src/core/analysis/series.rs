/// An ordered sequence of scores taken from one column of a score file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreSeries(Vec<f64>);

impl ScoreSeries {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }

    /// Smallest and largest value, or `None` for an empty series.
    pub fn bounds(&self) -> Option<(f64, f64)> {
        self.0.iter().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

impl From<Vec<f64>> for ScoreSeries {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl FromIterator<f64> for ScoreSeries {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl AsRef<[f64]> for ScoreSeries {
    fn as_ref(&self) -> &[f64] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a ScoreSeries {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_of_empty_series_is_none() {
        assert_eq!(ScoreSeries::default().bounds(), None);
    }

    #[test]
    fn bounds_track_min_and_max() {
        let series = ScoreSeries::from(vec![2.0, -1.5, 7.25, 0.0]);
        assert_eq!(series.bounds(), Some((-1.5, 7.25)));
    }
}
