use crate::MagnetizationSample;

#[derive(Debug, Clone, Default)]
pub struct MagnetizationSampleVec {
    pub mx: Vec<f64>,
    pub my: Vec<f64>,
    pub mz: Vec<f64>,
    pub t: Vec<f64>,
}

// Convert AoS to SoA

impl From<Vec<MagnetizationSample>> for MagnetizationSampleVec {
    fn from(value: Vec<MagnetizationSample>) -> Self {
        Self {
            mx: value.iter().map(|s| s.mx()).collect(),
            my: value.iter().map(|s| s.my()).collect(),
            mz: value.iter().map(|s| s.mz()).collect(),
            t: value.iter().map(|s| s.t).collect(),
        }
    }
}

impl FromIterator<MagnetizationSample> for MagnetizationSampleVec {
    fn from_iter<I: IntoIterator<Item = MagnetizationSample>>(iter: I) -> Self {
        iter.into_iter().collect::<Vec<_>>().into()
    }
}

impl MagnetizationSampleVec {
    pub fn len(&self) -> usize {
        let len1 = self.mx.len();
        let len2 = self.my.len();
        let len3 = self.mz.len();
        let len4 = self.t.len();
        assert!(len1 == len2 && len2 == len3 && len3 == len4);
        len1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
