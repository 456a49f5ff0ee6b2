use std::fmt;

/// Which histogram table a rank runs against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// 25-bucket grayscale intensity
    Intensity,
    /// 64-bucket quantized color code
    Color,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::Intensity, Metric::Color];

    /// Button label for this metric
    pub fn label(self) -> &'static str {
        match self {
            Metric::Intensity => "Sort by Intensity",
            Metric::Color => "Sort by Color Code",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Intensity => write!(f, "intensity"),
            Metric::Color => write!(f, "color code"),
        }
    }
}
