//! Paper sizes used to size exported charts
//!
//! Dimensions are pixels at 96 DPI, covering the ISO A0-A6 series in both
//! orientations.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::template::TemplateError;

/// A named paper size with fixed pixel dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum PaperSize {
    A0Landscape,
    A0Portrait,
    A1Landscape,
    A1Portrait,
    A2Landscape,
    A2Portrait,
    A3Landscape,
    A3Portrait,
    A4Landscape,
    A4Portrait,
    A5Landscape,
    A5Portrait,
    A6Landscape,
    A6Portrait,
}

impl PaperSize {
    /// Every paper size, smallest first
    pub const ALL: [PaperSize; 14] = [
        PaperSize::A6Landscape,
        PaperSize::A6Portrait,
        PaperSize::A5Landscape,
        PaperSize::A5Portrait,
        PaperSize::A4Landscape,
        PaperSize::A4Portrait,
        PaperSize::A3Landscape,
        PaperSize::A3Portrait,
        PaperSize::A2Landscape,
        PaperSize::A2Portrait,
        PaperSize::A1Landscape,
        PaperSize::A1Portrait,
        PaperSize::A0Landscape,
        PaperSize::A0Portrait,
    ];

    /// The canonical name, e.g. `A4_LANDSCAPE`
    pub fn name(self) -> &'static str {
        match self {
            PaperSize::A0Landscape => "A0_LANDSCAPE",
            PaperSize::A0Portrait => "A0_PORTRAIT",
            PaperSize::A1Landscape => "A1_LANDSCAPE",
            PaperSize::A1Portrait => "A1_PORTRAIT",
            PaperSize::A2Landscape => "A2_LANDSCAPE",
            PaperSize::A2Portrait => "A2_PORTRAIT",
            PaperSize::A3Landscape => "A3_LANDSCAPE",
            PaperSize::A3Portrait => "A3_PORTRAIT",
            PaperSize::A4Landscape => "A4_LANDSCAPE",
            PaperSize::A4Portrait => "A4_PORTRAIT",
            PaperSize::A5Landscape => "A5_LANDSCAPE",
            PaperSize::A5Portrait => "A5_PORTRAIT",
            PaperSize::A6Landscape => "A6_LANDSCAPE",
            PaperSize::A6Portrait => "A6_PORTRAIT",
        }
    }

    /// Width and height in pixels
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            PaperSize::A6Landscape => (559, 397),
            PaperSize::A6Portrait => (397, 559),
            PaperSize::A5Landscape => (794, 560),
            PaperSize::A5Portrait => (560, 794),
            PaperSize::A4Landscape => (1123, 794),
            PaperSize::A4Portrait => (794, 1123),
            PaperSize::A3Landscape => (1587, 1123),
            PaperSize::A3Portrait => (1123, 1587),
            PaperSize::A2Landscape => (2245, 1587),
            PaperSize::A2Portrait => (1587, 2245),
            PaperSize::A1Landscape => (3175, 2245),
            PaperSize::A1Portrait => (2245, 3175),
            PaperSize::A0Landscape => (4494, 3175),
            PaperSize::A0Portrait => (3175, 4494),
        }
    }

    pub fn width(self) -> u32 {
        self.dimensions().0
    }

    pub fn height(self) -> u32 {
        self.dimensions().1
    }

    pub fn is_landscape(self) -> bool {
        let (w, h) = self.dimensions();
        w > h
    }

    /// All canonical names, in catalog order
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|p| p.name()).collect()
    }

    /// Look up a paper size by its canonical name
    pub fn lookup(name: &str) -> Result<Self, TemplateError> {
        Self::ALL
            .iter()
            .copied()
            .find(|p| p.name() == name)
            .ok_or_else(|| TemplateError::PaperSizeNotFound {
                name: name.to_string(),
                available: Self::names().into_iter().map(String::from).collect(),
            })
    }
}

impl FromStr for PaperSize {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::lookup(s)
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<PaperSize> for String {
    fn from(p: PaperSize) -> Self {
        p.name().to_string()
    }
}
