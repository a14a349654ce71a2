use crate::utils::error::{BepError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum::{Display, EnumIter, EnumMessage, EnumString};

/// Catalog values travel as their display label; parsing also accepts the
/// short aliases declared on each variant.
macro_rules! catalog_serde {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Serialize for $ty {
                fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                    serializer.collect_str(self)
                }
            }

            impl<'de> Deserialize<'de> for $ty {
                fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
                    let label = String::deserialize(deserializer)?;
                    label.trim().parse().map_err(|_| {
                        serde::de::Error::custom(format!(
                            "unknown {} '{}'",
                            stringify!($ty),
                            label
                        ))
                    })
                }
            }
        )+
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Display, EnumString, EnumIter, EnumMessage)]
#[strum(ascii_case_insensitive)]
pub enum ProjectType {
    #[default]
    #[strum(to_string = "Residential Complex", serialize = "residential")]
    ResidentialComplex,
    #[strum(to_string = "Commercial High-Rise", serialize = "commercial")]
    CommercialHighRise,
    #[strum(to_string = "Healthcare / Hospital", serialize = "healthcare")]
    Healthcare,
    #[strum(to_string = "Educational / University", serialize = "educational")]
    Educational,
    #[strum(to_string = "Infrastructure / Road & Rail", serialize = "infrastructure")]
    Infrastructure,
    #[strum(to_string = "Industrial / Manufacturing", serialize = "industrial")]
    Industrial,
    #[strum(to_string = "Data Center", serialize = "data-center")]
    DataCenter,
    #[strum(to_string = "Heritage / Restoration", serialize = "heritage")]
    Heritage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, EnumIter, EnumMessage)]
#[strum(ascii_case_insensitive)]
pub enum Discipline {
    #[strum(to_string = "Architecture", serialize = "architecture")]
    Architecture,
    #[strum(to_string = "Structure", serialize = "structure")]
    Structure,
    #[strum(to_string = "Mechanical (HVAC)", serialize = "mechanical", serialize = "hvac")]
    Mechanical,
    #[strum(to_string = "Electrical", serialize = "electrical")]
    Electrical,
    #[strum(to_string = "Plumbing (PHE)", serialize = "plumbing", serialize = "phe")]
    Plumbing,
    #[strum(to_string = "Fire Protection", serialize = "fire-protection")]
    FireProtection,
    #[strum(to_string = "Landscape", serialize = "landscape")]
    Landscape,
    #[strum(to_string = "Civil / Infrastructure", serialize = "civil")]
    Civil,
    #[strum(to_string = "Interior Design", serialize = "interior-design")]
    InteriorDesign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumString, EnumIter, EnumMessage)]
#[strum(ascii_case_insensitive)]
pub enum Software {
    #[strum(to_string = "Revit", serialize = "revit")]
    Revit,
    #[strum(to_string = "AutoCAD", serialize = "autocad")]
    AutoCad,
    #[strum(to_string = "Navisworks", serialize = "navisworks")]
    Navisworks,
    #[strum(to_string = "Civil 3D", serialize = "civil-3d")]
    Civil3d,
    #[strum(to_string = "Tekla Structures", serialize = "tekla")]
    TeklaStructures,
    #[strum(to_string = "ArchiCAD", serialize = "archicad")]
    ArchiCad,
    #[strum(to_string = "Solibri", serialize = "solibri")]
    Solibri,
    #[strum(to_string = "BIM 360 / ACC", serialize = "bim-360", serialize = "acc")]
    Bim360,
    #[strum(to_string = "Rhino + Grasshopper", serialize = "rhino", serialize = "grasshopper")]
    RhinoGrasshopper,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Display, EnumString, EnumIter, EnumMessage)]
#[strum(ascii_case_insensitive)]
pub enum Lod {
    #[strum(to_string = "LOD 100 - Conceptual", serialize = "lod-100", serialize = "100")]
    Lod100,
    #[strum(to_string = "LOD 200 - Approximate Geometry", serialize = "lod-200", serialize = "200")]
    Lod200,
    #[default]
    #[strum(to_string = "LOD 300 - Precise Geometry", serialize = "lod-300", serialize = "300")]
    Lod300,
    #[strum(
        to_string = "LOD 350 - Construction Documentation",
        serialize = "lod-350",
        serialize = "350"
    )]
    Lod350,
    #[strum(to_string = "LOD 400 - Fabrication", serialize = "lod-400", serialize = "400")]
    Lod400,
    #[strum(to_string = "LOD 500 - As-Built", serialize = "lod-500", serialize = "500")]
    Lod500,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Display, EnumString, EnumIter, EnumMessage)]
#[strum(ascii_case_insensitive)]
pub enum Standard {
    #[default]
    #[strum(to_string = "ISO 19650-1 & 2 (International)", serialize = "iso-19650")]
    Iso19650,
    #[strum(to_string = "UK BIM Framework", serialize = "uk-bim-framework", serialize = "uk")]
    UkBimFramework,
    #[strum(to_string = "US NBIMS", serialize = "us-nbims", serialize = "nbims")]
    UsNbims,
    #[strum(to_string = "Singapore BCA BIM Guide", serialize = "singapore-bca")]
    SingaporeBca,
    #[strum(to_string = "Australian BIM Strategic Framework", serialize = "australian-bim")]
    AustralianBim,
    #[strum(to_string = "Hong Kong CIC BIM Standards", serialize = "hong-kong-cic")]
    HongKongCic,
    #[strum(
        to_string = "Custom Employer Information Requirements (EIR)",
        serialize = "custom-eir",
        serialize = "eir"
    )]
    CustomEir,
}

catalog_serde!(ProjectType, Discipline, Software, Lod, Standard);

/// Short spellings accepted for a catalog value besides its display label.
pub fn catalog_aliases<T: EnumMessage + std::fmt::Display>(item: &T) -> Vec<&'static str> {
    let label = item.to_string();
    item.get_serializations()
        .iter()
        .copied()
        .filter(|alias| *alias != label)
        .collect()
}

/// Form input for the generation workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectData {
    pub project_name: String,
    pub project_type: ProjectType,
    pub disciplines: BTreeSet<Discipline>,
    pub software: BTreeSet<Software>,
    pub lod: Lod,
    pub standards: Standard,
    pub additional_notes: String,
}

impl ProjectData {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            ..Self::default()
        }
    }

    /// Adds the discipline if absent, removes it otherwise.
    pub fn toggle_discipline(&mut self, discipline: Discipline) {
        if !self.disciplines.remove(&discipline) {
            self.disciplines.insert(discipline);
        }
    }

    pub fn toggle_software(&mut self, software: Software) {
        if !self.software.remove(&software) {
            self.software.insert(software);
        }
    }
}

impl Validate for ProjectData {
    fn validate(&self) -> Result<()> {
        if self.project_name.trim().is_empty() {
            return Err(BepError::validation("project name cannot be empty"));
        }
        if self.disciplines.is_empty() {
            return Err(BepError::validation("select at least one discipline"));
        }
        Ok(())
    }
}

/// Input for the comparison workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRequest {
    pub text: String,
    pub standard: Standard,
}

impl ComparisonRequest {
    pub fn new(text: impl Into<String>, standard: Standard) -> Self {
        Self {
            text: text.into(),
            standard,
        }
    }
}

impl Validate for ComparisonRequest {
    fn validate(&self) -> Result<()> {
        if self.text.trim().is_empty() {
            return Err(BepError::validation("document text cannot be empty"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub analysis: String,
    pub score: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ComplianceBand {
    #[strum(to_string = "compliant")]
    Compliant,
    #[strum(to_string = "partially compliant")]
    Partial,
    #[strum(to_string = "non-compliant")]
    NonCompliant,
}

impl ComparisonResult {
    /// Display band for the score; the score itself is never adjusted.
    pub fn band(&self) -> ComplianceBand {
        if self.score >= 80 {
            ComplianceBand::Compliant
        } else if self.score >= 50 {
            ComplianceBand::Partial
        } else {
            ComplianceBand::NonCompliant
        }
    }
}
