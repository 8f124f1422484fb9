//! Dataset files: labels, collections and sector rings in TOML.
//!
//! ```toml
//! labels = ["A", "B", "C", "D"]
//!
//! [[collections]]
//! name = "first"
//! members = ["A", "C"]
//!
//! [[ring]]
//! inner_radius = 251
//! outer_radius = 260
//! properties = { A = "x", B = "x", C = "y", D = "y" }
//! ```
//!
//! When `labels` is omitted, the sorted union of all collection members is
//! used. A `[render]` table replaces the render options of the configuration.

use std::{collections::BTreeSet, path::Path};

use log::debug;
use serde::Deserialize;

use hypercoll::config::{RenderOptions, SectorSpec};

use crate::{config::read_file, error::CliError};

/// A named group of labels drawn as one patch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Collection {
    #[serde(default)]
    name: Option<String>,
    members: Vec<String>,
}

impl Collection {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }
}

impl AsRef<[String]> for Collection {
    fn as_ref(&self) -> &[String] {
        &self.members
    }
}

/// Input of one diagram.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Dataset {
    #[serde(default)]
    labels: Vec<String>,
    #[serde(default)]
    collections: Vec<Collection>,
    #[serde(default)]
    render: Option<RenderOptions>,
    #[serde(default, rename = "ring")]
    rings: Vec<SectorSpec>,
}

impl Dataset {
    /// Reads and parses a dataset file.
    ///
    /// # Errors
    ///
    /// Returns [`CliError::Io`] when the file cannot be read and
    /// [`CliError::Parse`] when it is not a valid dataset.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CliError> {
        let path = path.as_ref();
        let content = read_file(path)?;
        let dataset: Self =
            toml::from_str(&content).map_err(|err| CliError::parse(path, &content, &err))?;
        debug!(
            collections = dataset.collections.len(),
            rings = dataset.rings.len();
            "Dataset loaded"
        );
        Ok(dataset)
    }

    /// Labels in slot order.
    pub fn labels(&self) -> Vec<String> {
        if !self.labels.is_empty() {
            return self.labels.clone();
        }
        self.collections
            .iter()
            .flat_map(|c| c.members.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub fn render(&self) -> Option<&RenderOptions> {
        self.render.as_ref()
    }

    pub fn rings(&self) -> &[SectorSpec] {
        &self.rings
    }
}

impl std::str::FromStr for Dataset {
    type Err = toml::de::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s)
    }
}
