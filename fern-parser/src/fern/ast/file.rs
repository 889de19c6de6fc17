//! The parsed file node

use serde::{Deserialize, Serialize};

use super::declaration::Declaration;
use super::module::{Import, ModuleHeader};
use super::range::Ranged;

/// A completely parsed source file: header, imports, declarations, and the
/// comments collected while skipping whitespace.
///
/// Documentation comments that were attached to a declaration by the
/// assembling stage are removed from `comments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct File {
    pub module: Ranged<ModuleHeader>,
    pub imports: Vec<Ranged<Import>>,
    pub declarations: Vec<Ranged<Declaration>>,
    pub comments: Vec<Ranged<String>>,
}

impl File {
    /// Find a named declaration.
    pub fn declaration(&self, name: &str) -> Option<&Ranged<Declaration>> {
        self.declarations
            .iter()
            .find(|declaration| declaration.value.name() == Some(name))
    }

    /// All documentation comments attached to declarations, in source order.
    pub fn documentation(&self) -> Vec<&Ranged<String>> {
        self.declarations
            .iter()
            .filter_map(|declaration| match &declaration.value {
                Declaration::Function(definition) => definition.documentation.as_ref(),
                Declaration::TypeAlias(alias) => alias.documentation.as_ref(),
                Declaration::CustomType(custom) => custom.documentation.as_ref(),
                Declaration::Port(port) => port.documentation.as_ref(),
                Declaration::Infix(_) | Declaration::Destructuring { .. } => None,
            })
            .collect()
    }
}
