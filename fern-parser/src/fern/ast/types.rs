//! Type annotation nodes

use serde::{Deserialize, Serialize};

use super::range::Ranged;
use super::QualifiedName;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeAnnotation {
    /// A type variable, e.g. `a`.
    Generic(String),
    /// A (possibly qualified) named type applied to zero or more arguments,
    /// e.g. `Dict.Dict comparable v`.
    Typed {
        name: Ranged<QualifiedName>,
        args: Vec<Ranged<TypeAnnotation>>,
    },
    /// `()`
    Unit,
    Tupled(Vec<Ranged<TypeAnnotation>>),
    /// `from -> to`; nested arrows associate to the right.
    Function(Box<Ranged<TypeAnnotation>>, Box<Ranged<TypeAnnotation>>),
    /// `{ name : String, age : Int }`
    Record(Vec<RecordField>),
    /// `{ base | name : String }`
    GenericRecord {
        name: Ranged<String>,
        fields: Vec<RecordField>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordField {
    pub name: Ranged<String>,
    pub annotation: Ranged<TypeAnnotation>,
}
