//! Output formats for parsed files

pub mod treeviz;

pub use self::treeviz::to_treeviz_str;
