//! File assembly stages
//!
//! Post-parse passes that combine what the grammar produced: currently the
//! documentation attachment stage, which moves `{-| ... -}` comments from
//! the collected comment list onto the declaration that directly follows
//! them.

pub mod documentation;

pub use self::documentation::attach_documentation;
