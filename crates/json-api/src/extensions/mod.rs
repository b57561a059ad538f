//! Extension traits

mod depot;
mod option;
mod result;

pub(crate) use depot::DepotExt as _;
pub(crate) use option::OptionExt as _;
pub(crate) use result::ResultExt as _;
