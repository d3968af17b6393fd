//! Album catalog: the read-only input the player is seeded from.
//!
//! A catalog is either loaded from a TOML file (`Catalog::load`) or built by
//! scanning a music directory (`scan`). Albums are addressed by slug through
//! `find_album_by_slug`.

mod load;
mod model;
mod scan;
mod slug;

pub use load::find_album_by_slug;
pub use model::*;
pub use scan::scan;

#[cfg(test)]
mod tests;
