//! Data models for the media gallery.
//!
//! Field names serialize in camelCase so the browser client can consume them unchanged.

mod category;
mod gallery;
mod image;
mod tag;

pub use category::*;
pub use gallery::*;
pub use image::*;
pub use tag::*;

use serde::{Deserialize, Deserializer};

/// Patch field that tells an absent key (`None`) from an explicit `null` (`Some(None)`).
///
/// Pair with `#[serde(default)]` so a missing key never reaches the deserializer.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Drop repeated ids while keeping the first occurrence of each.
pub(crate) fn dedup_ids(ids: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(&id) {
            out.push(id);
        }
    }
    out
}
