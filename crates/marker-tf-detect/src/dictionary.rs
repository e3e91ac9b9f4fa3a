//! Marker dictionary descriptors.

use serde::{Deserialize, Serialize};

/// Descriptor of a fixed square-bit marker dictionary.
///
/// The detection provider owns the actual codebook; the pipeline only needs
/// the family metadata to request the right dictionary and to validate
/// configuration against the known families.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionarySpec {
    /// OpenCV-style family name, e.g. `DICT_4X4_50`.
    pub name: String,
    /// Number of payload bits per marker side.
    pub marker_size: usize,
    /// Number of distinct ids in the dictionary.
    pub code_count: usize,
}

impl DictionarySpec {
    /// Total number of payload bits per marker.
    #[inline]
    pub fn bit_count(&self) -> usize {
        self.marker_size * self.marker_size
    }
}

/// Look up a dictionary of the standard 4x4 family by name.
pub fn builtin_dictionary(name: &str) -> Option<DictionarySpec> {
    let (marker_size, code_count) = match name {
        "DICT_4X4_50" => (4, 50),
        "DICT_4X4_100" => (4, 100),
        "DICT_4X4_250" => (4, 250),
        "DICT_4X4_1000" => (4, 1000),
        _ => return None,
    };
    Some(DictionarySpec {
        name: name.to_owned(),
        marker_size,
        code_count,
    })
}

/// The dictionary used by the deployed cell: 4x4 bits, 50 ids.
pub fn dict_4x4_50() -> DictionarySpec {
    DictionarySpec {
        name: "DICT_4X4_50".to_owned(),
        marker_size: 4,
        code_count: 50,
    }
}
