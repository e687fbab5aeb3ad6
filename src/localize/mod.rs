//! Dual-locale content model and the locale picker.
mod picker;
mod value;

pub use picker::{
    pick,
    pick_array,
    pick_json,
};
pub use value::{
    DualLocaleValue,
    LeafDetection,
    LocalizedLeaf,
};
