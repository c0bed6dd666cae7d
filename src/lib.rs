//! smiley - Pidgin smiley theme builder
//!
//! A library for bundling pre-rendered emoji and flag images into a Pidgin
//! smiley theme: a folder of resized images plus a `theme` manifest mapping
//! each image to the emoji sequence it depicts.

pub mod cli;
pub mod encode;
pub mod error;
pub mod output;
pub mod resize;
pub mod scan;
pub mod theme;

pub use encode::{
    emoji_file_name, emoji_sequence, flag_sequence, is_country_code, regional_pair,
    sequence_to_string,
};
pub use error::{Result, ThemeError};
pub use resize::{resize_all, TARGET_WIDTH};
pub use scan::{emoji_images, flag_images, FlagEntry};
pub use theme::{apply_aliases, LinkMap, ThemeWriter, MANIFEST_NAME};
