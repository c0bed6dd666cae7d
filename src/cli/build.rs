//! Build command implementation.
//!
//! Runs the whole pipeline: scan both source directories, derive codepoint
//! sequences, copy images into a fresh theme directory while writing the
//! manifest, fold symlinked flags onto their targets as aliases, then
//! resize everything in place.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::encode;
use crate::error::{Result, ThemeError};
use crate::output::{display_path, plural, Printer};
use crate::resize;
use crate::scan;
use crate::theme::{self, LinkMap, ThemeWriter, MANIFEST_NAME};

/// Build a smiley theme bundle from emoji and flag images
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Directory of pre-rendered emoji images (emoji_u<hex>.png)
    #[arg(long = "emoji", default_value = "png/128")]
    pub emoji_dir: PathBuf,

    /// Directory of flag images (XX.png country codes, subdivisions, symlinks)
    #[arg(long = "flags", default_value = "third_party/region-flags/png")]
    pub flag_dir: PathBuf,

    /// Theme directory to create (must not exist yet)
    #[arg(long, short, default_value = "noto-emoji")]
    pub output: PathBuf,

    /// Width images are downsampled to, in pixels
    #[arg(long, default_value_t = resize::TARGET_WIDTH)]
    pub width: u32,
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    // The destination must not exist: a re-run never silently overwrites a
    // previous bundle. Checked before anything else is touched.
    fs::create_dir(&args.output).map_err(|e| {
        if e.kind() == io::ErrorKind::AlreadyExists {
            ThemeError::Build {
                message: format!("{} already exists", display_path(&args.output)),
                help: Some("remove the theme directory before rebuilding".to_string()),
            }
        } else {
            ThemeError::Io {
                path: args.output.clone(),
                message: format!("failed to create theme directory: {e}"),
            }
        }
    })?;

    printer.status("Scanning", &display_path(&args.emoji_dir));
    let emoji = scan::emoji_images(&args.emoji_dir)?;
    printer.status("Scanning", &display_path(&args.flag_dir));
    let flags = scan::flag_images(&args.flag_dir)?;

    let mut manifest = ThemeWriter::create(&args.output)?;
    let mut links = LinkMap::default();
    let mut copied = 0;

    for name in &emoji {
        let Some(sequence) = encode::emoji_sequence(name)? else {
            continue;
        };
        let glyphs = encode::sequence_to_string(&sequence)?;

        copy_image(&args.emoji_dir.join(name), &args.output.join(name))?;
        manifest.entry(name, &glyphs)?;
        copied += 1;
    }

    for flag in &flags {
        // Two-letter flags may duplicate an emoji image already bundled.
        // The check runs before the symlink check, so a symlinked flag with
        // a bundled emoji twin registers no alias either.
        if encode::is_country_code(&flag.file_name) {
            let pair = encode::regional_pair(&flag.file_name)?;
            let twin = encode::emoji_file_name(&pair);
            if args.output.join(&twin).exists() {
                printer.warning(
                    "Skipping",
                    &format!("{} (already bundled as {twin})", flag.file_name),
                );
                continue;
            }
        }

        let glyphs = encode::sequence_to_string(&encode::flag_sequence(&flag.file_name)?)?;

        if let Some(target) = &flag.link_target {
            let pair = encode::regional_pair(target)?;
            links.insert(encode::sequence_to_string(&pair)?, glyphs);
            continue;
        }

        copy_image(
            &args.flag_dir.join(&flag.file_name),
            &args.output.join(&flag.file_name),
        )?;
        manifest.entry(&flag.file_name, &glyphs)?;
        copied += 1;
    }

    manifest.finish()?;
    printer.info("Copied", &plural(copied, "image", "images"));

    if !links.is_empty() {
        theme::apply_aliases(&args.output, &links)?;
    }
    printer.success("Wrote", &display_path(&args.output.join(MANIFEST_NAME)));

    printer.status("Resizing", &format!("to {}px wide", args.width));
    let resized = resize::resize_all(&args.output, args.width)?;

    printer.success(
        "Finished",
        &format!(
            "{} ({})",
            display_path(&args.output),
            plural(resized, "image", "images")
        ),
    );

    Ok(())
}

fn copy_image(source: &Path, dest: &Path) -> Result<()> {
    fs::copy(source, dest).map_err(|e| ThemeError::Io {
        path: source.to_path_buf(),
        message: format!("failed to copy image: {e}"),
    })?;
    Ok(())
}
