//! Codepoint derivation for emoji and flag image filenames.
//!
//! Emoji images carry their codepoint sequence in the filename
//! (`emoji_u1f468_200d_1f469.png`). Flag images encode a country as a
//! regional-indicator pair (`FR.png`) or a country subdivision as a tag
//! sequence (`gb-sct.png`), following UTS #51.

use crate::error::{Result, ThemeError};

/// Filename prefix shared by all emoji images.
pub const EMOJI_PREFIX: &str = "emoji_u";

const PNG_SUFFIX: &str = ".png";

/// Regional indicator base, relative to uppercase ASCII letters
/// (`RIS_BASE + 'F'` = U+1F1EB REGIONAL INDICATOR SYMBOL LETTER F).
pub const RIS_BASE: u32 = 0x1F1A5;

/// U+1F3F4 WAVING BLACK FLAG, leads every subdivision sequence.
pub const TAG_BASE: u32 = 0x1F3F4;

/// Tag character block base; a tag letter is `TAG_SPEC + ascii`.
pub const TAG_SPEC: u32 = 0xE0000;

/// U+E007F CANCEL TAG, terminates every subdivision sequence.
pub const TAG_TERM: u32 = 0xE007F;

/// Single codepoints below this are glyphs borrowed from the base font
/// range, not emoji.
const MIN_EMOJI_CODEPOINT: u32 = 0xFF;

/// Length of a two-letter country flag filename (`XX.png`).
const COUNTRY_NAME_LEN: usize = 6;

/// Whether a flag file name is a two-letter country code plus extension.
pub fn is_country_code(file_name: &str) -> bool {
    file_name.len() == COUNTRY_NAME_LEN
}

/// Parse the codepoint sequence embedded in an emoji image filename.
///
/// Returns `Ok(None)` for names that parse but fall in the excluded
/// low single-codepoint range. Names without the expected prefix, suffix,
/// or hex payload are errors.
pub fn emoji_sequence(file_name: &str) -> Result<Option<Vec<u32>>> {
    let hex = file_name
        .strip_prefix(EMOJI_PREFIX)
        .and_then(|rest| rest.strip_suffix(PNG_SUFFIX))
        .ok_or_else(|| ThemeError::Parse {
            message: format!("not an emoji image name: {file_name}"),
            help: Some(format!(
                "expected {EMOJI_PREFIX}<hex>[_<hex>...]{PNG_SUFFIX}"
            )),
        })?;

    let mut sequence = Vec::new();
    for token in hex.split('_') {
        let cp = u32::from_str_radix(token, 16).map_err(|_| ThemeError::Parse {
            message: format!("invalid hex codepoint {token:?} in {file_name}"),
            help: None,
        })?;
        sequence.push(cp);
    }

    if sequence.len() == 1 && sequence[0] < MIN_EMOJI_CODEPOINT {
        return Ok(None);
    }

    Ok(Some(sequence))
}

/// Regional-indicator pair for the two-letter country code leading `name`
/// (a flag file name such as `FR.png`). Case-insensitive.
pub fn regional_pair(name: &str) -> Result<[u32; 2]> {
    let mut letters = name.chars();
    match (letters.next(), letters.next()) {
        (Some(first), Some(second)) => {
            Ok([regional_indicator(first, name)?, regional_indicator(second, name)?])
        }
        _ => Err(ThemeError::Parse {
            message: format!("country code too short: {name:?}"),
            help: None,
        }),
    }
}

fn regional_indicator(letter: char, name: &str) -> Result<u32> {
    if !letter.is_ascii_alphabetic() {
        return Err(ThemeError::Parse {
            message: format!("invalid country code letter {letter:?} in {name:?}"),
            help: None,
        });
    }
    Ok(RIS_BASE + letter.to_ascii_uppercase() as u32)
}

/// Codepoint sequence for a flag image filename.
///
/// A six-byte name is a two-letter country code plus extension and maps to
/// a regional-indicator pair. Anything else is a subdivision: the stem,
/// minus `-` separators and lowercased, becomes tag letters wrapped in
/// `TAG_BASE` … `TAG_TERM`.
pub fn flag_sequence(file_name: &str) -> Result<Vec<u32>> {
    if is_country_code(file_name) {
        return Ok(regional_pair(file_name)?.to_vec());
    }

    let stem = file_name.strip_suffix(PNG_SUFFIX).unwrap_or(file_name);
    let mut sequence = vec![TAG_BASE];
    for ch in stem.chars() {
        if ch == '-' {
            continue;
        }
        let ch = ch.to_ascii_lowercase();
        if !ch.is_ascii_alphanumeric() {
            return Err(ThemeError::Parse {
                message: format!("invalid subdivision character {ch:?} in {file_name}"),
                help: None,
            });
        }
        sequence.push(TAG_SPEC + ch as u32);
    }
    sequence.push(TAG_TERM);
    Ok(sequence)
}

/// Render a codepoint sequence as the emoji image filename it would carry:
/// lowercase hex tokens joined by `_`.
pub fn emoji_file_name(sequence: &[u32]) -> String {
    let mut name = String::from(EMOJI_PREFIX);
    for (i, cp) in sequence.iter().enumerate() {
        if i > 0 {
            name.push('_');
        }
        name.push_str(&format!("{cp:x}"));
    }
    name.push_str(PNG_SUFFIX);
    name
}

/// Encode a codepoint sequence as literal text.
///
/// Surrogates and values beyond U+10FFFF have no scalar representation;
/// they are reported as errors, never replaced or dropped.
pub fn sequence_to_string(sequence: &[u32]) -> Result<String> {
    sequence
        .iter()
        .map(|&cp| {
            char::from_u32(cp).ok_or_else(|| ThemeError::Encode {
                message: format!("U+{cp:X} is not a Unicode scalar value"),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emoji_sequence_single() {
        let seq = emoji_sequence("emoji_u1f600.png").unwrap();
        assert_eq!(seq, Some(vec![0x1F600]));
    }

    #[test]
    fn test_emoji_sequence_zwj() {
        let seq = emoji_sequence("emoji_u1f468_200d_1f469_200d_1f466.png").unwrap();
        assert_eq!(seq, Some(vec![0x1F468, 0x200D, 0x1F469, 0x200D, 0x1F466]));
    }

    #[test]
    fn test_emoji_sequence_low_codepoint_excluded() {
        assert_eq!(emoji_sequence("emoji_u23.png").unwrap(), None);
        assert_eq!(emoji_sequence("emoji_ufe.png").unwrap(), None);
    }

    #[test]
    fn test_emoji_sequence_threshold_included() {
        assert_eq!(emoji_sequence("emoji_uff.png").unwrap(), Some(vec![0xFF]));
    }

    #[test]
    fn test_emoji_sequence_low_pair_included() {
        // The filter only applies to single-codepoint names
        let seq = emoji_sequence("emoji_u23_20e3.png").unwrap();
        assert_eq!(seq, Some(vec![0x23, 0x20E3]));
    }

    #[test]
    fn test_emoji_sequence_bad_hex() {
        assert!(emoji_sequence("emoji_uzz.png").is_err());
        assert!(emoji_sequence("emoji_u1f600_.png").is_err());
    }

    #[test]
    fn test_emoji_sequence_wrong_prefix() {
        assert!(emoji_sequence("smiley_u1f600.png").is_err());
    }

    #[test]
    fn test_emoji_sequence_wrong_suffix() {
        assert!(emoji_sequence("emoji_u1f600.gif").is_err());
    }

    #[test]
    fn test_emoji_file_name_round_trip() {
        for name in ["emoji_u1f600.png", "emoji_u1f46f_200d_2642_fe0f.png"] {
            let seq = emoji_sequence(name).unwrap().unwrap();
            assert_eq!(emoji_file_name(&seq), name);
        }
    }

    #[test]
    fn test_regional_pair_uppercase() {
        assert_eq!(regional_pair("FR.png").unwrap(), [0x1F1EB, 0x1F1F7]);
    }

    #[test]
    fn test_regional_pair_lowercase() {
        // The French flag sequence regardless of filename case
        assert_eq!(regional_pair("fr.png").unwrap(), [0x1F1EB, 0x1F1F7]);
    }

    #[test]
    fn test_regional_pair_rejects_non_letters() {
        assert!(regional_pair("F1.png").is_err());
        assert!(regional_pair("F").is_err());
    }

    #[test]
    fn test_flag_sequence_country() {
        assert_eq!(flag_sequence("US.png").unwrap(), vec![0x1F1FA, 0x1F1F8]);
    }

    #[test]
    fn test_flag_sequence_subdivision() {
        // gb-sct: black flag, tag letters g b s c t, cancel tag
        assert_eq!(
            flag_sequence("gb-sct.png").unwrap(),
            vec![0x1F3F4, 0xE0067, 0xE0062, 0xE0073, 0xE0063, 0xE0074, 0xE007F]
        );
    }

    #[test]
    fn test_flag_sequence_subdivision_case_folded() {
        assert_eq!(
            flag_sequence("GB-SCT.png").unwrap(),
            flag_sequence("gb-sct.png").unwrap()
        );
    }

    #[test]
    fn test_flag_sequence_rejects_odd_characters() {
        assert!(flag_sequence("gb sct.png").is_err());
    }

    #[test]
    fn test_sequence_to_string() {
        assert_eq!(sequence_to_string(&[0x1F600]).unwrap(), "\u{1F600}");
        assert_eq!(
            sequence_to_string(&[0x1F1EB, 0x1F1F7]).unwrap(),
            "\u{1F1EB}\u{1F1F7}"
        );
    }

    #[test]
    fn test_sequence_to_string_rejects_surrogate() {
        assert!(sequence_to_string(&[0xD800]).is_err());
    }

    #[test]
    fn test_sequence_to_string_rejects_out_of_range() {
        assert!(sequence_to_string(&[0x110000]).is_err());
    }
}
