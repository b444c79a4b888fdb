//! Submesh name classification.
//!
//! Model files encode import policy in submesh display names: reserved names
//! mark collision shapes, shadow proxies and effect emitters, and numeric
//! suffixes mark detail tiers. The functions here are pure; import policy
//! decides what to do with the answers.

use serde::Serialize;

/// Names that never become visible geometry: collision and trigger shapes,
/// shadow proxies, particle/smoke/glow effects, sign markers, open/into
/// trigger volumes, and the generic placeholder mesh.
const NON_VISUAL_NAMES: &[&str] = &[
    "SHAPE", "SHAPE2", "shadow", "SHADOW", "SMOKE1", "SMOKE", "SMOKE2", "STEAM", "GLOW",
    "PARTICLES", "FX", "SIGN", "INTO", "OPEN", "OPEN1", "MESH",
];

/// LOD suffix patterns, most specific first. Order is a deliberate
/// tie-break and must not be reshuffled.
const LOD_SUFFIXES: &[&str] = &["LOD_DETAIL", "LOD_0", "LOD_", "LOD0", "LOD", "_L"];

/// Classification of a submesh display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// False for reserved non-visual names.
    pub is_visual: bool,
    /// Detail tier encoded in the name; 0 is highest detail.
    pub lod_index: u32,
}

/// Normalize a display name the way the original tooling does:
/// uppercase, with "?" replaced by "N".
pub fn nicify_name(name: &str) -> String {
    name.replace('?', "N").to_uppercase()
}

/// Whether a name denotes visible geometry.
///
/// Exact, case-sensitive comparison against the reserved-name set. Callers
/// normally pass a nicified name, in which case only the uppercase entries
/// can match.
pub fn is_visual_geometry(name: &str) -> bool {
    !NON_VISUAL_NAMES.contains(&name)
}

/// Detail tier encoded in a name.
///
/// Scans case-insensitively for each suffix pattern concatenated with the
/// digits 4 down to 0; the first hit yields `max(digit - 1, 0)`. Suffixes
/// are tried most-specific-first and digits high-to-low so that e.g.
/// "LOD_DETAIL4" is not misread as "LOD_" plus a stray digit.
pub fn lod_index(name: &str) -> u32 {
    let haystack = name.to_uppercase();
    for suffix in LOD_SUFFIXES {
        for digit in (0..=4u32).rev() {
            let pattern = format!("{suffix}{digit}");
            if haystack.contains(&pattern) {
                return digit.saturating_sub(1);
            }
        }
    }
    0
}

/// Classify a raw submesh display name.
///
/// The name is nicified first, so lowercase reserved names ("shadow") are
/// caught and "?" wildcards do not break suffix scanning.
pub fn classify(display_name: &str) -> Classification {
    let nicified = nicify_name(display_name);
    Classification {
        is_visual: is_visual_geometry(&nicified),
        lod_index: lod_index(&nicified),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_names_are_not_visual() {
        assert!(!classify("SHAPE").is_visual);
        assert!(!classify("shadow").is_visual);
        assert!(!classify("SMOKE2").is_visual);
        assert!(!classify("MESH").is_visual);
        assert!(!classify("OPEN1").is_visual);
    }

    #[test]
    fn test_ordinary_names_are_visual() {
        assert!(classify("BODY").is_visual);
        assert!(classify("HULL").is_visual);
        // Reserved matching is exact, not prefix.
        assert!(classify("SHAPED").is_visual);
        assert!(classify("MESHES").is_visual);
    }

    #[test]
    fn test_lod_suffixes() {
        assert_eq!(classify("BODY_L3").lod_index, 2);
        assert_eq!(classify("BODY_L1").lod_index, 0);
        assert_eq!(classify("TOWER_LOD_3").lod_index, 2);
        assert_eq!(classify("TOWER_LOD_2").lod_index, 1);
        assert_eq!(classify("glass_lod3").lod_index, 2);
        assert_eq!(classify("HULL").lod_index, 0);
    }

    #[test]
    fn test_lod_digit_priority_high_to_low() {
        // Both "_L4" and "_L1" appear; the higher digit wins.
        assert_eq!(classify("A_L1_B_L4").lod_index, 3);
    }

    #[test]
    fn test_lod_suffix_priority_most_specific_first() {
        // "LOD_02" matches "LOD_0" + "2" before the bare "LOD_" patterns.
        assert_eq!(classify("PART_LOD_02").lod_index, 1);
    }

    #[test]
    fn test_nicify_replaces_wildcard_and_uppercases() {
        assert_eq!(nicify_name("Body?_l2"), "BODYN_L2");
        assert!(!classify("shape").is_visual);
        assert_eq!(classify("wing?_l2").lod_index, 1);
    }
}
