//! Object-key codec
//!
//! Object keys may contain `/` segments, which cannot appear inside a single
//! URL path parameter. Download links therefore carry a "display key" with
//! every `/` replaced by `-`, and the download handler reverses the
//! substitution before talking to the provider.
//!
//! The substitution is not a bijection: a key that contains a literal `-`
//! becomes indistinguishable from an encoded `/` after a round trip.
//! `rebuild_key(sanitize_key(k)) == k` holds only for keys without `-`.

/// Encode an object key as a URL-safe display key (`/` becomes `-`).
pub fn sanitize_key(key: &str) -> String {
    key.replace('/', "-")
}

/// Decode a display key back to an object key (`-` becomes `/`).
pub fn rebuild_key(display: &str) -> String {
    display.replace('-', "/")
}

/// Everything before the last `/`, or the empty string when the key has
/// no directory component.
pub fn parent_path(key: &str) -> &str {
    match key.rsplit_once('/') {
        Some((parent, _)) => parent,
        None => "",
    }
}

/// The last `/`-delimited segment, or the whole key when it has none.
pub fn file_name(key: &str) -> &str {
    match key.rsplit_once('/') {
        Some((_, name)) => name,
        None => key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_all_slashes() {
        assert_eq!(sanitize_key("a/b/c.txt"), "a-b-c.txt");
        assert_eq!(sanitize_key("plain.txt"), "plain.txt");
        assert_eq!(sanitize_key(""), "");
    }

    #[test]
    fn test_rebuild_replaces_all_dashes() {
        assert_eq!(rebuild_key("a-b-c.txt"), "a/b/c.txt");
        assert_eq!(rebuild_key("plain.txt"), "plain.txt");
    }

    #[test]
    fn test_round_trip_without_dashes() {
        for key in ["a/b.txt", "deep/er/est/file", "single", "a/b/c/d/e"] {
            assert_eq!(rebuild_key(&sanitize_key(key)), key);
        }
    }

    #[test]
    fn test_round_trip_idempotent_on_flat_keys() {
        for key in ["readme.txt", "data.bin", "x"] {
            let once = rebuild_key(&sanitize_key(key));
            let twice = rebuild_key(&sanitize_key(&once));
            assert_eq!(once, key);
            assert_eq!(twice, key);
        }
    }

    #[test]
    fn test_round_trip_is_lossy_with_literal_dash() {
        assert_eq!(rebuild_key(&sanitize_key("my-file.txt")), "my/file.txt");
    }

    #[test]
    fn test_parent_and_file_name_rejoin() {
        for key in ["a/b.txt", "a/b/c.txt", "x/y"] {
            assert_eq!(format!("{}/{}", parent_path(key), file_name(key)), key);
        }
    }

    #[test]
    fn test_parent_path_of_flat_key_is_empty() {
        assert_eq!(parent_path("z.txt"), "");
    }

    #[test]
    fn test_file_name_of_flat_key_is_key() {
        assert_eq!(file_name("z.txt"), "z.txt");
    }

    #[test]
    fn test_file_name_of_nested_key() {
        assert_eq!(file_name("a/b/c.txt"), "c.txt");
    }
}
