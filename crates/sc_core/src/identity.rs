use sha2::{Digest, Sha256};

/// Lower-case hex SHA-256 of the title's UTF-8 bytes.
pub fn compute_checksum(title: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_digest() {
        assert_eq!(
            compute_checksum(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            compute_checksum("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_checksum_is_stable() {
        let title = "How to expose a CAP service via OData V2?";
        assert_eq!(compute_checksum(title), compute_checksum(title));
        assert_eq!(compute_checksum(title).len(), 64);
    }

    #[test]
    fn test_one_character_changes_checksum() {
        assert_ne!(compute_checksum("Fix X"), compute_checksum("Fix Y"));
        assert_ne!(compute_checksum("Fix X"), compute_checksum("Fix X "));
    }

    #[test]
    fn test_non_ascii_title() {
        let digest = compute_checksum("날짜 검증 오류");
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
