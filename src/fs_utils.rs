use std::io;
use std::path::Path;

/// Idempotent directory creation, parents included.
pub async fn ensure_dir<P: AsRef<Path>>(path: P) -> io::Result<()> {
    tokio::fs::create_dir_all(path).await
}

/// Makes a crawled link safe to use as a local filename: path separators and
/// other characters forbidden on common platforms become '_', control
/// characters likewise, leading/trailing whitespace and dots are trimmed and
/// the result is capped at 255 bytes.
pub fn cleanup_filename(input: &str) -> String {
    let mut name: String = input
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '|' | '"' | '<' | '>' => '_',
            c if c.is_control() => '_',
            _ => c,
        })
        .collect();
    name = name
        .trim_matches(|c: char| c.is_whitespace() || c == '.')
        .to_string();

    if name.len() > 255 {
        let mut cut = 255;
        while !name.is_char_boundary(cut) {
            cut -= 1;
        }
        name.truncate(cut);
    }
    if name.is_empty() {
        name.push('_');
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn cleanup_replaces_forbidden_characters() {
        assert_eq!(cleanup_filename("reads.fastq.gz"), "reads.fastq.gz");
        assert_eq!(cleanup_filename("a/b\\c:d"), "a_b_c_d");
        assert_eq!(cleanup_filename("x\u{0000}y"), "x_y");
    }

    #[test]
    fn cleanup_trims_whitespace_and_dots() {
        assert_eq!(cleanup_filename("  name.txt  "), "name.txt");
        assert_eq!(cleanup_filename("..name.txt.."), "name.txt");
    }

    #[test]
    fn cleanup_truncates_on_char_boundary() {
        let long = "ф".repeat(200); // 400 bytes
        let cleaned = cleanup_filename(&long);
        assert!(cleaned.len() <= 255);
        assert!(cleaned.chars().all(|c| c == 'ф'));
    }

    #[test]
    fn cleanup_never_returns_empty() {
        assert_eq!(cleanup_filename("..."), "_");
    }

    #[tokio::test]
    async fn ensure_dir_is_idempotent() {
        let tmp = tempdir().unwrap();
        let nested = tmp.path().join("a").join("b");
        ensure_dir(&nested).await.unwrap();
        ensure_dir(&nested).await.unwrap();
        assert!(nested.is_dir());
    }
}
