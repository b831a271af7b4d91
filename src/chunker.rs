//! Fixed-size chunking of file content.
//!
//! Boundaries are purely size-based: changing one byte can shift every
//! following chunk in the file. No rolling-hash chunking.

use crate::error::DagError;

/// Split `data` into ordered pieces of at most `chunk_size` bytes.
///
/// Every piece except possibly the last has length exactly `chunk_size`.
/// Empty input yields zero chunks. Fails with `InvalidChunkSize` if
/// `chunk_size` is zero.
pub fn split(data: &[u8], chunk_size: usize) -> Result<Vec<&[u8]>, DagError> {
    if chunk_size == 0 {
        return Err(DagError::InvalidChunkSize);
    }
    Ok(data.chunks(chunk_size).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_exact_multiple() {
        let data = vec![7u8; 2048];
        let chunks = split(&data, 1024).unwrap();
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| c.len() == 1024));
    }

    #[test]
    fn test_split_short_tail() {
        let data = vec![7u8; 2500];
        let chunks = split(&data, 1024).unwrap();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].len(), 1024);
        assert_eq!(chunks[1].len(), 1024);
        assert_eq!(chunks[2].len(), 452);
    }

    #[test]
    fn test_split_smaller_than_chunk() {
        let chunks = split(b"hello", 1024).unwrap();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], b"hello");
    }

    #[test]
    fn test_split_empty_input_yields_no_chunks() {
        let chunks = split(&[], 1024).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_split_zero_chunk_size_rejected() {
        let err = split(b"data", 0).unwrap_err();
        assert!(matches!(err, DagError::InvalidChunkSize));
    }

    #[test]
    fn test_split_concat_reproduces_input() {
        let data: Vec<u8> = (0..5000).map(|i| (i % 251) as u8).collect();
        let chunks = split(&data, 1024).unwrap();
        let rejoined: Vec<u8> = chunks.concat();
        assert_eq!(rejoined, data);
    }
}
