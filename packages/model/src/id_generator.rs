use crate::node::BlockId;
use crc32fast::Hasher;

/// Derive the id seed for a document from its name using CRC32
pub fn get_document_seed(name: &str) -> String {
    let mut buff = String::from(name);
    if !name.starts_with("blocktree://") {
        buff = format!("blocktree://{}", buff);
    }

    let mut hasher = Hasher::new();
    hasher.update(buff.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential block id generator scoped to one document
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String, // Document seed (CRC32)
    count: u32,   // Last issued sequence number
}

impl IdGenerator {
    pub fn new(name: &str) -> Self {
        Self {
            seed: get_document_seed(name),
            count: 0,
        }
    }

    pub fn from_seed(seed: String) -> Self {
        Self { seed, count: 0 }
    }

    /// Generate next sequential id; `None` once the sequence is exhausted
    pub fn next_id(&mut self) -> Option<BlockId> {
        self.count = self.count.checked_add(1)?;
        Some(BlockId::new(format!("{}-{}", self.seed, self.count)))
    }

    /// Mark an existing id as taken so later ids never repeat it.
    ///
    /// Ids from other seeds, or without a numeric suffix, are ignored.
    pub fn reserve(&mut self, id: &BlockId) {
        let sequence = id
            .as_str()
            .strip_prefix(self.seed.as_str())
            .and_then(|rest| rest.strip_prefix('-'))
            .and_then(|n| n.parse::<u32>().ok());

        if let Some(n) = sequence {
            self.count = self.count.max(n);
        }
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_seed_generation() {
        let seed1 = get_document_seed("notes.json");
        let seed2 = get_document_seed("notes.json");
        assert_eq!(seed1, seed2);

        let seed3 = get_document_seed("todo.json");
        assert_ne!(seed1, seed3);

        // Prefixed and bare names hash the same
        assert_eq!(seed1, get_document_seed("blocktree://notes.json"));
    }

    #[test]
    fn test_sequential_ids() {
        let mut gen = IdGenerator::new("notes.json");

        let id1 = gen.next_id().unwrap();
        let id2 = gen.next_id().unwrap();

        assert!(id1.as_str().ends_with("-1"));
        assert!(id2.as_str().ends_with("-2"));
        assert!(id1.as_str().starts_with(gen.seed()));
    }

    #[test]
    fn test_reserve_skips_taken_ids() {
        let mut gen = IdGenerator::from_seed("abc".to_string());

        gen.reserve(&BlockId::new("abc-7"));
        gen.reserve(&BlockId::new("abc-3"));
        gen.reserve(&BlockId::new("other-40"));
        gen.reserve(&BlockId::new("abc-x"));

        assert_eq!(gen.next_id(), Some(BlockId::new("abc-8")));
    }

    #[test]
    fn test_exhausted_sequence() {
        let mut gen = IdGenerator::from_seed("abc".to_string());
        gen.reserve(&BlockId::new(format!("abc-{}", u32::MAX)));

        assert_eq!(gen.next_id(), None);
        // Stays exhausted instead of wrapping around to reissue old ids
        assert_eq!(gen.next_id(), None);
    }
}
