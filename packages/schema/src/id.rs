use crc32fast::Hasher;

/// Reserved id of the single root node of every tree.
pub const ROOT_ID: &str = "root";

fn source_seed(label: &str) -> String {
    let mut hasher = Hasher::new();
    hasher.update(label.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Sequential node-id generator, scoped to one normalization call.
///
/// Ids are `<seed>-<n>` where the seed hashes the import source label and the
/// counter starts at zero per call, so ids are unique within one output tree
/// but carry no meaning across separate imports.
#[derive(Clone)]
pub struct IdGenerator {
    seed: String,
    count: u32,
}

impl IdGenerator {
    pub fn new(source_label: &str) -> Self {
        Self {
            seed: source_seed(source_label),
            count: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        self.count += 1;
        format!("{}-{}", self.seed, self.count)
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }
}
