use argon2::Params;

pub const DEFAULT_BIO: &str = "Hello, I am new!";
pub const DEFAULT_ID_SPACE: u32 = 1_000_000;
pub const DEFAULT_ID_ATTEMPTS: u32 = 64;

/// Store settings. The binary fills this from the environment; tests build
/// it directly with cheap hashing parameters.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Bio given to every new profile.
    pub default_bio: String,
    /// Identifiers are drawn from `1..=id_space`.
    pub id_space: u32,
    /// Draws per registration before giving up on a free identifier.
    pub id_attempts: u32,
    /// Argon2id memory cost in KiB.
    pub hash_memory_kib: u32,
    /// Argon2id iteration count.
    pub hash_iterations: u32,
    /// Fixed seed for the identifier allocator. `None` seeds from the OS.
    pub rng_seed: Option<u64>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_bio: DEFAULT_BIO.to_string(),
            id_space: DEFAULT_ID_SPACE,
            id_attempts: DEFAULT_ID_ATTEMPTS,
            hash_memory_kib: Params::DEFAULT_M_COST,
            hash_iterations: Params::DEFAULT_T_COST,
            rng_seed: None,
        }
    }
}
