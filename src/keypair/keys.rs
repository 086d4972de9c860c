// Solana ed25519 key pairs

use ed25519_dalek::SigningKey;
use rand::RngCore;
use rand::rngs::OsRng;

/// Seed length in bytes
pub const SEED_LEN: usize = 32;

/// Secret key length in bytes (seed followed by public key)
pub const SECRET_KEY_LEN: usize = 64;

/// Wallet key pair
#[derive(Clone)]
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generate a key pair, from `seed` when given, otherwise from 32 random bytes
    pub fn generate(seed: Option<&[u8; SEED_LEN]>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => {
                let mut seed = [0u8; SEED_LEN];
                OsRng.fill_bytes(&mut seed);
                Self::from_seed(&seed)
            }
        }
    }

    /// Derive a key pair from a 32-byte seed
    pub fn from_seed(seed: &[u8; SEED_LEN]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Derive a key pair from a hex encoded seed
    pub fn from_seed_hex(seed_hex: &str) -> Result<Self, String> {
        let hex_str = seed_hex.trim().to_lowercase();
        if hex_str.is_empty() || hex_str.len() % 2 != 0 {
            return Err("seed-hex must be hex".to_string());
        }

        let bytes = hex::decode(&hex_str)
            .map_err(|_| "seed-hex must be hex".to_string())?;

        let seed: [u8; SEED_LEN] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| format!("seed-hex must be {} bytes", SEED_LEN))?;

        Ok(Self::from_seed(&seed))
    }

    /// Load from a 64-byte secret key (seed followed by public key)
    pub fn from_secret_key(bytes: &[u8; SECRET_KEY_LEN]) -> Result<Self, String> {
        let signing_key = SigningKey::from_keypair_bytes(bytes)
            .map_err(|e| format!("Invalid secret key: {}", e))?;

        Ok(Self { signing_key })
    }

    /// Public key bytes
    pub fn pubkey_bytes(&self) -> [u8; 32] {
        self.signing_key.verifying_key().to_bytes()
    }

    /// Public key in base58, the wallet's address form
    pub fn pubkey(&self) -> String {
        bs58::encode(self.pubkey_bytes()).into_string()
    }

    /// 64-byte secret key as stored on disk
    pub fn secret_key_bytes(&self) -> [u8; SECRET_KEY_LEN] {
        self.signing_key.to_keypair_bytes()
    }

    /// The 32-byte seed
    pub fn seed(&self) -> [u8; SEED_LEN] {
        self.signing_key.to_bytes()
    }
}

impl PartialEq for Keypair {
    fn eq(&self, other: &Self) -> bool {
        self.secret_key_bytes() == other.secret_key_bytes()
    }
}

impl Eq for Keypair {}

impl std::fmt::Debug for Keypair {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Keypair")
            .field("pubkey", &self.pubkey())
            .finish_non_exhaustive()
    }
}
