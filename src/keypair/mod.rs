// Wallet key pair management

pub mod cli;
mod file;
mod keys;

pub use file::{read_keypair, write_keypair};
pub use keys::{Keypair, SECRET_KEY_LEN, SEED_LEN};
