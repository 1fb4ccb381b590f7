//! Random names and passwords for test resources.

use rand::distributions::Alphanumeric;
use rand::seq::SliceRandom;
use rand::Rng;
use regex::Regex;
use std::sync::OnceLock;

/// Storage account names: 3-24 lowercase letters and digits.
static STORAGE_NAME_REGEX: OnceLock<Regex> = OnceLock::new();

fn storage_name_regex() -> &'static Regex {
    STORAGE_NAME_REGEX.get_or_init(|| Regex::new(r"^[a-z0-9]{3,24}$").expect("Invalid Regex"))
}

/// `len` random lowercase ascii letters.
pub fn random_lowercase(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len).map(|_| rng.gen_range(b'a'..=b'z') as char).collect()
}

/// `prefix` followed by 8 random lowercase letters/digits, e.g. `rgk3x9a0qz`.
pub fn random_name(prefix: &str) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(|b| (b as char).to_ascii_lowercase())
        .collect();
    format!("{prefix}{suffix}")
}

/// Storage account name: 10 random lowercase letters.
pub fn storage_account_name() -> String {
    random_lowercase(10)
}

pub fn is_valid_storage_account_name(name: &str) -> bool {
    storage_name_regex().is_match(name)
}

/// 16 char password with at least one upper, lower, digit and symbol.
pub fn random_password() -> String {
    const UPPER: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
    const LOWER: &[u8] = b"abcdefghijkmnopqrstuvwxyz";
    const DIGIT: &[u8] = b"23456789";
    const SYMBOL: &[u8] = b"!@#%^*-_=+";
    let all: Vec<u8> = [UPPER, LOWER, DIGIT, SYMBOL].concat();

    let mut rng = rand::thread_rng();
    let mut chars: Vec<u8> = [UPPER, LOWER, DIGIT, SYMBOL]
        .iter()
        .filter_map(|set| set.choose(&mut rng).copied())
        .collect();
    while chars.len() < 16 {
        if let Some(c) = all.choose(&mut rng) {
            chars.push(*c);
        }
    }
    chars.shuffle(&mut rng);
    chars.into_iter().map(char::from).collect()
}
