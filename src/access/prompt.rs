use anyhow::{Context, Result};

use crate::text::initials;

/// Ask for the access key without echoing it
pub fn prompt_for_passphrase(facility: &str) -> Result<String> {
    eprintln!("Facility: {}", facility);
    eprintln!("The access key is the facility's initials (hint: {}).", initials(facility));

    let passphrase =
        rpassword::prompt_password("Access key: ").context("Failed to read access key")?;

    Ok(passphrase.trim().to_string())
}

/// Use the key given on the command line, or prompt for one
pub fn read_passphrase(facility: &str, given: Option<String>) -> Result<String> {
    match given {
        Some(key) => Ok(key),
        None => prompt_for_passphrase(facility),
    }
}
