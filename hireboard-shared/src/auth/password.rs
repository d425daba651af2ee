/// Password hashing using Argon2id
///
/// Account secrets are only ever stored as PHC strings produced here, and
/// only ever compared through [`verify_password`].
///
/// # Parameters
///
/// - **Algorithm**: Argon2id, version 0x13
/// - **Memory**: 64 MiB
/// - **Iterations**: 3
/// - **Parallelism**: 4 lanes
/// - **Salt**: 16 random bytes from the OS RNG
///
/// # Example
///
/// ```
/// use hireboard_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("hunter22")?;
/// assert!(verify_password("hunter22", &hash)?);
/// assert!(!verify_password("hunter23", &hash)?);
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, ParamsBuilder, Version,
};

/// Shortest accepted password, in characters
pub const MIN_PASSWORD_LENGTH: usize = 5;

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    HashError(String),

    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

fn hasher() -> Result<Argon2<'static>, PasswordError> {
    let params = ParamsBuilder::new()
        .m_cost(65536)
        .t_cost(3)
        .p_cost(4)
        .output_len(32)
        .build()
        .map_err(|e| PasswordError::HashError(format!("Invalid parameters: {}", e)))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes a password with a fresh random salt
///
/// Returns a PHC string such as
/// `$argon2id$v=19$m=65536,t=3,p=4$<salt>$<hash>`.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

    Ok(password_hash.to_string())
}

/// Verifies a password against a stored PHC string
///
/// `Ok(false)` means the password is wrong; `Err` means the stored hash
/// could not be parsed or checked.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| PasswordError::InvalidHash(format!("Failed to parse hash: {}", e)))?;

    if parsed_hash.hash.is_none() {
        return Err(PasswordError::InvalidHash("Hash has no output".to_string()));
    }

    // Parameters come from the PHC string, not from `hasher()`
    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(format!("Verification failed: {}", e))),
    }
}

/// Checks the minimum password length
///
/// Length is counted in characters, not bytes.
///
/// ```
/// use hireboard_shared::auth::password::validate_password_length;
///
/// assert!(validate_password_length("abcde").is_ok());
/// assert!(validate_password_length("abcd").is_err());
/// ```
pub fn validate_password_length(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Ensure this field has at least {} characters.",
            MIN_PASSWORD_LENGTH
        ));
    }

    Ok(())
}
