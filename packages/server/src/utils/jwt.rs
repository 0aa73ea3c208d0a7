use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT Claims structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User ID
    pub exp: usize,  // Expiration timestamp
}

/// Sign a new JWT token for a user.
///
/// Claims carry only the user id; roles are re-read from the database on
/// every request so a revoked admin loses access immediately.
pub fn sign(user_id: Uuid, secret: &str, expire: &str) -> Result<String> {
    let expiration = Utc::now()
        .checked_add_signed(parse_expiry(expire))
        .ok_or_else(|| anyhow::anyhow!("token expiry overflows the calendar"))?
        .timestamp();

    let claims = Claims {
        sub: user_id.to_string(),
        exp: expiration as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

/// Verify and decode a JWT token.
pub fn verify(token: &str, secret: &str) -> Result<Claims> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}

/// Parse a configured token lifetime.
///
/// Accepts bare seconds ("604800") or a count with a d/h/m/s suffix ("7d",
/// "12h", "30m", "45s"). Anything else falls back to 7 days.
pub fn parse_expiry(raw: &str) -> Duration {
    let raw = raw.trim();
    if let Ok(seconds) = raw.parse::<i64>() {
        return Duration::seconds(seconds);
    }
    if raw.len() >= 2 {
        let (count, unit) = raw.split_at(raw.len() - 1);
        if let Ok(n) = count.parse::<i64>() {
            match unit {
                "d" => return Duration::days(n),
                "h" => return Duration::hours(n),
                "m" => return Duration::minutes(n),
                "s" => return Duration::seconds(n),
                _ => {}
            }
        }
    }
    Duration::days(7)
}
