use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

/// Claims this service reads from tokens minted by the identity provider.
/// Anything else the issuer embeds is ignored.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: u8, // role id
    pub exp: usize,
    /// Present only if this user is linked to an employee record
    pub employee_id: Option<u64>,
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use std::time::{SystemTime, UNIX_EPOCH};

    const SECRET: &str = "test-secret";

    fn token_for(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn unexpired_claims() -> Claims {
        let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs() as usize;
        Claims {
            sub: "jdoe".to_string(),
            role: 3,
            exp: now + 900,
            employee_id: Some(1000),
        }
    }

    #[test]
    fn claims_round_trip() {
        let token = token_for(&unexpired_claims(), SECRET);

        let claims = verify_token(&token, SECRET).unwrap();

        assert_eq!(claims.sub, "jdoe");
        assert_eq!(claims.role, 3);
        assert_eq!(claims.employee_id, Some(1000));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = token_for(&unexpired_claims(), "other-secret");
        assert!(verify_token(&token, SECRET).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut claims = unexpired_claims();
        claims.exp = 1_000; // 1970
        let token = token_for(&claims, SECRET);
        assert!(verify_token(&token, SECRET).is_err());
    }
}
