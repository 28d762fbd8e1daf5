use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::model::role::Role;
use crate::models::{Claims, TokenType};

fn now() -> usize {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize
}

/// Short-lived, stateless credential. Verified without a store lookup.
pub fn generate_access_token(
    user_id: &str,
    email: &str,
    role: Role,
    secret: &str,
    ttl: usize,
) -> String {
    let claims = Claims {
        user_id: user_id.to_owned(),
        sub: email.to_owned(),
        role,
        exp: now() + ttl,
        jti: Uuid::new_v4().to_string(),
        token_type: TokenType::Access,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

/// Long-lived credential, individually revocable through the jti blacklist.
pub fn generate_refresh_token(
    user_id: &str,
    email: &str,
    role: Role,
    secret: &str,
    ttl: usize,
) -> (String, Claims) {
    let claims = Claims {
        user_id: user_id.to_owned(),
        sub: email.to_owned(),
        role,
        exp: now() + ttl,
        jti: Uuid::new_v4().to_string(),
        token_type: TokenType::Refresh,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap();

    (token, claims)
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn access_token_round_trip() {
        let token = generate_access_token("u1", "jane@company.com", Role::HrManager, SECRET, 900);
        let claims = verify_token(&token, SECRET).unwrap();

        assert_eq!(claims.user_id, "u1");
        assert_eq!(claims.sub, "jane@company.com");
        assert_eq!(claims.role, Role::HrManager);
        assert_eq!(claims.token_type, TokenType::Access);
    }

    #[test]
    fn refresh_token_carries_unique_jti() {
        let (_, a) = generate_refresh_token("u1", "a@b.com", Role::HrManager, SECRET, 60);
        let (_, b) = generate_refresh_token("u1", "a@b.com", Role::HrManager, SECRET, 60);
        assert_eq!(a.token_type, TokenType::Refresh);
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn wrong_secret_rejected() {
        let token = generate_access_token("u1", "a@b.com", Role::HrManager, SECRET, 900);
        assert!(verify_token(&token, "other-secret").is_err());
    }

    #[test]
    fn expired_token_rejected() {
        // Past the default 60s decode leeway.
        let claims = Claims {
            user_id: "u1".into(),
            sub: "a@b.com".into(),
            role: Role::HrManager,
            exp: now() - 120,
            jti: Uuid::new_v4().to_string(),
            token_type: TokenType::Access,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(verify_token(&token, SECRET).is_err());
    }
}
