use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::debug;

use shared_models::auth::{AuthUser, JwtClaims, JwtHeader};

type HmacSha256 = Hmac<Sha256>;

fn sign_parts(header_b64: &str, claims_b64: &str, jwt_secret: &str) -> Result<String, String> {
    let signing_input = format!("{}.{}", header_b64, claims_b64);

    let mut mac = HmacSha256::new_from_slice(jwt_secret.as_bytes())
        .map_err(|_| "Failed to create HMAC".to_string())?;
    mac.update(signing_input.as_bytes());

    let signature = mac.finalize().into_bytes();
    Ok(URL_SAFE_NO_PAD.encode(signature))
}

fn encode(claims: &JwtClaims, jwt_secret: &str) -> Result<String, String> {
    let header = JwtHeader {
        alg: "HS256".to_string(),
        typ: "JWT".to_string(),
    };

    let header_json =
        serde_json::to_string(&header).map_err(|_| "Failed to encode header".to_string())?;
    let claims_json =
        serde_json::to_string(claims).map_err(|_| "Failed to encode claims".to_string())?;

    let header_b64 = URL_SAFE_NO_PAD.encode(header_json);
    let claims_b64 = URL_SAFE_NO_PAD.encode(claims_json);
    let signature_b64 = sign_parts(&header_b64, &claims_b64, jwt_secret)?;

    Ok(format!("{}.{}.{}", header_b64, claims_b64, signature_b64))
}

/// Issues an access token for a logged-in staff user.
pub fn issue_token(
    user_id: i64,
    email: &str,
    role: &str,
    jwt_secret: &str,
    ttl_minutes: i64,
) -> Result<String, String> {
    if jwt_secret.is_empty() {
        return Err("JWT secret is not set".to_string());
    }

    let now = Utc::now();
    let claims = JwtClaims {
        sub: user_id,
        email: email.to_string(),
        role: role.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::minutes(ttl_minutes)).timestamp(),
        token_use: None,
    };

    encode(&claims, jwt_secret)
}

/// Issues a single-purpose password-reset token, valid for one hour. The
/// auth middleware refuses these for API access.
pub fn issue_reset_token(
    user_id: i64,
    email: &str,
    role: &str,
    jwt_secret: &str,
) -> Result<String, String> {
    if jwt_secret.is_empty() {
        return Err("JWT secret is not set".to_string());
    }

    let now = Utc::now();
    let claims = JwtClaims {
        sub: user_id,
        email: email.to_string(),
        role: role.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(1)).timestamp(),
        token_use: Some("password_reset".to_string()),
    };

    encode(&claims, jwt_secret)
}

/// Validates signature and expiry and returns the verified claims.
pub fn validate_claims(token: &str, jwt_secret: &str) -> Result<JwtClaims, String> {
    if jwt_secret.is_empty() {
        return Err("JWT secret is not set".to_string());
    }

    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err("Invalid token format".to_string());
    }

    let header_b64 = parts[0];
    let claims_b64 = parts[1];
    let signature_b64 = parts[2];

    let signature = match URL_SAFE_NO_PAD.decode(signature_b64) {
        Ok(sig) => sig,
        Err(e) => {
            debug!("Failed to decode signature: {}", e);
            return Err("Invalid signature encoding".to_string());
        }
    };

    let signing_input = format!("{}.{}", header_b64, claims_b64);

    let mut mac = HmacSha256::new_from_slice(jwt_secret.as_bytes())
        .map_err(|_| "Failed to create HMAC".to_string())?;
    mac.update(signing_input.as_bytes());

    if mac.verify_slice(&signature).is_err() {
        debug!("Token signature verification failed");
        return Err("Invalid token signature".to_string());
    }

    let claims_json = match URL_SAFE_NO_PAD.decode(claims_b64) {
        Ok(bytes) => match String::from_utf8(bytes) {
            Ok(json_str) => json_str,
            Err(_) => return Err("Invalid claims encoding".to_string()),
        },
        Err(_) => return Err("Invalid claims encoding".to_string()),
    };

    let claims: JwtClaims = match serde_json::from_str(&claims_json) {
        Ok(c) => c,
        Err(e) => {
            debug!("Failed to parse claims: {}", e);
            return Err("Invalid claims format".to_string());
        }
    };

    let now = Utc::now().timestamp();
    if claims.exp < now {
        debug!("Token expired at {} (now: {})", claims.exp, now);
        return Err("Token expired".to_string());
    }

    Ok(claims)
}

/// Validates an access token and returns the authenticated user. Tokens
/// carrying a special purpose (password reset) are rejected here.
pub fn validate_token(token: &str, jwt_secret: &str) -> Result<AuthUser, String> {
    let claims = validate_claims(token, jwt_secret)?;

    if claims.token_use.is_some() {
        return Err("Token is not valid for API access".to_string());
    }

    let user = AuthUser {
        id: claims.sub,
        email: claims.email,
        role: claims.role,
    };

    debug!("Token validated successfully for user: {}", user.id);
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "unit-test-secret-key-long-enough-for-hmac";

    #[test]
    fn issued_token_round_trips() {
        let token = issue_token(42, "rad@hospital.test", "radiologist", SECRET, 30).unwrap();
        let user = validate_token(&token, SECRET).unwrap();

        assert_eq!(user.id, 42);
        assert_eq!(user.email, "rad@hospital.test");
        assert_eq!(user.role, "radiologist");
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = issue_token(1, "a@b.test", "admin", SECRET, 30).unwrap();
        assert!(validate_token(&token, "another-secret").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = issue_token(1, "a@b.test", "admin", SECRET, -5).unwrap();
        assert_eq!(validate_token(&token, SECRET).unwrap_err(), "Token expired");
    }

    #[test]
    fn reset_token_is_not_an_access_token() {
        let token = issue_reset_token(7, "x@y.test", "receptionist", SECRET).unwrap();
        assert!(validate_claims(&token, SECRET).is_ok());
        assert!(validate_token(&token, SECRET).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(validate_token("not.a.token", SECRET).is_err());
        assert!(validate_token("nodots", SECRET).is_err());
    }
}
