use std::time::Duration;

use anyhow::Context;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use super::claims::Claims;
use crate::config::JwtConfig;

/// Signing and verification keys plus the fixed claim policy. Built once at
/// startup from the server secret.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
    pub ttl: Duration,
}

impl JwtKeys {
    pub fn from_config(config: &JwtConfig) -> Self {
        let JwtConfig {
            secret,
            issuer,
            audience,
            ttl_minutes,
        } = config;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.clone(),
            audience: audience.clone(),
            ttl: Duration::from_secs(
                u64::try_from(*ttl_minutes)
                    .unwrap_or(0)
                    .saturating_mul(60),
            ),
        }
    }

    pub fn sign(&self, user_id: Uuid, email: &str) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = i64::try_from(self.ttl.as_secs())
            .ok()
            .and_then(|secs| now.checked_add(TimeDuration::seconds(secs)))
            .context("token expiry out of range")?;
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = self.encode_claims(&claims)?;
        debug!(user_id = %user_id, "jwt signed");
        Ok(token)
    }

    pub(crate) fn encode_claims(&self, claims: &Claims) -> anyhow::Result<String> {
        Ok(encode(&Header::default(), claims, &self.encoding)?)
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(user_id = %data.claims.sub, "jwt verified");
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys(secret: &str, issuer: &str, audience: &str) -> JwtKeys {
        JwtKeys::from_config(&JwtConfig {
            secret: secret.into(),
            issuer: issuer.into(),
            audience: audience.into(),
            ttl_minutes: 5,
        })
    }

    #[test]
    fn sign_and_verify_roundtrip() {
        let keys = make_keys("dev-secret", "test-issuer", "test-aud");
        let user_id = Uuid::new_v4();
        let token = keys.sign(user_id, "a@x.com").expect("sign");
        assert_eq!(token.split('.').count(), 3);

        let claims = keys.verify(&token).expect("verify token");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.aud, "test-aud");
        assert_eq!(claims.exp - claims.iat, 5 * 60);
    }

    #[test]
    fn sign_fails_when_expiry_overflows() {
        let huge = JwtKeys::from_config(&JwtConfig {
            secret: "dev-secret".into(),
            issuer: "iss".into(),
            audience: "aud".into(),
            ttl_minutes: i64::MAX,
        });
        let err = huge.sign(Uuid::new_v4(), "a@x.com").unwrap_err();
        assert!(err.to_string().contains("expiry"));

        let mut keys = make_keys("dev-secret", "iss", "aud");
        keys.ttl = Duration::from_secs(u64::MAX);
        assert!(keys.sign(Uuid::new_v4(), "a@x.com").is_err());
    }

    #[test]
    fn verify_rejects_foreign_secret() {
        let ours = make_keys("secret-a", "iss", "aud");
        let theirs = make_keys("secret-b", "iss", "aud");
        let token = theirs.sign(Uuid::new_v4(), "a@x.com").unwrap();
        assert!(ours.verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_wrong_issuer_or_audience() {
        let good = make_keys("same-secret", "good-iss", "good-aud");
        let token = good.sign(Uuid::new_v4(), "a@x.com").unwrap();

        assert!(make_keys("same-secret", "bad-iss", "good-aud").verify(&token).is_err());
        assert!(make_keys("same-secret", "good-iss", "bad-aud").verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_expired_token() {
        let keys = make_keys("dev-secret", "iss", "aud");
        let now = OffsetDateTime::now_utc().unix_timestamp() as usize;
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "a@x.com".into(),
            iat: now - 7200,
            exp: now - 3600,
            iss: "iss".into(),
            aud: "aud".into(),
        };
        let token = keys.encode_claims(&claims).unwrap();
        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_tampered_payload() {
        let keys = make_keys("dev-secret", "iss", "aud");
        let token = keys.sign(Uuid::new_v4(), "a@x.com").unwrap();
        let other = keys.sign(Uuid::new_v4(), "mallory@x.com").unwrap();

        // splice the other token's payload under the original signature
        let parts: Vec<&str> = token.split('.').collect();
        let other_parts: Vec<&str> = other.split('.').collect();
        let forged = format!("{}.{}.{}", parts[0], other_parts[1], parts[2]);
        assert!(keys.verify(&forged).is_err());
    }

    #[test]
    fn verify_rejects_malformed_tokens() {
        let keys = make_keys("dev-secret", "iss", "aud");
        for bad in ["", "not-a-jwt", "a.b", "a.b.c"] {
            assert!(keys.verify(bad).is_err(), "accepted {bad:?}");
        }
    }
}
