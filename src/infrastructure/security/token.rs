// src/infrastructure/security/token.rs
use crate::application::{
    dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
    error::{ApplicationError, ApplicationResult},
    ports::security::TokenManager,
};
use crate::infrastructure::security::claims::parse_claims;
use async_trait::async_trait;
use biscuit_auth::{
    Biscuit, KeyPair, PrivateKey, PublicKey,
    builder::{Algorithm, AuthorizerBuilder, Term},
};
use chrono::{DateTime, Utc};
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, SystemTime},
};

/// Issues and verifies access tokens as Ed25519-signed biscuits.
///
/// The authority block carries the member's id, display name, role and space
/// memberships, plus validity checks against the verifier's clock.
#[derive(Clone)]
pub struct BiscuitTokenManager {
    root: Arc<KeyPair>,
    public: PublicKey,
    ttl: Duration,
}

impl BiscuitTokenManager {
    pub fn new(private_key_hex: &str, ttl: Duration) -> ApplicationResult<Self> {
        let private = PrivateKey::from_bytes_hex(private_key_hex, Algorithm::Ed25519)
            .map_err(|err| ApplicationError::infrastructure(format!("invalid root key: {err}")))?;
        let root = KeyPair::from(&private);
        let public = root.public();

        Ok(Self {
            root: Arc::new(root),
            public,
            ttl,
        })
    }

    fn mint(&self, block: AuthorityBlock) -> ApplicationResult<String> {
        let (source, params) = block.into_source();
        Biscuit::builder()
            .code_with_params(&source, params, HashMap::new())
            .and_then(|builder| builder.build(self.root.as_ref()))
            .and_then(|token| token.seal())
            .and_then(|sealed| sealed.to_base64())
            .map_err(|err| ApplicationError::infrastructure(format!("token minting failed: {err}")))
    }
}

/// Datalog source of a token's authority block. Every value is bound as a
/// parameter so names and spaces never need escaping.
struct AuthorityBlock {
    subject: TokenSubject,
    issued_at: SystemTime,
    expires_at: SystemTime,
}

impl AuthorityBlock {
    fn into_source(self) -> (String, HashMap<String, Term>) {
        let mut source = String::from(
            "user({id}, {name});\n\
             role({role});\n\
             issued_at({issued});\n\
             expires_at({expires});\n\
             check if time($now), $now >= {issued};\n\
             check if time($now), $now <= {expires};\n",
        );

        let mut params: HashMap<String, Term> = HashMap::from([
            ("id".to_string(), Term::from(self.subject.profile_id.as_str())),
            ("name".to_string(), Term::from(self.subject.name.as_str())),
            ("role".to_string(), Term::from(self.subject.role.as_str())),
            ("issued".to_string(), Term::from(self.issued_at)),
            ("expires".to_string(), Term::from(self.expires_at)),
        ]);

        for (index, space) in self.subject.spaces.into_iter().enumerate() {
            let key = format!("space{index}");
            source.push_str(&format!("space({{{key}}});\n"));
            params.insert(key, Term::from(space.as_str()));
        }

        (source, params)
    }
}

#[async_trait]
impl TokenManager for BiscuitTokenManager {
    async fn issue(&self, subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        let issued_at = SystemTime::now();
        let expires_at = issued_at
            .checked_add(self.ttl)
            .ok_or_else(|| ApplicationError::infrastructure("token lifetime overflows the clock"))?;

        tracing::debug!(profile = %subject.profile_id, role = %subject.role, "minting access token");
        let token = self.mint(AuthorityBlock {
            subject,
            issued_at,
            expires_at,
        })?;

        Ok(AuthTokenDto {
            token,
            issued_at: DateTime::<Utc>::from(issued_at),
            expires_at: DateTime::<Utc>::from(expires_at),
            expires_in: i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX),
        })
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        let rejected = |err: biscuit_auth::error::Token| ApplicationError::unauthorized(err.to_string());

        let biscuit = Biscuit::from_base64(token, self.public).map_err(rejected)?;

        let mut authorizer = AuthorizerBuilder::new()
            .time()
            .build(&biscuit)
            .map_err(rejected)?;
        authorizer.authorize().map_err(rejected)?;

        let (facts, _, _, _) = biscuit.authorizer().map_err(rejected)?.dump();
        parse_claims(facts)
    }
}
