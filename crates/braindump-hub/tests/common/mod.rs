#![allow(dead_code)]

use std::collections::HashMap;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;

use braindump_hub::access::{AccessPolicy, parse_id_list};
use braindump_hub::store::Store;
use braindump_hub::web::identity::{IdentityProvider, ProviderIdentity};
use braindump_hub::web::middleware::auth::issue_session_token;
use braindump_hub::web::{AppState, build_router};

pub const SECRET: &[u8] = b"test-secret-test-secret-test-sec";
pub const MEMBER: &str = "100";
pub const ADMIN: &str = "200";
pub const OUTSIDER: &str = "999";

/// Identity provider that knows a fixed set of authorization codes.
pub struct FakeProvider {
    codes: HashMap<String, ProviderIdentity>,
}

impl FakeProvider {
    pub fn new() -> Self {
        let mut codes = HashMap::new();
        for (code, id, name) in [
            ("member-code", MEMBER, "Member"),
            ("admin-code", ADMIN, "Admin"),
            ("outsider-code", OUTSIDER, "Outsider"),
        ] {
            codes.insert(
                code.to_string(),
                ProviderIdentity {
                    id: id.into(),
                    name: name.into(),
                },
            );
        }
        Self { codes }
    }
}

impl IdentityProvider for FakeProvider {
    fn authorize_url(&self, state: &str) -> String {
        format!("https://id.example.test/authorize?state={state}")
    }

    fn exchange<'a>(
        &'a self,
        code: &'a str,
    ) -> Pin<Box<dyn Future<Output = anyhow::Result<ProviderIdentity>> + Send + 'a>> {
        Box::pin(async move {
            self.codes
                .get(code)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("unknown code"))
        })
    }
}

pub struct TestHub {
    pub addr: SocketAddr,
    pub store: Arc<Store>,
    pub http: reqwest::Client,
}

impl TestHub {
    pub async fn start() -> Self {
        let store = Arc::new(Store::new_in_memory().unwrap());
        let state = AppState {
            store: store.clone(),
            jwt_secret: SECRET.to_vec(),
            access: Arc::new(AccessPolicy::new(
                parse_id_list(&format!("{MEMBER},{ADMIN}")),
                parse_id_list(ADMIN),
            )),
            identity: Some(Arc::new(FakeProvider::new())),
            public_url: "http://localhost".into(),
            cors_origins: vec!["http://localhost".into()],
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = build_router(state);
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();

        Self { addr, store, http }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn token_for(&self, id: &str) -> String {
        issue_session_token(SECRET, id, "Tester", id == ADMIN).unwrap()
    }
}
