use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::config::AppConfig;
use crate::error::ServiceError;

use super::{
    parse_envelope, AuthEnvelope, CalendarInfo, InvestmentService, LoginRequest, MarketSnapshot,
    RegisterRequest, Session, TradingConfig, VerifyRequest,
};

/// reqwest-backed [`InvestmentService`]. In the browser reqwest runs on
/// `fetch`.
pub struct HttpService {
    client: Client,
    api_base: String,
}

impl HttpService {
    pub fn new(config: &AppConfig) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(30));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            api_base: config.api_base.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }

    async fn post_auth<B: Serialize + ?Sized + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<AuthEnvelope, ServiceError> {
        let resp = self.client.post(self.url(path)).json(body).send().await?;
        let status = resp.status().as_u16();
        let text = resp.text().await?;
        parse_envelope(status, &text)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ServiceError> {
        let resp = self.client.get(self.url(path)).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ServiceError::Http {
                status: status.as_u16(),
            });
        }
        let text = resp.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl InvestmentService for HttpService {
    async fn register(&self, req: &RegisterRequest) -> Result<AuthEnvelope, ServiceError> {
        self.post_auth("/auth/register", req).await
    }

    async fn verify(&self, req: &VerifyRequest) -> Result<AuthEnvelope, ServiceError> {
        self.post_auth("/auth/verify", req).await
    }

    async fn login(&self, req: &LoginRequest) -> Result<Session, ServiceError> {
        self.post_auth("/auth/login", req).await.map(Session::from)
    }

    async fn calendar(&self) -> Result<CalendarInfo, ServiceError> {
        self.get_json("/calendar").await
    }

    async fn market(&self) -> Result<MarketSnapshot, ServiceError> {
        self.get_json("/market").await
    }

    async fn save_trading_config(&self, config: &TradingConfig) -> Result<(), ServiceError> {
        let resp = self
            .client
            .post(self.url("/user/trading-config"))
            .json(config)
            .send()
            .await?;
        let status = resp.status();
        if status.is_success() {
            log::info!("portfolio configuration saved");
            Ok(())
        } else {
            Err(ServiceError::Http {
                status: status.as_u16(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_base_and_path() {
        let svc = HttpService::new(&AppConfig::default());
        assert_eq!(svc.url("/auth/login"), "http://localhost:8002/api/auth/login");
    }

    #[test]
    fn base_comes_from_config() {
        let config = AppConfig::from_json(r#"{"api_base":"https://pms.example/api/"}"#).unwrap();
        let svc = HttpService::new(&config);
        assert_eq!(svc.url("/market"), "https://pms.example/api/market");
    }
}
