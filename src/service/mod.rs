//! Remote JSON service: request/response types, the [`InvestmentService`]
//! seam, and the command/reply pair the app uses to run calls off the UI
//! path.
//!
//! The app never awaits anything itself. Input handling returns
//! [`Command`]s; `main.rs` spawns [`run_command`] for each and feeds the
//! resulting [`Reply`] back into the app.

pub mod http;

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;
use crate::screens::portfolio::state::PortfolioData;

// ── Requests ───────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub phone: String,
    pub full_name: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VerifyRequest {
    pub email: String,
    pub code: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /user/trading-config`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TradingConfig {
    pub user_id: String,
    pub period: String,
    pub portfolio: PortfolioData,
}

impl TradingConfig {
    /// Portfolio setup saves under the guest account with the weekly period.
    pub fn guest(portfolio: PortfolioData) -> Self {
        Self {
            user_id: "guest_user".to_string(),
            period: "WEEKLY".to_string(),
            portfolio,
        }
    }
}

// ── Responses ──────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub user_id: String,
}

/// `{ok, error?, message?, ...}` returned by every auth endpoint.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct AuthEnvelope {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserInfo>,
}

impl AuthEnvelope {
    pub fn into_result(self) -> Result<Self, ServiceError> {
        if self.ok {
            Ok(self)
        } else {
            Err(ServiceError::Rejected(self.error.or(self.message)))
        }
    }
}

/// Decode an auth response body. Bodies that are not an envelope turn into
/// an HTTP error for non-2xx statuses and a decode error otherwise.
pub fn parse_envelope(status: u16, body: &str) -> Result<AuthEnvelope, ServiceError> {
    match serde_json::from_str::<AuthEnvelope>(body) {
        Ok(envelope) => envelope.into_result(),
        Err(_) if !(200..300).contains(&status) => Err(ServiceError::Http { status }),
        Err(e) => Err(e.into()),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<UserInfo>,
}

impl From<AuthEnvelope> for Session {
    fn from(env: AuthEnvelope) -> Self {
        Self {
            token: env.token,
            user: env.user,
        }
    }
}

/// `GET /calendar`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CalendarInfo {
    pub status: String,
    pub nepali_date: String,
    pub english_date: String,
    pub is_open: bool,
}

impl CalendarInfo {
    /// Header badge text, `"<english> | <nepali>"` with the nepali part cut
    /// at its first comma. `None` when there is no nepali date.
    pub fn badge(&self) -> Option<String> {
        if self.nepali_date.is_empty() {
            return None;
        }
        let nepali = self
            .nepali_date
            .split(',')
            .next()
            .unwrap_or(&self.nepali_date);
        Some(format!("{} | {}", self.english_date, nepali))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct Quote {
    #[serde(default)]
    pub ltp: Option<f64>,
    #[serde(default)]
    pub close: Option<f64>,
    #[serde(default)]
    pub pct_change: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ListedQuote {
    pub symbol: String,
    #[serde(flatten)]
    pub quote: Quote,
}

/// The feed has published quotes both keyed by symbol and as a list.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Quotes {
    BySymbol(HashMap<String, Quote>),
    List(Vec<ListedQuote>),
}

impl Default for Quotes {
    fn default() -> Self {
        Quotes::BySymbol(HashMap::new())
    }
}

/// `GET /market`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarketSnapshot {
    pub timestamp: String,
    pub stocks: Quotes,
}

impl MarketSnapshot {
    /// Last traded price for `symbol`. Missing and zero prices are `None`.
    pub fn ltp(&self, symbol: &str) -> Option<f64> {
        let quote = match &self.stocks {
            Quotes::BySymbol(map) => map.get(symbol),
            Quotes::List(list) => list
                .iter()
                .find(|q| q.symbol == symbol)
                .map(|q| &q.quote),
        };
        quote.and_then(|q| q.ltp).filter(|p| *p != 0.0 && p.is_finite())
    }

    pub fn len(&self) -> usize {
        match &self.stocks {
            Quotes::BySymbol(map) => map.len(),
            Quotes::List(list) => list.len(),
        }
    }
}

// ── Service seam ───────────────────────────────────────────────

/// Everything the app asks of the backend.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait InvestmentService: Send + Sync {
    async fn register(&self, req: &RegisterRequest) -> Result<AuthEnvelope, ServiceError>;

    async fn verify(&self, req: &VerifyRequest) -> Result<AuthEnvelope, ServiceError>;

    async fn login(&self, req: &LoginRequest) -> Result<Session, ServiceError>;

    async fn calendar(&self) -> Result<CalendarInfo, ServiceError>;

    async fn market(&self) -> Result<MarketSnapshot, ServiceError>;

    async fn save_trading_config(&self, config: &TradingConfig) -> Result<(), ServiceError>;
}

// ── Commands ───────────────────────────────────────────────────

/// A side effect requested by input handling or the clock.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Register(RegisterRequest),
    Verify(VerifyRequest),
    Login(LoginRequest),
    FetchCalendar,
    FetchMarket,
    SaveTradingConfig(TradingConfig),
}

/// Outcome of a [`Command`], applied back to the app.
#[derive(Debug)]
pub enum Reply {
    Registered(Result<AuthEnvelope, ServiceError>),
    Verified(Result<AuthEnvelope, ServiceError>),
    LoggedIn(Result<Session, ServiceError>),
    Calendar(Result<CalendarInfo, ServiceError>),
    Market(Result<MarketSnapshot, ServiceError>),
    TradingConfigSaved(Result<(), ServiceError>),
}

pub async fn run_command<S: InvestmentService + ?Sized>(service: &S, command: Command) -> Reply {
    let reply = match command {
        Command::Register(req) => Reply::Registered(service.register(&req).await),
        Command::Verify(req) => Reply::Verified(service.verify(&req).await),
        Command::Login(req) => Reply::LoggedIn(service.login(&req).await),
        Command::FetchCalendar => Reply::Calendar(service.calendar().await),
        Command::FetchMarket => Reply::Market(service.market().await),
        Command::SaveTradingConfig(cfg) => {
            Reply::TradingConfigSaved(service.save_trading_config(&cfg).await)
        }
    };
    if let Some(err) = reply.error() {
        log::warn!("{} failed: {err}", reply.name());
    }
    reply
}

impl Reply {
    fn name(&self) -> &'static str {
        match self {
            Reply::Registered(_) => "register",
            Reply::Verified(_) => "verify",
            Reply::LoggedIn(_) => "login",
            Reply::Calendar(_) => "calendar",
            Reply::Market(_) => "market",
            Reply::TradingConfigSaved(_) => "trading config",
        }
    }

    fn error(&self) -> Option<&ServiceError> {
        match self {
            Reply::Registered(r) | Reply::Verified(r) => r.as_ref().err(),
            Reply::LoggedIn(r) => r.as_ref().err(),
            Reply::Calendar(r) => r.as_ref().err(),
            Reply::Market(r) => r.as_ref().err(),
            Reply::TradingConfigSaved(r) => r.as_ref().err(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fake::FakeService;
    use super::*;

    #[test]
    fn envelope_ok_and_rejected() {
        let env = parse_envelope(200, r#"{"ok":true,"message":"Verification code sent to email"}"#)
            .unwrap();
        assert_eq!(env.message.as_deref(), Some("Verification code sent to email"));

        let err = parse_envelope(200, r#"{"ok":false,"error":"User already exists"}"#).unwrap_err();
        assert!(matches!(err, ServiceError::Rejected(Some(ref m)) if m == "User already exists"));
    }

    #[test]
    fn envelope_rejection_falls_back_to_message() {
        let err = parse_envelope(200, r#"{"ok":false,"message":"Email not verified"}"#).unwrap_err();
        assert_eq!(err.user_message("Invalid credentials."), "Email not verified");
    }

    #[test]
    fn envelope_on_error_status_is_still_read() {
        let err = parse_envelope(400, r#"{"ok":false,"error":"Invalid code"}"#).unwrap_err();
        assert!(matches!(err, ServiceError::Rejected(_)));
    }

    #[test]
    fn non_envelope_bodies() {
        assert!(matches!(
            parse_envelope(422, r#"{"detail":[{"msg":"field required"}]}"#),
            Err(ServiceError::Http { status: 422 })
        ));
        assert!(matches!(
            parse_envelope(200, "<html>"),
            Err(ServiceError::Decode(_))
        ));
    }

    #[test]
    fn login_envelope_carries_session() {
        let env = parse_envelope(
            200,
            r#"{"ok":true,"token":"token-abc","user":{"email":"a@b.np","name":"Ram Thapa","user_id":"abc"}}"#,
        )
        .unwrap();
        let session = Session::from(env);
        assert_eq!(session.token.as_deref(), Some("token-abc"));
        assert_eq!(session.user.unwrap().name.as_deref(), Some("Ram Thapa"));
    }

    #[test]
    fn market_snapshot_keyed_by_symbol() {
        let snap: MarketSnapshot = serde_json::from_str(
            r#"{"timestamp":"2024-07-26 12:00","stocks":{
                "NABIL":{"ltp":512.5,"close":500,"volume":1200,"pct_change":2.5,"time":"12:00"},
                "CHCL":{"ltp":0}}}"#,
        )
        .unwrap();
        assert_eq!(snap.len(), 2);
        assert_eq!(snap.ltp("NABIL"), Some(512.5));
        assert_eq!(snap.ltp("CHCL"), None);
        assert_eq!(snap.ltp("NICL"), None);
    }

    #[test]
    fn market_snapshot_as_list() {
        let snap: MarketSnapshot = serde_json::from_str(
            r#"{"timestamp":"t","stocks":[{"symbol":"NICL","ltp":880.0},{"symbol":"UPPER"}]}"#,
        )
        .unwrap();
        assert_eq!(snap.ltp("NICL"), Some(880.0));
        assert_eq!(snap.ltp("UPPER"), None);
    }

    #[test]
    fn market_error_body_is_empty_snapshot() {
        let snap: MarketSnapshot = serde_json::from_str(r#"{"error":"file locked"}"#).unwrap();
        assert_eq!(snap.len(), 0);
        let snap: MarketSnapshot = serde_json::from_str("{}").unwrap();
        assert_eq!(snap, MarketSnapshot::default());
    }

    #[test]
    fn calendar_badge() {
        let info = CalendarInfo {
            nepali_date: "2081 Shrawan 10, Friday".into(),
            english_date: "2024-07-26, Friday".into(),
            ..CalendarInfo::default()
        };
        assert_eq!(info.badge().as_deref(), Some("2024-07-26, Friday | 2081 Shrawan 10"));

        let no_comma = CalendarInfo {
            nepali_date: "2024 July 26 (AD)".into(),
            ..CalendarInfo::default()
        };
        assert_eq!(no_comma.badge().as_deref(), Some(" | 2024 July 26 (AD)"));

        assert_eq!(CalendarInfo::default().badge(), None);
    }

    #[test]
    fn trading_config_json_shape() {
        let cfg = TradingConfig::guest(PortfolioData::default());
        let v = serde_json::to_value(&cfg).unwrap();
        assert_eq!(v["user_id"], "guest_user");
        assert_eq!(v["period"], "WEEKLY");
        assert_eq!(v["portfolio"]["totalBudget"], 1_000_000.0);
        assert_eq!(v["portfolio"]["stocks"][0]["name"], "NABIL");
        assert_eq!(v["portfolio"]["stocks"][0]["targetSellPrice"], 110.0);
    }

    #[tokio::test]
    async fn run_command_routes_to_service() {
        let svc = FakeService {
            accounts: vec![("ram@example.com".into(), "secret".into())],
            ..FakeService::default()
        };
        let reply = run_command(
            &svc,
            Command::Login(LoginRequest {
                email: "ram@example.com".into(),
                password: "secret".into(),
            }),
        )
        .await;
        assert!(matches!(reply, Reply::LoggedIn(Ok(_))));

        let reply = run_command(&svc, Command::FetchCalendar).await;
        assert!(matches!(reply, Reply::Calendar(Ok(ref c)) if c.is_open));
    }

    #[tokio::test]
    async fn run_command_surfaces_network_errors() {
        let svc = FakeService {
            offline: true,
            ..FakeService::default()
        };
        let reply = run_command(&svc, Command::FetchMarket).await;
        assert!(matches!(reply, Reply::Market(Err(ServiceError::Network(_)))));
    }

    #[tokio::test]
    async fn trading_config_is_recorded() {
        let svc = FakeService::default();
        let cfg = TradingConfig::guest(PortfolioData::default());
        let reply = run_command(&svc, Command::SaveTradingConfig(cfg.clone())).await;
        assert!(matches!(reply, Reply::TradingConfigSaved(Ok(()))));
        assert_eq!(svc.saved.lock().unwrap().as_slice(), &[cfg]);
    }
}
