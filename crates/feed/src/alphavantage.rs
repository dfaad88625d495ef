use async_trait::async_trait;
use intraday_core::common::Instrument;
use intraday_core::config::ProviderConfig;
use intraday_core::feed::error::FeedError;
use intraday_core::feed::port::{ProviderResponse, QuoteSource};
use intraday_core::quote::entity::RawTimeSeries;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// # Summary
/// Alpha Vantage 行情提供者实现。
///
/// # Invariants
/// - 使用 `reqwest` 异步客户端，不设置超时 (请求挂起时看板停留在加载状态)。
/// - 标的、查询函数与 API Key 均来自构造时注入的 `ProviderConfig`。
#[derive(Clone)]
pub struct AlphaVantageProvider {
    client: Client,
    config: ProviderConfig,
    instrument: Instrument,
}

impl AlphaVantageProvider {
    /// # Summary
    /// 创建 AlphaVantageProvider。
    ///
    /// # Logic
    /// 1. 确保 rustls 已安装默认加密后端。
    /// 2. 设置浏览器 User-Agent 并构建客户端。
    ///
    /// # Arguments
    /// * `config`: 行情源配置。
    ///
    /// # Returns
    /// 成功返回实例，客户端构建失败返回 `FeedError::Network`。
    pub fn new(config: ProviderConfig) -> Result<Self, FeedError> {
        ensure_crypto_provider();

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| FeedError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            instrument: Instrument::new(config.symbol.clone()),
            config,
        })
    }
}

// reqwest 以 rustls-no-provider 方式编译，需要进程级默认后端
fn ensure_crypto_provider() {
    if rustls::crypto::CryptoProvider::get_default().is_none()
        && rustls::crypto::ring::default_provider()
            .install_default()
            .is_err()
    {
        debug!("rustls crypto provider installed concurrently");
    }
}

/// # Summary
/// Alpha Vantage 查询接口的响应体。
///
/// # Invariants
/// - 成功与配额耗尽都以 HTTP 200 返回，只能依据字段区分。
/// - 配额提示出现在 `Information` (新版) 或 `Note` (旧版) 字段。
#[derive(Deserialize, Debug)]
pub(crate) struct AlphaVantagePayload {
    #[serde(rename = "Information")]
    pub(crate) information: Option<String>,
    #[serde(rename = "Note")]
    pub(crate) note: Option<String>,
    #[serde(rename = "Error Message")]
    pub(crate) error_message: Option<String>,
    #[serde(rename = "Time Series (5min)")]
    pub(crate) time_series: Option<RawTimeSeries>,
}

impl AlphaVantagePayload {
    /// # Summary
    /// 将响应体判别为 `ProviderResponse`。
    ///
    /// # Logic
    /// 1. 存在配额提示 → `QuotaExceeded`。
    /// 2. 存在 5 分钟时间序列 → `Success`。
    /// 3. 存在错误信息 → `FeedError::Provider`。
    /// 4. 其余 → `FeedError::Parse`。
    pub(crate) fn classify(self) -> Result<ProviderResponse, FeedError> {
        if let Some(info) = self.information.or(self.note) {
            return Ok(ProviderResponse::QuotaExceeded(info));
        }
        if let Some(series) = self.time_series {
            return Ok(ProviderResponse::Success(series));
        }
        match self.error_message {
            Some(msg) => Err(FeedError::Provider(msg)),
            None => Err(FeedError::Parse(
                "response has neither time series nor information".into(),
            )),
        }
    }
}

#[async_trait]
impl QuoteSource for AlphaVantageProvider {
    fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    /// # Summary
    /// 从 Alpha Vantage 拉取日内行情。
    ///
    /// # Logic
    /// 1. 构建 `function`、`symbol`、`apikey` 查询参数。
    /// 2. 发起一次 GET 请求，传输失败映射为 `Network`，非 2xx 映射为 `Status`。
    /// 3. 解析 JSON 并按字段判别响应类型。
    ///
    /// # Returns
    /// 成功返回 `ProviderResponse`，失败返回 `FeedError`。
    async fn fetch(&self) -> Result<ProviderResponse, FeedError> {
        debug!(
            "GET {} function={} symbol={}",
            self.config.base_url, self.config.function, self.config.symbol
        );

        let resp = self
            .client
            .get(&self.config.base_url)
            .query(&[
                ("function", self.config.function.as_str()),
                ("symbol", self.config.symbol.as_str()),
                ("apikey", self.config.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(FeedError::Status(resp.status().as_u16()));
        }

        let payload: AlphaVantagePayload = resp
            .json()
            .await
            .map_err(|e| FeedError::Parse(e.to_string()))?;

        payload.classify()
    }
}
