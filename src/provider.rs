// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;

use crate::utils::http_client;

/// One daily price observation for an instrument.
#[derive(Debug, Clone)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

/// External market-data source consumed by buy classification.
///
/// The ledger and the scoring functions never touch this; callers that want
/// auto-classification construct one and hand it to `classify`.
pub trait PriceProvider {
    /// Daily bars for `code` in `[start, end]`, ordered by date ascending.
    fn daily_bars(&self, code: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<DailyBar>>;

    /// Display name for an instrument code, if the provider knows it.
    fn instrument_name(&self, code: &str) -> Result<Option<String>>;
}

const TUSHARE_URL: &str = "http://api.tushare.pro";

/// Client for the Tushare Pro JSON API (token in the request body).
pub struct TushareClient {
    token: String,
    client: reqwest::blocking::Client,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    code: i64,
    msg: Option<String>,
    data: Option<ApiData>,
}

#[derive(Debug, Deserialize)]
struct ApiData {
    fields: Vec<String>,
    items: Vec<Vec<serde_json::Value>>,
}

impl TushareClient {
    pub fn new(token: &str) -> Result<Self> {
        Ok(TushareClient {
            token: token.to_string(),
            client: http_client()?,
        })
    }

    fn call(&self, api_name: &str, params: serde_json::Value, fields: &str) -> Result<ApiData> {
        let body = json!({
            "api_name": api_name,
            "token": self.token,
            "params": params,
            "fields": fields,
        });
        let resp = self
            .client
            .post(TUSHARE_URL)
            .json(&body)
            .send()?
            .error_for_status()?;
        let api: ApiResponse = resp.json()?;
        if api.code != 0 {
            return Err(anyhow!(
                "tushare '{}' failed: {}",
                api_name,
                api.msg.unwrap_or_else(|| format!("code {}", api.code))
            ));
        }
        api.data
            .ok_or_else(|| anyhow!("tushare '{}' returned no data", api_name))
    }
}

impl PriceProvider for TushareClient {
    fn daily_bars(&self, code: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<DailyBar>> {
        let params = json!({
            "ts_code": normalize_code(code),
            "start_date": start.format("%Y%m%d").to_string(),
            "end_date": end.format("%Y%m%d").to_string(),
        });
        let data = self.call("daily", params, "trade_date,open,high,low,close,vol")?;

        let idx = |name: &str| -> Result<usize> {
            data.fields
                .iter()
                .position(|f| f == name)
                .with_context(|| format!("tushare response missing field '{}'", name))
        };
        let (i_date, i_open, i_high, i_low, i_close, i_vol) = (
            idx("trade_date")?,
            idx("open")?,
            idx("high")?,
            idx("low")?,
            idx("close")?,
            idx("vol")?,
        );

        let mut bars = Vec::with_capacity(data.items.len());
        for item in &data.items {
            let date_s = item
                .get(i_date)
                .and_then(|v| v.as_str())
                .context("tushare row missing trade_date")?;
            let date = NaiveDate::parse_from_str(date_s, "%Y%m%d")
                .with_context(|| format!("Invalid trade_date '{}'", date_s))?;
            bars.push(DailyBar {
                date,
                open: cell_decimal(item, i_open)?,
                high: cell_decimal(item, i_high)?,
                low: cell_decimal(item, i_low)?,
                close: cell_decimal(item, i_close)?,
                volume: cell_decimal(item, i_vol)?,
            });
        }
        // Tushare returns newest-first
        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }

    fn instrument_name(&self, code: &str) -> Result<Option<String>> {
        let params = json!({ "ts_code": normalize_code(code) });
        let data = self.call("stock_basic", params, "ts_code,name")?;
        let i_name = data
            .fields
            .iter()
            .position(|f| f == "name")
            .context("tushare response missing field 'name'")?;
        Ok(data
            .items
            .first()
            .and_then(|row| row.get(i_name))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string()))
    }
}

fn cell_decimal(item: &[serde_json::Value], idx: usize) -> Result<Decimal> {
    let v = item.get(idx).context("tushare row too short")?;
    match v {
        serde_json::Value::Number(n) => n
            .as_f64()
            .and_then(Decimal::from_f64)
            .with_context(|| format!("Invalid numeric cell '{}'", n)),
        serde_json::Value::String(s) => s
            .parse::<Decimal>()
            .with_context(|| format!("Invalid numeric cell '{}'", s)),
        other => Err(anyhow!("Unexpected cell '{}'", other)),
    }
}

/// Map a bare 6-digit A-share code onto its exchange suffix: Shanghai
/// listings start with 6, everything else trades in Shenzhen.
pub fn normalize_code(code: &str) -> String {
    let bare: String = code.chars().filter(|c| *c != '.').collect();
    if bare.len() == 6 && bare.chars().all(|c| c.is_ascii_digit()) {
        if bare.starts_with('6') {
            return format!("{}.SH", bare);
        }
        return format!("{}.SZ", bare);
    }
    code.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_bare_codes() {
        assert_eq!(normalize_code("600000"), "600000.SH");
        assert_eq!(normalize_code("000001"), "000001.SZ");
        assert_eq!(normalize_code("300750"), "300750.SZ");
    }

    #[test]
    fn normalize_leaves_suffixed_codes_alone() {
        assert_eq!(normalize_code("000001.SZ"), "000001.SZ");
        assert_eq!(normalize_code("AAPL"), "AAPL");
    }
}
