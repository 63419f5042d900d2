//! Horizon API Request/Response Types
//!
//! Serialization types for the Horizon REST API plus the conversions
//! into domain types. Horizon reports every price and amount as a
//! decimal string; parsing to `Decimal` happens here so nothing
//! downstream ever touches a float.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::domain::asset::Asset;
use crate::domain::error::{SubmissionError, TradeError};
use crate::ports::ledger::OfferRecord;

/// Parse a decimal string, naming the field in the failure.
pub fn parse_decimal(raw: &str, field: &str) -> Result<Decimal, TradeError> {
    raw.parse::<Decimal>().map_err(|e| {
        TradeError::MalformedAmountOrPrice(format!("{field} {raw:?} is not a decimal: {e}"))
    })
}

/// Query parameters identifying one asset, with the given prefix
/// (`selling` or `buying`), in Horizon's three-field convention.
pub fn asset_query(prefix: &str, asset: &Asset) -> Vec<(String, String)> {
    match asset {
        Asset::Native => vec![(format!("{prefix}_asset_type"), "native".to_string())],
        Asset::Issued { code, issuer } => {
            let asset_type = if code.len() <= 4 {
                "credit_alphanum4"
            } else {
                "credit_alphanum12"
            };
            vec![
                (format!("{prefix}_asset_type"), asset_type.to_string()),
                (format!("{prefix}_asset_code"), code.clone()),
                (format!("{prefix}_asset_issuer"), issuer.clone()),
            ]
        }
    }
}

/// One order-book level as Horizon reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelDto {
    pub price: String,
    pub amount: String,
}

/// Order-book response.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderBookDto {
    pub bids: Vec<LevelDto>,
    pub asks: Vec<LevelDto>,
}

/// Account response; only the sequence number matters here.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountDto {
    pub sequence: String,
}

/// Asset identity in Horizon's three-field convention.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetDto {
    pub asset_type: String,
    pub asset_code: Option<String>,
    pub asset_issuer: Option<String>,
}

impl TryFrom<AssetDto> for Asset {
    type Error = TradeError;

    fn try_from(dto: AssetDto) -> Result<Self, Self::Error> {
        if dto.asset_type == "native" {
            return Ok(Asset::Native);
        }
        match (dto.asset_code, dto.asset_issuer) {
            (Some(code), Some(issuer)) => Asset::issued(code, issuer),
            _ => Err(TradeError::InvalidAssetPair(format!(
                "issued asset of type {} is missing code or issuer",
                dto.asset_type
            ))),
        }
    }
}

/// A resting offer as Horizon reports it.
#[derive(Debug, Clone, Deserialize)]
pub struct OfferDto {
    pub id: String,
    pub seller: String,
    pub selling: AssetDto,
    pub buying: AssetDto,
    pub amount: String,
    pub price: String,
    pub last_modified_ledger: u64,
}

impl TryFrom<OfferDto> for OfferRecord {
    type Error = TradeError;

    fn try_from(dto: OfferDto) -> Result<Self, Self::Error> {
        let id = dto.id.parse::<u64>().map_err(|e| {
            TradeError::Transport(format!("offer id {:?} is not numeric: {e}", dto.id))
        })?;
        Ok(OfferRecord {
            id,
            seller: dto.seller,
            selling: dto.selling.try_into()?,
            buying: dto.buying.try_into()?,
            amount: parse_decimal(&dto.amount, "offer amount")?,
            price: parse_decimal(&dto.price, "offer price")?,
            last_modified_ledger: dto.last_modified_ledger,
        })
    }
}

/// Paged collection wrapper used by the offers endpoint.
#[derive(Debug, Deserialize)]
pub struct EmbeddedDto<T> {
    #[serde(rename = "_embedded")]
    pub embedded: RecordsDto<T>,
}

#[derive(Debug, Deserialize)]
pub struct RecordsDto<T> {
    pub records: Vec<T>,
}

/// Successful submission response.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitOkDto {
    pub hash: String,
    pub ledger: u64,
    #[serde(default = "default_true")]
    pub successful: bool,
}

fn default_true() -> bool {
    true
}

/// Rejection payload attached to a failed submission.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitErrorDto {
    pub title: Option<String>,
    pub detail: Option<String>,
    pub extras: Option<ExtrasDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtrasDto {
    pub result_codes: Option<ResultCodesDto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResultCodesDto {
    pub transaction: Option<String>,
    pub operations: Option<Vec<String>>,
}

/// Map a rejection body to its structured subkind, keeping the raw
/// payload as the diagnostic.
pub fn map_rejection(body: &str) -> SubmissionError {
    let diagnostic = body.to_string();

    let Ok(parsed) = serde_json::from_str::<SubmitErrorDto>(body) else {
        return SubmissionError::Rejected {
            codes: "unparsable".to_string(),
            diagnostic,
        };
    };

    let codes = parsed.extras.and_then(|e| e.result_codes);
    let tx_code = codes
        .as_ref()
        .and_then(|c| c.transaction.clone())
        .unwrap_or_default();
    let op_codes = codes.and_then(|c| c.operations).unwrap_or_default();

    if op_codes.iter().any(|c| c == "op_underfunded") {
        SubmissionError::Underfunded { diagnostic }
    } else if op_codes.iter().any(|c| c == "op_cross_self") {
        SubmissionError::SelfTrade { diagnostic }
    } else if tx_code == "tx_bad_seq" {
        SubmissionError::StaleSequence { diagnostic }
    } else {
        let mut all_codes = vec![tx_code];
        all_codes.extend(op_codes);
        all_codes.retain(|c| !c.is_empty());
        SubmissionError::Rejected {
            codes: all_codes.join(","),
            diagnostic,
        }
    }
}

/// Fee-stats response.
#[derive(Debug, Clone, Deserialize)]
pub struct FeeStatsDto {
    pub last_ledger_base_fee: String,
    pub fee_charged: FeeChargedDto,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeeChargedDto {
    pub min: String,
    pub max: String,
}

/// Root endpoint response, used for status probes.
#[derive(Debug, Clone, Deserialize)]
pub struct RootDto {
    pub horizon_version: String,
    pub core_version: String,
    pub history_latest_ledger: u64,
    pub network_passphrase: String,
}
