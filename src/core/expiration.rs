use std::str::FromStr;
use serde::{Deserialize, Serialize};
use super::errors::UploadError;

/// litterbox 支持的过期时间
///
/// 封闭枚举：标签在解析边界就被校验，未知字符串不可能流到请求层。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Expiration {
    OneHour,
    TwelveHours,
    OneDay,
    ThreeDays,
}

impl Expiration {
    /// litterbox API `time` 字段的取值
    pub fn as_token(&self) -> &'static str {
        match self {
            Expiration::OneHour => "1h",
            Expiration::TwelveHours => "12h",
            Expiration::OneDay => "24h",
            Expiration::ThreeDays => "72h",
        }
    }

    /// 界面显示用的标签
    pub fn label(&self) -> &'static str {
        match self {
            Expiration::OneHour => "1 hour",
            Expiration::TwelveHours => "12 hours",
            Expiration::OneDay => "1 day",
            Expiration::ThreeDays => "3 days",
        }
    }

    /// 全部可选值，按过期时间从短到长
    pub const ALL: [Expiration; 4] = [
        Expiration::OneHour,
        Expiration::TwelveHours,
        Expiration::OneDay,
        Expiration::ThreeDays,
    ];
}

impl FromStr for Expiration {
    type Err = UploadError;

    /// 标签（"1 hour"）和令牌（"1h"）两种写法都接受
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1 hour" | "1h" => Ok(Expiration::OneHour),
            "12 hours" | "12h" => Ok(Expiration::TwelveHours),
            "1 day" | "24h" => Ok(Expiration::OneDay),
            "3 days" | "72h" => Ok(Expiration::ThreeDays),
            other => Err(UploadError::invalid_params(format!(
                "unknown expiration '{other}'"
            ))),
        }
    }
}

impl TryFrom<String> for Expiration {
    type Error = UploadError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Expiration> for String {
    fn from(expiration: Expiration) -> String {
        expiration.as_token().to_string()
    }
}

impl std::fmt::Display for Expiration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_token())
    }
}
