//! User-Agent 解析
//!
//! 按固定优先级的规则表做大小写无关的子串匹配：
//! - 浏览器：Edge → Chrome → Firefox → Safari
//! - 设备：mobile → tablet，都不匹配时为 desktop
//! - 系统：Windows → macOS → Linux → Android → iOS
//!
//! 规则顺序决定分类结果，调整顺序会改变历史流量的归类。

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

pub const UNKNOWN: &str = "Unknown";

/// 设备类型
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DeviceType {
    #[default]
    Desktop,
    Mobile,
    Tablet,
}

/// 解析结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUserAgent {
    pub browser_name: String,
    /// Major version only, empty when not found
    pub browser_version: String,
    pub device_type: DeviceType,
    pub operating_system: String,
}

struct BrowserRule {
    name: &'static str,
    needle: &'static str,
    /// Marker preceding the major version, e.g. `chrome/`
    version_marker: &'static str,
}

const BROWSER_RULES: &[BrowserRule] = &[
    BrowserRule {
        name: "Edge",
        needle: "edg",
        version_marker: "edg/",
    },
    BrowserRule {
        name: "Chrome",
        needle: "chrome",
        version_marker: "chrome/",
    },
    BrowserRule {
        name: "Firefox",
        needle: "firefox",
        version_marker: "firefox/",
    },
    BrowserRule {
        name: "Safari",
        needle: "safari",
        version_marker: "version/",
    },
];

const DEVICE_RULES: &[(DeviceType, &[&str])] = &[
    (DeviceType::Mobile, &["mobile", "android", "iphone"]),
    (DeviceType::Tablet, &["tablet", "ipad"]),
];

const OS_RULES: &[(&str, &[&str])] = &[
    ("Windows", &["windows"]),
    ("macOS", &["mac os", "macos"]),
    ("Linux", &["linux"]),
    ("Android", &["android"]),
    ("iOS", &["ios", "iphone", "ipad"]),
];

/// 解析 User-Agent
///
/// Every agent without a mobile or tablet marker is a desktop, including an
/// empty string and the `Unknown` placeholder.
pub fn parse_user_agent(user_agent: &str) -> ParsedUserAgent {
    let ua = user_agent.trim().to_lowercase();

    let (browser_name, browser_version) = BROWSER_RULES
        .iter()
        .find(|rule| ua.contains(rule.needle))
        .map(|rule| {
            (
                rule.name.to_string(),
                major_version_after(&ua, rule.version_marker).unwrap_or_default(),
            )
        })
        .unwrap_or_else(|| (UNKNOWN.to_string(), String::new()));

    let device_type = DEVICE_RULES
        .iter()
        .find(|(_, needles)| needles.iter().any(|n| ua.contains(n)))
        .map(|(device, _)| *device)
        .unwrap_or(DeviceType::Desktop);

    let operating_system = OS_RULES
        .iter()
        .find(|(_, needles)| needles.iter().any(|n| ua.contains(n)))
        .map(|(os, _)| os.to_string())
        .unwrap_or_else(|| UNKNOWN.to_string());

    ParsedUserAgent {
        browser_name,
        browser_version,
        device_type,
        operating_system,
    }
}

/// 取 marker 之后的连续数字
fn major_version_after(ua: &str, marker: &str) -> Option<String> {
    let start = ua.find(marker)? + marker.len();
    let digits: String = ua[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    (!digits.is_empty()).then_some(digits)
}
