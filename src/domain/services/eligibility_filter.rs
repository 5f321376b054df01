// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

static MONTH_DAY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})/(\d{1,2})").expect("Failed to compile month/day regex"));

/// 无固定截止日期（常年招聘、招满即止）
const ONGOING_MARKERS: &[&str] = &["상시", "채용시", "ongoing", "rolling"];

/// 今天或明天截止
const IMMINENT_MARKERS: &[&str] = &["오늘", "내일", "today", "tomorrow"];

const RANGE_MARKER: char = '~';

/// 截止日期年份推断规则
///
/// 公告只给出 `月/日`。月份小于 `rollover_month` 视为 `base_year + 1` 年，
/// 否则视为 `base_year` 年。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearInference {
    pub base_year: i32,
    pub rollover_month: u32,
}

impl YearInference {
    /// 以截止基准日的前一年为基准年、6 月为分界
    pub fn for_cutoff(cutoff: NaiveDate) -> Self {
        Self {
            base_year: cutoff.year() - 1,
            rollover_month: 6,
        }
    }

    pub fn infer_year(&self, month: u32) -> i32 {
        if month < self.rollover_month {
            self.base_year + 1
        } else {
            self.base_year
        }
    }
}

/// 公告资格过滤器
///
/// 按顺序应用规则，首个命中的规则决定结果：
/// 1. 含常年招聘标记 → 合格
/// 2. 含今天/明天标记 → 不合格
/// 3. 含 `~` 且带有 `月/日` → 推断年份后与截止基准日比较（相等视为合格）
/// 4. 任何解析失败 → 合格
/// 5. 无匹配规则 → 合格
///
/// 对含糊的输入宁可放行，也不丢弃可能有效的公告。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityFilter {
    cutoff: NaiveDate,
    inference: YearInference,
}

impl EligibilityFilter {
    pub fn new(cutoff: NaiveDate, inference: YearInference) -> Self {
        Self { cutoff, inference }
    }

    pub fn with_default_inference(cutoff: NaiveDate) -> Self {
        Self::new(cutoff, YearInference::for_cutoff(cutoff))
    }

    pub fn cutoff(&self) -> NaiveDate {
        self.cutoff
    }

    pub fn inference(&self) -> YearInference {
        self.inference
    }

    /// 判断截止日期文本是否仍然有效
    pub fn is_eligible(&self, deadline_text: &str) -> bool {
        let text = deadline_text.to_lowercase();

        if ONGOING_MARKERS.iter().any(|marker| text.contains(marker)) {
            return true;
        }

        if IMMINENT_MARKERS.iter().any(|marker| text.contains(marker)) {
            return false;
        }

        if text.contains(RANGE_MARKER) {
            return match self.parse_range_deadline(&text) {
                Some(deadline) => deadline >= self.cutoff,
                None => true,
            };
        }

        true
    }

    /// 从 `~ MM/DD` 形式的文本中解析截止日期
    pub fn parse_range_deadline(&self, text: &str) -> Option<NaiveDate> {
        let captures = MONTH_DAY_PATTERN.captures(text)?;
        let month: u32 = captures.get(1)?.as_str().parse().ok()?;
        let day: u32 = captures.get(2)?.as_str().parse().ok()?;

        NaiveDate::from_ymd_opt(self.inference.infer_year(month), month, day)
    }
}

/// 使用默认年份推断规则判断截止日期文本是否有效
pub fn is_eligible(deadline_text: &str, cutoff: NaiveDate) -> bool {
    EligibilityFilter::with_default_inference(cutoff).is_eligible(deadline_text)
}
